//! Ripple propagation — predicts cascading effects of a narrative mutation.
//!
//! Given a mutation card and the beat collection, the engine synthesizes
//! effects across three orders of influence: direct beat impact (1),
//! character arc and relationship web (2), thematic and atmospheric shifts
//! (3). Beat matching is a string heuristic; the causality-edge graph is
//! accepted for future traversal-based propagation but not yet consulted.

use tracing::debug;

use sbeat_models::{
    Beat, CausalityGraph, Magnitude, MutationCard, RippleEffect, RipplePreview, RippleType,
};

use crate::text::{title_case, truncate_chars};

/// Hard cap on effects returned per mutation.
const MAX_EFFECTS: usize = 5;

/// Matching beats considered before the effect cut.
const MAX_BEAT_MATCHES: usize = 5;

/// Matching beats that become order-1 effects.
const MAX_BEAT_EFFECTS: usize = 3;

/// Characters of beat summary quoted in an effect description.
const SUMMARY_QUOTE_CHARS: usize = 50;

/// Taboo tags named in the thematic effect.
const MAX_THEME_TAGS: usize = 3;

/// Mutation types that disturb the relationship web.
const RELATIONSHIP_MUTATION_TYPES: &[&str] = &["intensify", "transform"];

/// Predicts downstream effects of a proposed narrative mutation.
#[derive(Debug, Clone, Default)]
pub struct RippleEngine;

impl RippleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Build the full ripple preview for one mutation card.
    pub fn preview(
        &self,
        card: &MutationCard,
        graph: &CausalityGraph,
        beats: &[Beat],
    ) -> RipplePreview {
        RipplePreview {
            ripple_id: format!("ripple_{}", card.card_id),
            source_card: card.card_id.clone(),
            source_title: card.title.clone(),
            change_summary: card.hook.clone(),
            ripples: self.propagate(card, graph, beats),
        }
    }

    /// Propagate a mutation into at most five effects, ascending by order
    /// and then by generation sequence.
    pub fn propagate(
        &self,
        card: &MutationCard,
        graph: &CausalityGraph,
        beats: &[Beat],
    ) -> Vec<RippleEffect> {
        let mut effects: Vec<RippleEffect> = Vec::new();

        // Order 1: direct impact on matching beats.
        let matched: Vec<&Beat> = beats
            .iter()
            .filter(|beat| beat_matches(card, beat))
            .take(MAX_BEAT_MATCHES)
            .collect();
        for (i, beat) in matched.iter().take(MAX_BEAT_EFFECTS).enumerate() {
            effects.push(RippleEffect {
                order: 1,
                effect_type: RippleType::BeatImpact,
                target: beat.id.clone(),
                target_type: "beat".to_string(),
                effect: format!(
                    "Beat '{}...' takes on darker tone",
                    truncate_chars(&beat.summary, SUMMARY_QUOTE_CHARS)
                ),
                magnitude: if i == 0 {
                    Magnitude::Significant
                } else {
                    Magnitude::Moderate
                },
            });
        }

        // Order 2: character arc.
        if card.source_element.contains("character") {
            effects.push(RippleEffect {
                order: 2,
                effect_type: RippleType::CharacterArc,
                target: card.source_element.clone(),
                target_type: "character".to_string(),
                effect: format!(
                    "{}'s development shifts toward darker themes",
                    title_case(&card.source_element)
                ),
                magnitude: Magnitude::Significant,
            });
        }

        // Order 2: relationship web.
        if RELATIONSHIP_MUTATION_TYPES.contains(&card.mutation_type.as_str()) {
            effects.push(RippleEffect {
                order: 2,
                effect_type: RippleType::RelationshipWeb,
                target: format!("{}_relationships", card.source_element),
                target_type: "relationship_web".to_string(),
                effect: format!(
                    "Relationships involving {} intensify and grow more complicated",
                    title_case(&card.source_element)
                ),
                magnitude: Magnitude::Moderate,
            });
        }

        // Order 3: thematic impact.
        if !card.taboo_potential.is_empty() {
            let named: Vec<&str> = card
                .taboo_potential
                .iter()
                .take(MAX_THEME_TAGS)
                .map(String::as_str)
                .collect();
            effects.push(RippleEffect {
                order: 3,
                effect_type: RippleType::ThematicShift,
                target: "themes".to_string(),
                target_type: "theme".to_string(),
                effect: format!("Themes of {} move toward the foreground", named.join(", ")),
                magnitude: if card.taboo_potential.len() > 2 {
                    Magnitude::Significant
                } else {
                    Magnitude::Moderate
                },
            });
        }

        // Order 3: atmosphere shift.
        if card.intensity_increase >= 3 {
            effects.push(RippleEffect {
                order: 3,
                effect_type: RippleType::AtmosphereShift,
                target: "atmosphere".to_string(),
                target_type: "atmosphere".to_string(),
                effect: "Overall atmosphere shifts darker and more charged".to_string(),
                magnitude: if card.intensity_increase >= 4 {
                    Magnitude::Significant
                } else {
                    Magnitude::Moderate
                },
            });
        }

        effects.truncate(MAX_EFFECTS);

        debug!(
            card_id = %card.card_id,
            source_element = %card.source_element,
            matched_beats = matched.len(),
            edges = graph.edges.len(),
            effects = effects.len(),
            "Propagated mutation"
        );

        effects
    }
}

/// Loose beat match: the source element as a substring of any character
/// identifier, else (underscores stripped, case-insensitive) as a substring
/// of the joined content types.
fn beat_matches(card: &MutationCard, beat: &Beat) -> bool {
    let source = card.source_element.as_str();
    if beat.characters.iter().any(|c| c.contains(source)) {
        return true;
    }
    let stripped = source.replace('_', "").to_lowercase();
    if stripped.is_empty() {
        return false;
    }
    beat.content_types.join(" ").to_lowercase().contains(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beat_with(id: &str, characters: Vec<&str>, content_types: Vec<&str>) -> Beat {
        Beat {
            id: id.to_string(),
            episode_id: "ep01".to_string(),
            start: "0:00:00".to_string(),
            end: "0:01:00".to_string(),
            start_seconds: 0.0,
            end_seconds: 60.0,
            characters: characters.into_iter().map(String::from).collect(),
            location: "mansion".to_string(),
            summary: "Feeding: Kiara lingers at the threshold".to_string(),
            intensity: 3,
            content_types: content_types.into_iter().map(String::from).collect(),
            moment_timestamps: vec!["0:00:00".to_string()],
        }
    }

    fn kiara_card() -> MutationCard {
        MutationCard {
            card_id: "card_007".to_string(),
            title: "The Hunger Turns".to_string(),
            hook: "What if the feeding bond inverted?".to_string(),
            source_element: "character_kiara".to_string(),
            mutation_type: "intensify".to_string(),
            intensity_increase: 4,
            taboo_potential: vec![
                "incest".to_string(),
                "coercion".to_string(),
                "blood".to_string(),
            ],
        }
    }

    #[test]
    fn test_canonical_card_produces_five_ordered_effects() {
        let beats = vec![beat_with("ep01_beat_001", vec!["character_kiara"], vec!["feeding"])];
        let effects = RippleEngine::new().propagate(&kiara_card(), &CausalityGraph::default(), &beats);

        assert_eq!(effects.len(), 5);
        assert_eq!(effects[0].order, 1);
        assert_eq!(effects[0].effect_type, RippleType::BeatImpact);
        assert_eq!(effects[0].magnitude, Magnitude::Significant);

        assert_eq!(effects[1].order, 2);
        assert_eq!(effects[1].effect_type, RippleType::CharacterArc);
        assert!(effects[1].effect.starts_with("Character Kiara"));

        assert_eq!(effects[2].order, 2);
        assert_eq!(effects[2].effect_type, RippleType::RelationshipWeb);
        assert_eq!(effects[2].target, "character_kiara_relationships");

        assert_eq!(effects[3].order, 3);
        assert_eq!(effects[3].effect_type, RippleType::ThematicShift);
        assert!(effects[3].effect.contains("incest, coercion, blood"));
        assert_eq!(effects[3].magnitude, Magnitude::Significant);

        assert_eq!(effects[4].order, 3);
        assert_eq!(effects[4].effect_type, RippleType::AtmosphereShift);
        assert_eq!(effects[4].magnitude, Magnitude::Significant);
    }

    #[test]
    fn test_never_more_than_five_effects() {
        // Three matching beats push the synthesized total past the cap.
        let beats: Vec<Beat> = (1..=4)
            .map(|i| {
                beat_with(
                    &format!("ep01_beat_{:03}", i),
                    vec!["character_kiara"],
                    vec!["feeding"],
                )
            })
            .collect();
        let effects = RippleEngine::new().propagate(&kiara_card(), &CausalityGraph::default(), &beats);

        assert_eq!(effects.len(), 5);
        let orders: Vec<u8> = effects.iter().map(|e| e.order).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);
        // Only the first three matches become beat effects.
        assert_eq!(effects.iter().filter(|e| e.order == 1).count(), 3);
    }

    #[test]
    fn test_first_beat_effect_is_significant_rest_moderate() {
        let beats: Vec<Beat> = (1..=3)
            .map(|i| {
                beat_with(
                    &format!("ep01_beat_{:03}", i),
                    vec!["character_kiara"],
                    vec![],
                )
            })
            .collect();
        let card = MutationCard {
            mutation_type: "invert".to_string(),
            intensity_increase: 0,
            taboo_potential: vec![],
            source_element: "kiara".to_string(),
            ..kiara_card()
        };
        let effects = RippleEngine::new().propagate(&card, &CausalityGraph::default(), &beats);

        // "kiara" is a substring of "character_kiara"; no other step fires.
        assert_eq!(effects.len(), 3);
        assert_eq!(effects[0].magnitude, Magnitude::Significant);
        assert_eq!(effects[1].magnitude, Magnitude::Moderate);
        assert_eq!(effects[2].magnitude, Magnitude::Moderate);
    }

    #[test]
    fn test_content_type_fallback_match_strips_underscores() {
        let beats = vec![beat_with("ep01_beat_001", vec![], vec!["powerstruggle"])];
        let card = MutationCard {
            source_element: "power_struggle".to_string(),
            mutation_type: "invert".to_string(),
            intensity_increase: 0,
            taboo_potential: vec![],
            ..kiara_card()
        };
        let effects = RippleEngine::new().propagate(&card, &CausalityGraph::default(), &beats);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].effect_type, RippleType::BeatImpact);
    }

    #[test]
    fn test_no_matching_beats_skips_order_one() {
        let beats = vec![beat_with("ep01_beat_001", vec!["dante"], vec!["violence"])];
        let effects = RippleEngine::new().propagate(&kiara_card(), &CausalityGraph::default(), &beats);

        assert!(effects.iter().all(|e| e.order >= 2));
        assert_eq!(effects.len(), 4);
    }

    #[test]
    fn test_two_taboo_tags_are_moderate() {
        let card = MutationCard {
            taboo_potential: vec!["blood".to_string(), "coercion".to_string()],
            ..kiara_card()
        };
        let effects = RippleEngine::new().propagate(&card, &CausalityGraph::default(), &[]);
        let thematic = effects
            .iter()
            .find(|e| e.effect_type == RippleType::ThematicShift)
            .unwrap();
        assert_eq!(thematic.magnitude, Magnitude::Moderate);
    }

    #[test]
    fn test_thematic_effect_names_at_most_three_tags() {
        let card = MutationCard {
            taboo_potential: vec![
                "incest".to_string(),
                "coercion".to_string(),
                "blood".to_string(),
                "grief".to_string(),
            ],
            ..kiara_card()
        };
        let effects = RippleEngine::new().propagate(&card, &CausalityGraph::default(), &[]);
        let thematic = effects
            .iter()
            .find(|e| e.effect_type == RippleType::ThematicShift)
            .unwrap();
        assert!(thematic.effect.contains("incest, coercion, blood"));
        assert!(!thematic.effect.contains("grief"));
    }

    #[test]
    fn test_atmosphere_thresholds() {
        let engine = RippleEngine::new();
        let graph = CausalityGraph::default();

        let at3 = MutationCard {
            intensity_increase: 3,
            ..kiara_card()
        };
        let effects = engine.propagate(&at3, &graph, &[]);
        let atmosphere = effects
            .iter()
            .find(|e| e.effect_type == RippleType::AtmosphereShift)
            .unwrap();
        assert_eq!(atmosphere.magnitude, Magnitude::Moderate);

        let at2 = MutationCard {
            intensity_increase: 2,
            ..kiara_card()
        };
        let effects = engine.propagate(&at2, &graph, &[]);
        assert!(effects
            .iter()
            .all(|e| e.effect_type != RippleType::AtmosphereShift));
    }

    #[test]
    fn test_relationship_web_requires_known_mutation_type() {
        let card = MutationCard {
            mutation_type: "soften".to_string(),
            ..kiara_card()
        };
        let effects = RippleEngine::new().propagate(&card, &CausalityGraph::default(), &[]);
        assert!(effects
            .iter()
            .all(|e| e.effect_type != RippleType::RelationshipWeb));
    }

    #[test]
    fn test_preview_wraps_card_fields() {
        let preview =
            RippleEngine::new().preview(&kiara_card(), &CausalityGraph::default(), &[]);
        assert_eq!(preview.ripple_id, "ripple_card_007");
        assert_eq!(preview.source_card, "card_007");
        assert_eq!(preview.source_title, "The Hunger Turns");
        assert_eq!(preview.change_summary, "What if the feeding bond inverted?");
        assert!(!preview.ripples.is_empty());
    }
}
