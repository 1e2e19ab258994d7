//! Tag mapping — pure moment-to-tag rules.
//!
//! Four rule families union into a moment's tag set: the content-type table,
//! the intensity bucket, location rules, and character-pair rules. The rule
//! tables are a closed, auditable set; unknown inputs map to nothing.

use sbeat_models::Moment;

/// Tag sets per content type. Unknown content types map to no tags.
const CONTENT_TYPE_TAGS: &[(&str, &[&str])] = &[
    ("feeding", &["ritual_dependence", "hunger"]),
    ("confrontation", &["power_struggle", "defiance"]),
    ("intimacy", &["forbidden_closeness", "longing"]),
    ("revelation", &["buried_secrets", "dread"]),
    ("violence", &["bloodshed", "danger"]),
    ("ritual", &["old_rites", "obligation"]),
    ("deception", &["masks", "betrayal"]),
];

/// Intensity buckets, checked in descending order; the first matching
/// threshold wins so exactly one bucket tag fires per moment.
const INTENSITY_BUCKETS: &[(u8, &str)] = &[(4, "fever_pitch"), (3, "charged"), (2, "simmering")];

/// Bucket tag for intensities below every threshold.
const INTENSITY_FLOOR_TAG: &str = "stillness";

/// Intensity assumed for moments without a rating.
const DEFAULT_INTENSITY: u8 = 1;

/// Tag sets per location. Unmatched locations add nothing.
const LOCATION_TAGS: &[(&str, &[&str])] = &[
    ("mansion", &["gilded_dread", "inheritance_as_cage"]),
    ("school", &["teen_angst"]),
    ("crypt", &["ancestral_weight", "sacred_profane"]),
    ("greenhouse", &["cultivated_decay"]),
];

/// Character pairings: (anchor, other, tags). Every pairing whose two
/// characters co-occur in a moment fires independently.
const CHARACTER_PAIR_TAGS: &[(&str, &str, &[&str])] = &[
    ("kiara", "dante", &["forbidden_bond", "blood_tie"]),
    ("kiara", "maren", &["matriarchal_control"]),
    ("kiara", "elias", &["dangerous_trust"]),
];

/// Maps a moment to its tag set.
///
/// The mapping is pure and order-independent; duplicate tags produced by
/// different rule families collapse, keeping the first occurrence's position
/// in rule order.
#[derive(Debug, Clone, Default)]
pub struct TagMapper;

impl TagMapper {
    pub fn new() -> Self {
        Self
    }

    /// Compute the tag set for a moment, in deterministic rule order.
    pub fn tags_for(&self, moment: &Moment) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();

        for (content_type, content_tags) in CONTENT_TYPE_TAGS {
            if moment.content_type == *content_type {
                for tag in *content_tags {
                    push_unique(&mut tags, tag);
                }
            }
        }

        push_unique(
            &mut tags,
            Self::intensity_bucket(moment.intensity.unwrap_or(DEFAULT_INTENSITY)),
        );

        if let Some(location) = moment.location.as_deref() {
            for (name, location_tags) in LOCATION_TAGS {
                if location == *name {
                    for tag in *location_tags {
                        push_unique(&mut tags, tag);
                    }
                }
            }
        }

        for (anchor, other, pair_tags) in CHARACTER_PAIR_TAGS {
            let present = |id: &str| moment.characters_present.iter().any(|c| c == id);
            if present(anchor) && present(other) {
                for tag in *pair_tags {
                    push_unique(&mut tags, tag);
                }
            }
        }

        tags
    }

    /// The single bucket tag for an intensity rating.
    pub fn intensity_bucket(intensity: u8) -> &'static str {
        for (threshold, tag) in INTENSITY_BUCKETS {
            if intensity >= *threshold {
                return tag;
            }
        }
        INTENSITY_FLOOR_TAG
    }
}

fn push_unique(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}
