//! Mutation card and causality graph models — read-only ripple inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A hypothetical change to a narrative element, used as the seed for
/// ripple propagation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct MutationCard {
    /// Unique card identifier
    #[validate(length(min = 1))]
    pub card_id: String,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// One-line hook describing the proposed change
    #[serde(default)]
    pub hook: String,

    /// The narrative element being mutated (e.g. `character_kiara`)
    #[validate(length(min = 1))]
    pub source_element: String,

    /// Kind of mutation (e.g. "intensify", "transform", "invert")
    #[serde(default)]
    pub mutation_type: String,

    /// How much the element's intensity rises (0-5)
    #[serde(default)]
    #[validate(range(max = 5))]
    pub intensity_increase: u8,

    /// Theme tags the mutation could push into taboo territory
    #[serde(default)]
    pub taboo_potential: Vec<String>,
}

/// A deck of mutation cards — the ripple engine input envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MutationDeck {
    #[serde(default)]
    pub cards: Vec<MutationCard>,
}

/// A directed causal relationship between two narrative elements.
///
/// Supplied externally and read-only. The ripple engine accepts the graph
/// for future traversal-based propagation but does not yet consult it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CausalityEdge {
    /// Source element ID
    pub source: String,

    /// Target element ID
    pub target: String,

    /// Relation label, when the producer supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

/// Causality edge collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CausalityGraph {
    #[serde(default)]
    pub edges: Vec<CausalityEdge>,
}

impl CausalityGraph {
    /// Edges originating at the given element.
    pub fn edges_from<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a CausalityEdge> {
        self.edges.iter().filter(move |e| e.source == source)
    }
}
