use serde::{Deserialize, Serialize};

/// Outcome of a full repair pass over every loan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeSummary {
    pub recomputed: usize,
    /// Ids of loans whose recomputation failed; their stored aggregates are unchanged.
    pub failed: Vec<String>,
}
