use serde::{Deserialize, Serialize};

/// Lightweight projection of a backend email record. `summary` is the
/// backend's pre-rendered short text, never the full body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSummary {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub summary: String,
}
