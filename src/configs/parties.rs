use serde::{Deserialize, Serialize};

/// Parties registered at startup, before any `POST /parties`.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PartiesConfig {
    #[serde(default)]
    pub seed: Vec<u64>,
}
