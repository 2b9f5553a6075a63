use serde::{Deserialize, Serialize};

use super::Program;

/// A pool of interstitial content played between scheduled programs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filler {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub content: Vec<Program>,
}

/// A user-curated playlist that can be scheduled as a single show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomShow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub content: Vec<Program>,
}
