use serde::{Deserialize, Serialize};

use super::Program;

/// What a channel plays while it has nothing scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfflineMode {
    #[default]
    Pic,
    Clip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelOffline {
    pub mode: OfflineMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soundtrack: Option<String>,
}

/// A virtual TV channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub number: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub programs: Vec<Program>,
    /// Secondary schedule played when the main one cannot supply content
    #[serde(default)]
    pub fallback: Vec<Program>,
    pub offline: ChannelOffline,
}

impl Channel {
    /// Whether the fallback schedule begins with an offline placeholder
    pub fn has_offline_fallback(&self) -> bool {
        self.fallback.first().is_some_and(|p| p.is_offline)
    }
}
