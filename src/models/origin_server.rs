use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered origin media server
///
/// `name` is the unique key programs refer to through `Program::origin_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginServer {
    pub id: Uuid,
    pub name: String,
    /// Base URI without trailing slash
    pub address: String,
    pub credential: String,
    pub send_guide_updates: bool,
    pub send_channel_updates: bool,
    pub display_index: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate for registering a new origin server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginServerCreateRequest {
    /// Requested name; a numeric suffix is appended when already taken
    pub name: Option<String>,
    pub address: String,
    pub credential: String,
    pub send_guide_updates: Option<bool>,
    pub send_channel_updates: Option<bool>,
}

/// Patch applied to an existing origin server, looked up by `name`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginServerUpdateRequest {
    pub name: Option<String>,
    pub address: String,
    pub credential: String,
    pub send_guide_updates: Option<bool>,
    pub send_channel_updates: Option<bool>,
}

/// Request body identifying an origin server to remove
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginServerDeleteRequest {
    pub name: String,
}

impl OriginServer {
    /// Strip every trailing slash from the address
    pub fn normalize(&mut self) {
        self.address = normalize_address(&self.address);
    }
}

/// Trim surrounding whitespace, then every trailing `/`, from an origin address
pub fn normalize_address(address: &str) -> String {
    address.trim().trim_end_matches('/').to_string()
}
