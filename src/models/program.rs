use serde::{Deserialize, Serialize};

/// Kind of programming entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramType {
    Movie,
    Episode,
    Track,
    Redirect,
    Custom,
    Flex,
}

/// A single programming entry inside a channel schedule, filler pool or
/// custom show.
///
/// Programs sourced from an origin server carry that server's name in
/// `origin_key`. Offline placeholders carry nothing but a duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_key: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub program_type: Option<ProgramType>,
    /// Duration in milliseconds
    pub duration: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_icon: Option<String>,
    /// Name of the origin server this program was sourced from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Redirect target channel number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<i32>,
    #[serde(default)]
    pub is_offline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_show_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_show_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_order: Option<i32>,
}

impl Program {
    /// Offline placeholder that keeps the slot's duration
    pub fn offline(duration: i64) -> Self {
        Self {
            duration,
            is_offline: true,
            ..Default::default()
        }
    }

    /// Whether this program was sourced from the named origin server
    pub fn is_bound_to(&self, origin_name: &str) -> bool {
        self.origin_key.as_deref() == Some(origin_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_placeholder_serializes_minimally() {
        let value = serde_json::to_value(Program::offline(1_800_000)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "duration": 1_800_000, "isOffline": true })
        );
    }

    #[test]
    fn test_program_wire_names() {
        let program: Program = serde_json::from_value(serde_json::json!({
            "title": "Pilot",
            "type": "episode",
            "duration": 2_640_000,
            "showIcon": "http://old:32400/library/metadata/1/thumb/2?X-Plex-Token=t",
            "originKey": "studio",
            "isOffline": false
        }))
        .unwrap();

        assert_eq!(program.program_type, Some(ProgramType::Episode));
        assert!(program.is_bound_to("studio"));
        assert!(!program.is_bound_to("studio2"));
        assert!(program.show_icon.is_some());
    }
}
