use serde::{Deserialize, Serialize};

/// Channel number used by report rows of non-channel entities
pub const NO_CHANNEL_NUMBER: i32 = -1;

/// Outcome of a migration pass over one stored entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReportRow {
    pub entity_label: String,
    pub channel_number: i32,
    pub destroyed_count: u32,
    pub modified_count: u32,
}

impl MigrationReportRow {
    pub fn for_channel(number: i32, name: &str) -> Self {
        Self {
            entity_label: name.to_string(),
            channel_number: number,
            destroyed_count: 0,
            modified_count: 0,
        }
    }

    pub fn for_filler(name: &str) -> Self {
        Self::labeled(format!("{} (filler)", name))
    }

    pub fn for_custom_show(name: &str) -> Self {
        Self::labeled(format!("{} (custom show)", name))
    }

    fn labeled(entity_label: String) -> Self {
        Self {
            entity_label,
            channel_number: NO_CHANNEL_NUMBER,
            destroyed_count: 0,
            modified_count: 0,
        }
    }
}

/// Totals across a full migration report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSummary {
    pub entities: usize,
    pub destroyed: u32,
    pub modified: u32,
}

impl MigrationSummary {
    pub fn from_rows(rows: &[MigrationReportRow]) -> Self {
        rows.iter().fold(
            Self {
                entities: rows.len(),
                ..Default::default()
            },
            |mut acc, row| {
                acc.destroyed += row.destroyed_count;
                acc.modified += row.modified_count;
                acc
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_totals_rows() {
        let mut a = MigrationReportRow::for_channel(3, "Movies");
        a.destroyed_count = 2;
        let mut b = MigrationReportRow::for_filler("Bumpers");
        b.modified_count = 5;
        let c = MigrationReportRow::for_custom_show("Marathon");

        let summary = MigrationSummary::from_rows(&[a, b, c.clone()]);
        assert_eq!(summary.entities, 3);
        assert_eq!(summary.destroyed, 2);
        assert_eq!(summary.modified, 5);

        assert_eq!(c.entity_label, "Marathon (custom show)");
        assert_eq!(c.channel_number, NO_CHANNEL_NUMBER);
    }
}
