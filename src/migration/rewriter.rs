//! Per-program migration decisions
//!
//! A program bound to the migrating origin is either destroyed (the origin is
//! being retired) or has its artwork URLs repointed at the origin's new
//! address and credential. Programs bound to any other origin pass through
//! untouched.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{MigrationReportRow, OriginServer, Program};

/// Query parameter carrying the credential in rewritten artwork URLs
pub const CREDENTIAL_PARAM: &str = "credential";

/// Legacy artwork URL shape: `<scheme>://<host...>/library/metadata/<id>/thumb/<id>`
/// followed by any single character and the `X-Plex-Token` parameter.
///
/// The separator before the token matches any character, not only `?`.
fn icon_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"https?://.*(/library/metadata/[0-9]+/thumb/[0-9]+).X-Plex-Token=.*")
            .expect("artwork URL pattern is a valid regex")
    })
}

/// What happened to a single program during a migration pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramOutcome {
    Unchanged,
    Destroyed,
    Modified,
}

/// Running destroyed/modified counts for one program holder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgramTally {
    pub destroyed: u32,
    pub modified: u32,
}

impl ProgramTally {
    pub fn record(&mut self, outcome: ProgramOutcome) {
        match outcome {
            ProgramOutcome::Destroyed => self.destroyed += 1,
            ProgramOutcome::Modified => self.modified += 1,
            ProgramOutcome::Unchanged => {}
        }
    }

    pub fn apply_to(&self, row: &mut MigrationReportRow) {
        row.destroyed_count += self.destroyed;
        row.modified_count += self.modified;
    }
}

/// Extract the origin-relative media path from a legacy artwork URL
pub fn extract_media_path(url: &str) -> Option<&str> {
    icon_pattern()
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|path| path.as_str())
}

/// Repoint an artwork URL at `origin`, or `None` when the URL does not have
/// the expected shape
pub fn rewrite_icon_url(url: &str, origin: &OriginServer) -> Option<String> {
    extract_media_path(url).map(|path| {
        format!(
            "{}{}?{}={}",
            origin.address, path, CREDENTIAL_PARAM, origin.credential
        )
    })
}

/// Applies one origin identity change to individual programs
#[derive(Debug, Clone, Copy)]
pub struct ProgramRewriter<'a> {
    origin_name: &'a str,
    target: Option<&'a OriginServer>,
}

impl<'a> ProgramRewriter<'a> {
    /// `target` is the origin's new identity, or `None` when it is being removed
    pub fn new(origin_name: &'a str, target: Option<&'a OriginServer>) -> Self {
        Self {
            origin_name,
            target,
        }
    }

    pub fn origin_name(&self) -> &str {
        self.origin_name
    }

    pub fn is_retirement(&self) -> bool {
        self.target.is_none()
    }

    /// Decide and apply the migration for a single program.
    ///
    /// A bound program keeps `origin_key` pointing at the migrating name even
    /// when its artwork moves to the new address.
    pub fn rewrite(&self, program: Program) -> (Program, ProgramOutcome) {
        if !program.is_bound_to(self.origin_name) {
            return (program, ProgramOutcome::Unchanged);
        }

        let Some(origin) = self.target else {
            return (Program::offline(program.duration), ProgramOutcome::Destroyed);
        };

        let mut program = program;
        let mut modified = false;
        for field in [
            &mut program.icon,
            &mut program.show_icon,
            &mut program.episode_icon,
            &mut program.season_icon,
        ] {
            if let Some(rewritten) = field.as_deref().and_then(|url| rewrite_icon_url(url, origin)) {
                *field = Some(rewritten);
                modified = true;
            }
        }

        let outcome = if modified {
            ProgramOutcome::Modified
        } else {
            ProgramOutcome::Unchanged
        };
        (program, outcome)
    }

    /// Rewrite a whole program list element-wise, preserving order
    pub fn rewrite_all(&self, programs: Vec<Program>, tally: &mut ProgramTally) -> Vec<Program> {
        programs
            .into_iter()
            .map(|program| {
                let (program, outcome) = self.rewrite(program);
                tally.record(outcome);
                program
            })
            .collect()
    }
}
