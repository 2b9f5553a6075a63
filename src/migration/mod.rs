//! Origin identity migration engine
//!
//! When an origin server is reconfigured or removed, every program sourced
//! from it must be rewritten or invalidated consistently. The engine is
//! layered:
//!
//! - [`rewriter`]: the per-program destroy / rewrite / leave decision
//! - [`collection`]: a concurrent pass over one stored collection kind
//! - [`holders`]: the channel, filler and custom show collections
//! - [`coordinator`]: runs all collection passes and merges their reports
//!
//! Re-running a migration is safe. Rewritten artwork URLs no longer match
//! the legacy pattern, and destroyed programs are no longer bound to any
//! origin.

pub mod collection;
pub mod coordinator;
pub mod holders;
pub mod rewriter;

pub use collection::{CollectionFixer, CollectionKind, ConcurrentFixer, ProgramCollection};
pub use coordinator::MigrationCoordinator;
pub use holders::{ChannelCollection, CustomShowCollection, FillerCollection};
pub use rewriter::{ProgramOutcome, ProgramRewriter, ProgramTally};
