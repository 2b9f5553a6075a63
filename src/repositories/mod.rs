//! Repository pattern implementation for data access
//!
//! This module provides the persistence layer behind the store traits the
//! service and migration layers depend on.
//!
//! # Usage
//!
//! ```rust,no_run
//! use channel_origins::repositories::{ChannelRepository, ChannelStore};
//! use sqlx::SqlitePool;
//!
//! async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = ChannelRepository::new(pool);
//!     let numbers = repo.get_all_channel_numbers().await?;
//!     println!("{} channels", numbers.len());
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod library;
pub mod origin_server;
pub mod traits;

// Re-export main traits and types
pub use channel::ChannelRepository;
pub use library::{CustomShowRepository, FillerRepository};
pub use origin_server::OriginServerRepository;
pub use traits::*;
