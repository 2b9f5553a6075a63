//! Centralized error handling for the channel origins service
//!
//! # Error Categories
//!
//! - **Repository Errors**: store read/write failures, propagated unmodified
//! - **Validation Errors**: malformed or incomplete requests
//! - **Not Found Errors**: lookups of unknown origin servers
//!
//! # Usage
//!
//! ```rust
//! use channel_origins::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::validation("Missing server name from request"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;
