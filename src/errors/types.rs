//! Error type definitions for the channel origins service
//!
//! This module defines the error types used throughout the application.
//! Validation and lookup failures are classified here; persistence failures
//! are carried unmodified from the store that raised them.

use thiserror::Error;

/// Top-level application error type
///
/// Every service-layer operation returns this type. The web layer maps
/// `Validation` and `NotFound` to client errors and everything else to a
/// generic server error.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors raised outside a repository
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository layer errors (store reads and writes)
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Repository layer specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// SQL execution or connection failures
    #[error("Database operation failed: {0}")]
    Database(#[from] sqlx::Error),

    /// SQL query execution failures with context
    #[error("Query failed: {query} - {message}")]
    QueryFailed { query: String, message: String },

    /// Stored document could not be encoded or decoded
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// Constraint violations (unique, foreign key, etc.)
    #[error("Constraint violation: {constraint} - {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// Record not found
    #[error("Record not found: {table} with {field} = {value}")]
    RecordNotFound {
        table: String,
        field: String,
        value: String,
    },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NotFound { .. })
    }
}

impl RepositoryError {
    /// Create a query failed error
    pub fn query_failed<Q: Into<String>, M: Into<String>>(query: Q, message: M) -> Self {
        Self::QueryFailed {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create a record not found error
    pub fn record_not_found<T: Into<String>, F: Into<String>, V: Into<String>>(
        table: T,
        field: F,
        value: V,
    ) -> Self {
        Self::RecordNotFound {
            table: table.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint_violation<C: Into<String>, M: Into<String>>(
        constraint: C,
        message: M,
    ) -> Self {
        Self::ConstraintViolation {
            constraint: constraint.into(),
            message: message.into(),
        }
    }
}
