//! Service layer for business logic
//!
//! Services orchestrate the repository layer and the migration engine on
//! behalf of the web handlers. They depend on store traits rather than
//! concrete repositories so tests can substitute mocks.

pub mod origin_server;

pub use origin_server::{OriginServerService, DEFAULT_ORIGIN_NAME};
