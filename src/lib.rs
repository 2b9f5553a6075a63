//! Origin server registry and program migration engine for virtual TV
//! channels.
//!
//! Programs scheduled on channels, fillers and custom shows are bound to
//! the origin media server they were sourced from. Reconfiguring an origin
//! repoints their artwork; retiring one turns them into offline
//! placeholders. See [`migration`] for the engine and
//! [`services::OriginServerService`] for the lifecycle operations.

pub mod cache;
pub mod config;
pub mod context;
pub mod database;
pub mod errors;
pub mod migration;
pub mod models;
pub mod repositories;
pub mod services;
pub mod web;
