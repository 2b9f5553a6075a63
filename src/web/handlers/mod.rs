//! HTTP request handlers organized by domain

pub mod channels;
pub mod health;
pub mod library;
pub mod origin_servers;
