//! service-core: Shared infrastructure for wellness backend services.
pub mod config;
pub mod error;
pub mod observability;
