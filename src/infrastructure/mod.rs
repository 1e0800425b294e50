//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching and geolocation.
//!
//! # Modules
//!
//! - [`cache`] - Link cache (Redis and no-op implementations)
//! - [`geoip`] - IP geolocation (MaxMind and no-op implementations)
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod cache;
pub mod geoip;
pub mod persistence;
