//! Domain layer containing business entities and collaborator contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - Short links and their clicks
//! - [`repositories`] - Persistence trait definitions
//! - [`geo`] - IP geolocation trait
//! - [`clock`] - Time source trait
//!
//! # Click Recording Flow
//!
//! 1. HTTP handler receives a redirect request
//! 2. [`crate::application::services::LinkService`] checks existence and expiry
//! 3. The client IP is geolocated via [`geo::GeoLocator`]
//! 4. The click is appended via [`repositories::StatsRepository`]
//! 5. The handler issues the redirect

pub mod clock;
pub mod entities;
pub mod geo;
pub mod repositories;
