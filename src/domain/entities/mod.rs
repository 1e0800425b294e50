//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; validation and orchestration live in
//! the application services.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A short code mapped to an original URL with an expiry
//! - [`Click`] - One recorded redirect, owned by its short link
//!
//! Creation inputs use separate structs (`NewShortLink`, `NewClick`).

pub mod click;
pub mod short_link;

pub use click::{Click, DIRECT_REFERRER, NewClick, UNKNOWN_LOCATION};
pub use short_link::{NewShortLink, ShortLink};
