//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the persistence store. Concrete implementations
//! live in `crate::infrastructure::persistence`; mock implementations are
//! generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Atomic create-if-absent and lookup of short links
//! - [`StatsRepository`] - Click appends and per-link statistics
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod link_repository;
pub mod stats_repository;

pub use link_repository::LinkRepository;
pub use stats_repository::StatsRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
