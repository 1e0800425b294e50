//! Storage backends implementing the domain repository traits.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL link storage
//! - [`PgStatsRepository`] - PostgreSQL click log and statistics
//! - [`InMemoryStore`] - process-local store implementing both traits

pub mod memory_store;
pub mod pg_link_repository;
pub mod pg_stats_repository;

pub use memory_store::InMemoryStore;
pub use pg_link_repository::PgLinkRepository;
pub use pg_stats_repository::PgStatsRepository;
