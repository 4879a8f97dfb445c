//! PostgreSQL-backed adapters.

pub mod repositories;
