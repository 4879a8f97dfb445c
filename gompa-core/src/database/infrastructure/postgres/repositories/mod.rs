//! PostgreSQL-backed repository implementations.

pub mod admin;
pub mod catalog;
