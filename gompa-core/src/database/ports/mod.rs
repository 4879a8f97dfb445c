//! Repository ports implemented by the Postgres and in-memory adapters.

pub mod catalog;
pub mod identity;
pub mod writer;
