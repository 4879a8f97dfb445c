//! Storage ports and adapters for the catalog and admin identity.

pub mod infrastructure;
pub mod ports;
#[cfg(feature = "database")]
pub mod postgres;

pub use infrastructure::memory::{
    InMemoryAllowList, InMemoryCatalogRepository, InMemoryIdentityProvider,
};
#[cfg(feature = "database")]
pub use infrastructure::postgres::repositories::{
    admin::{PostgresAllowList, PostgresIdentityProvider},
    catalog::PostgresCatalogRepository,
};
pub use ports::{
    catalog::CatalogRepository,
    identity::{AllowList, IdentityProvider},
    writer::SiteWriter,
};
#[cfg(feature = "database")]
pub use postgres::PostgresDatabase;
