use async_trait::async_trait;
use gompa_model::{HeritageSite, SiteId};

use crate::catalog::SiteQuery;
use crate::error::Result;

/// Read-only access to stored heritage sites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every record satisfying all predicates of `query`, in its order.
    async fn list_sites(&self, query: &SiteQuery) -> Result<Vec<HeritageSite>>;

    async fn get_site(&self, id: SiteId) -> Result<Option<HeritageSite>>;

    /// Round-trip to the store without reading records.
    async fn ping(&self) -> Result<()>;
}
