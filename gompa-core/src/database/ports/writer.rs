use async_trait::async_trait;
use gompa_model::{HeritageSite, SiteDraft, SiteId};

use crate::error::Result;

/// Mutation side of the catalog, only reachable behind the admin gate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteWriter: Send + Sync {
    async fn create_site(&self, draft: SiteDraft) -> Result<HeritageSite>;

    /// Replaces every editable field. `None` when no such site exists.
    async fn update_site(&self, id: SiteId, draft: SiteDraft) -> Result<Option<HeritageSite>>;

    /// `true` when a record was removed.
    async fn delete_site(&self, id: SiteId) -> Result<bool>;
}
