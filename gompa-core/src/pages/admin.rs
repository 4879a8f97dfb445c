use serde::Serialize;

use super::{SiteCard, or_empty};
use crate::admin::AdminPrincipal;
use crate::catalog::{CatalogAccessor, SiteOrder};
use crate::query::CatalogStats;

const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboardView {
    pub principal: AdminPrincipal,
    pub stats: CatalogStats,
    /// Newest five sites.
    pub recent: Vec<SiteCard>,
    /// Every site, newest first.
    pub sites: Vec<SiteCard>,
}

/// `/admin`. Requires an [`AdminPrincipal`], so it can only be reached
/// through the gate.
pub async fn compose_admin(accessor: &CatalogAccessor, principal: AdminPrincipal) -> AdminDashboardView {
    let sites = or_empty(
        "/admin",
        accessor.list_all(Some(SiteOrder::CreatedDescending)).await,
    );

    let cards: Vec<SiteCard> = sites.iter().map(SiteCard::from).collect();
    AdminDashboardView {
        principal,
        stats: CatalogStats::derive(&sites),
        recent: cards.iter().take(RECENT_LIMIT).cloned().collect(),
        sites: cards,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gompa_model::SessionUser;
    use uuid::Uuid;

    use super::*;
    use crate::admin::AdminGate;
    use crate::database::{InMemoryAllowList, InMemoryIdentityProvider};
    use crate::pages::fixtures::{accessor, broken_accessor};

    async fn principal() -> AdminPrincipal {
        let identity = InMemoryIdentityProvider::default();
        let allow_list = InMemoryAllowList::default();
        let user = SessionUser {
            id: Uuid::new_v4(),
            email: Some("admin@example.org".into()),
        };
        identity.insert_session("admin-token", user.clone());
        allow_list.allow(user.id);

        AdminGate::new(Arc::new(identity), Arc::new(allow_list))
            .require(Some("admin-token"))
            .await
            .expect("authorized")
    }

    #[tokio::test]
    async fn dashboard_lists_newest_first_with_stats() {
        let view = compose_admin(&accessor(), principal().await).await;

        assert_eq!(view.sites[0].name, "Enchey Monastery");
        assert_eq!(view.recent.len(), 3);
        assert_eq!(view.stats.total, 3);
        assert_eq!(view.stats.with_virtual_tour, 1);
        assert_eq!(view.stats.tradition_count, 2);
        assert_eq!(view.principal.email(), Some("admin@example.org"));
    }

    #[tokio::test]
    async fn dashboard_degrades_to_empty() {
        let view = compose_admin(&broken_accessor(), principal().await).await;
        assert!(view.sites.is_empty());
        assert_eq!(view.stats.total, 0);
    }
}
