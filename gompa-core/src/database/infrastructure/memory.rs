//! In-process adapters used by demo mode and tests.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use gompa_model::{HeritageSite, SessionUser, SiteDraft, SiteId};
use parking_lot::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::catalog::SiteQuery;
use crate::database::ports::{
    catalog::CatalogRepository,
    identity::{AllowList, IdentityProvider, hash_session_token},
    writer::SiteWriter,
};
use crate::error::Result;

/// Catalog held in a `Vec`, evaluating predicates the same way the SQL
/// adapter renders them.
#[derive(Debug, Default)]
pub struct InMemoryCatalogRepository {
    sites: RwLock<Vec<HeritageSite>>,
}

impl InMemoryCatalogRepository {
    pub fn new(sites: Vec<HeritageSite>) -> Self {
        Self {
            sites: RwLock::new(sites),
        }
    }

    pub fn insert(&self, site: HeritageSite) {
        self.sites.write().push(site);
    }

    pub fn len(&self) -> usize {
        self.sites.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.read().is_empty()
    }

    pub fn snapshot(&self) -> Vec<HeritageSite> {
        self.sites.read().clone()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn list_sites(&self, query: &SiteQuery) -> Result<Vec<HeritageSite>> {
        let mut matched: Vec<HeritageSite> = self
            .sites
            .read()
            .iter()
            .filter(|site| query.matches(site))
            .cloned()
            .collect();
        query.order.sort(&mut matched);
        Ok(matched)
    }

    async fn get_site(&self, id: SiteId) -> Result<Option<HeritageSite>> {
        Ok(self.sites.read().iter().find(|s| s.id == id).cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

fn apply_draft(site: &mut HeritageSite, draft: SiteDraft) {
    site.name = draft.name;
    site.description = draft.description;
    site.location = draft.location;
    site.latitude = draft.latitude;
    site.longitude = draft.longitude;
    site.altitude = draft.altitude;
    site.founded_year = draft.founded_year;
    site.tradition = draft.tradition;
    site.main_deity = draft.main_deity;
    site.significance = draft.significance;
    site.visiting_hours = draft.visiting_hours;
    site.entry_fee = draft.entry_fee;
    site.contact_info = draft.contact_info;
    site.images = draft.images;
    site.virtual_tour_url = draft.virtual_tour_url;
    site.audio_guide_urls = draft.audio_guide_urls;
}

#[async_trait]
impl SiteWriter for InMemoryCatalogRepository {
    async fn create_site(&self, draft: SiteDraft) -> Result<HeritageSite> {
        let now = Utc::now();
        let mut site = HeritageSite {
            id: SiteId::new(),
            name: String::new(),
            description: None,
            location: String::new(),
            latitude: None,
            longitude: None,
            altitude: None,
            founded_year: None,
            tradition: None,
            main_deity: None,
            significance: None,
            visiting_hours: None,
            entry_fee: None,
            contact_info: None,
            images: Vec::new(),
            virtual_tour_url: None,
            audio_guide_urls: Default::default(),
            created_at: now,
            updated_at: now,
        };
        apply_draft(&mut site, draft);

        self.sites.write().push(site.clone());
        info!(site_id = %site.id, name = %site.name, "heritage site created");
        Ok(site)
    }

    async fn update_site(&self, id: SiteId, draft: SiteDraft) -> Result<Option<HeritageSite>> {
        let mut sites = self.sites.write();
        let Some(site) = sites.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        apply_draft(site, draft);
        site.updated_at = Utc::now();
        info!(site_id = %id, "heritage site updated");
        Ok(Some(site.clone()))
    }

    async fn delete_site(&self, id: SiteId) -> Result<bool> {
        let mut sites = self.sites.write();
        let before = sites.len();
        sites.retain(|s| s.id != id);
        let removed = sites.len() < before;
        if removed {
            info!(site_id = %id, "heritage site deleted");
        }
        Ok(removed)
    }
}

/// Sessions keyed by token hash. Revoked sessions are simply removed.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    sessions: RwLock<HashMap<String, SessionUser>>,
}

impl InMemoryIdentityProvider {
    pub fn insert_session(&self, token: &str, user: SessionUser) {
        self.sessions.write().insert(hash_session_token(token), user);
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.sessions
            .write()
            .remove(&hash_session_token(token))
            .is_some()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn current_user(&self, token: &str) -> Result<Option<SessionUser>> {
        Ok(self
            .sessions
            .read()
            .get(&hash_session_token(token))
            .cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAllowList {
    admins: RwLock<HashSet<Uuid>>,
}

impl InMemoryAllowList {
    pub fn allow(&self, user_id: Uuid) {
        self.admins.write().insert(user_id);
    }
}

#[async_trait]
impl AllowList for InMemoryAllowList {
    async fn is_allow_listed(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.admins.read().contains(&user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SiteField, SiteOrder, SitePredicate};

    fn draft(name: &str, tradition: &str) -> SiteDraft {
        SiteDraft {
            name: name.into(),
            location: "Sikkim".into(),
            tradition: Some(tradition.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_update_delete_roundtrip() {
        let repo = InMemoryCatalogRepository::default();
        let created = repo
            .create_site(draft("Ralang Monastery", "Kagyu"))
            .await
            .expect("create");
        assert_eq!(repo.len(), 1);

        let updated = repo
            .update_site(created.id, draft("Ralang Monastery", "Nyingma"))
            .await
            .expect("update")
            .expect("present");
        assert_eq!(updated.tradition.as_deref(), Some("Nyingma"));
        assert_eq!(updated.created_at, created.created_at);

        assert!(repo.delete_site(created.id).await.expect("delete"));
        assert!(!repo.delete_site(created.id).await.expect("delete again"));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn update_of_missing_site_is_none() {
        let repo = InMemoryCatalogRepository::default();
        let result = repo
            .update_site(SiteId::new(), draft("Ghost", "Gelug"))
            .await
            .expect("update");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn listing_filters_and_orders() {
        let repo = InMemoryCatalogRepository::default();
        repo.create_site(draft("Phodong", "Kagyu")).await.expect("create");
        repo.create_site(draft("Enchey", "Nyingma")).await.expect("create");
        repo.create_site(draft("Dubdi", "Nyingma")).await.expect("create");

        let query = SiteQuery::new()
            .with(SitePredicate::Equals(SiteField::Tradition, "Nyingma".into()))
            .ordered_by(SiteOrder::NameAscending);
        let names: Vec<String> = repo
            .list_sites(&query)
            .await
            .expect("list")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Dubdi".to_string(), "Enchey".to_string()]);
    }

    #[tokio::test]
    async fn revoked_sessions_resolve_to_nobody() {
        let identity = InMemoryIdentityProvider::default();
        let user = SessionUser {
            id: Uuid::new_v4(),
            email: Some("curator@example.org".into()),
        };
        identity.insert_session("token-1", user.clone());

        assert_eq!(
            identity.current_user("token-1").await.expect("lookup"),
            Some(user)
        );
        assert!(identity.revoke("token-1"));
        assert_eq!(identity.current_user("token-1").await.expect("lookup"), None);
    }
}
