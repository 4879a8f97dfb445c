use std::{fmt, sync::Arc};

use gompa_core::{
    admin::AdminGate,
    catalog::CatalogAccessor,
    database::{
        AllowList, CatalogRepository, IdentityProvider, InMemoryAllowList,
        InMemoryCatalogRepository, InMemoryIdentityProvider, PostgresDatabase,
        SiteWriter,
    },
};

use crate::infra::config::Config;

/// Everything a handler needs, cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogAccessor,
    pub gate: AdminGate,
    pub writer: Arc<dyn SiteWriter>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        catalog: Arc<dyn CatalogRepository>,
        writer: Arc<dyn SiteWriter>,
        identity: Arc<dyn IdentityProvider>,
        allow_list: Arc<dyn AllowList>,
    ) -> Self {
        Self {
            catalog: CatalogAccessor::new(catalog),
            gate: AdminGate::new(identity, allow_list),
            writer,
            config,
        }
    }

    pub fn from_postgres(config: Arc<Config>, db: &PostgresDatabase) -> Self {
        let repo = Arc::new(db.catalog().clone());
        Self::new(
            config,
            repo.clone(),
            repo,
            Arc::new(db.identity().clone()),
            Arc::new(db.allow_list().clone()),
        )
    }

    /// State backed entirely by in-process adapters. The same repository
    /// serves reads and writes, so admin edits show up in listings.
    pub fn in_memory(
        config: Arc<Config>,
        repo: Arc<InMemoryCatalogRepository>,
        identity: Arc<InMemoryIdentityProvider>,
        allow_list: Arc<InMemoryAllowList>,
    ) -> Self {
        Self::new(config, repo.clone(), repo, identity, allow_list)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
