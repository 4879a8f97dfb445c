use std::{fmt, sync::Arc};

use gompa_model::{HeritageSite, SiteId};
use tracing::debug;

use super::{SiteOrder, SitePredicate, SiteQuery};
use crate::database::ports::catalog::CatalogRepository;
use crate::error::Result;

/// Outcome of a single-record fetch. Absence is a value, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Box<HeritageSite>),
    NotFound,
}

impl Lookup {
    pub fn into_option(self) -> Option<HeritageSite> {
        match self {
            Lookup::Found(site) => Some(*site),
            Lookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

impl From<Option<HeritageSite>> for Lookup {
    fn from(value: Option<HeritageSite>) -> Self {
        match value {
            Some(site) => Lookup::Found(Box::new(site)),
            None => Lookup::NotFound,
        }
    }
}

/// Read access to the catalog.
///
/// Constructed once with its repository and handed to every composition
/// call. Each method issues a fresh fetch; nothing is cached.
#[derive(Clone)]
pub struct CatalogAccessor {
    repo: Arc<dyn CatalogRepository>,
}

impl fmt::Debug for CatalogAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogAccessor").finish_non_exhaustive()
    }
}

impl CatalogAccessor {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    /// All records, name ascending unless another order is requested.
    pub async fn list_all(&self, order: Option<SiteOrder>) -> Result<Vec<HeritageSite>> {
        let query = SiteQuery::new().ordered_by(order.unwrap_or_default());
        self.list_matching(&query).await
    }

    /// Records satisfying every predicate, name ascending.
    pub async fn list_where<I>(&self, predicates: I) -> Result<Vec<HeritageSite>>
    where
        I: IntoIterator<Item = SitePredicate>,
    {
        let query = SiteQuery {
            predicates: predicates.into_iter().collect(),
            order: SiteOrder::NameAscending,
        };
        self.list_matching(&query).await
    }

    pub async fn list_matching(&self, query: &SiteQuery) -> Result<Vec<HeritageSite>> {
        let sites = self.repo.list_sites(query).await?;
        debug!(
            predicates = query.predicates.len(),
            order = query.order.as_param(),
            count = sites.len(),
            "catalog listing fetched"
        );
        Ok(sites)
    }

    pub async fn get_by_id(&self, id: SiteId) -> Result<Lookup> {
        let site = self.repo.get_site(id).await?;
        Ok(Lookup::from(site))
    }

    /// Like [`Self::get_by_id`] but for identifiers straight off the URL.
    /// A malformed identifier cannot match any record, so it is `NotFound`.
    pub async fn get_by_raw_id(&self, raw: &str) -> Result<Lookup> {
        match raw.parse::<SiteId>() {
            Ok(id) => self.get_by_id(id).await,
            Err(_) => {
                debug!(raw_id = raw, "malformed site id");
                Ok(Lookup::NotFound)
            }
        }
    }

    /// Cheap reachability probe for health checks.
    pub async fn probe(&self) -> Result<()> {
        self.repo.ping().await
    }
}
