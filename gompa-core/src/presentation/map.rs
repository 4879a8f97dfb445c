use gompa_model::{HeritageSite, SiteId};

/// Which marker's detail card is open on the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapSelection {
    selected: Option<SiteId>,
}

impl MapSelection {
    pub fn select(&mut self, site: &HeritageSite) {
        self.selected = Some(site.id);
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<SiteId> {
        self.selected
    }

    pub fn is_selected(&self, site: &HeritageSite) -> bool {
        self.selected == Some(site.id)
    }

    /// Resolves the selection against the currently listed sites.
    pub fn resolve<'a>(&self, sites: &'a [HeritageSite]) -> Option<&'a HeritageSite> {
        let id = self.selected?;
        sites.iter().find(|s| s.id == id)
    }
}
