//! Shared data models for the Gompa heritage-site catalog.
//!
//! Everything that crosses a crate boundary lives here: the catalog record
//! itself, its identifiers, the store-ready draft used by the admin console,
//! and the identity types handed out by the session collaborator.

pub mod draft;
pub mod identity;
pub mod ids;
pub mod site;

pub use draft::SiteDraft;
pub use identity::SessionUser;
pub use ids::SiteId;
pub use site::{AudioGuides, ContactInfo, HeritageSite, PLACEHOLDER_IMAGE};

pub mod prelude {
    pub use crate::draft::SiteDraft;
    pub use crate::identity::SessionUser;
    pub use crate::ids::SiteId;
    pub use crate::site::{AudioGuides, ContactInfo, HeritageSite};
}
