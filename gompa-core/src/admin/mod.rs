//! Admin console: access gate, site form validation and the editor.

pub mod editor;
pub mod form;
pub mod gate;

pub use editor::SiteEditor;
pub use form::SiteForm;
pub use gate::{AdminGate, AdminPrincipal, GateState};
