use gompa_model::{HeritageSite, SiteId};
use tracing::debug;

use super::form::SiteForm;
use crate::database::ports::writer::SiteWriter;
use crate::error::{CatalogError, Result};

/// Create/edit dialog of the admin console.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SiteEditor {
    #[default]
    Closed,
    Creating(SiteForm),
    Editing(SiteId, SiteForm),
}

impl SiteEditor {
    pub fn creating(form: SiteForm) -> Self {
        SiteEditor::Creating(form)
    }

    pub fn editing(id: SiteId, form: SiteForm) -> Self {
        SiteEditor::Editing(id, form)
    }

    pub fn open_create(&mut self) {
        *self = SiteEditor::Creating(SiteForm::default());
    }

    pub fn open_edit(&mut self, site: &HeritageSite) {
        *self = SiteEditor::Editing(site.id, SiteForm::from_site(site));
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, SiteEditor::Closed)
    }

    pub fn form(&self) -> Option<&SiteForm> {
        match self {
            SiteEditor::Closed => None,
            SiteEditor::Creating(form) | SiteEditor::Editing(_, form) => Some(form),
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut SiteForm> {
        match self {
            SiteEditor::Closed => None,
            SiteEditor::Creating(form) | SiteEditor::Editing(_, form) => Some(form),
        }
    }

    /// Discards the form.
    pub fn cancel(&mut self) {
        *self = SiteEditor::Closed;
    }

    /// Validates and persists the open form.
    ///
    /// Success closes the editor. A validation failure leaves it open and
    /// never reaches `writer`. Editing a site that no longer exists closes the
    /// editor and reports `NotFound`.
    pub async fn submit(&mut self, writer: &dyn SiteWriter) -> Result<HeritageSite> {
        let result = match self {
            SiteEditor::Closed => {
                return Err(CatalogError::Internal("no form is open".into()));
            }
            SiteEditor::Creating(form) => {
                let draft = form.validate()?;
                writer.create_site(draft).await
            }
            SiteEditor::Editing(id, form) => {
                let id = *id;
                let draft = form.validate()?;
                match writer.update_site(id, draft).await {
                    Ok(Some(site)) => Ok(site),
                    Ok(None) => {
                        debug!(site_id = %id, "edited site disappeared");
                        self.cancel();
                        return Err(CatalogError::NotFound(format!("site {id}")));
                    }
                    Err(err) => Err(err),
                }
            }
        };

        let site = result?;
        self.cancel();
        Ok(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryCatalogRepository;
    use crate::database::ports::writer::MockSiteWriter;

    fn filled() -> SiteForm {
        SiteForm {
            name: "Phensang Monastery".into(),
            location: "North Sikkim".into(),
            tradition: "Nyingma".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn successful_create_closes_the_editor() {
        let repo = InMemoryCatalogRepository::default();
        let mut editor = SiteEditor::default();
        editor.open_create();
        if let Some(form) = editor.form_mut() {
            *form = filled();
        }

        let site = editor.submit(&repo).await.expect("created");
        assert_eq!(site.name, "Phensang Monastery");
        assert_eq!(editor, SiteEditor::Closed);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn validation_failure_keeps_form_open_and_skips_writer() {
        let mut writer = MockSiteWriter::new();
        writer.expect_create_site().never();

        let mut editor = SiteEditor::creating(SiteForm {
            location: "North Sikkim".into(),
            ..Default::default()
        });
        let err = editor.submit(&writer).await.expect_err("invalid");

        assert!(matches!(err, CatalogError::Validation(ref v) if v.message_for("name").is_some()));
        assert!(editor.is_open());
    }

    #[tokio::test]
    async fn editing_updates_in_place() {
        let repo = InMemoryCatalogRepository::default();
        let mut editor = SiteEditor::creating(filled());
        let created = editor.submit(&repo).await.expect("created");

        editor.open_edit(&created);
        if let Some(form) = editor.form_mut() {
            form.founded_year = "1721".into();
        }
        let updated = editor.submit(&repo).await.expect("updated");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.founded_year, Some(1721));
        assert!(!editor.is_open());
    }

    #[tokio::test]
    async fn editing_a_vanished_site_reports_not_found() {
        let repo = InMemoryCatalogRepository::default();
        let mut editor = SiteEditor::editing(SiteId::new(), filled());
        let err = editor.submit(&repo).await.expect_err("missing");
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert!(!editor.is_open());
    }

    #[tokio::test]
    async fn writer_failure_keeps_form_open() {
        let mut writer = MockSiteWriter::new();
        writer
            .expect_create_site()
            .returning(|_| Err(CatalogError::Internal("disk full".into())));

        let mut editor = SiteEditor::creating(filled());
        assert!(editor.submit(&writer).await.is_err());
        assert_eq!(editor.form(), Some(&filled()));
    }

    #[test]
    fn cancel_resets() {
        let mut editor = SiteEditor::creating(filled());
        editor.cancel();
        assert!(editor.form().is_none());
    }
}
