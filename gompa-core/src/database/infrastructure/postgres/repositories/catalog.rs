use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gompa_model::{AudioGuides, ContactInfo, HeritageSite, SiteDraft, SiteId};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use tracing::{debug, info};

use crate::catalog::{SiteField, SiteOrder, SitePredicate, SiteQuery};
use crate::database::ports::{catalog::CatalogRepository, writer::SiteWriter};
use crate::error::{CatalogError, Result};

const SITE_COLUMNS: &str = "id, name, description, location, latitude, longitude, altitude, \
     founded_year, tradition, main_deity, significance, visiting_hours, entry_fee, \
     contact_info, images, virtual_tour_url, audio_guide_urls, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<HeritageSite> {
        let read = |column: &str, e: sqlx::Error| {
            CatalogError::Internal(format!("Failed to read {column}: {e}"))
        };

        let id: SiteId = row.try_get("id").map_err(|e| read("id", e))?;
        let contact_info: Option<Json<ContactInfo>> = row
            .try_get("contact_info")
            .map_err(|e| read("contact_info", e))?;
        let audio_guide_urls: Option<Json<AudioGuides>> = row
            .try_get("audio_guide_urls")
            .map_err(|e| read("audio_guide_urls", e))?;
        let images: Option<Vec<String>> =
            row.try_get("images").map_err(|e| read("images", e))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| read("created_at", e))?;
        let updated_at: DateTime<Utc> = row
            .try_get("updated_at")
            .map_err(|e| read("updated_at", e))?;

        Ok(HeritageSite {
            id,
            name: row.try_get("name").map_err(|e| read("name", e))?,
            description: row
                .try_get("description")
                .map_err(|e| read("description", e))?,
            location: row.try_get("location").map_err(|e| read("location", e))?,
            latitude: row.try_get("latitude").map_err(|e| read("latitude", e))?,
            longitude: row.try_get("longitude").map_err(|e| read("longitude", e))?,
            altitude: row.try_get("altitude").map_err(|e| read("altitude", e))?,
            founded_year: row
                .try_get("founded_year")
                .map_err(|e| read("founded_year", e))?,
            tradition: row.try_get("tradition").map_err(|e| read("tradition", e))?,
            main_deity: row
                .try_get("main_deity")
                .map_err(|e| read("main_deity", e))?,
            significance: row
                .try_get("significance")
                .map_err(|e| read("significance", e))?,
            visiting_hours: row
                .try_get("visiting_hours")
                .map_err(|e| read("visiting_hours", e))?,
            entry_fee: row.try_get("entry_fee").map_err(|e| read("entry_fee", e))?,
            contact_info: contact_info.map(|Json(info)| info),
            images: images.unwrap_or_default(),
            virtual_tour_url: row
                .try_get("virtual_tour_url")
                .map_err(|e| read("virtual_tour_url", e))?,
            audio_guide_urls: audio_guide_urls
                .map(|Json(guides)| guides)
                .unwrap_or_default(),
            created_at,
            updated_at,
        })
    }

    fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, predicate: &SitePredicate) {
        match predicate {
            SitePredicate::NotNull(field) => {
                builder.push(field.column());
                builder.push(" IS NOT NULL");
            }
            SitePredicate::NotEmpty(field) => {
                let column = field.column();
                builder.push(column);
                builder.push(" IS NOT NULL AND ");
                match field {
                    SiteField::AudioGuideUrls => {
                        builder.push(column);
                        builder.push(" <> '{}'::jsonb");
                    }
                    SiteField::Images => {
                        builder.push("cardinality(");
                        builder.push(column);
                        builder.push(") > 0");
                    }
                    SiteField::Latitude | SiteField::Longitude => {
                        builder.push("TRUE");
                    }
                    _ => {
                        builder.push(column);
                        builder.push(" <> ''");
                    }
                }
            }
            SitePredicate::Equals(field, value) => {
                match field {
                    SiteField::Latitude | SiteField::Longitude => {
                        builder.push(field.column());
                        builder.push("::text = ");
                    }
                    // Collections compare by element count, matching `SiteField::text_of`.
                    SiteField::Images => {
                        builder.push("cardinality(images)::text = ");
                    }
                    SiteField::AudioGuideUrls => {
                        builder.push(
                            "(SELECT count(*) FROM jsonb_object_keys(audio_guide_urls))::text = ",
                        );
                    }
                    _ => {
                        builder.push(field.column());
                        builder.push(" = ");
                    }
                }
                builder.push_bind(value.clone());
            }
        }
    }

    fn build_list_query(query: &SiteQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder.push(SITE_COLUMNS);
        builder.push(" FROM heritage_sites WHERE TRUE");

        for predicate in &query.predicates {
            builder.push(" AND (");
            Self::push_predicate(&mut builder, predicate);
            builder.push(")");
        }

        // Byte-wise collation, identical to `SiteOrder::sort` on `String`.
        builder.push(match query.order {
            SiteOrder::NameAscending => " ORDER BY name COLLATE \"C\" ASC",
            SiteOrder::CreatedDescending => " ORDER BY created_at DESC",
        });
        builder
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn list_sites(&self, query: &SiteQuery) -> Result<Vec<HeritageSite>> {
        let mut builder = Self::build_list_query(query);
        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(|e| CatalogError::Fetch(format!("Failed to list heritage sites: {e}")))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn get_site(&self, id: SiteId) -> Result<Option<HeritageSite>> {
        let sql = format!("SELECT {SITE_COLUMNS} FROM heritage_sites WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| CatalogError::Fetch(format!("Failed to load site {id}: {e}")))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(|e| CatalogError::Fetch(format!("Catalog store unreachable: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl SiteWriter for PostgresCatalogRepository {
    async fn create_site(&self, draft: SiteDraft) -> Result<HeritageSite> {
        let sql = format!(
            r#"
            INSERT INTO heritage_sites (
                name, description, location, latitude, longitude, altitude,
                founded_year, tradition, main_deity, significance, visiting_hours,
                entry_fee, contact_info, images, virtual_tour_url, audio_guide_urls
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {SITE_COLUMNS}
            "#
        );

        let row = bind_draft(sqlx::query(&sql), draft)
            .fetch_one(self.pool())
            .await
            .map_err(|e| CatalogError::Internal(format!("Failed to create site: {e}")))?;

        let site = Self::map_row(&row)?;
        info!(site_id = %site.id, name = %site.name, "heritage site created");
        Ok(site)
    }

    async fn update_site(&self, id: SiteId, draft: SiteDraft) -> Result<Option<HeritageSite>> {
        let sql = format!(
            r#"
            UPDATE heritage_sites SET
                name = $1, description = $2, location = $3, latitude = $4,
                longitude = $5, altitude = $6, founded_year = $7, tradition = $8,
                main_deity = $9, significance = $10, visiting_hours = $11,
                entry_fee = $12, contact_info = $13, images = $14,
                virtual_tour_url = $15, audio_guide_urls = $16
            WHERE id = $17
            RETURNING {SITE_COLUMNS}
            "#
        );

        let row = bind_draft(sqlx::query(&sql), draft)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| CatalogError::Internal(format!("Failed to update site {id}: {e}")))?;

        match row {
            Some(row) => {
                let site = Self::map_row(&row)?;
                info!(site_id = %site.id, "heritage site updated");
                Ok(Some(site))
            }
            None => {
                debug!(site_id = %id, "update skipped, site missing");
                Ok(None)
            }
        }
    }

    async fn delete_site(&self, id: SiteId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM heritage_sites WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| CatalogError::Internal(format!("Failed to delete site {id}: {e}")))?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!(site_id = %id, "heritage site deleted");
        }
        Ok(removed)
    }
}

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments>;

fn bind_draft(query: PgQuery<'_>, draft: SiteDraft) -> PgQuery<'_> {
    query
        .bind(draft.name)
        .bind(draft.description)
        .bind(draft.location)
        .bind(draft.latitude)
        .bind(draft.longitude)
        .bind(draft.altitude)
        .bind(draft.founded_year)
        .bind(draft.tradition)
        .bind(draft.main_deity)
        .bind(draft.significance)
        .bind(draft.visiting_hours)
        .bind(draft.entry_fee)
        .bind(draft.contact_info.map(Json))
        .bind(draft.images)
        .bind(draft.virtual_tour_url)
        .bind(Json(draft.audio_guide_urls))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_renders_whitelisted_predicates() {
        let query = SiteQuery::new()
            .with(SitePredicate::NotNull(SiteField::Latitude))
            .with(SitePredicate::NotEmpty(SiteField::AudioGuideUrls))
            .with(SitePredicate::Equals(SiteField::Tradition, "Kagyu".into()))
            .ordered_by(SiteOrder::CreatedDescending);

        let builder = PostgresCatalogRepository::build_list_query(&query);
        let sql = builder.sql();

        assert!(sql.contains("(latitude IS NOT NULL)"));
        assert!(sql.contains("audio_guide_urls <> '{}'::jsonb"));
        assert!(sql.contains("(tradition = $1)"));
        assert!(sql.ends_with("ORDER BY created_at DESC"));
    }

    #[test]
    fn empty_query_lists_everything_by_name() {
        let builder = PostgresCatalogRepository::build_list_query(&SiteQuery::new());
        let sql = builder.sql();
        assert!(sql.contains(r#"FROM heritage_sites WHERE TRUE ORDER BY name COLLATE "C" ASC"#));
    }
}
