//! Persistence for generated sites.
//!
//! The orchestrator talks to the `SiteStore` trait; `PgSiteStore` is the
//! PostgreSQL implementation used in production.

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::site::{GeneratedSite, NewGeneratedSite};

/// Document store for generated sites, keyed per owner.
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Persist one new record. The write is atomic: on error nothing is visible.
    async fn insert_site(&self, site: NewGeneratedSite) -> Result<GeneratedSite, sqlx::Error>;

    /// All records owned by `owner_id`, newest first.
    async fn list_sites(&self, owner_id: &str) -> Result<Vec<GeneratedSite>, sqlx::Error>;

    /// One record, only if it belongs to `owner_id`.
    async fn get_site(
        &self,
        owner_id: &str,
        site_id: Uuid,
    ) -> Result<Option<GeneratedSite>, sqlx::Error>;

    /// Connectivity check for the health endpoint.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// `SiteStore` backed by the `generated_sites` table.
#[derive(Clone)]
pub struct PgSiteStore {
    pool: DbPool,
}

impl PgSiteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteStore for PgSiteStore {
    async fn insert_site(&self, site: NewGeneratedSite) -> Result<GeneratedSite, sqlx::Error> {
        // created_at and is_paid come from column defaults
        sqlx::query_as::<_, GeneratedSite>(
            r#"
            INSERT INTO generated_sites (id, owner_id, form_data, generated_html)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, form_data, generated_html, created_at, is_paid
            "#,
        )
        .bind(site.id)
        .bind(&site.owner_id)
        .bind(&site.form_data)
        .bind(&site.generated_html)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_sites(&self, owner_id: &str) -> Result<Vec<GeneratedSite>, sqlx::Error> {
        sqlx::query_as::<_, GeneratedSite>(
            r#"
            SELECT id, owner_id, form_data, generated_html, created_at, is_paid
            FROM generated_sites
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_site(
        &self,
        owner_id: &str,
        site_id: Uuid,
    ) -> Result<Option<GeneratedSite>, sqlx::Error> {
        // Filter by owner too, so other users' ids look like missing rows
        sqlx::query_as::<_, GeneratedSite>(
            r#"
            SELECT id, owner_id, form_data, generated_html, created_at, is_paid
            FROM generated_sites
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(site_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// These run against a real PostgreSQL instance:
/// `DATABASE_URL=postgres://... cargo test -- --ignored`
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_site(owner_id: &str, name: &str) -> NewGeneratedSite {
        NewGeneratedSite::new(
            owner_id,
            json!({ "businessName": name, "branding": { "primaryColor": "#059669" } }),
            "<!DOCTYPE html><html></html>".to_string(),
        )
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn insert_assigns_defaults(pool: DbPool) {
        let store = PgSiteStore::new(pool);
        let form = json!({ "businessName": "Dan's Barber Shop", "services": [{ "price": "45" }] });

        let site = store
            .insert_site(NewGeneratedSite::new("alice", form.clone(), "<!DOCTYPE html>".into()))
            .await
            .unwrap();

        assert_eq!(site.owner_id, "alice");
        assert_eq!(site.form_data, form);
        assert!(!site.is_paid);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn list_is_newest_first_and_owner_scoped(pool: DbPool) {
        let store = PgSiteStore::new(pool);
        for name in ["One", "Two", "Three"] {
            store.insert_site(new_site("alice", name)).await.unwrap();
        }
        store.insert_site(new_site("bob", "Other")).await.unwrap();

        let sites = store.list_sites("alice").await.unwrap();

        let names: Vec<_> = sites
            .iter()
            .map(|s| s.form_data["businessName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Three", "Two", "One"]);
        assert!(sites.windows(2).all(|w| w[0].created_at > w[1].created_at));
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn get_is_owner_scoped(pool: DbPool) {
        let store = PgSiteStore::new(pool);
        let site = store.insert_site(new_site("alice", "One")).await.unwrap();

        assert!(store.get_site("alice", site.id).await.unwrap().is_some());
        assert!(store.get_site("bob", site.id).await.unwrap().is_none());
        assert!(store.get_site("alice", Uuid::new_v4()).await.unwrap().is_none());
    }
}
