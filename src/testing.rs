//! Test doubles for the generator and store.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::models::site::{GeneratedSite, NewGeneratedSite};
use crate::services::generator::{GenerationError, SiteGenerator};
use crate::services::site_store::SiteStore;

pub fn minimal_document() -> &'static str {
    "<!DOCTYPE html><html><head><title>Dan's Barber Shop</title></head><body></body></html>"
}

pub fn barber_shop_form() -> serde_json::Value {
    json!({
        "businessName": "Dan's Barber Shop",
        "businessType": "Barber Shop",
        "branding": { "primaryColor": "#059669" },
        "contact": { "email": "contact@dansbarbers.com", "phone": "555-123-4567" },
        "services": [{ "name": "Men's Haircut", "price": "45", "duration": "30" }]
    })
}

/// Generator returning a fixed reply (or failing), recording every prompt.
pub struct StubGenerator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SiteGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(GenerationError::Status {
            status: 503,
            body: "model overloaded".to_string(),
        })
    }
}

/// In-memory store. Timestamps strictly increase with each write.
#[derive(Default)]
pub struct MemoryStore {
    sites: Mutex<Vec<GeneratedSite>>,
    inserts: AtomicUsize,
    fail_writes: bool,
    fail_reads: bool,
}

impl MemoryStore {
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Attempted inserts, including failed ones.
    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn sites_of(&self, owner_id: &str) -> Vec<GeneratedSite> {
        self.sites
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn insert_site(&self, site: NewGeneratedSite) -> Result<GeneratedSite, sqlx::Error> {
        let seq = self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(sqlx::Error::PoolTimedOut);
        }

        let record = GeneratedSite {
            id: site.id,
            owner_id: site.owner_id,
            form_data: site.form_data,
            generated_html: site.generated_html,
            created_at: Utc::now() + Duration::milliseconds(seq as i64),
            is_paid: false,
        };
        self.sites.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_sites(&self, owner_id: &str) -> Result<Vec<GeneratedSite>, sqlx::Error> {
        if self.fail_reads {
            return Err(sqlx::Error::PoolClosed);
        }
        let mut sites = self.sites_of(owner_id);
        sites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sites)
    }

    async fn get_site(
        &self,
        owner_id: &str,
        site_id: Uuid,
    ) -> Result<Option<GeneratedSite>, sqlx::Error> {
        if self.fail_reads {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(self
            .sites_of(owner_id)
            .into_iter()
            .find(|s| s.id == site_id))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        if self.fail_reads {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(())
    }
}
