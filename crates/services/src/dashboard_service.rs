use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use storage::record::RemoteRecord;
use storage::store::RemoteStore;

pub const SKILLS_COLLECTION: &str = "skills";
pub const ACHIEVEMENTS_COLLECTION: &str = "achievements";
pub const CAREERS_COLLECTION: &str = "recommendedCareers";

//
// ─── ROWS ──────────────────────────────────────────────────────────────────────
//

/// A tracked skill and its current level, as a percent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub level: u32,
}

/// A badge on the learner's profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Achievement {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub unlocked: bool,
}

/// A suggested career and how strongly it matches the learner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CareerMatch {
    pub title: String,
    pub company: String,
    pub salary: String,
    #[serde(rename = "match")]
    pub match_percent: u32,
    #[serde(default)]
    pub skills: Vec<String>,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Read side of the learner dashboard, fed through the remote-data facade.
///
/// Every reader is infallible: the facade absorbs backend failures, and any
/// record that fails to decode is logged and skipped rather than poisoning
/// the whole page.
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<RemoteStore>,
}

impl DashboardService {
    #[must_use]
    pub fn new(store: Arc<RemoteStore>) -> Self {
        Self { store }
    }

    pub async fn skills(&self) -> Vec<SkillEntry> {
        self.rows(SKILLS_COLLECTION).await
    }

    pub async fn achievements(&self) -> Vec<Achievement> {
        self.rows(ACHIEVEMENTS_COLLECTION).await
    }

    pub async fn recommended_careers(&self) -> Vec<CareerMatch> {
        self.rows(CAREERS_COLLECTION).await
    }

    /// Number of records in a collection, for "no data yet" hints.
    pub async fn record_count(&self, collection: &str) -> usize {
        self.store.fetch_all(collection).await.len()
    }

    async fn rows<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        self.store
            .fetch_all(collection)
            .await
            .into_iter()
            .filter_map(|record| decode_row(collection, record))
            .collect()
    }
}

fn decode_row<T: DeserializeOwned>(collection: &str, record: RemoteRecord) -> Option<T> {
    let RemoteRecord { id, fields, .. } = record;
    match serde_json::from_value(Value::Object(fields)) {
        Ok(row) => Some(row),
        Err(error) => {
            warn!(collection, id = %id, %error, "skipping malformed dashboard record");
            None
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
