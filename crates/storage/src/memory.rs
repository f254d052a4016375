use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use skillscan_core::Clock;

use crate::record::{Fields, RecordId, RemoteRecord};

/// In-memory stand-in for the remote document store.
///
/// Collections are plain vectors in insertion order, scoped to this instance:
/// two stores never share state, so parallel tests and demo runs stay
/// isolated. Ids are synthesized from the injected clock plus a sequence
/// number, which keeps them unique even under a fixed test clock.
#[derive(Clone)]
pub struct MemoryCollections {
    inner: Arc<Mutex<Inner>>,
    clock: Clock,
}

struct Inner {
    collections: HashMap<String, Vec<RemoteRecord>>,
    next_seq: u64,
}

impl MemoryCollections {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                collections: HashMap::new(),
                next_seq: 0,
            })),
            clock,
        }
    }

    /// Every record currently held for `collection`, oldest first.
    #[must_use]
    pub fn fetch_all(&self, collection: &str) -> Vec<RemoteRecord> {
        self.lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Stores a new record and returns its synthesized id.
    pub fn create(&self, collection: &str, fields: Fields) -> RecordId {
        let mut inner = self.lock();
        let id = RecordId::new(format!(
            "local-{}-{}",
            self.clock.now().timestamp_millis(),
            inner.next_seq
        ));
        inner.next_seq += 1;
        inner
            .collections
            .entry(collection.to_owned())
            .or_default()
            .push(RemoteRecord::new(id.clone(), collection, fields));
        id
    }

    /// Overlays `fields` onto the matching record; absent ids are ignored.
    pub fn update(&self, collection: &str, id: &RecordId, fields: &Fields) {
        let mut inner = self.lock();
        if let Some(records) = inner.collections.get_mut(collection) {
            if let Some(record) = records.iter_mut().find(|record| record.id == *id) {
                record.merge(fields);
            }
        }
    }

    /// Removes the matching record; absent ids are ignored.
    pub fn remove(&self, collection: &str, id: &RecordId) {
        let mut inner = self.lock();
        if let Some(records) = inner.collections.get_mut(collection) {
            records.retain(|record| record.id != *id);
        }
    }

    /// Replaces the whole collection, used to mirror successful remote reads.
    pub fn replace_all(&self, collection: &str, records: Vec<RemoteRecord>) {
        self.lock()
            .collections
            .insert(collection.to_owned(), records);
    }

    // A poisoned mutex still holds valid data; recover it so reads keep
    // working after a panicking writer.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use skillscan_core::time::fixed_clock;

    fn score_fields(score: u32) -> Fields {
        let mut fields = Fields::new();
        fields.insert("score".to_owned(), json!(score));
        fields
    }

    #[test]
    fn create_assigns_sequential_local_ids() {
        let collections = MemoryCollections::new(fixed_clock());

        let first = collections.create("quizzes", score_fields(90));
        let second = collections.create("quizzes", score_fields(70));

        assert_eq!(first.as_str(), "local-1750000000000-0");
        assert_eq!(second.as_str(), "local-1750000000000-1");
        assert_ne!(first, second);
    }

    #[test]
    fn fetch_unknown_collection_is_empty() {
        let collections = MemoryCollections::new(fixed_clock());
        assert!(collections.fetch_all("achievements").is_empty());
    }

    #[test]
    fn fetch_preserves_insertion_order() {
        let collections = MemoryCollections::new(fixed_clock());
        let first = collections.create("quizzes", score_fields(10));
        let second = collections.create("quizzes", score_fields(20));

        let records = collections.fetch_all("quizzes");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, first);
        assert_eq!(records[1].id, second);
    }

    #[test]
    fn update_overlays_matching_record() {
        let collections = MemoryCollections::new(fixed_clock());
        let id = collections.create("quizzes", score_fields(90));

        let mut patch = Fields::new();
        patch.insert("reviewed".to_owned(), json!(true));
        collections.update("quizzes", &id, &patch);

        let records = collections.fetch_all("quizzes");
        assert_eq!(records[0].field("score"), Some(&json!(90)));
        assert_eq!(records[0].field("reviewed"), Some(&json!(true)));
    }

    #[test]
    fn update_absent_id_is_noop() {
        let collections = MemoryCollections::new(fixed_clock());
        collections.create("quizzes", score_fields(90));

        let mut patch = Fields::new();
        patch.insert("score".to_owned(), json!(0));
        collections.update("quizzes", &RecordId::new("missing"), &patch);

        let records = collections.fetch_all("quizzes");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("score"), Some(&json!(90)));
    }

    #[test]
    fn remove_deletes_only_the_matching_record() {
        let collections = MemoryCollections::new(fixed_clock());
        let first = collections.create("quizzes", score_fields(10));
        let second = collections.create("quizzes", score_fields(20));

        collections.remove("quizzes", &first);

        let records = collections.fetch_all("quizzes");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, second);
    }

    #[test]
    fn instances_do_not_share_state() {
        let one = MemoryCollections::new(fixed_clock());
        let other = MemoryCollections::new(fixed_clock());

        one.create("quizzes", score_fields(90));

        assert_eq!(one.fetch_all("quizzes").len(), 1);
        assert!(other.fetch_all("quizzes").is_empty());
    }

    #[test]
    fn replace_all_swaps_collection_contents() {
        let collections = MemoryCollections::new(fixed_clock());
        collections.create("skills", score_fields(1));

        let replacement = vec![RemoteRecord::new(
            RecordId::new("remote-9"),
            "skills",
            score_fields(50),
        )];
        collections.replace_all("skills", replacement);

        let records = collections.fetch_all("skills");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_str(), "remote-9");
    }
}
