use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field map for one stored document, keyed by field name.
pub type Fields = Map<String, Value>;

/// Unique identifier for a stored document.
///
/// Real backends assign their own ids; the in-memory substitute synthesizes
/// `local-{millis}-{seq}` ones. Either way the value is opaque here.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new `RecordId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ─── Records ───────────────────────────────────────────────────────────────────

/// One document from a named collection.
///
/// Fields are schemaless JSON on purpose: quiz results, skill rows and career
/// recommendations all travel through the same shape, and typed views are
/// decoded at the service layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub id: RecordId,
    pub collection: String,
    pub fields: Fields,
}

impl RemoteRecord {
    #[must_use]
    pub fn new(id: RecordId, collection: impl Into<String>, fields: Fields) -> Self {
        Self {
            id,
            collection: collection.into(),
            fields,
        }
    }

    /// Looks up a single field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Overlays `fields` onto the record, keeping fields it does not mention.
    pub fn merge(&mut self, fields: &Fields) {
        for (name, value) in fields {
            self.fields.insert(name.clone(), value.clone());
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
