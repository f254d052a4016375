use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::backend::{BackendError, DocumentBackend};
use crate::config::RemoteConfig;
use crate::record::{Fields, RecordId, RemoteRecord};

/// `DocumentBackend` over a project-scoped REST document API.
///
/// Documents live under
/// `{base}/projects/{project}/collections/{collection}/documents` and the
/// API key travels as a bearer token.
pub struct RestBackend {
    client: Client,
    config: RemoteConfig,
}

impl RestBackend {
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/collections/{}/documents",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id,
            collection
        )
    }

    fn document_url(&self, collection: &str, id: &RecordId) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<DocumentBody>,
}

#[derive(Debug, Deserialize)]
struct DocumentBody {
    id: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Deserialize)]
struct InsertResponse {
    id: String,
}

#[async_trait]
impl DocumentBackend for RestBackend {
    async fn list(&self, collection: &str) -> Result<Vec<RemoteRecord>, BackendError> {
        let response = self
            .client
            .get(self.collection_url(collection))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }

        let body: ListResponse = response.json().await?;
        Ok(body
            .documents
            .into_iter()
            .map(|doc| RemoteRecord::new(RecordId::new(doc.id), collection, doc.fields))
            .collect())
    }

    async fn insert(&self, collection: &str, fields: &Fields) -> Result<RecordId, BackendError> {
        let response = self
            .client
            .post(self.collection_url(collection))
            .bearer_auth(&self.config.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }

        let body: InsertResponse = response.json().await?;
        Ok(RecordId::new(body.id))
    }

    async fn update(
        &self,
        collection: &str,
        id: &RecordId,
        fields: &Fields,
    ) -> Result<(), BackendError> {
        let response = self
            .client
            .patch(self.document_url(collection, id))
            .bearer_auth(&self.config.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &RecordId) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }
        Ok(())
    }
}
