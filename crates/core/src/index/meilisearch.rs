//! Meilisearch REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::json;
use tracing::debug;

use crate::config::MeilisearchConfig;

use super::error::IndexError;
use super::traits::SearchIndex;
use super::types::{BookDocument, SearchRequest};

/// Meilisearch implementation of [`SearchIndex`].
pub struct MeilisearchClient {
    client: Client,
    base_url: String,
}

impl MeilisearchClient {
    pub fn new(config: &MeilisearchConfig) -> Result<Self, IndexError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, IndexError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        Self::check_status(response).await
    }

    /// Turn non-success responses into [`IndexError::Engine`], keeping the
    /// body for diagnosis.
    async fn check_status(response: Response) -> Result<Response, IndexError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "search engine error response");
        Err(IndexError::Engine {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SearchIndex for MeilisearchClient {
    async fn index_exists(&self, index: &str) -> Result<bool, IndexError> {
        let response = self
            .client
            .get(self.url(&format!("/indexes/{index}")))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::check_status(response).await?;
        Ok(true)
    }

    async fn create_index(&self, index: &str, primary_key: &str) -> Result<(), IndexError> {
        self.request(
            Method::POST,
            "/indexes",
            Some(json!({ "uid": index, "primaryKey": primary_key })),
        )
        .await?;
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), IndexError> {
        self.request(Method::DELETE, &format!("/indexes/{index}"), None)
            .await?;
        Ok(())
    }

    async fn set_filterable_attributes(
        &self,
        index: &str,
        attributes: &[&str],
    ) -> Result<(), IndexError> {
        self.request(
            Method::PUT,
            &format!("/indexes/{index}/settings/filterable-attributes"),
            Some(json!(attributes)),
        )
        .await?;
        Ok(())
    }

    async fn add_document(&self, index: &str, document: &BookDocument) -> Result<(), IndexError> {
        self.request(
            Method::POST,
            &format!("/indexes/{index}/documents"),
            Some(serde_json::to_value(document)?),
        )
        .await?;
        Ok(())
    }

    async fn swap_indexes(&self, first: &str, second: &str) -> Result<(), IndexError> {
        self.request(
            Method::POST,
            "/swap-indexes",
            Some(json!([{ "indexes": [first, second] }])),
        )
        .await?;
        Ok(())
    }

    async fn search(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<serde_json::Value, IndexError> {
        let response = self
            .request(
                Method::POST,
                &format!("/indexes/{index}/search"),
                Some(serde_json::to_value(request)?),
            )
            .await?;
        Ok(response.json().await?)
    }
}
