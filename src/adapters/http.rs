use crate::config::store_config::StoreConfig;
use crate::domain::model::{Record, RecordId};
use crate::domain::ports::RecordStore;
use crate::domain::query::{BatchResponse, Query, StoreResponse};
use crate::utils::error::{HrError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;

const PROJECT_HEADER: &str = "X-Project-Id";
const KEY_HEADER: &str = "X-Public-Key";

/// `RecordStore` backed by the hosted store's REST API.
pub struct ApperStore {
    client: Client,
    config: StoreConfig,
}

impl ApperStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    fn records_url(&self, table: &str) -> String {
        format!(
            "{}/api/tables/{}/records",
            self.config.base_url.trim_end_matches('/'),
            table
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header(PROJECT_HEADER, &self.config.project_id)
            .header(KEY_HEADER, &self.config.public_key)
    }

    /// Decodes the store envelope. Error statuses that still carry an
    /// envelope are returned as that envelope so its message reaches the
    /// caller.
    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Record store responded {} ({} bytes)", status, body.len());

        match serde_json::from_str::<R>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(e) if status.is_success() => Err(HrError::SerializationError(e)),
            Err(_) => Err(HrError::StoreError {
                message: format!("Record store returned HTTP {}", status),
            }),
        }
    }
}

#[async_trait]
impl RecordStore for ApperStore {
    async fn fetch(&self, table: &str, query: &Query) -> Result<StoreResponse<Vec<Record>>> {
        let url = format!("{}/query", self.records_url(table));
        self.send(self.request(Method::POST, url).json(query)).await
    }

    async fn fetch_by_id(
        &self,
        table: &str,
        id: RecordId,
        query: &Query,
    ) -> Result<StoreResponse<Record>> {
        let url = format!("{}/{}/query", self.records_url(table), id);
        self.send(self.request(Method::POST, url).json(query)).await
    }

    async fn create_batch(&self, table: &str, records: Vec<Record>) -> Result<BatchResponse> {
        let body = json!({ "records": records });
        self.send(self.request(Method::POST, self.records_url(table)).json(&body))
            .await
    }

    async fn update_batch(&self, table: &str, records: Vec<Record>) -> Result<BatchResponse> {
        let body = json!({ "records": records });
        self.send(self.request(Method::PATCH, self.records_url(table)).json(&body))
            .await
    }

    async fn delete_batch(&self, table: &str, ids: Vec<RecordId>) -> Result<BatchResponse> {
        let body = json!({ "RecordIds": ids });
        self.send(self.request(Method::DELETE, self.records_url(table)).json(&body))
            .await
    }
}
