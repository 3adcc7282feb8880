use crate::domain::model::{Record, RecordId};
use crate::domain::query::{BatchResponse, Query, StoreResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A tabular record store addressed by table name.
///
/// `Err` means the call itself failed (transport, undecodable body). A store
/// that answered but refused the request reports `success: false` inside
/// the envelope instead.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch(&self, table: &str, query: &Query) -> Result<StoreResponse<Vec<Record>>>;

    async fn fetch_by_id(
        &self,
        table: &str,
        id: RecordId,
        query: &Query,
    ) -> Result<StoreResponse<Record>>;

    async fn create_batch(&self, table: &str, records: Vec<Record>) -> Result<BatchResponse>;

    async fn update_batch(&self, table: &str, records: Vec<Record>) -> Result<BatchResponse>;

    async fn delete_batch(&self, table: &str, ids: Vec<RecordId>) -> Result<BatchResponse>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn fetch(&self, table: &str, query: &Query) -> Result<StoreResponse<Vec<Record>>> {
        (**self).fetch(table, query).await
    }

    async fn fetch_by_id(
        &self,
        table: &str,
        id: RecordId,
        query: &Query,
    ) -> Result<StoreResponse<Record>> {
        (**self).fetch_by_id(table, id, query).await
    }

    async fn create_batch(&self, table: &str, records: Vec<Record>) -> Result<BatchResponse> {
        (**self).create_batch(table, records).await
    }

    async fn update_batch(&self, table: &str, records: Vec<Record>) -> Result<BatchResponse> {
        (**self).update_batch(table, records).await
    }

    async fn delete_batch(&self, table: &str, ids: Vec<RecordId>) -> Result<BatchResponse> {
        (**self).delete_batch(table, ids).await
    }
}

/// User-visible notifications (the toast of a UI front end).
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}
