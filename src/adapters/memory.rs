//! In-process record store with the hosted store's query semantics.
//! Lets the repositories run without a remote backend, as the tests do.

use crate::domain::model::{Record, RecordId};
use crate::domain::ports::RecordStore;
use crate::domain::query::{
    BatchResponse, Logic, Operator, Query, RecordResult, StoreResponse, SubGroup, WhereGroup,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    tables: HashMap<String, BTreeMap<RecordId, Record>>,
    last_id: RecordId,
    pending_failure: Option<String>,
}

impl State {
    fn assign(&mut self, table: &str, mut record: Record) -> Record {
        self.last_id += 1;
        record.insert("Id", self.last_id);
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(self.last_id, record.clone());
        record
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a row as-is and returns the id it was given.
    pub async fn seed(&self, table: &str, record: Record) -> RecordId {
        let mut state = self.state.lock().await;
        let stored = state.assign(table, record);
        stored.id().unwrap_or_default()
    }

    /// The raw stored row, every field included.
    pub async fn raw(&self, table: &str, id: RecordId) -> Option<Record> {
        let state = self.state.lock().await;
        state.tables.get(table).and_then(|rows| rows.get(&id)).cloned()
    }

    /// Makes the next call answer `success: false` with `message`.
    pub async fn fail_next(&self, message: &str) {
        self.state.lock().await.pending_failure = Some(message.to_string());
    }
}

fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::Object(relation) => relation.get("Id").and_then(scalar_key),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(
            n.as_i64()
                .map(|i| i.to_string())
                .unwrap_or_else(|| n.to_string()),
        ),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn condition_holds(row: &Record, field: &str, operator: Operator, values: &[Value]) -> bool {
    let Some(stored) = row.get(field).and_then(scalar_key) else {
        return false;
    };

    values.iter().filter_map(scalar_key).any(|wanted| match operator {
        Operator::EqualTo => stored == wanted,
        Operator::Contains => stored.to_lowercase().contains(&wanted.to_lowercase()),
    })
}

fn combine(logic: Logic, mut results: impl Iterator<Item = bool>) -> bool {
    match logic {
        Logic::And => results.all(|held| held),
        Logic::Or => results.any(|held| held),
    }
}

fn sub_group_holds(row: &Record, sub: &SubGroup) -> bool {
    sub.conditions.is_empty()
        || combine(
            sub.operator,
            sub.conditions
                .iter()
                .map(|c| condition_holds(row, &c.field_name, c.operator, &c.values)),
        )
}

fn group_holds(row: &Record, group: &WhereGroup) -> bool {
    group.sub_groups.is_empty()
        || combine(
            group.operator,
            group.sub_groups.iter().map(|sub| sub_group_holds(row, sub)),
        )
}

fn matches(row: &Record, query: &Query) -> bool {
    query
        .conditions
        .iter()
        .all(|c| condition_holds(row, &c.field_name, c.operator, &c.values))
        && query.where_groups.iter().all(|group| group_holds(row, group))
}

fn project(row: &Record, query: &Query) -> Record {
    if query.fields.is_empty() {
        return row.clone();
    }

    let mut projected = Record::new();
    if let Some(id) = row.get("Id") {
        projected.insert("Id", id.clone());
    }
    for field in query.field_names() {
        if let Some(value) = row.get(field) {
            projected.insert(field, value.clone());
        }
    }
    projected
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn fetch(&self, table: &str, query: &Query) -> Result<StoreResponse<Vec<Record>>> {
        let mut state = self.state.lock().await;
        if let Some(message) = state.pending_failure.take() {
            return Ok(StoreResponse::failed(message));
        }

        let rows = state
            .tables
            .get(table)
            .map(|rows| {
                rows.values()
                    .filter(|row| matches(row, query))
                    .map(|row| project(row, query))
                    .collect()
            })
            .unwrap_or_default();
        Ok(StoreResponse::ok(Some(rows)))
    }

    async fn fetch_by_id(
        &self,
        table: &str,
        id: RecordId,
        query: &Query,
    ) -> Result<StoreResponse<Record>> {
        let mut state = self.state.lock().await;
        if let Some(message) = state.pending_failure.take() {
            return Ok(StoreResponse::failed(message));
        }

        let row = state
            .tables
            .get(table)
            .and_then(|rows| rows.get(&id))
            .map(|row| project(row, query));
        Ok(StoreResponse::ok(row))
    }

    async fn create_batch(&self, table: &str, records: Vec<Record>) -> Result<BatchResponse> {
        let mut state = self.state.lock().await;
        if let Some(message) = state.pending_failure.take() {
            return Ok(BatchResponse::failed(message));
        }

        let results = records
            .into_iter()
            .map(|record| {
                if record.contains("Id") {
                    RecordResult::failed("Id cannot be set on create")
                } else {
                    RecordResult::ok(Some(state.assign(table, record)))
                }
            })
            .collect();
        Ok(BatchResponse::ok(results))
    }

    async fn update_batch(&self, table: &str, records: Vec<Record>) -> Result<BatchResponse> {
        let mut state = self.state.lock().await;
        if let Some(message) = state.pending_failure.take() {
            return Ok(BatchResponse::failed(message));
        }

        let rows = state.tables.entry(table.to_string()).or_default();
        let results = records
            .into_iter()
            .map(|patch| {
                let Some(id) = patch.id() else {
                    return RecordResult::failed("Id is required for update");
                };
                match rows.get_mut(&id) {
                    Some(row) => {
                        for (field, value) in patch.data {
                            row.data.insert(field, value);
                        }
                        RecordResult::ok(Some(row.clone()))
                    }
                    None => RecordResult::failed(format!("Record {} not found", id)),
                }
            })
            .collect();
        Ok(BatchResponse::ok(results))
    }

    async fn delete_batch(&self, table: &str, ids: Vec<RecordId>) -> Result<BatchResponse> {
        let mut state = self.state.lock().await;
        if let Some(message) = state.pending_failure.take() {
            return Ok(BatchResponse::failed(message));
        }

        let rows = state.tables.entry(table.to_string()).or_default();
        let results = ids
            .into_iter()
            .map(|id| match rows.remove(&id) {
                Some(_) => RecordResult::ok(None),
                None => RecordResult::failed(format!("Record {} not found", id)),
            })
            .collect();
        Ok(BatchResponse::ok(results))
    }
}
