//! Translation between wire records and domain entities.
//!
//! Each entity implements [`Entity`]; the free functions here hold the rules
//! every entity shares: identity copying, scalar stringification and
//! foreign-key normalization.

use crate::domain::model::{Record, RecordId};
use crate::domain::query::Query;
use crate::utils::error::{HrError, Result};
use crate::utils::validation::{parse_record_id, validate_record_id, Validate};
use serde_json::Value;

pub const ID: &str = "Id";
pub const NAME: &str = "Name";

/// A domain entity persisted in one store table.
pub trait Entity: Sized + Send + Sync + 'static {
    /// Table identifier in the record store.
    const TABLE: &'static str;
    /// Singular label for logs and messages.
    const LABEL: &'static str;
    /// Wire fields requested on every read.
    const FIELDS: &'static [&'static str];

    /// Input for creation. Converting it into a patch applies defaults.
    type New: Validate + Into<Self::Patch> + Send;
    type Patch: Send + Sync;

    fn from_wire(record: &Record) -> Result<Self>;

    /// Builds the wire fields for a write. `id` is set for updates and
    /// `None` for creates. Only fields present in `patch` are emitted.
    fn to_wire_patch(id: Option<RecordId>, patch: &Self::Patch) -> Result<Record>;

    fn select() -> Query {
        Query::select(Self::FIELDS)
    }
}

/// Copies the store-assigned identity. Numeric strings are accepted since
/// some store endpoints echo ids as text.
pub fn record_id(record: &Record) -> Result<RecordId> {
    match record.get(ID) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| HrError::MappingError {
        message: format!("record has no integer Id: {:?}", record.get(ID)),
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(
            n.as_i64()
                .map(|i| i.to_string())
                .or_else(|| n.as_u64().map(|u| u.to_string()))
                .unwrap_or_else(|| n.to_string()),
        ),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn text(record: &Record, field: &str) -> Option<String> {
    record.get(field).and_then(scalar_to_string)
}

pub fn text_or_empty(record: &Record, field: &str) -> String {
    text(record, field).unwrap_or_default()
}

/// Normalizes a foreign key to its string identifier. The store returns
/// either the bare id or a relation object carrying `Id`; absence maps to
/// the empty string.
pub fn foreign_key(record: &Record, field: &str) -> String {
    match record.get(field) {
        Some(Value::Object(relation)) => relation
            .get(ID)
            .and_then(scalar_to_string)
            .unwrap_or_default(),
        Some(value) => scalar_to_string(value).unwrap_or_default(),
        None => String::new(),
    }
}

/// Wire form of a foreign key. Non-numeric identifiers are rejected here,
/// before anything is sent.
pub fn foreign_key_to_wire(domain_field: &str, raw: &str) -> Result<Value> {
    parse_record_id(domain_field, raw).map(Value::from)
}

/// Starts a wire patch, carrying the identity for updates.
pub fn start_patch(id: Option<RecordId>) -> Result<Record> {
    let mut record = Record::new();
    if let Some(id) = id {
        record.insert(ID, validate_record_id(id)?);
    }
    Ok(record)
}

pub fn put<T: Into<Value>>(record: &mut Record, field: &str, value: Option<T>) {
    if let Some(value) = value {
        record.insert(field, value);
    }
}
