//! Request and response shapes exchanged with the record store.
//!
//! Field casing follows the hosted store's JSON exactly: top-level `where`
//! conditions are PascalCase while conditions nested in `whereGroups` are
//! camelCase.

use crate::domain::model::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    EqualTo,
    Contains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSelection {
    pub field: FieldName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Condition {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCondition {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubGroup {
    pub conditions: Vec<GroupCondition>,
    pub operator: Logic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhereGroup {
    pub operator: Logic,
    pub sub_groups: Vec<SubGroup>,
}

/// Field selection plus optional predicates. Every `where` condition must
/// hold; groups are evaluated independently and must all hold as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub fields: Vec<FieldSelection>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub where_groups: Vec<WhereGroup>,
}

impl Query {
    pub fn select(fields: &[&str]) -> Self {
        Query {
            fields: fields
                .iter()
                .map(|name| FieldSelection {
                    field: FieldName {
                        name: name.to_string(),
                    },
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn where_equal(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            field_name: field.to_string(),
            operator: Operator::EqualTo,
            values: vec![value.into()],
        });
        self
    }

    /// Matches when `needle` is contained in any of `fields`.
    pub fn where_any_contains(mut self, fields: &[&str], needle: &str) -> Self {
        let conditions = fields
            .iter()
            .map(|field| GroupCondition {
                field_name: field.to_string(),
                operator: Operator::Contains,
                values: vec![Value::String(needle.to_string())],
            })
            .collect();

        self.where_groups.push(WhereGroup {
            operator: Logic::Or,
            sub_groups: vec![SubGroup {
                conditions,
                operator: Logic::Or,
            }],
        });
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field.name.as_str())
    }
}

/// Envelope for reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> StoreResponse<T> {
    pub fn ok(data: Option<T>) -> Self {
        StoreResponse {
            success: true,
            message: None,
            data,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        StoreResponse {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecordResult {
    pub fn ok(data: Option<Record>) -> Self {
        RecordResult {
            success: true,
            data,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        RecordResult {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Envelope for writes: overall success plus one result per submitted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RecordResult>>,
}

impl BatchResponse {
    pub fn ok(results: Vec<RecordResult>) -> Self {
        BatchResponse {
            success: true,
            message: None,
            results: Some(results),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        BatchResponse {
            success: false,
            message: Some(message.into()),
            results: None,
        }
    }
}
