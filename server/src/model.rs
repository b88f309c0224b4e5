//! Records and request payloads for the todos collection.
//!
//! # Design
//! Request bodies are never rejected. `NewTodo` and `TodoPatch` accept any
//! JSON object: unknown fields are dropped and fields carrying the wrong JSON
//! type are read as absent, so only recognized, well-typed fields take part
//! in a create or a merge.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Title given to todos created without a usable one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// A single todo record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    #[schema(example = 3)]
    pub id: u64,
    #[schema(example = "Refill coffee beans")]
    pub title: String,
    #[schema(example = false)]
    pub done: bool,
}

impl Todo {
    pub fn new(id: u64, title: impl Into<String>, done: bool) -> Self {
        Self {
            id,
            title: title.into(),
            done,
        }
    }
}

/// Body of a create request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct NewTodo {
    #[serde(default, deserialize_with = "string_or_none")]
    #[schema(example = "Stretch break")]
    pub title: Option<String>,
}

/// Body of an update request. Only the fields that are present change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct TodoPatch {
    #[serde(default, deserialize_with = "string_or_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "bool_or_none")]
    pub done: Option<bool>,
}

/// Body returned with every failure status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Not found")]
    pub message: String,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn bool_or_none<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}
