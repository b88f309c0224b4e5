//! HTTP handlers for the todos collection.
//!
//! Handlers stay thin: coerce the path id, take the store lock, call one
//! store operation, render the result. `NotFound` from the store becomes a
//! 404 with `{"message":"Not found"}` through [`ApiError`].

use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Request, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::model::{ErrorBody, NewTodo, Todo, TodoPatch};
use crate::Db;

pub const TODOS_PATH: &str = "/api/todos";
pub const TODO_PATH: &str = "/api/todos/{id}";

/// JSON body extractor that never rejects.
///
/// Only a JSON object contributes fields; a missing, empty, unparsable or
/// non-object body yields `T::default()`. A repeated key keeps its last
/// value. The content type is not checked.
pub struct Lenient<T>(pub T);

impl<T: DeserializeOwned + Default> Lenient<T> {
    pub fn from_bytes(bytes: &[u8]) -> T {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => serde_json::from_value(Value::Object(map)).unwrap_or_default(),
            _ => T::default(),
        }
    }
}

impl<S, T> FromRequest<S> for Lenient<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Bytes::from_request(req, state).await {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(_) => T::default(),
        };
        Ok(Lenient(value))
    }
}

/// Numeric coercion of a path segment into a todo id.
///
/// Accepts decimal integers, integral floats (`"2.0"`, `"2e0"`) and
/// `0x`/`0o`/`0b` literals, after trimming whitespace. Anything else, and
/// anything below 1, matches no record.
pub fn coerce_id(raw: &str) -> Option<u64> {
    let s = raw.trim();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let rest = s
            .strip_prefix(prefix)
            .or_else(|| s.strip_prefix(&prefix.to_uppercase()));
        if let Some(digits) = rest {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().filter(|&id| id > 0);
        }
    }
    let n: f64 = s.parse().ok()?;
    if n.is_finite() && n.fract() == 0.0 && n >= 1.0 && n <= u64::MAX as f64 {
        Some(n as u64)
    } else {
        None
    }
}

fn path_id(raw: &str) -> Result<u64, ApiError> {
    coerce_id(raw).ok_or(ApiError::NotFound)
}

/// List all todos
#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "Todos",
    responses(
        (status = 200, description = "Array of todos", body = [Todo])
    )
)]
pub async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.list().to_vec())
}

/// Get a single todo
#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    tag = "Todos",
    params(("id" = u64, Path, description = "Numeric ID of the todo")),
    responses(
        (status = 200, description = "A todo", body = Todo),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_todo(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    let id = path_id(&id)?;
    let store = db.read().await;
    Ok(Json(store.get(id)?.clone()))
}

/// Create a new todo
#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "Todos",
    request_body = NewTodo,
    responses(
        (status = 201, description = "Created", body = Todo)
    )
)]
pub async fn create_todo(
    State(db): State<Db>,
    Lenient(input): Lenient<NewTodo>,
) -> (StatusCode, Json<Todo>) {
    let todo = db.write().await.create(input.title);
    debug!(id = todo.id, title = %todo.title, "created todo");
    (StatusCode::CREATED, Json(todo))
}

/// Update fields on a todo
#[utoipa::path(
    patch,
    path = "/api/todos/{id}",
    tag = "Todos",
    params(("id" = u64, Path, description = "Numeric ID of the todo")),
    request_body = TodoPatch,
    responses(
        (status = 200, description = "Updated", body = Todo),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Lenient(patch): Lenient<TodoPatch>,
) -> Result<Json<Todo>, ApiError> {
    let id = path_id(&id)?;
    let todo = db.write().await.update(id, patch)?;
    debug!(id, "updated todo");
    Ok(Json(todo))
}

/// Remove a todo
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    tag = "Todos",
    params(("id" = u64, Path, description = "Numeric ID of the todo")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = path_id(&id)?;
    db.write().await.delete(id)?;
    debug!(id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_body_reads_only_objects() {
        let patch: TodoPatch = Lenient::from_bytes(br#"["hacked", true]"#);
        assert_eq!(patch, TodoPatch::default());
        let input: NewTodo = Lenient::from_bytes(br#"["Sneaky"]"#);
        assert_eq!(input, NewTodo::default());
        let input: NewTodo = Lenient::from_bytes(b"\"Sneaky\"");
        assert_eq!(input, NewTodo::default());
    }

    #[test]
    fn lenient_body_keeps_last_repeated_key() {
        let input: NewTodo = Lenient::from_bytes(br#"{"title":"a","title":"b"}"#);
        assert_eq!(input.title.as_deref(), Some("b"));
        let patch: TodoPatch = Lenient::from_bytes(br#"{"done":true,"done":false}"#);
        assert_eq!(patch.done, Some(false));
    }

    #[test]
    fn coerces_decimal_ids() {
        assert_eq!(coerce_id("1"), Some(1));
        assert_eq!(coerce_id(" 42 "), Some(42));
        assert_eq!(coerce_id("+7"), Some(7));
    }

    #[test]
    fn coerces_integral_floats() {
        assert_eq!(coerce_id("2.0"), Some(2));
        assert_eq!(coerce_id("2e0"), Some(2));
        assert_eq!(coerce_id("2.5"), None);
    }

    #[test]
    fn coerces_prefixed_literals() {
        assert_eq!(coerce_id("0x1f"), Some(31));
        assert_eq!(coerce_id("0o10"), Some(8));
        assert_eq!(coerce_id("0B11"), Some(3));
        assert_eq!(coerce_id("0x"), None);
        assert_eq!(coerce_id("0x+1"), None);
    }

    #[test]
    fn rejects_non_numeric_and_non_positive() {
        for raw in ["abc", "", "  ", "NaN", "inf", "0", "-3", "1_000", "1abc"] {
            assert_eq!(coerce_id(raw), None, "{raw:?}");
        }
    }
}
