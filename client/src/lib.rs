//! I/O-free client for the todos API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. The caller executes the HTTP round-trip, which keeps
//! this crate deterministic and free of an async runtime.
//!
//! # Design
//! - `TodoClient` holds only `base_url`.
//! - Each operation is a `build_*` / `parse_*` pair so the I/O boundary is
//!   explicit.
//! - Wire types are defined here rather than shared with the server crate.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{NewTodo, Todo, TodoPatch};
