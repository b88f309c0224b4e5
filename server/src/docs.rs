//! OpenAPI document and the browsable docs page.
//!
//! The document is assembled from the `#[utoipa::path]` annotations on the
//! handlers in [`crate::routes`] and the schemas in [`crate::model`]. Only the
//! advertised server URL is filled in at startup.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use utoipa::openapi::{server::ServerBuilder, OpenApi as OpenApiDoc};
use utoipa::OpenApi;

use crate::model::{ErrorBody, NewTodo, Todo, TodoPatch};
use crate::routes;

pub const DOCS_PATH: &str = "/docs";
pub const OPENAPI_PATH: &str = "/docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todos API",
        version = "1.0.0",
        description = "A minimal JSON API over an in-memory todo collection."
    ),
    paths(
        routes::list_todos,
        routes::get_todo,
        routes::create_todo,
        routes::update_todo,
        routes::delete_todo
    ),
    components(schemas(Todo, NewTodo, TodoPatch, ErrorBody)),
    tags((name = "Todos", description = "CRUD over the todo collection"))
)]
pub struct ApiDoc;

/// The API description advertising `server_url` as its only server.
pub fn openapi(server_url: &str) -> OpenApiDoc {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![ServerBuilder::new()
        .url(server_url)
        .description(Some("Configured public URL"))
        .build()]);
    doc
}

/// Routes serving the JSON document and the Swagger UI page.
pub fn router(doc: OpenApiDoc) -> Router {
    Router::new()
        .route(DOCS_PATH, get(docs_page))
        .route("/docs/", get(docs_page))
        .route(OPENAPI_PATH, get(openapi_json))
        .with_state(Arc::new(doc))
}

async fn openapi_json(State(doc): State<Arc<OpenApiDoc>>) -> Response {
    Json(doc.as_ref()).into_response()
}

async fn docs_page() -> Html<&'static str> {
    Html(DOCS_HTML)
}

const DOCS_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Todos API docs</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/docs/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;
