//! Full CRUD lifecycle against a live server.
//!
//! Starts the server on a random port with the demo seed, then drives every
//! client operation over real HTTP with ureq.

use todos_client::{ApiError, HttpMethod, HttpRequest, HttpResponse, NewTodo, Todo, TodoClient, TodoPatch};

/// Execute an `HttpRequest` with ureq, returning 4xx/5xx as data.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => agent
            .patch(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn spawn_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let app = todos_server::app(todos_server::TodoStore::seeded());
            todos_server::run(listener, app).await
        })
        .unwrap();
    });
    addr
}

#[test]
fn crud_lifecycle() {
    let addr = spawn_server();
    let client = TodoClient::new(&format!("http://{addr}"));

    // Seed records come back in insertion order.
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    let ids: Vec<u64> = todos.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let fetched = client.parse_get_todo(execute(client.build_get_todo(1))).unwrap();
    assert_eq!(
        fetched,
        Todo {
            id: 1,
            title: "Buy coffee".to_string(),
            done: false
        }
    );

    let err = client.parse_get_todo(execute(client.build_get_todo(99))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    let req = client
        .build_create_todo(&NewTodo {
            title: Some("Stretch".to_string()),
        })
        .unwrap();
    let created = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(created.title, "Stretch");
    assert!(!created.done);

    let req = client.build_create_todo(&NewTodo::default()).unwrap();
    let untitled = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(untitled.id, 4);
    assert_eq!(untitled.title, "Untitled");

    let patch = TodoPatch {
        title: None,
        done: Some(false),
    };
    let req = client.build_update_todo(2, &patch).unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap();
    assert_eq!(updated.title, "Write blog");
    assert!(!updated.done);

    client.parse_delete_todo(execute(client.build_delete_todo(1))).unwrap();
    let err = client.parse_delete_todo(execute(client.build_delete_todo(1))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    let ids: Vec<u64> = todos.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3, 4]);

    let doc = client.parse_openapi(execute(client.build_openapi())).unwrap();
    assert_eq!(doc["info"]["title"], "Todos API");
    assert!(doc["paths"]["/api/todos/{id}"]["patch"].is_object());
}
