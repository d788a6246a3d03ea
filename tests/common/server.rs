//! Mock Brands service
//!
//! Mirrors the validation and status-code contract of the remote service
//! closely enough for the whole scenario catalog to pass against it. Each
//! test spawns its own instance on a random port.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;

use brands_contract::brands::{Brand, messages};
use brands_contract::fixtures::is_slug_char;

/// Knobs for making the mock misbehave.
#[derive(Debug, Clone, Copy)]
pub struct MockBehavior {
    pub enforce_unique_slugs: bool,
    /// Answer every create with a 500.
    pub fail_creates: bool,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            enforce_unique_slugs: true,
            fail_creates: false,
        }
    }
}

/// A request as the mock saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub accept: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
struct Store {
    brands: HashMap<String, Brand>,
    next_id: u64,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone)]
struct MockState {
    store: Arc<Mutex<Store>>,
    behavior: MockBehavior,
}

/// Mock server instance; shuts down when dropped.
pub struct MockBrandsServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,
    store: Arc<Mutex<Store>>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockBrandsServer {
    pub async fn spawn() -> Self {
        Self::spawn_with(MockBehavior::default()).await
    }

    pub async fn spawn_with(behavior: MockBehavior) -> Self {
        let store = Arc::new(Mutex::new(Store::default()));
        let state = MockState {
            store: store.clone(),
            behavior,
        };

        let app = Router::new()
            .route("/brands", post(create_brand).fallback(method_not_allowed))
            .route(
                "/brands/{id}",
                get(show_brand).put(update_brand).fallback(method_not_allowed),
            )
            .fallback(not_found)
            .layer(middleware::from_fn_with_state(state.clone(), record_request))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Mock server failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            store,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    #[allow(dead_code)]
    pub fn brand_count(&self) -> usize {
        self.store.lock().unwrap().brands.len()
    }

    #[allow(dead_code)]
    pub fn brand(&self, id: &str) -> Option<Brand> {
        self.store.lock().unwrap().brands.get(id).cloned()
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.store.lock().unwrap().requests.clone()
    }
}

async fn record_request(State(state): State<MockState>, request: Request, next: Next) -> Response {
    // Keep the header borrow out of the await below; `Body` is not `Sync`.
    let recorded = {
        let header_value = |name: header::HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            accept: header_value(header::ACCEPT),
            content_type: header_value(header::CONTENT_TYPE),
        }
    };
    state.store.lock().unwrap().requests.push(recorded);

    next.run(request).await
}

async fn create_brand(State(state): State<MockState>, body: Bytes) -> Response {
    if state.behavior.fail_creates {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({"message": "Server Error"})),
        )
            .into_response();
    }

    let Some(fields) = parse_object(&body) else {
        return unprocessable(BTreeMap::from([(
            "name".to_string(),
            vec![messages::NAME_REQUIRED.to_string()],
        )]));
    };

    let mut store = state.store.lock().unwrap();
    let mut errors = validate(&fields, false);

    if let Some(Value::String(slug)) = fields.get("slug") {
        let taken = store.brands.values().any(|brand| &brand.slug == slug);
        if taken && state.behavior.enforce_unique_slugs && !errors.contains_key("slug") {
            errors.insert("slug".into(), vec![messages::SLUG_TAKEN.into()]);
        }
    }

    if !errors.is_empty() {
        return unprocessable(errors);
    }

    store.next_id += 1;
    let brand = Brand {
        id: format!("01MOCK{:020}", store.next_id),
        name: string_field(&fields, "name"),
        slug: string_field(&fields, "slug"),
    };
    store.brands.insert(brand.id.clone(), brand.clone());

    (StatusCode::CREATED, axum::Json(brand)).into_response()
}

async fn show_brand(State(state): State<MockState>, Path(id): Path<String>) -> Response {
    let store = state.store.lock().unwrap();
    match store.brands.get(&id) {
        Some(brand) => (StatusCode::OK, axum::Json(brand.clone())).into_response(),
        None => not_found_response(),
    }
}

async fn update_brand(
    State(state): State<MockState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let fields = parse_object(&body).unwrap_or_default();

    let errors = validate(&fields, true);
    if !errors.is_empty() {
        return unprocessable(errors);
    }

    let mut store = state.store.lock().unwrap();
    let Some(brand) = store.brands.get_mut(&id) else {
        return (StatusCode::OK, axum::Json(json!({"success": false}))).into_response();
    };

    if let Some(Value::String(name)) = fields.get("name") {
        brand.name = name.clone();
    }
    if let Some(Value::String(slug)) = fields.get("slug") {
        brand.slug = slug.clone();
    }

    (StatusCode::OK, axum::Json(json!({"success": true}))).into_response()
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        axum::Json(json!({"message": messages::METHOD_NOT_ALLOWED})),
    )
        .into_response()
}

async fn not_found() -> Response {
    not_found_response()
}

fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({"message": messages::NOT_FOUND})),
    )
        .into_response()
}

fn unprocessable(errors: BTreeMap<String, Vec<String>>) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(errors)).into_response()
}

fn parse_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice(body).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

static NULL: Value = Value::Null;

/// Empty strings count as null, as the remote service does.
fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        Some(Value::String(text)) if text.is_empty() => Some(&NULL),
        other => other,
    }
}

/// Field errors for a create (`partial == false`) or update body.
fn validate(fields: &Map<String, Value>, partial: bool) -> BTreeMap<String, Vec<String>> {
    let mut errors = BTreeMap::new();

    for key in fields.keys() {
        if key != "name" && key != "slug" {
            errors.insert(key.clone(), vec![format!("The {key} field is prohibited.")]);
        }
    }

    match present(fields.get("name")) {
        None if partial => {}
        None | Some(Value::Null) if !partial => {
            errors.insert("name".into(), vec![messages::NAME_REQUIRED.into()]);
        }
        Some(Value::String(name)) => {
            if name.chars().count() > messages::NAME_MAX_CHARS {
                errors.insert("name".into(), vec![messages::NAME_TOO_LONG.into()]);
            }
        }
        _ => {
            errors.insert("name".into(), vec![messages::NAME_NOT_STRING.into()]);
        }
    }

    match present(fields.get("slug")) {
        None if partial => {}
        None | Some(Value::Null) if !partial => {
            errors.insert("slug".into(), vec![messages::SLUG_REQUIRED.into()]);
        }
        Some(Value::String(slug)) => {
            if !slug.chars().all(is_slug_char) {
                errors.insert("slug".into(), vec![messages::SLUG_CHARSET.into()]);
            }
        }
        _ => {
            errors.insert(
                "slug".into(),
                vec![messages::SLUG_CHARSET.into(), messages::SLUG_NOT_STRING.into()],
            );
        }
    }

    errors
}
