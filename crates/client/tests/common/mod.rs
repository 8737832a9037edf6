//! In-process fake CRM server for client integration tests.
//!
//! Serves the same REST layout as the real backend from an in-memory
//! table per resource, bound to an ephemeral local port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

/// A request as seen by the fake server.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct Store {
    next_id: i64,
    tables: HashMap<String, Vec<Value>>,
    seen: Vec<SeenRequest>,
    fail_next: Option<(StatusCode, Option<&'static str>, String)>,
}

/// Shared handle to the fake server's state.
#[derive(Clone, Default)]
pub struct FakeCrm {
    store: Arc<Mutex<Store>>,
}

impl FakeCrm {
    /// Bind to `127.0.0.1:0`, serve in the background, return the base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Seed a record into `resource`, returning its id.
    pub fn seed(&self, resource: &str, mut record: Value) -> i64 {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let id = store.next_id;
        record["id"] = json!(id);
        store.tables.entry(resource.to_string()).or_default().push(record);
        id
    }

    pub fn rows(&self, resource: &str) -> Vec<Value> {
        let store = self.store.lock().unwrap();
        store.tables.get(resource).cloned().unwrap_or_default()
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.store.lock().unwrap().seen.clone()
    }

    /// Make the next request fail with `status`, an optional alert header
    /// and `body`.
    pub fn fail_next(&self, status: StatusCode, alert: Option<&'static str>, body: &str) {
        self.store.lock().unwrap().fail_next = Some((status, alert, body.to_string()));
    }

    fn record(
        &self,
        method: &'static str,
        path: String,
        query: Option<String>,
        headers: &HeaderMap,
    ) -> Option<Response> {
        let mut store = self.store.lock().unwrap();
        store.seen.push(SeenRequest {
            method,
            path,
            query,
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });
        store.fail_next.take().map(|(status, alert, body)| {
            let mut response = (status, body).into_response();
            if let Some(alert) = alert {
                response
                    .headers_mut()
                    .insert("x-cwcrmapp-error", alert.parse().unwrap());
            }
            response
        })
    }
}

fn router(state: FakeCrm) -> Router {
    Router::new()
        .route("/api/_search/{resource}", get(search))
        .route("/api/{resource}", get(list).post(create))
        .route(
            "/api/{resource}/{id}",
            get(find).put(update).delete(remove),
        )
        .with_state(state)
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"title": "Not Found", "status": 404})),
    )
        .into_response()
}

fn page(rows: Vec<Value>) -> Response {
    let total = rows.len().to_string();
    let mut response = Json(rows).into_response();
    response
        .headers_mut()
        .insert("x-total-count", total.parse().unwrap());
    response
}

async fn list(
    State(crm): State<FakeCrm>,
    Path(resource): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = crm.record("GET", format!("/api/{resource}"), query, &headers) {
        return failure;
    }
    page(crm.rows(&resource))
}

async fn search(
    State(crm): State<FakeCrm>,
    Path(resource): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let term = query
        .as_deref()
        .unwrap_or_default()
        .split('&')
        .find_map(|pair| pair.strip_prefix("query="))
        .unwrap_or_default()
        .replace('+', " ")
        .to_lowercase();
    if let Some(failure) =
        crm.record("GET", format!("/api/_search/{resource}"), query, &headers)
    {
        return failure;
    }
    let rows = crm
        .rows(&resource)
        .into_iter()
        .filter(|row| row.to_string().to_lowercase().contains(&term))
        .collect();
    page(rows)
}

async fn create(
    State(crm): State<FakeCrm>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(failure) = crm.record("POST", format!("/api/{resource}"), None, &headers) {
        return failure;
    }
    if body.get("id").is_some_and(|id| !id.is_null()) {
        let mut response = (
            StatusCode::BAD_REQUEST,
            Json(json!({"title": "A new record cannot already have an ID"})),
        )
            .into_response();
        response
            .headers_mut()
            .insert("x-cwcrmapp-error", "error.idexists".parse().unwrap());
        return response;
    }
    let id = crm.seed(&resource, body);
    let row = crm
        .rows(&resource)
        .into_iter()
        .find(|r| r["id"] == json!(id))
        .unwrap();
    (StatusCode::CREATED, Json(row)).into_response()
}

async fn find(
    State(crm): State<FakeCrm>,
    Path((resource, id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = crm.record("GET", format!("/api/{resource}/{id}"), None, &headers) {
        return failure;
    }
    match crm.rows(&resource).into_iter().find(|r| r["id"] == json!(id)) {
        Some(row) => Json(row).into_response(),
        None => not_found(),
    }
}

async fn update(
    State(crm): State<FakeCrm>,
    Path((resource, id)): Path<(String, i64)>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if let Some(failure) = crm.record("PUT", format!("/api/{resource}/{id}"), None, &headers) {
        return failure;
    }
    let mut store = crm.store.lock().unwrap();
    let rows = store.tables.entry(resource).or_default();
    match rows.iter_mut().find(|r| r["id"] == json!(id)) {
        Some(row) => {
            body["id"] = json!(id);
            *row = body.clone();
            Json(body).into_response()
        }
        None => not_found(),
    }
}

async fn remove(
    State(crm): State<FakeCrm>,
    Path((resource, id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = crm.record("DELETE", format!("/api/{resource}/{id}"), None, &headers)
    {
        return failure;
    }
    let mut store = crm.store.lock().unwrap();
    let rows = store.tables.entry(resource).or_default();
    let before = rows.len();
    rows.retain(|r| r["id"] != json!(id));
    if rows.len() == before {
        return not_found();
    }
    StatusCode::OK.into_response()
}
