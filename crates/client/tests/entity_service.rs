//! HTTP-level integration tests for `EntityService`.
//!
//! Each test spawns the fake CRM server on an ephemeral port and drives
//! the real reqwest-backed service against it.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::FakeCrm;
use cwcrm_client::{ClientError, CrmApi, EntityApi, EntityService, QueryParams};
use cwcrm_core::entities::{Action, Waiver};
use cwcrm_core::types::parse_date;
use cwcrm_core::{CoreError, Stored};
use serde_json::json;

async fn service<E: cwcrm_core::Entity>(crm: &FakeCrm) -> EntityService<E> {
    let url = crm.spawn().await;
    CrmApi::with_client(reqwest_client(), url).service::<E>()
}

fn reqwest_client() -> reqwest::Client {
    reqwest::Client::new()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_posts_fields_and_returns_server_id() {
    let crm = FakeCrm::default();
    let waivers = service::<Waiver>(&crm).await;

    let created = waivers.create(&Waiver::named("Community Living")).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.fields.name, "Community Living");
    let rows = crm.rows("waivers");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Community Living");

    let seen = crm.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].path, "/api/waivers");
}

#[tokio::test]
async fn invalid_draft_is_rejected_before_any_request() {
    let crm = FakeCrm::default();
    let waivers = service::<Waiver>(&crm).await;

    let result = waivers.create(&Waiver::default()).await;

    assert_matches!(result, Err(ClientError::Core(CoreError::Validation(_))));
    assert!(crm.seen().is_empty());
}

#[tokio::test]
async fn action_due_date_travels_as_calendar_date() {
    let crm = FakeCrm::default();
    let actions = service::<Action>(&crm).await;

    let draft = Action {
        due_date: Some(parse_date("2000-12-31").unwrap()),
        assigned_to_id: Some(1),
        participant_id: Some(2),
        priority_id: Some(3),
        ..Default::default()
    };
    let created = actions.create(&draft).await.unwrap();

    assert_eq!(crm.rows("actions")[0]["dueDate"], "2000-12-31");
    assert_eq!(created.fields.due_date, draft.due_date);
}

// ---------------------------------------------------------------------------
// Query / search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn query_returns_rows_and_total_count() {
    let crm = FakeCrm::default();
    crm.seed("waivers", json!({"name": "A"}));
    crm.seed("waivers", json!({"name": "B"}));
    let waivers = service::<Waiver>(&crm).await;

    let page = waivers.query(&QueryParams::default()).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.total_count, Some(2));
    assert_eq!(page.items[1].fields.name, "B");
}

#[tokio::test]
async fn query_sends_paging_and_sort() {
    let crm = FakeCrm::default();
    let waivers = service::<Waiver>(&crm).await;

    let params = QueryParams::default().page(1, 20).sort_by("name,asc");
    waivers.query(&params).await.unwrap();

    let query = crm.seen()[0].query.clone().unwrap();
    assert!(query.contains("page=1"));
    assert!(query.contains("size=20"));
    assert!(query.contains("sort=name%2Casc"));
}

#[tokio::test]
async fn search_uses_search_endpoint_and_term() {
    let crm = FakeCrm::default();
    crm.seed("waivers", json!({"name": "Elderly"}));
    crm.seed("waivers", json!({"name": "Community"}));
    let waivers = service::<Waiver>(&crm).await;

    let page = waivers.search("elderly", &QueryParams::default()).await.unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.items[0].fields.name, "Elderly");
    let seen = crm.seen();
    assert_eq!(seen[0].path, "/api/_search/waivers");
    assert!(seen[0].query.as_deref().unwrap().starts_with("query=elderly"));
}

// ---------------------------------------------------------------------------
// Find / update / delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_puts_to_record_url() {
    let crm = FakeCrm::default();
    let id = crm.seed("waivers", json!({"name": "Old"}));
    let waivers = service::<Waiver>(&crm).await;

    let updated = waivers
        .update(&Stored::new(id, Waiver::named("New")))
        .await
        .unwrap();

    assert_eq!(updated.id, id);
    assert_eq!(updated.fields.name, "New");
    assert_eq!(crm.rows("waivers")[0]["name"], "New");
    let seen = crm.seen();
    assert_eq!(seen[0].method, "PUT");
    assert_eq!(seen[0].path, format!("/api/waivers/{id}"));
}

#[tokio::test]
async fn delete_removes_record_and_find_then_404s() {
    let crm = FakeCrm::default();
    let id = crm.seed("waivers", json!({"name": "Gone"}));
    let waivers = service::<Waiver>(&crm).await;

    assert_eq!(waivers.find(id).await.unwrap().fields.name, "Gone");
    waivers.delete(id).await.unwrap();
    assert!(crm.rows("waivers").is_empty());

    let err = waivers.find(id).await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 404, .. });
    assert_eq!(err.message(), "Not Found");
}

// ---------------------------------------------------------------------------
// Failures and auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn alert_header_becomes_error_message() {
    let crm = FakeCrm::default();
    let waivers = service::<Waiver>(&crm).await;
    crm.fail_next(StatusCode::BAD_REQUEST, Some("error.validation"), "");

    let err = waivers.query(&QueryParams::default()).await.unwrap_err();

    assert_matches!(err, ClientError::Api { status: 400, .. });
    assert_eq!(err.message(), "error.validation");
}

#[tokio::test]
async fn server_error_without_header_uses_body() {
    let crm = FakeCrm::default();
    let waivers = service::<Waiver>(&crm).await;
    crm.fail_next(StatusCode::INTERNAL_SERVER_ERROR, None, "database unavailable");

    let err = waivers.delete(1).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "database unavailable");
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let crm = FakeCrm::default();
    let url = crm.spawn().await;
    let waivers = CrmApi::with_client(reqwest_client(), url)
        .with_token("secret")
        .service::<Waiver>();

    waivers.query(&QueryParams::default()).await.unwrap();

    assert_eq!(
        crm.seen()[0].authorization.as_deref(),
        Some("Bearer secret")
    );
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let waivers = CrmApi::with_client(reqwest_client(), format!("http://{addr}"))
        .service::<Waiver>();
    let err = waivers.query(&QueryParams::default()).await.unwrap_err();

    assert_matches!(err, ClientError::Request(_));
    assert!(!err.message().is_empty());
}
