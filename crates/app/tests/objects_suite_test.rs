//! Integration tests for the objects suite.
//!
//! The suite runs end to end through the reqwest adapter and the assertion
//! runner against a wiremock server that emulates the objects API.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use pretty_assertions::assert_eq;
use restcheck_application::use_cases::{RunSuite, objects_suite, objects_suite::names};
use restcheck_domain::{CaseOutcome, SuiteReport};
use restcheck_infrastructure::{ReqwestHttpClient, TestRunner, render_text};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CREATED_ID: &str = "ff808181932badb60193";
const SCHEMA_ID: &str = "ff808181932badb60194";
const EMPTY_ID: &str = "ff808181932badb60195";
const CREATED_AT: &str = "2024-11-20T10:15:30.123+00:00";

async fn run_against(base_url: &str) -> SuiteReport {
    let client = ReqwestHttpClient::new("restcheck-test", Some(5_000)).unwrap();
    let suite = objects_suite(base_url).unwrap();
    RunSuite::new(client, TestRunner::new())
        .execute(&suite)
        .await
}

fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

async fn mount(server: &MockServer, http_method: &str, route: String, response: ResponseTemplate) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_post(server: &MockServer, body: Value, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/objects"))
        .and(body_json(body))
        .respond_with(response)
        .mount(server)
        .await;
}

fn created_object() -> Value {
    json!({
        "id": CREATED_ID,
        "name": "MacBook Pro M3",
        "data": { "year": 2023, "price": 1999.99 },
        "createdAt": CREATED_AT
    })
}

/// Mounts every route except the create call, which differs per scenario.
async fn mount_objects_api(server: &MockServer) {
    let item = |id: &str| format!("/objects/{id}");

    mount(
        server,
        "GET",
        "/objects".to_string(),
        ok(json!([
            { "id": "1", "name": "Google Pixel 6 Pro", "data": { "color": "Cloudy White", "capacity": "128 GB" } },
            { "id": "2", "name": "Apple iPhone 12 Mini, 256GB, Blue", "data": null }
        ])),
    )
    .await;
    mount(
        server,
        "GET",
        item("1"),
        ok(json!({
            "id": "1",
            "name": "Google Pixel 6 Pro",
            "data": { "color": "Cloudy White", "capacity": "128 GB" }
        })),
    )
    .await;
    mount(
        server,
        "GET",
        item("999999"),
        ResponseTemplate::new(404)
            .set_body_json(json!({ "error": "Oject with id=999999 was not found." })),
    )
    .await;
    mount(
        server,
        "PUT",
        item(CREATED_ID),
        ok(json!({
            "id": CREATED_ID,
            "name": "MacBook Pro M3 (Updated)",
            "data": { "year": 2024, "price": 2099.99 },
            "updatedAt": CREATED_AT
        })),
    )
    .await;
    mount(
        server,
        "PATCH",
        item(CREATED_ID),
        ok(json!({
            "id": CREATED_ID,
            "name": "MacBook Pro M3 (Updated)",
            "data": { "year": 2024, "price": 2199.99 },
            "updatedAt": CREATED_AT
        })),
    )
    .await;
    mount(
        server,
        "DELETE",
        item(CREATED_ID),
        ok(json!({ "message": format!("Object with id = {CREATED_ID} has been deleted.") })),
    )
    .await;
    mount_post(
        server,
        json!({ "name": "Dell XPS 15", "data": { "year": 2023 } }),
        ok(json!({
            "id": SCHEMA_ID,
            "name": "Dell XPS 15",
            "data": { "year": 2023 },
            "createdAt": CREATED_AT
        })),
    )
    .await;
}

fn create_body() -> Value {
    json!({ "name": "MacBook Pro M3", "data": { "year": 2023, "price": 1999.99 } })
}

fn empty_created() -> ResponseTemplate {
    ok(json!({ "id": EMPTY_ID, "name": null, "data": null, "createdAt": CREATED_AT }))
}

fn outcome<'a>(report: &'a SuiteReport, name: &str) -> &'a CaseOutcome {
    &report.case(name).unwrap().outcome
}

#[tokio::test]
async fn test_happy_path_passes_every_case() {
    let server = MockServer::start().await;
    mount_objects_api(&server).await;
    mount_post(&server, create_body(), ok(created_object())).await;
    mount_post(&server, json!({}), empty_created()).await;

    let report = run_against(&server.uri()).await;

    assert!(report.all_passed(), "{}", render_text(&report));
    assert_eq!(report.total, 10);

    // Update, partial update and delete all target the captured id.
    let created_path = format!("/objects/{CREATED_ID}");
    let requests = server.received_requests().await.unwrap();
    let targeted: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path() == created_path)
        .map(|r| r.method.to_string())
        .collect();
    assert_eq!(targeted, vec!["PUT", "PATCH", "DELETE"]);

    let patch = requests
        .iter()
        .find(|r| r.method.as_str() == "PATCH")
        .unwrap();
    let sent: Value = serde_json::from_slice(&patch.body).unwrap();
    assert_eq!(sent, json!({ "data": { "price": 2199.99 } }));
    assert_eq!(
        patch.headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_missing_id_fails_dependent_cases() {
    let server = MockServer::start().await;
    mount_objects_api(&server).await;
    mount_post(
        &server,
        create_body(),
        ok(json!({ "name": "MacBook Pro M3", "data": { "year": 2023, "price": 1999.99 } })),
    )
    .await;
    mount_post(&server, json!({}), empty_created()).await;

    let report = run_against(&server.uri()).await;

    assert_eq!(report.failed, 4);
    assert_eq!(
        outcome(&report, names::CREATE),
        &CaseOutcome::CaptureMissing("'object_id' not found at $.id".to_string())
    );
    for name in [names::UPDATE, names::PATCH, names::DELETE] {
        assert_eq!(
            outcome(&report, name),
            &CaseOutcome::UndefinedState("undefined variable 'object_id'".to_string())
        );
    }

    // Nothing was sent for the cases that needed the id.
    let requests = server.received_requests().await.unwrap();
    assert!(
        requests
            .iter()
            .all(|r| !matches!(r.method.as_str(), "PUT" | "PATCH" | "DELETE"))
    );
}

#[tokio::test]
async fn test_failing_create_skips_capture() {
    let server = MockServer::start().await;
    mount_objects_api(&server).await;
    mount_post(
        &server,
        create_body(),
        ResponseTemplate::new(500).set_body_json(json!({ "error": "internal" })),
    )
    .await;
    mount_post(&server, json!({}), empty_created()).await;

    let report = run_against(&server.uri()).await;

    assert_eq!(outcome(&report, names::CREATE), &CaseOutcome::AssertionsFailed(1));
    let create = report.case(names::CREATE).unwrap();
    assert_eq!(create.status, Some(500));
    let error = create.failed_assertions().next().unwrap().error.clone().unwrap();
    assert!(error.contains("Expected status = 200, got 500"), "{error}");

    assert!(matches!(outcome(&report, names::DELETE), CaseOutcome::UndefinedState(_)));
    assert!(report.case(names::GET_MISSING).unwrap().passed());
}

#[tokio::test]
async fn test_body_mismatch_names_the_path() {
    let server = MockServer::start().await;
    // Mounted first so it wins over the conforming PATCH route.
    mount(
        &server,
        "PATCH",
        format!("/objects/{CREATED_ID}"),
        ok(json!({ "id": CREATED_ID, "data": { "price": 2099.99 } })),
    )
    .await;
    mount_objects_api(&server).await;
    mount_post(&server, create_body(), ok(created_object())).await;
    mount_post(&server, json!({}), empty_created()).await;

    let report = run_against(&server.uri()).await;

    assert_eq!(report.failed, 1);
    let patch = report.case(names::PATCH).unwrap();
    assert_eq!(patch.outcome, CaseOutcome::AssertionsFailed(1));
    let error = patch.failed_assertions().next().unwrap().error.clone().unwrap();
    assert!(error.contains("$.data.price"), "{error}");
    assert!(render_text(&report).contains("FAIL  PATCH /objects/{id}"));
}

#[tokio::test]
async fn test_strict_server_rejects_empty_body() {
    let server = MockServer::start().await;
    mount_objects_api(&server).await;
    mount_post(&server, create_body(), ok(created_object())).await;
    mount_post(
        &server,
        json!({}),
        ResponseTemplate::new(400).set_body_json(json!({ "error": "name is required" })),
    )
    .await;

    let report = run_against(&server.uri()).await;

    assert_eq!(report.failed, 1);
    assert_eq!(
        report.failures().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec![names::CREATE_EMPTY]
    );
    assert_eq!(outcome(&report, names::CREATE_EMPTY), &CaseOutcome::AssertionsFailed(1));
}

#[tokio::test]
async fn test_network_error_fails_every_case() {
    // Bind then release a port so nothing is listening on it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let report = run_against(&format!("http://127.0.0.1:{port}")).await;

    assert_eq!(report.total, 10);
    assert_eq!(report.failed, 10);
    for case in &report.cases {
        match case.name.as_str() {
            names::UPDATE | names::PATCH | names::DELETE => {
                assert!(matches!(case.outcome, CaseOutcome::UndefinedState(_)));
            }
            _ => assert!(
                matches!(case.outcome, CaseOutcome::Transport(_)),
                "{}: {:?}",
                case.name,
                case.outcome
            ),
        }
        assert_eq!(case.status, None);
    }
}

#[tokio::test]
#[ignore = "hits the public api.restful-api.dev endpoint"]
async fn test_live_objects_api() {
    let report = run_against("https://api.restful-api.dev").await;
    assert!(report.all_passed(), "{}", render_text(&report));
}
