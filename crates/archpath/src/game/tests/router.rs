use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::game::router::{submit_handler, GameApi};
use crate::game::GameService;
use crate::registry::Flavor;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn components_route_lists_registry_in_requested_flavor() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/components?flavor=aws"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let components = payload.as_array().expect("array payload");
    assert_eq!(components.len(), 21);

    let web = components
        .iter()
        .find(|component| component["id"] == "web-server")
        .expect("web server listed");
    assert_eq!(web["display_name"], "EC2");
    assert_eq!(web["service_group"], "web-server");
    assert_eq!(
        web["equivalents"],
        "AWS: EC2 | GCP: Compute Engine | Open Source: Docker"
    );
}

#[tokio::test]
async fn components_route_rejects_unknown_flavor() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/components?flavor=azure"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn categories_route_starts_with_all() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/categories"))
        .await
        .unwrap();

    let payload = read_json_body(response).await;
    assert_eq!(payload[0]["id"], "all");
    assert_eq!(payload.as_array().map(Vec::len), Some(8));
}

#[tokio::test]
async fn companies_route_lists_five_companies() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/companies"))
        .await
        .unwrap();

    let payload = read_json_body(response).await;
    let ids: Vec<&str> = payload
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|company| company["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["netflix", "slack", "uber", "spotify", "instagram"]);
}

#[tokio::test]
async fn hints_route_returns_brief_and_hints() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request(
            "GET",
            "/api/v1/companies/netflix/phases/mvp/hints",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["hints"][0], "Essential: web server, database");
    assert!(payload["brief"]
        .as_str()
        .unwrap()
        .starts_with("Netflix started as a DVD-by-mail"));
}

#[tokio::test]
async fn hints_route_is_empty_for_unknown_phase() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request(
            "GET",
            "/api/v1/companies/netflix/phases/scale9/hints",
        ))
        .await
        .unwrap();

    let payload = read_json_body(response).await;
    assert_eq!(payload["hints"], json!([]));
    assert_eq!(
        payload["brief"],
        "Choose the right components for scale9 phase."
    );
}

#[tokio::test]
async fn evaluate_route_scores_selection() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluate",
            json!({
                "company": "netflix",
                "phase": "mvp",
                "selection": ["web-server", "database", "cdn", "cache"]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], 14);
    assert_eq!(payload["completion_rate"], 100);
    assert_eq!(payload["breakdown"][2]["reason"], "premature");
}

#[tokio::test]
async fn evaluate_route_resolves_flavored_names() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluate",
            json!({
                "company": "netflix",
                "phase": "mvp",
                "flavor": "aws",
                "selection": ["EC2", "RDS"]
            }),
        ))
        .await
        .unwrap();

    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], 20);
}

#[tokio::test]
async fn evaluate_route_reports_invalid_phase() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/evaluate",
            json!({ "company": "netflix", "phase": "nonexistent", "selection": ["cdn"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], 0);
    assert_eq!(payload["feedback"], json!(["Invalid phase"]));
}

#[tokio::test]
async fn session_lifecycle_over_http() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/sessions",
            json!({ "company": "slack" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json_body(response).await;
    let id = created["session_id"].as_str().unwrap().to_string();
    assert_eq!(created["phase"], "mvp");

    for component in ["web-server", "database", "websockets"] {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/selection"),
                json!({ "component": component }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["selected"], true);
    }

    let response = router
        .clone()
        .oneshot(empty_request("POST", &format!("/api/v1/sessions/{id}/submit")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let submitted = read_json_body(response).await;
    assert_eq!(submitted["outcome"]["result"]["score"], 30);
    assert_eq!(submitted["session"]["phase"], "scale1");
    assert_eq!(submitted["session"]["total_score"], 30);

    let response = router
        .clone()
        .oneshot(empty_request("GET", &format!("/api/v1/sessions/{id}")))
        .await
        .unwrap();
    let fetched = read_json_body(response).await;
    assert_eq!(fetched["phases_submitted"], 1);

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/v1/sessions/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(repository.len(), 0);

    let response = router
        .oneshot(empty_request("GET", &format!("/api/v1/sessions/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn start_route_returns_not_found_for_unknown_company() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/sessions",
            json!({ "company": "myspace" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "unknown company 'myspace'");
}

#[tokio::test]
async fn submit_handler_rejects_empty_selection() {
    let (service, _) = build_service();
    let session = service.start("netflix").unwrap();
    let api = GameApi {
        service: Arc::new(service),
        default_flavor: Flavor::Generic,
    };

    let response = submit_handler(State(api), Path(session.id.0.clone())).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let api = GameApi {
        service: Arc::new(GameService::new(Arc::new(UnavailableRepository), engine())),
        default_flavor: Flavor::Generic,
    };

    let response = submit_handler(State(api), Path("game-000001".to_string())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
