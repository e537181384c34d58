use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::repository::SessionRepository;
use super::service::{GameService, GameServiceError};
use super::session::{PhaseOutcome, SessionId, SessionView};
use crate::phases::Difficulty;
use crate::registry::{self, ComponentCategory, Flavor};
use crate::scoring::ScoreResult;

/// Shared handler state: the service plus the flavor used when a request names none.
pub struct GameApi<R> {
    pub service: Arc<GameService<R>>,
    pub default_flavor: Flavor,
}

impl<R> Clone for GameApi<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            default_flavor: self.default_flavor,
        }
    }
}

/// Router builder exposing catalog lookups, stateless evaluation and game sessions.
pub fn game_router<R>(service: Arc<GameService<R>>, default_flavor: Flavor) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/components", get(components_handler::<R>))
        .route("/api/v1/categories", get(categories_handler))
        .route("/api/v1/companies", get(companies_handler::<R>))
        .route(
            "/api/v1/companies/:company/phases/:phase/hints",
            get(hints_handler::<R>),
        )
        .route("/api/v1/evaluate", post(evaluate_handler::<R>))
        .route("/api/v1/sessions", post(start_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id",
            get(session_handler::<R>).delete(abandon_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/selection",
            post(toggle_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/submit",
            post(submit_handler::<R>),
        )
        .with_state(GameApi {
            service,
            default_flavor,
        })
}

#[derive(Debug, Default, Deserialize)]
pub struct FlavorQuery {
    #[serde(default)]
    pub flavor: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentView {
    pub id: &'static str,
    pub name: &'static str,
    pub display_name: &'static str,
    pub category: ComponentCategory,
    pub service_group: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equivalents: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyView {
    pub id: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize)]
pub struct HintsView {
    pub company: String,
    pub phase: String,
    pub brief: String,
    pub hints: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvaluateRequest {
    pub company: String,
    pub phase: String,
    #[serde(default)]
    pub selection: Vec<String>,
    /// When set, selection entries may be display names in this flavor.
    #[serde(default)]
    pub flavor: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartRequest {
    pub company: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToggleRequest {
    pub component: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleResponse {
    pub session: SessionView,
    pub component: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub session: SessionView,
    pub outcome: PhaseOutcome,
}

fn parse_flavor(raw: Option<&str>, default: Flavor) -> Result<Flavor, Response> {
    match raw {
        None => Ok(default),
        Some(value) => Flavor::parse(value).ok_or_else(|| {
            let payload = json!({ "error": format!("unknown flavor '{value}'") });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }),
    }
}

fn error_response(error: GameServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (error.status_code(), Json(payload)).into_response()
}

pub(crate) async fn components_handler<R>(
    State(api): State<GameApi<R>>,
    Query(query): Query<FlavorQuery>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let flavor = match parse_flavor(query.flavor.as_deref(), api.default_flavor) {
        Ok(flavor) => flavor,
        Err(response) => return response,
    };

    let views: Vec<ComponentView> = registry::components()
        .iter()
        .map(|component| ComponentView {
            id: component.id,
            name: component.name,
            display_name: flavor.display_name(component.id).unwrap_or(component.name),
            category: component.category,
            service_group: registry::normalize(component.id),
            equivalents: registry::equivalents(component.id),
        })
        .collect();

    (StatusCode::OK, Json(views)).into_response()
}

pub(crate) async fn categories_handler() -> Json<Vec<registry::Category>> {
    Json(registry::categories())
}

pub(crate) async fn companies_handler<R>(State(api): State<GameApi<R>>) -> Json<Vec<CompanyView>>
where
    R: SessionRepository + 'static,
{
    let companies = api
        .service
        .engine()
        .catalog()
        .companies()
        .iter()
        .map(|company| CompanyView {
            id: company.id,
            name: company.name,
            tagline: company.tagline,
            difficulty: company.difficulty,
        })
        .collect();
    Json(companies)
}

pub(crate) async fn hints_handler<R>(
    State(api): State<GameApi<R>>,
    Path((company, phase)): Path<(String, String)>,
) -> Json<HintsView>
where
    R: SessionRepository + 'static,
{
    let catalog = api.service.engine().catalog();
    Json(HintsView {
        brief: catalog.brief(&company, &phase),
        hints: catalog.hints(&company, &phase),
        company,
        phase,
    })
}

pub(crate) async fn evaluate_handler<R>(
    State(api): State<GameApi<R>>,
    Json(request): Json<EvaluateRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let flavor = match request.flavor.as_deref() {
        Some(raw) => match parse_flavor(Some(raw), api.default_flavor) {
            Ok(flavor) => Some(flavor),
            Err(response) => return response,
        },
        None => None,
    };

    let selection: Vec<String> = request
        .selection
        .iter()
        .map(|entry| match flavor.and_then(|flavor| flavor.resolve(entry)) {
            Some(id) => id.to_string(),
            None => entry.trim().to_string(),
        })
        .collect();

    let result: ScoreResult =
        api.service
            .engine()
            .evaluate(&request.company, &request.phase, &selection);
    (StatusCode::OK, Json(result)).into_response()
}

pub(crate) async fn start_handler<R>(
    State(api): State<GameApi<R>>,
    Json(request): Json<StartRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match api.service.start(&request.company) {
        Ok(session) => (StatusCode::CREATED, Json(session.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler<R>(
    State(api): State<GameApi<R>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match api.service.get(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, Json(session.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn abandon_handler<R>(
    State(api): State<GameApi<R>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match api.service.abandon(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, Json(session.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn toggle_handler<R>(
    State(api): State<GameApi<R>>,
    Path(session_id): Path<String>,
    Json(request): Json<ToggleRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match api.service.toggle(&SessionId(session_id), &request.component) {
        Ok((session, selected)) => {
            let body = ToggleResponse {
                session: session.view(),
                component: request.component.trim().to_string(),
                selected,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(api): State<GameApi<R>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match api.service.submit(&SessionId(session_id)) {
        Ok((session, outcome)) => {
            let body = SubmitResponse {
                session: session.view(),
                outcome,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}
