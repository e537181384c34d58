use std::sync::Arc;

use axum::http::StatusCode;

use super::common::*;
use crate::game::repository::{RepositoryError, SessionRepository};
use crate::game::session::{SessionError, SessionId, SessionState};
use crate::game::{GameService, GameServiceError};
use crate::phases::Phase;

#[test]
fn start_normalizes_company_and_stores_session() {
    let (service, repository) = build_service();

    let session = service.start("  Netflix ").expect("known company");

    assert_eq!(session.company, "netflix");
    assert_eq!(session.state, SessionState::Active(Phase::Mvp));
    assert!(session.id.0.starts_with("game-"));
    assert_eq!(repository.len(), 1);
}

#[test]
fn start_rejects_unknown_company() {
    let (service, repository) = build_service();

    match service.start("blockbuster") {
        Err(GameServiceError::UnknownCompany(company)) => assert_eq!(company, "blockbuster"),
        other => panic!("expected unknown company, got {other:?}"),
    }
    assert_eq!(repository.len(), 0);
}

#[test]
fn session_ids_are_unique() {
    let (service, _) = build_service();

    let first = service.start("slack").unwrap();
    let second = service.start("slack").unwrap();

    assert_ne!(first.id, second.id);
}

#[test]
fn toggle_and_submit_persist_progress() {
    let (service, repository) = build_service();
    let session = service.start("uber").unwrap();

    let (_, selected) = service.toggle(&session.id, "web-server").unwrap();
    assert!(selected);
    service.toggle(&session.id, "database").unwrap();
    service.toggle(&session.id, "cache").unwrap();

    let (updated, outcome) = service.submit(&session.id).unwrap();

    assert_eq!(outcome.result.score, 25);
    assert_eq!(outcome.result.completion_rate, 100);
    assert_eq!(updated.total_score, 25);

    let stored = repository
        .fetch(&session.id)
        .expect("fetch succeeds")
        .expect("session present");
    assert_eq!(stored.state, SessionState::Active(Phase::Scale1));
    assert_eq!(stored.history.len(), 1);
    assert!(stored.selection.is_empty());
}

#[test]
fn submit_with_empty_selection_is_rejected() {
    let (service, _) = build_service();
    let session = service.start("spotify").unwrap();

    let err = service.submit(&session.id).unwrap_err();

    assert!(matches!(
        err,
        GameServiceError::Session(SessionError::EmptySelection)
    ));
    assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn completed_sessions_return_conflict() {
    let (service, _) = build_service();
    let session = service.start("instagram").unwrap();

    for _ in Phase::ordered() {
        service.toggle(&session.id, "web-server").unwrap();
        service.submit(&session.id).unwrap();
    }

    let err = service.submit(&session.id).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::CONFLICT);
    assert!(service.get(&session.id).unwrap().is_complete());
}

#[test]
fn abandon_removes_the_session() {
    let (service, repository) = build_service();
    let session = service.start("netflix").unwrap();

    let removed = service.abandon(&session.id).unwrap();

    assert_eq!(removed.id, session.id);
    assert_eq!(repository.len(), 0);
    let err = service.get(&session.id).unwrap_err();
    assert!(matches!(
        err,
        GameServiceError::Repository(RepositoryError::NotFound)
    ));
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
}

#[test]
fn get_propagates_not_found() {
    let (service, _) = build_service();

    let err = service
        .get(&SessionId("game-missing".to_string()))
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
}

#[test]
fn repository_failures_surface_as_internal_errors() {
    let service = GameService::new(Arc::new(UnavailableRepository), engine());

    let err = service.start("netflix").unwrap_err();

    assert!(matches!(
        err,
        GameServiceError::Repository(RepositoryError::Unavailable(_))
    ));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
