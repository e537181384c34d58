use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::game::repository::{RepositoryError, SessionRepository};
use crate::game::session::{GameSession, SessionId};
use crate::game::{game_router, GameService};
use crate::registry::Flavor;
use crate::scoring::ScoringEngine;

pub(super) fn engine() -> Arc<ScoringEngine> {
    Arc::new(ScoringEngine::standard())
}

pub(super) fn build_service() -> (GameService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = GameService::new(repository.clone(), engine());
    (service, repository)
}

pub(super) fn router_with_service(service: GameService<MemoryRepository>) -> axum::Router {
    game_router(Arc::new(service), Flavor::Generic)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.sessions.lock().expect("repository mutex poisoned").len()
    }
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, session: GameSession) -> Result<GameSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: GameSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        guard.insert(session.id.clone(), session);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<GameSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<GameSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _session: GameSession) -> Result<GameSession, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _session: GameSession) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<GameSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<GameSession, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
