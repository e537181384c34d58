use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use tracing::info;

use super::repository::{RepositoryError, SessionRepository};
use super::session::{GameSession, PhaseOutcome, SessionError, SessionId};
use crate::scoring::ScoringEngine;

/// Service composing the scoring engine with session storage.
///
/// `toggle` and `submit` read, mutate and write back a session without locking it, so
/// a session must have a single client. Concurrent writes to one session can drop an update.
pub struct GameService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("game-{id:06}"))
}

impl<R> GameService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: Arc<ScoringEngine>) -> Self {
        Self { repository, engine }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Open a session at the first phase for a company with a rule table.
    pub fn start(&self, company: &str) -> Result<GameSession, GameServiceError> {
        let company = company.trim().to_ascii_lowercase();
        if !self.engine.catalog().has_company(&company) {
            return Err(GameServiceError::UnknownCompany(company));
        }

        let session = GameSession::new(next_session_id(), company, Utc::now());
        let stored = self.repository.insert(session)?;
        info!(session = %stored.id.0, company = %stored.company, "game session started");
        Ok(stored)
    }

    /// Flip a component in the current selection. Returns the updated session and whether
    /// the component is now selected.
    pub fn toggle(
        &self,
        id: &SessionId,
        component: &str,
    ) -> Result<(GameSession, bool), GameServiceError> {
        let mut session = self.get(id)?;
        let selected = session.toggle(component)?;
        self.repository.update(session.clone())?;
        Ok((session, selected))
    }

    /// Freeze and score the current selection, then advance the session.
    pub fn submit(&self, id: &SessionId) -> Result<(GameSession, PhaseOutcome), GameServiceError> {
        let mut session = self.get(id)?;
        let outcome = session.submit(&self.engine, Utc::now())?;
        self.repository.update(session.clone())?;

        info!(
            session = %session.id.0,
            phase = %outcome.phase,
            score = outcome.result.score,
            total = session.total_score,
            "phase submitted"
        );
        Ok((session, outcome))
    }

    pub fn get(&self, id: &SessionId) -> Result<GameSession, GameServiceError> {
        let session = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(session)
    }

    /// Return to the menu: the session and its accumulated score are discarded.
    pub fn abandon(&self, id: &SessionId) -> Result<GameSession, GameServiceError> {
        let session = self.repository.remove(id)?;
        info!(session = %session.id.0, total = session.total_score, "game session abandoned");
        Ok(session)
    }
}

/// Error raised by the game service.
#[derive(Debug, thiserror::Error)]
pub enum GameServiceError {
    #[error("unknown company '{0}'")]
    UnknownCompany(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl GameServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GameServiceError::UnknownCompany(_) => StatusCode::NOT_FOUND,
            GameServiceError::Session(SessionError::AlreadyComplete) => StatusCode::CONFLICT,
            GameServiceError::Session(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GameServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            GameServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            GameServiceError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
