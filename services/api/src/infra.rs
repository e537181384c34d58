use archpath::config::AppConfig;
use archpath::game::{GameSession, RepositoryError, SessionId, SessionRepository};
use archpath::phases::{Phase, PhaseCatalog};
use archpath::registry::Flavor;
use archpath::scoring::ScoringEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Sessions live for the lifetime of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
}

impl InMemorySessionRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, GameSession>>, RepositoryError> {
        self.sessions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: GameSession) -> Result<GameSession, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: GameSession) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&session.id) {
            guard.insert(session.id.clone(), session);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<GameSession>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<GameSession, RepositoryError> {
        let mut guard = self.lock()?;
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }
}

pub(crate) fn scoring_engine(config: &AppConfig) -> ScoringEngine {
    ScoringEngine::new(PhaseCatalog::standard(), config.game.scoring())
}

pub(crate) fn parse_flavor(raw: &str) -> Result<Flavor, String> {
    Flavor::parse(raw)
        .ok_or_else(|| format!("unknown flavor '{raw}' (expected generic, aws, gcp or opensource)"))
}

pub(crate) fn parse_phase(raw: &str) -> Result<Phase, String> {
    Phase::parse(raw).ok_or_else(|| {
        format!("unknown phase '{raw}' (expected mvp, scale1, scale2 or enterprise)")
    })
}
