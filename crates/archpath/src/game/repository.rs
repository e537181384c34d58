use super::session::{GameSession, SessionId};

/// Storage abstraction so the service can be exercised without a backing store.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: GameSession) -> Result<GameSession, RepositoryError>;
    fn update(&self, session: GameSession) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<GameSession>, RepositoryError>;
    fn remove(&self, id: &SessionId) -> Result<GameSession, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
