//! Game sessions: a player works through a company's four phases, toggling components
//! and submitting each selection for scoring.

pub mod repository;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use repository::{RepositoryError, SessionRepository};
pub use router::{game_router, ComponentView, EvaluateRequest, GameApi};
pub use service::{GameService, GameServiceError};
pub use session::{GameSession, PhaseOutcome, SessionError, SessionId, SessionState, SessionView};
