use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phases::Phase;
use crate::scoring::{ScoreResult, ScoringEngine};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

/// Where a session sits in the four-phase progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "phase", rename_all = "snake_case")]
pub enum SessionState {
    Active(Phase),
    Complete,
}

impl SessionState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active(_) => "active",
            Self::Complete => "complete",
        }
    }
}

/// Frozen record of one submitted phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOutcome {
    pub phase: Phase,
    pub selection: Vec<String>,
    pub result: ScoreResult,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("all phases are already complete")]
    AlreadyComplete,
    #[error("select at least one component before submitting")]
    EmptySelection,
    #[error("component id must not be blank")]
    BlankComponent,
}

/// One player's run through a company's phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: SessionId,
    pub company: String,
    pub state: SessionState,
    pub selection: BTreeSet<String>,
    pub total_score: u32,
    pub history: Vec<PhaseOutcome>,
    pub started_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new(id: SessionId, company: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            company: company.into(),
            state: SessionState::Active(Phase::Mvp),
            selection: BTreeSet::new(),
            total_score: 0,
            history: Vec::new(),
            started_at,
        }
    }

    pub fn current_phase(&self) -> Option<Phase> {
        match self.state {
            SessionState::Active(phase) => Some(phase),
            SessionState::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    /// Add the component if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, component: &str) -> Result<bool, SessionError> {
        if self.is_complete() {
            return Err(SessionError::AlreadyComplete);
        }
        let component = component.trim();
        if component.is_empty() {
            return Err(SessionError::BlankComponent);
        }

        if self.selection.remove(component) {
            Ok(false)
        } else {
            self.selection.insert(component.to_string());
            Ok(true)
        }
    }

    /// Score the current selection, bank it and advance to the next phase.
    pub fn submit(
        &mut self,
        engine: &ScoringEngine,
        submitted_at: DateTime<Utc>,
    ) -> Result<PhaseOutcome, SessionError> {
        let phase = self.current_phase().ok_or(SessionError::AlreadyComplete)?;
        if self.selection.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let selection: Vec<String> = std::mem::take(&mut self.selection).into_iter().collect();
        let result = engine.evaluate(&self.company, phase.id(), &selection);

        self.total_score = self.total_score.saturating_add(result.score);
        self.state = match phase.next() {
            Some(next) => SessionState::Active(next),
            None => SessionState::Complete,
        };
        let outcome = PhaseOutcome {
            phase,
            selection,
            result,
            submitted_at,
        };
        self.history.push(outcome.clone());

        Ok(outcome)
    }

    /// Discard all progress and start again from the first phase.
    pub fn reset(&mut self) {
        self.state = SessionState::Active(Phase::Mvp);
        self.selection.clear();
        self.total_score = 0;
        self.history.clear();
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id.clone(),
            company: self.company.clone(),
            status: self.state.label(),
            phase: self.current_phase(),
            phase_title: self.current_phase().map(Phase::title),
            selection: self.selection.iter().cloned().collect(),
            total_score: self.total_score,
            phases_submitted: self.history.len(),
        }
    }
}

/// Summary returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub company: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_title: Option<&'static str>,
    pub selection: Vec<String>,
    pub total_score: u32,
    pub phases_submitted: usize,
}
