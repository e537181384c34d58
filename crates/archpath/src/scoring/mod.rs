mod config;
mod feedback;
mod rules;

pub use config::ScoringConfig;

use crate::phases::{PhaseCatalog, PhaseRule};
use feedback::{compose_feedback, INVALID_PHASE};
use rules::{completion_rate, score_selection};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless evaluator applying the point scale to a phase rule and a selection.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: PhaseCatalog,
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(catalog: PhaseCatalog, config: ScoringConfig) -> Self {
        Self { catalog, config }
    }

    pub fn standard() -> Self {
        Self::new(PhaseCatalog::standard(), ScoringConfig::default())
    }

    pub fn catalog(&self) -> &PhaseCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a selection for a (company, phase) pair.
    ///
    /// An unknown pair yields [`ScoreResult::invalid`] rather than an error.
    pub fn evaluate<I, S>(&self, company: &str, phase_id: &str, selection: I) -> ScoreResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selection: Vec<S> = selection.into_iter().collect();
        let Some(rule) = self.catalog.rule_by_id(company, phase_id) else {
            debug!(company, phase = phase_id, "no rule for phase");
            return ScoreResult::invalid();
        };

        let result = self.score_rule(rule, &selection);
        debug!(
            company,
            phase = phase_id,
            score = result.score,
            completion_rate = result.completion_rate,
            "phase evaluated"
        );
        result
    }

    /// Score a selection directly against a rule.
    pub fn score_rule<S: AsRef<str>>(&self, rule: &PhaseRule, selection: &[S]) -> ScoreResult {
        let ids: Vec<&str> = selection.iter().map(AsRef::as_ref).collect();
        let (breakdown, total, signals) = score_selection(rule, &ids, &self.config);

        ScoreResult {
            score: total.max(0) as u32,
            completion_rate: completion_rate(signals.found_required.len(), signals.required_total),
            feedback: compose_feedback(&signals),
            breakdown,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Why a breakdown line moved the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownReason {
    Required,
    MissingRequired,
    Beneficial,
    Premature,
    LeanArchitecture,
}

impl BreakdownReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Required => "Required component",
            Self::MissingRequired => "Missing required component",
            Self::Beneficial => "Beneficial component",
            Self::Premature => "Premature for this phase",
            Self::LeanArchitecture => "Lean architecture bonus",
        }
    }
}

/// Discrete contribution to a score, keyed by service group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub component: String,
    pub points: i32,
    pub reason: BreakdownReason,
}

impl BreakdownLine {
    pub(crate) fn new(component: &str, points: i32, reason: BreakdownReason) -> Self {
        Self {
            component: component.to_string(),
            points,
            reason,
        }
    }
}

/// Outcome of one evaluation. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub completion_rate: u8,
    pub feedback: Vec<String>,
    pub breakdown: Vec<BreakdownLine>,
}

impl ScoreResult {
    pub fn invalid() -> Self {
        Self {
            score: 0,
            completion_rate: 0,
            feedback: vec![INVALID_PHASE.to_string()],
            breakdown: Vec::new(),
        }
    }

    /// Sum of the breakdown before the zero floor is applied.
    pub fn unclamped_total(&self) -> i32 {
        self.breakdown.iter().map(|line| line.points).sum()
    }
}
