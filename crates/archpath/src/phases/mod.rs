//! Per-company, per-phase rule tables and the display data that goes with them.

mod catalog;
pub mod domain;

pub use catalog::PhaseCatalog;
pub use domain::{Company, Difficulty, Phase, PhaseKey, PhaseRule, RuleConflict};
