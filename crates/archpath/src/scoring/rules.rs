use super::config::ScoringConfig;
use super::{BreakdownLine, BreakdownReason};
use crate::phases::PhaseRule;
use crate::registry::equivalency::{normalize, normalize_all};

pub(crate) const LEAN_BONUS_COMPONENT: &str = "efficiency";

/// Which groups landed in which tier; feeds feedback and completion.
pub(crate) struct ScoreSignals<'a> {
    pub found_required: Vec<&'a str>,
    pub missing_required: Vec<&'a str>,
    pub found_beneficial: Vec<&'a str>,
    pub found_avoided: Vec<&'a str>,
    pub required_total: usize,
}

pub(crate) fn score_selection<'a>(
    rule: &'a PhaseRule,
    selection: &[&'a str],
    config: &ScoringConfig,
) -> (Vec<BreakdownLine>, i32, ScoreSignals<'a>) {
    let selected = normalize_all(selection.iter().copied());
    let required = normalize_all(rule.required.iter().map(String::as_str));
    let beneficial = normalize_all(rule.beneficial.iter().map(String::as_str));
    // Avoid entries are not deduplicated: each listed entry that matches costs its own penalty.
    let avoid: Vec<&str> = rule.avoid.iter().map(|id| normalize(id)).collect();

    let mut breakdown = Vec::new();
    let mut total: i32 = 0;
    let mut signals = ScoreSignals {
        found_required: Vec::new(),
        missing_required: Vec::new(),
        found_beneficial: Vec::new(),
        found_avoided: Vec::new(),
        required_total: required.len(),
    };

    for &group in &required {
        if selected.contains(&group) {
            breakdown.push(BreakdownLine::new(
                group,
                config.required_points,
                BreakdownReason::Required,
            ));
            total += config.required_points;
            signals.found_required.push(group);
        } else {
            breakdown.push(BreakdownLine::new(
                group,
                config.missing_required_points,
                BreakdownReason::MissingRequired,
            ));
            total += config.missing_required_points;
            signals.missing_required.push(group);
        }
    }

    for &group in &beneficial {
        if selected.contains(&group) && !required.contains(&group) {
            breakdown.push(BreakdownLine::new(
                group,
                config.beneficial_points,
                BreakdownReason::Beneficial,
            ));
            total += config.beneficial_points;
            signals.found_beneficial.push(group);
        }
    }

    // A group that is both required and avoided is an authoring defect; both deltas apply.
    for &group in &avoid {
        if selected.contains(&group) {
            breakdown.push(BreakdownLine::new(
                group,
                config.premature_points,
                BreakdownReason::Premature,
            ));
            total += config.premature_points;
            signals.found_avoided.push(group);
        }
    }

    if let Some(bonus) = config.lean_bonus {
        let budget = required.len() + beneficial.len() / 2;
        if signals.missing_required.is_empty() && !selected.is_empty() && selected.len() <= budget
        {
            breakdown.push(BreakdownLine::new(
                LEAN_BONUS_COMPONENT,
                bonus,
                BreakdownReason::LeanArchitecture,
            ));
            total += bonus;
        }
    }

    (breakdown, total, signals)
}

/// Half-up percentage of required groups present; an empty requirement set is complete.
pub(crate) fn completion_rate(found: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let found = found.min(total);
    ((200 * found + total) / (2 * total)) as u8
}
