use super::rules::ScoreSignals;

pub(crate) const INVALID_PHASE: &str = "Invalid phase";

pub(crate) fn compose_feedback(signals: &ScoreSignals<'_>) -> Vec<String> {
    let mut feedback = Vec::new();

    if signals.missing_required.is_empty() {
        feedback.push("Great job! You included all essential components.".to_string());
    } else {
        feedback.push(format!(
            "Missing {} essential component(s): {}",
            signals.missing_required.len(),
            signals.missing_required.join(", ")
        ));
    }

    if !signals.found_beneficial.is_empty() {
        feedback.push(format!(
            "Good additions: {}",
            signals.found_beneficial.join(", ")
        ));
    }

    if !signals.found_avoided.is_empty() {
        feedback.push(format!(
            "Consider removing: {} (premature for this phase)",
            signals.found_avoided.join(", ")
        ));
    }

    feedback
}
