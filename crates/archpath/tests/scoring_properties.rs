//! Properties of the scoring engine checked across every authored phase rule.
//!
//! Random selections mix registered ids, ids unknown to the registry, duplicates and
//! members of the same service group.

use archpath::phases::{Phase, PhaseCatalog, PhaseRule};
use archpath::registry::{self, equivalency::group_members, normalize};
use archpath::scoring::{BreakdownReason, ScoreResult, ScoringEngine};
use proptest::prelude::*;

const UNREGISTERED: [&str; 2] = ["mainframe", "quantum-cache"];

fn all_rules(catalog: &PhaseCatalog) -> Vec<(&'static str, Phase, &PhaseRule)> {
    let mut rules = Vec::new();
    for company in catalog.companies() {
        for phase in Phase::ordered() {
            let rule = catalog
                .rule(company.id, phase)
                .unwrap_or_else(|| panic!("{} {phase} has a rule", company.id));
            rules.push((company.id, phase, rule));
        }
    }
    rules
}

fn evaluate(engine: &ScoringEngine, company: &str, phase: Phase, selection: &[&str]) -> ScoreResult {
    engine.evaluate(company, phase.id(), selection.iter().copied())
}

fn arb_rule_key() -> impl Strategy<Value = (&'static str, Phase)> {
    let keys: Vec<(&'static str, Phase)> = all_rules(&PhaseCatalog::standard())
        .into_iter()
        .map(|(company, phase, _)| (company, phase))
        .collect();
    prop::sample::select(keys)
}

fn arb_component() -> impl Strategy<Value = &'static str> {
    let mut pool: Vec<&'static str> = registry::components().iter().map(|c| c.id).collect();
    pool.extend(UNREGISTERED);
    prop::sample::select(pool)
}

fn arb_selection() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(arb_component(), 0..30)
}

/// Two distinct members of one service group.
fn arb_equivalent_pair() -> impl Strategy<Value = (&'static str, &'static str)> {
    let pairs: Vec<(&'static str, &'static str)> = registry::components()
        .iter()
        .flat_map(|component| {
            group_members(component.id)
                .iter()
                .filter(move |member| **member != component.id)
                .map(move |member| (component.id, *member))
        })
        .collect();
    prop::sample::select(pairs)
}

#[test]
fn standard_catalog_covers_every_company_and_phase() {
    let catalog = PhaseCatalog::standard();
    assert_eq!(catalog.companies().len(), 5);
    assert_eq!(all_rules(&catalog).len(), 20);
}

#[test]
fn standard_catalog_has_no_cross_tier_overlaps() {
    let conflicts = PhaseCatalog::standard().conflicts();
    assert!(conflicts.is_empty(), "unexpected overlaps: {conflicts:?}");
}

#[test]
fn equivalent_pairs_exist_for_every_shared_group() {
    for group in ["web-server", "file-storage", "message-queue", "monitoring", "firewall"] {
        assert_eq!(group_members(group).len(), 2, "{group}");
    }
}

proptest! {
    #[test]
    fn scores_are_floored_and_match_breakdown(
        (company, phase) in arb_rule_key(),
        selection in arb_selection()
    ) {
        let engine = ScoringEngine::standard();
        let result = evaluate(&engine, company, phase, &selection);

        prop_assert_eq!(result.score, result.unclamped_total().max(0) as u32);
        prop_assert!(result.completion_rate <= 100);
        prop_assert!(!result.feedback.is_empty());

        let normalized: Vec<&str> = selection.iter().map(|id| normalize(id)).collect();
        prop_assert_eq!(result, evaluate(&engine, company, phase, &normalized));
    }

    #[test]
    fn evaluation_is_deterministic_and_order_insensitive(
        (company, phase) in arb_rule_key(),
        (selection, shuffled) in arb_selection()
            .prop_flat_map(|selection| (Just(selection.clone()), Just(selection).prop_shuffle()))
    ) {
        let engine = ScoringEngine::standard();
        let first = evaluate(&engine, company, phase, &selection);

        prop_assert_eq!(&first, &evaluate(&engine, company, phase, &selection));
        prop_assert_eq!(&first, &evaluate(&engine, company, phase, &shuffled));
    }

    #[test]
    fn group_members_are_interchangeable(
        (company, phase) in arb_rule_key(),
        (original, swapped) in arb_equivalent_pair(),
        rest in arb_selection()
    ) {
        let engine = ScoringEngine::standard();

        let mut with_original = vec![original];
        with_original.extend(rest.iter().copied());
        let mut with_swapped = vec![swapped];
        with_swapped.extend(rest.iter().copied());

        prop_assert_eq!(
            evaluate(&engine, company, phase, &with_original),
            evaluate(&engine, company, phase, &with_swapped)
        );
    }
}

#[test]
fn including_all_required_moves_total_by_fifteen_each() {
    let engine = ScoringEngine::standard();

    for (company, phase, rule) in all_rules(engine.catalog()) {
        let without: Vec<&str> = rule.beneficial.iter().map(String::as_str).collect();
        let mut with = without.clone();
        with.extend(rule.required.iter().map(String::as_str));

        let before = evaluate(&engine, company, phase, &without).unclamped_total();
        let after = evaluate(&engine, company, phase, &with).unclamped_total();

        assert_eq!(
            after - before,
            15 * rule.required.len() as i32,
            "{company} {phase}"
        );
    }
}

#[test]
fn each_avoided_group_costs_three() {
    let engine = ScoringEngine::standard();

    for (company, phase, rule) in all_rules(engine.catalog()) {
        let base: Vec<&str> = rule.required.iter().map(String::as_str).collect();
        let baseline = evaluate(&engine, company, phase, &base).unclamped_total();

        for avoided in &rule.avoid {
            let mut selection = base.clone();
            selection.push(avoided.as_str());
            let result = evaluate(&engine, company, phase, &selection);

            assert_eq!(result.unclamped_total(), baseline - 3, "{company} {phase} {avoided}");
            assert!(result
                .breakdown
                .iter()
                .any(|line| line.reason == BreakdownReason::Premature));
        }
    }
}

#[test]
fn netflix_scale1_mixed_selection() {
    let engine = ScoringEngine::standard();

    let result = evaluate(
        &engine,
        "netflix",
        Phase::Scale1,
        &["web-server", "database", "cdn", "cache", "message-queue"],
    );

    assert_eq!(result.score, 27);
    assert_eq!(result.completion_rate, 75);
    assert_eq!(
        result.feedback,
        vec![
            "Missing 1 essential component(s): file-storage".to_string(),
            "Good additions: cache".to_string(),
            "Consider removing: message-queue (premature for this phase)".to_string(),
        ]
    );
}

#[test]
fn unknown_company_or_phase_is_invalid() {
    let engine = ScoringEngine::standard();

    assert_eq!(
        engine.evaluate("myspace", "mvp", ["web-server"]),
        ScoreResult::invalid()
    );
    assert_eq!(
        engine.evaluate("netflix", "scale3", ["web-server"]),
        ScoreResult::invalid()
    );
}
