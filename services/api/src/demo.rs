use crate::infra::{parse_flavor, parse_phase, scoring_engine, InMemorySessionRepository};
use archpath::config::AppConfig;
use archpath::error::AppError;
use archpath::game::GameService;
use archpath::phases::Phase;
use archpath::registry::{self, Flavor};
use archpath::scoring::ScoreResult;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Company id (netflix, slack, uber, spotify, instagram)
    #[arg(long)]
    pub(crate) company: String,
    /// Phase id (mvp, scale1, scale2, enterprise)
    #[arg(long)]
    pub(crate) phase: String,
    /// Accept display names from this flavor in addition to component ids
    #[arg(long, value_parser = parse_flavor)]
    pub(crate) flavor: Option<Flavor>,
    /// Selected components, space or comma separated
    #[arg(value_delimiter = ',')]
    pub(crate) components: Vec<String>,
    /// Print the result as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct HintsArgs {
    #[arg(long)]
    pub(crate) company: String,
    #[arg(long, value_parser = parse_phase)]
    pub(crate) phase: Phase,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Show vendor names for this flavor (defaults to ARCHPATH_DEFAULT_FLAVOR)
    #[arg(long, value_parser = parse_flavor)]
    pub(crate) flavor: Option<Flavor>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Company to play through
    #[arg(long, default_value = "netflix")]
    pub(crate) company: String,
    /// Flavor used for component names in the output
    #[arg(long, value_parser = parse_flavor)]
    pub(crate) flavor: Option<Flavor>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        company,
        phase,
        flavor,
        components,
        json,
    } = args;

    let config = AppConfig::load()?;
    let engine = scoring_engine(&config);
    let selection: Vec<String> = components
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| match flavor.and_then(|flavor| flavor.resolve(entry)) {
            Some(id) => id.to_string(),
            None => entry.to_string(),
        })
        .collect();

    let result = engine.evaluate(&company, &phase, &selection);
    if json {
        let rendered = serde_json::to_string_pretty(&result)
            .map_err(|err| AppError::Usage(format!("failed to render result: {err}")))?;
        println!("{rendered}");
    } else {
        println!("{} / {}", company, phase);
        render_result(&result, "  ");
    }
    Ok(())
}

pub(crate) fn run_hints(args: HintsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = scoring_engine(&config);
    let catalog = engine.catalog();

    let hints = catalog.hints(&args.company, args.phase.id());
    if hints.is_empty() {
        return Err(AppError::Usage(format!(
            "no rule for company '{}' in phase {}",
            args.company, args.phase
        )));
    }

    println!(
        "Phase {}: {}",
        args.phase.number(),
        args.phase.title()
    );
    println!("{}", catalog.brief(&args.company, args.phase.id()));
    for hint in hints {
        println!("- {hint}");
    }
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let flavor = args.flavor.unwrap_or(config.game.default_flavor);
    let engine = scoring_engine(&config);

    println!("Components ({})", flavor.label());
    for category in registry::categories().iter().skip(1) {
        println!("{}", category.name);
        for &id in &category.components {
            let name = flavor.display_name(id).unwrap_or(id);
            match registry::equivalents(id) {
                Some(equivalents) => println!("  - {name} [{id}] ({equivalents})"),
                None => println!("  - {name} [{id}]"),
            }
        }
    }

    println!("\nCompanies");
    for company in engine.catalog().companies() {
        println!(
            "  - {} ({}) - {} [{}]",
            company.name,
            company.id,
            company.tagline,
            company.difficulty.label()
        );
    }
    Ok(())
}

/// Play every phase with its essentials plus the first suggested addition.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let flavor = args.flavor.unwrap_or(config.game.default_flavor);
    let engine = Arc::new(scoring_engine(&config));
    let service = GameService::new(
        Arc::new(InMemorySessionRepository::default()),
        engine.clone(),
    );

    let session = service.start(&args.company)?;
    let company_name = engine
        .catalog()
        .company(&session.company)
        .map(|company| company.name)
        .unwrap_or(session.company.as_str());
    println!("ArchPath demo: {company_name} ({})", flavor.short_label());

    for phase in Phase::ordered() {
        let Some(rule) = engine.catalog().rule(&session.company, phase) else {
            continue;
        };

        let picks: Vec<&String> = rule.required.iter().chain(rule.beneficial.first()).collect();
        for component in &picks {
            service.toggle(&session.id, component)?;
        }

        let (updated, outcome) = service.submit(&session.id)?;
        let names: Vec<&str> = picks
            .iter()
            .map(|id| flavor.display_name(id).unwrap_or(id.as_str()))
            .collect();
        println!(
            "\nPhase {}: {} -> {}",
            phase.number(),
            phase.title(),
            names.join(", ")
        );
        render_result(&outcome.result, "  ");
        println!("  Running total: {}", updated.total_score);
    }

    let finished = service.get(&session.id)?;
    println!(
        "\nFinal score: {} across {} phases",
        finished.total_score,
        finished.history.len()
    );
    Ok(())
}

fn render_result(result: &ScoreResult, indent: &str) {
    println!(
        "{indent}Score {} | {}% of essentials",
        result.score, result.completion_rate
    );
    for line in &result.feedback {
        println!("{indent}{line}");
    }
    for line in &result.breakdown {
        println!(
            "{indent}  {:+} {} ({})",
            line.points,
            line.component,
            line.reason.label()
        );
    }
}
