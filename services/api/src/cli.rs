use crate::demo::{
    run_catalog, run_demo, run_evaluate, run_hints, CatalogArgs, DemoArgs, EvaluateArgs,
    HintsArgs,
};
use crate::server;
use archpath::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ArchPath",
    about = "Serve the ArchPath scoring API or score architectures from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a component selection for one company phase
    Evaluate(EvaluateArgs),
    /// Print the brief and hints for one company phase
    Hints(HintsArgs),
    /// List components by category, plus the playable companies
    Catalog(CatalogArgs),
    /// Play a company through all four phases with a reference answer
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Hints(args) => run_hints(args),
        Command::Catalog(args) => run_catalog(args),
        Command::Demo(args) => run_demo(args),
    }
}
