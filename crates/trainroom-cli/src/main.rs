use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "trainroom", version, about = "Trainroom training day planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a block's realistic duration
    Estimate(commands::estimate::EstimateArgs),
    /// Check whether one exercise fits a block
    Fit(commands::recommend::FitArgs),
    /// Recommend exercises for a block
    Recommend(commands::recommend::RecommendArgs),
    /// Shorter alternatives for a block
    Alternatives(commands::recommend::RecommendArgs),
    /// Browse the exercise catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Convert elapsed minutes to a clock time
    Clock(commands::clock::ClockArgs),
    /// Training day project files
    Project {
        #[command(subcommand)]
        action: commands::project::ProjectAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TRAINROOM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Estimate(args) => commands::estimate::run(args),
        Commands::Fit(args) => commands::recommend::run_fit(args),
        Commands::Recommend(args) => commands::recommend::run_recommend(args),
        Commands::Alternatives(args) => commands::recommend::run_alternatives(args),
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Clock(args) => commands::clock::run(args),
        Commands::Project { action } => commands::project::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
