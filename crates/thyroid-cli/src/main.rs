use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "thyroid-cli", version, about = "Thyroid Ritual CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Morning pill ritual
    Ritual {
        #[command(subcommand)]
        action: commands::ritual::RitualAction,
    },
    /// Symptom diary
    Symptom {
        #[command(subcommand)]
        action: commands::symptom::SymptomAction,
    },
    /// Weight and dose log
    Weight {
        #[command(subcommand)]
        action: commands::weight::WeightAction,
    },
    /// User profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Wellness tips based on recent symptoms
    Tips {
        /// Show the curated tips without contacting the advice service
        #[arg(long = "static")]
        static_only: bool,
    },
    /// Ask how long to wait before a given breakfast
    Advise {
        /// What you plan to eat
        breakfast: String,
    },
    /// Summary for a medical appointment
    Report {
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Mark the welcome screen as seen
    Welcome,
    /// Delete every stored record
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Ritual { action } => commands::ritual::run(action),
        Commands::Symptom { action } => commands::symptom::run(action),
        Commands::Weight { action } => commands::weight::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Tips { static_only } => commands::tips::run_tips(static_only),
        Commands::Advise { breakfast } => commands::tips::run_advise(&breakfast),
        Commands::Report { json } => commands::report::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Welcome => commands::welcome(),
        Commands::Reset { yes } => commands::reset(yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
