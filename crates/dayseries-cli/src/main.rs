use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "dayseries", version, about = "Daily values with a centered moving average")]
struct Cli {
    /// Series file to use instead of the configured one
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the value recorded for a date
    Get {
        /// Date as YYYY-MM-DD, or "today"
        date: String,
    },
    /// Record or overwrite the value for a date
    Set {
        /// Date as YYYY-MM-DD, or "today"
        date: String,
        /// Numeric value
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Print the series with its moving average
    Series {
        /// Odd window size in days; defaults to the configured window
        #[arg(short, long, allow_negative_numbers = true)]
        window: Option<i64>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("DAYSERIES_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = commands::Context {
        data: cli.data,
        json: cli.json,
    };
    let result = match cli.command {
        Commands::Get { date } => commands::entry::get(&ctx, &date),
        Commands::Set { date, value } => commands::entry::set(&ctx, &date, value),
        Commands::Series { window } => commands::series::run(&ctx, window),
        Commands::Config { action } => commands::config::run(&ctx, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
