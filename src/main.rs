//! CLI entry point for the bikeshare explorer.
//!
//! `explore` runs the interactive prompt loop; `report` runs one analysis
//! non-interactively and prints it as text or JSON.

use anyhow::{Context, Result};
use bikeshare_explorer::{
    config::{City, CityTable},
    filter::FilterSelection,
    logging::env_filter,
    output::{write_json, write_report},
    session::{Request, Session, build_report},
    store::CsvStore,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory holding the city CSV files
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = "data", global = true)]
    data_dir: String,

    /// Optional JSON file mapping cities to CSV files
    #[arg(long, env = "BIKESHARE_CITIES", global = true)]
    cities: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive prompt loop (default)
    Explore,
    /// Print the statistics for one city and filter
    Report {
        /// chicago, "new york city" or washington
        #[arg(short, long)]
        city: String,

        /// January through June, or "all"
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Monday through Sunday, or "all"
        #[arg(short, long, default_value = "all")]
        day: String,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr stays at warn by default so it does not interleave with prompts
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(env_filter("RUST_LOG", "warn"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let cities = match &cli.cities {
        Some(path) => {
            CityTable::load(path).with_context(|| format!("Failed to read city table {path}"))?
        }
        None => CityTable::default(),
    };
    info!(data_dir = %cli.data_dir, custom_cities = cli.cities.is_some(), "Configured record store");
    let store = CsvStore::new(&cli.data_dir, cities);

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let stdin = io::stdin();
            Session::new(&store, stdin.lock(), io::stdout()).run()?;
        }
        Commands::Report {
            city,
            month,
            day,
            json,
        } => {
            let request = Request {
                city: city.parse::<City>()?,
                selection: FilterSelection::parse(&month, &day)?,
            };
            let report = build_report(&store, &request)
                .with_context(|| format!("Failed to analyze {}", request.city))?;

            let mut out = io::stdout().lock();
            if json {
                write_json(&mut out, &report)?;
            } else {
                write_report(&mut out, &report)?;
            }
            out.flush()?;
        }
    }

    Ok(())
}
