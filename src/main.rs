use clap::Parser;
use mentor_match::cli::{Cli, SummaryFormat};
use mentor_match::config::{LogFormat, LoggingSettings, Settings};
use mentor_match::services::{load_roster, save_matches, MatchSummary};
use mentor_match::AppError;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use validator::Validate;

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    cli.apply(&mut settings);
    settings.validate()?;

    init_logging(&settings.logging)?;
    info!(
        input = %cli.input.display(),
        max_iterations = settings.matching.max_iterations,
        "starting mentor matching"
    );

    let roster = load_roster(&cli.input)?;
    let matcher = settings.build_matcher();
    let outcome = matcher.run(&roster.mentors, &roster.mentees)?;

    info!(
        pairs = outcome.matches.len(),
        rounds = outcome.iterations_run(),
        fallback = outcome.fallback_count(),
        "matching complete"
    );

    save_matches(&settings.output.path, &outcome.matches, &outcome.unmatched)?;

    let summary = MatchSummary::from_outcome(&outcome, &roster.mentors, &roster.mentees);
    match cli.summary {
        SummaryFormat::Text => print!("{}", summary),
        SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

/// Logs go to stderr so the summary on stdout stays clean; RUST_LOG wins over the configured level
fn init_logging(logging: &LoggingSettings) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| AppError::Telemetry(format!("invalid log level '{}': {}", logging.level, e)))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    let result = match logging.format {
        LogFormat::Pretty => subscriber.pretty().try_init(),
        LogFormat::Compact => subscriber.compact().try_init(),
        LogFormat::Json => subscriber.json().try_init(),
    };

    result.map_err(|e| AppError::Telemetry(e.to_string()))
}
