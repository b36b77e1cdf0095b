use crate::config::Settings;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mentor-match",
    about = "Pair mentorship program mentees with mentors from a survey export",
    version
)]
pub struct Cli {
    /// Survey responses CSV
    #[arg(short, long, default_value = "data/mentor-program-responses.csv")]
    pub input: PathBuf,

    /// Where to write the matches CSV (defaults to output.path from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file; config/default and config/local are used otherwise
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the number of optimal assignment rounds
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// How to print run statistics
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    pub summary: SummaryFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    Text,
    Json,
}

impl Cli {
    /// Fold command-line overrides into loaded settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(output) = &self.output {
            settings.output.path = output.clone();
        }
        if let Some(max_iterations) = self.max_iterations {
            settings.matching.max_iterations = max_iterations;
        }
    }
}
