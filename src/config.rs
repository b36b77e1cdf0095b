use crate::core::{
    cost::DEFAULT_CAPACITY_PENALTY,
    matcher::DEFAULT_MAX_ITERATIONS,
    scoring::DEFAULT_ITERATION_MULTIPLIERS,
    Matcher,
};
use crate::models::ScoringWeights;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MatchingSettings {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_capacity_penalty")]
    #[validate(range(min = 0.0))]
    pub capacity_penalty: f64,
    #[serde(default = "default_iteration_multipliers")]
    #[validate(length(min = 1))]
    pub iteration_multipliers: Vec<f64>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            capacity_penalty: default_capacity_penalty(),
            iteration_multipliers: default_iteration_multipliers(),
        }
    }
}

fn default_max_iterations() -> usize { DEFAULT_MAX_ITERATIONS }
fn default_capacity_penalty() -> f64 { DEFAULT_CAPACITY_PENALTY }
fn default_iteration_multipliers() -> Vec<f64> { DEFAULT_ITERATION_MULTIPLIERS.to_vec() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Points awarded per similarity rule; missing keys keep the program's standard values
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    pub same_school_and_major: f64,
    pub same_major: f64,
    pub same_school: f64,
    pub no_preference: f64,
    pub commitment_exact: f64,
    pub commitment_near: f64,
    pub support_overlap: f64,
    pub communication_overlap: f64,
    pub term_exact: f64,
    pub term_partial: f64,
    pub seniority: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        ScoringWeights::default().into()
    }
}

impl From<ScoringWeights> for WeightsConfig {
    fn from(w: ScoringWeights) -> Self {
        Self {
            same_school_and_major: w.same_school_and_major,
            same_major: w.same_major,
            same_school: w.same_school,
            no_preference: w.no_preference,
            commitment_exact: w.commitment_exact,
            commitment_near: w.commitment_near,
            support_overlap: w.support_overlap,
            communication_overlap: w.communication_overlap,
            term_exact: w.term_exact,
            term_partial: w.term_partial,
            seniority: w.seniority,
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(w: &WeightsConfig) -> Self {
        Self {
            same_school_and_major: w.same_school_and_major,
            same_major: w.same_major,
            same_school: w.same_school,
            no_preference: w.no_preference,
            commitment_exact: w.commitment_exact,
            commitment_near: w.commitment_near,
            support_overlap: w.support_overlap,
            communication_overlap: w.communication_overlap,
            term_exact: w.term_exact,
            term_partial: w.term_partial,
            seniority: w.seniority,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf { PathBuf::from("data/mentorship_matches.csv") }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTOR_MATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path, still honoring environment overrides
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    /// Matcher configured from these settings
    pub fn build_matcher(&self) -> Matcher {
        Matcher::new(self.weights())
            .with_max_iterations(self.matching.max_iterations)
            .with_capacity_penalty(self.matching.capacity_penalty)
            .with_iteration_multipliers(self.matching.iteration_multipliers.clone())
    }
}

/// Environment source, e.g. MENTOR_MATCH_MATCHING__MAX_ITERATIONS -> matching.max_iterations
fn environment() -> Environment {
    Environment::with_prefix("MENTOR_MATCH")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("matching.iteration_multipliers")
}
