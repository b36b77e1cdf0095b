//! Mentor Match - capacity-aware mentor/mentee pairing for mentorship programs
//!
//! This library provides the matching engine: preference scoring, cost
//! matrices, repeated optimal assignment with load penalties, and a
//! least-loaded fallback that guarantees every mentee a mentor.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_similarity, AssignmentSolver, MatchError, Matcher, ShortestAugmentingPath};
pub use error::AppError;
pub use models::{MatchOutcome, MatchPair, Mentee, Mentor, ScoringWeights, Student};
