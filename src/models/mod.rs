// Model exports
pub mod domain;
pub mod results;

pub use domain::{year_rank, MatchPreference, Mentee, Mentor, MentoringTerm, Role, ScoringWeights, Student};
pub use results::{MatchOutcome, MatchPair, MatchPhase, RoundSummary};
