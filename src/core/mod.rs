// Core algorithm exports
pub mod assignment;
pub mod cost;
pub mod fallback;
pub mod loads;
pub mod matcher;
pub mod scoring;

pub use assignment::{AssignmentSolver, ShortestAugmentingPath};
pub use cost::{build_cost_matrix, capacity_penalty, CostMatrix, CostMatrixError};
pub use fallback::{least_loaded_mentor, place_leftovers};
pub use loads::MentorLoads;
pub use matcher::{MatchError, Matcher};
pub use scoring::{calculate_similarity, score_breakdown, SimilarityBreakdown};
