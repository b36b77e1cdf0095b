// Service exports
pub mod commitment;
pub mod loader;
pub mod report;
pub mod writer;

pub use commitment::parse_time_commitment;
pub use loader::{load_roster, read_roster, LoadError, Roster};
pub use report::{MatchSummary, MentorLoadReport};
pub use writer::{save_matches, write_matches, WriteError};
