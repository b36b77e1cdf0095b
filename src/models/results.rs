use serde::Serialize;
use std::collections::BTreeMap;
use crate::models::domain::{Mentee, Mentor};

/// How a pair was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum MatchPhase {
    /// Chosen by the optimal assignment on the given 0-based iteration
    Optimal { iteration: usize },
    /// Placed on the least-loaded mentor after the iteration budget ran out
    Fallback,
}

/// One mentor/mentee pairing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchPair {
    pub mentor: Mentor,
    pub mentee: Mentee,
    pub phase: MatchPhase,
    /// Similarity at the iteration the pair was made; fallback pairs score at the last iteration
    pub similarity: f64,
}

impl MatchPair {
    pub fn is_fallback(&self) -> bool {
        matches!(self.phase, MatchPhase::Fallback)
    }
}

/// Per-iteration bookkeeping of the optimal phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub iteration: usize,
    pub candidates: usize,
    pub assigned: usize,
}

/// Result of a full matching run
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchOutcome {
    /// Optimal-phase pairs followed by fallback pairs
    pub matches: Vec<MatchPair>,
    /// Mentees left without a mentor; empty whenever the run succeeds
    pub unmatched: Vec<Mentee>,
    pub rounds: Vec<RoundSummary>,
    /// Mentees assigned to each mentor email when the run finished
    pub loads: BTreeMap<String, u32>,
}

impl MatchOutcome {
    pub fn fallback_count(&self) -> usize {
        self.matches.iter().filter(|pair| pair.is_fallback()).count()
    }

    pub fn iterations_run(&self) -> usize {
        self.rounds.len()
    }
}
