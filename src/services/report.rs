use crate::models::{MatchOutcome, Mentee, Mentor};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Suggested vs. actual load for one mentor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentorLoadReport {
    pub name: String,
    pub email: String,
    pub capacity: u32,
    pub actual: u32,
}

impl MentorLoadReport {
    pub fn is_overloaded(&self) -> bool {
        self.actual > self.capacity
    }
}

/// Run statistics for the people running the program
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "totalMentors")]
    pub total_mentors: usize,
    #[serde(rename = "totalMentees")]
    pub total_mentees: usize,
    #[serde(rename = "matchedPairs")]
    pub matched_pairs: usize,
    #[serde(rename = "fallbackPairs")]
    pub fallback_pairs: usize,
    pub iterations: usize,
    #[serde(rename = "mentorLoads")]
    pub mentor_loads: Vec<MentorLoadReport>,
}

impl MatchSummary {
    /// Tally each mentor's pairs against their suggested capacity, in mentor input order
    pub fn from_outcome(outcome: &MatchOutcome, mentors: &[Mentor], mentees: &[Mentee]) -> Self {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for pair in &outcome.matches {
            *counts.entry(pair.mentor.email()).or_insert(0) += 1;
        }

        let mentor_loads = mentors
            .iter()
            .map(|mentor| MentorLoadReport {
                name: mentor.name().to_string(),
                email: mentor.email().to_string(),
                capacity: mentor.num_mentees,
                actual: counts.get(mentor.email()).copied().unwrap_or(0),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            total_mentors: mentors.len(),
            total_mentees: mentees.len(),
            matched_pairs: outcome.matches.len(),
            fallback_pairs: outcome.fallback_count(),
            iterations: outcome.iterations_run(),
            mentor_loads,
        }
    }

    pub fn overloaded(&self) -> impl Iterator<Item = &MentorLoadReport> {
        self.mentor_loads.iter().filter(|load| load.is_overloaded())
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total mentors: {}", self.total_mentors)?;
        writeln!(f, "Total mentees: {}", self.total_mentees)?;
        writeln!(f, "Matched pairs: {}", self.matched_pairs)?;
        writeln!(
            f,
            "Assignment rounds: {} ({} pairs placed by fallback)",
            self.iterations, self.fallback_pairs
        )?;

        writeln!(f)?;
        writeln!(f, "Mentor loads:")?;
        for load in &self.mentor_loads {
            writeln!(f, "  - {}: Suggested capacity {}, Actual matches {}", load.name, load.capacity, load.actual)?;
        }

        let mut overloaded = self.overloaded().peekable();
        if overloaded.peek().is_some() {
            writeln!(f)?;
            writeln!(f, "Mentors matched with more mentees than their suggested capacity:")?;
            for load in overloaded {
                writeln!(f, "  - {}: Suggested capacity {}, Actual matches {}", load.name, load.capacity, load.actual)?;
            }
        }

        Ok(())
    }
}
