use crate::models::Mentor;
use std::collections::{BTreeMap, HashMap};

/// Count of mentees currently assigned to each mentor, keyed by mentor email
///
/// Owned by the matcher for the length of one run. Loads only ever go up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorLoads {
    loads: HashMap<String, u32>,
}

impl MentorLoads {
    /// Start every mentor at zero
    pub fn new(mentors: &[Mentor]) -> Self {
        Self {
            loads: mentors.iter().map(|m| (m.email().to_string(), 0)).collect(),
        }
    }

    /// Current load; unknown emails read as zero
    #[inline]
    pub fn get(&self, email: &str) -> u32 {
        self.loads.get(email).copied().unwrap_or(0)
    }

    /// Record one more mentee for this mentor and return the new load
    pub fn increment(&mut self, email: &str) -> u32 {
        let load = self.loads.entry(email.to_string()).or_insert(0);
        *load += 1;
        *load
    }

    /// Units of load counted against the mentor: `max(0, load - num_mentees + 1)`
    ///
    /// Zero until the mentor reaches their target, then one per mentee at or past it.
    #[inline]
    pub fn excess(&self, mentor: &Mentor) -> u32 {
        (self.get(mentor.email()) + 1).saturating_sub(mentor.num_mentees)
    }

    pub fn total(&self) -> u32 {
        self.loads.values().sum()
    }

    /// Loads ordered by email
    pub fn snapshot(&self) -> BTreeMap<String, u32> {
        self.loads.iter().map(|(email, load)| (email.clone(), *load)).collect()
    }
}
