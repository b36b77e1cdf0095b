use crate::core::{
    assignment::{AssignmentSolver, ShortestAugmentingPath},
    cost::{build_cost_matrix, CostMatrixError, DEFAULT_CAPACITY_PENALTY},
    fallback::place_leftovers,
    loads::MentorLoads,
    scoring::{calculate_similarity_with, DEFAULT_ITERATION_MULTIPLIERS},
};
use crate::models::{MatchOutcome, MatchPair, MatchPhase, Mentee, Mentor, RoundSummary, ScoringWeights};
use thiserror::Error;
use tracing::{debug, info};

/// Default number of optimal-assignment rounds before the fallback takes over
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// Errors that can stop a matching run
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{mentees} mentees need placing but there are no mentors")]
    NoMentors { mentees: usize },

    #[error("cost matrix error: {0}")]
    CostMatrix(#[from] CostMatrixError),
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Score every mentor against every unmatched mentee
/// 2. Turn scores and current loads into a cost matrix
/// 3. Solve the assignment and record the pairs
/// 4. Repeat on the mentees still unmatched, up to `max_iterations` rounds
/// 5. Place whoever is left on the least-loaded mentors
#[derive(Debug, Clone)]
pub struct Matcher<S = ShortestAugmentingPath> {
    weights: ScoringWeights,
    iteration_multipliers: Vec<f64>,
    capacity_penalty: f64,
    max_iterations: usize,
    solver: S,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            iteration_multipliers: DEFAULT_ITERATION_MULTIPLIERS.to_vec(),
            capacity_penalty: DEFAULT_CAPACITY_PENALTY,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            solver: ShortestAugmentingPath,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl<S: AssignmentSolver> Matcher<S> {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_capacity_penalty(mut self, penalty_per_unit: f64) -> Self {
        self.capacity_penalty = penalty_per_unit;
        self
    }

    pub fn with_iteration_multipliers(mut self, multipliers: Vec<f64>) -> Self {
        self.iteration_multipliers = multipliers;
        self
    }

    /// Swap in a different assignment solver
    pub fn with_solver<T: AssignmentSolver>(self, solver: T) -> Matcher<T> {
        Matcher {
            weights: self.weights,
            iteration_multipliers: self.iteration_multipliers,
            capacity_penalty: self.capacity_penalty,
            max_iterations: self.max_iterations,
            solver,
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Match every mentee to a mentor
    ///
    /// # Arguments
    /// * `mentors` - All mentors; every one is a candidate in every round
    /// * `mentees` - All mentees, in input order
    ///
    /// # Returns
    /// MatchOutcome with one pair per mentee: optimal-phase pairs in round
    /// order, then fallback pairs in input order
    pub fn run(&self, mentors: &[Mentor], mentees: &[Mentee]) -> Result<MatchOutcome, MatchError> {
        if mentees.is_empty() {
            return Ok(MatchOutcome::default());
        }
        if mentors.is_empty() {
            return Err(MatchError::NoMentors {
                mentees: mentees.len(),
            });
        }

        let mut loads = MentorLoads::new(mentors);
        let mut remaining: Vec<&Mentee> = mentees.iter().collect();
        let mut matches = Vec::with_capacity(mentees.len());
        let mut rounds = Vec::new();

        for iteration in 0..self.max_iterations {
            let costs = build_cost_matrix(
                mentors,
                &remaining,
                &loads,
                iteration,
                &self.weights,
                &self.iteration_multipliers,
                self.capacity_penalty,
            )?;
            let pairs = self.solver.solve(&costs);

            let mut matched = vec![false; remaining.len()];
            for &(mentor_idx, mentee_idx) in &pairs {
                let mentor = &mentors[mentor_idx];
                let mentee = remaining[mentee_idx];
                matches.push(self.pair(mentor, mentee, iteration, MatchPhase::Optimal { iteration }));
                loads.increment(mentor.email());
                matched[mentee_idx] = true;
            }

            rounds.push(RoundSummary {
                iteration,
                candidates: remaining.len(),
                assigned: pairs.len(),
            });
            debug!(
                iteration,
                candidates = remaining.len(),
                assigned = pairs.len(),
                total_cost = costs.total(&pairs),
                "assignment round complete"
            );

            // Drop matched mentees by position; mentees may be identical in content
            remaining = remaining
                .into_iter()
                .zip(matched)
                .filter_map(|(mentee, was_matched)| (!was_matched).then_some(mentee))
                .collect();

            if remaining.is_empty() {
                break;
            }
        }

        if !remaining.is_empty() {
            info!(
                leftover = remaining.len(),
                rounds = rounds.len(),
                "placing leftover mentees on least-loaded mentors"
            );
            let last_iteration = self.max_iterations.saturating_sub(1);
            for (mentor_idx, mentee) in place_leftovers(mentors, remaining, &mut loads) {
                matches.push(self.pair(&mentors[mentor_idx], mentee, last_iteration, MatchPhase::Fallback));
            }
        }

        for mentor in mentors {
            let load = loads.get(mentor.email());
            if load > mentor.num_mentees {
                info!(
                    mentor = mentor.email(),
                    capacity = mentor.num_mentees,
                    load,
                    "mentor matched past suggested capacity"
                );
            }
        }

        Ok(MatchOutcome {
            matches,
            unmatched: Vec::new(),
            rounds,
            loads: loads.snapshot(),
        })
    }

    fn pair(&self, mentor: &Mentor, mentee: &Mentee, iteration: usize, phase: MatchPhase) -> MatchPair {
        MatchPair {
            mentor: mentor.clone(),
            mentee: mentee.clone(),
            phase,
            similarity: calculate_similarity_with(
                mentor,
                mentee,
                iteration,
                &self.weights,
                &self.iteration_multipliers,
            ),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cost::CostMatrix;
    use crate::models::{MatchPreference, MentoringTerm, Role, Student};
    use std::collections::{BTreeMap, BTreeSet, HashMap};

    fn student(email: &str, year: &str, role: Role) -> Student {
        Student {
            name: format!("User {}", email),
            email: email.to_string(),
            pronouns: String::new(),
            year: year.to_string(),
            major: "Biology".to_string(),
            school: Some("Sciences".to_string()),
            role,
            timezone: 0.0,
            time_commitment: 3.0,
            races: BTreeSet::new(),
        }
    }

    fn create_mentor(email: &str, capacity: u32) -> Mentor {
        Mentor {
            profile: student(email, "Senior", Role::Mentor),
            num_mentees: capacity,
            preferred_mentee_major: String::new(),
            mentoring_term: MentoringTerm::Long,
            expertise_areas: BTreeSet::new(),
            support_areas: BTreeSet::new(),
            communication_methods: BTreeSet::new(),
        }
    }

    fn create_mentee(email: &str) -> Mentee {
        Mentee {
            profile: student(email, "First-year", Role::Mentee),
            preferred_mentor_match: MatchPreference::SameMajor,
            desired_mentoring_term: MentoringTerm::Long,
            desired_support_areas: BTreeSet::new(),
            preferred_comm_methods: BTreeSet::new(),
        }
    }

    fn loads_from(matches: &[MatchPair]) -> HashMap<String, u32> {
        let mut counts = HashMap::new();
        for pair in matches {
            *counts.entry(pair.mentor.email().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Solver that never assigns anything, forcing the fallback
    struct NoopSolver;

    impl AssignmentSolver for NoopSolver {
        fn solve(&self, _costs: &CostMatrix) -> Vec<(usize, usize)> {
            Vec::new()
        }
    }

    #[test]
    fn test_every_mentee_matched_once() {
        let matcher = Matcher::with_default_weights();
        let mentors = vec![create_mentor("a@x", 1), create_mentor("b@x", 2)];
        let mentees: Vec<Mentee> = (0..7).map(|i| create_mentee(&format!("{}@y", i))).collect();

        let outcome = matcher.run(&mentors, &mentees).unwrap();

        assert_eq!(outcome.matches.len(), 7);
        assert!(outcome.unmatched.is_empty());
        let mut emails: Vec<&str> = outcome.matches.iter().map(|p| p.mentee.email()).collect();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(emails.len(), 7);
    }

    #[test]
    fn test_two_mentors_three_mentees() {
        let matcher = Matcher::with_default_weights();
        let mentors = vec![create_mentor("a@x", 1), create_mentor("b@x", 1)];
        let mentees = vec![create_mentee("x@y"), create_mentee("y@y"), create_mentee("z@y")];

        let outcome = matcher.run(&mentors, &mentees).unwrap();

        assert_eq!(outcome.matches.len(), 3);
        assert_eq!(outcome.rounds[0].assigned, 2);
        let first_round: Vec<&str> = outcome.matches[..2].iter().map(|p| p.mentor.email()).collect();
        assert_eq!(first_round, vec!["a@x", "b@x"]);

        let loads = loads_from(&outcome.matches);
        assert!(loads["a@x"] >= 1 && loads["b@x"] >= 1);
    }

    #[test]
    fn test_single_round_when_mentors_outnumber_mentees() {
        let matcher = Matcher::with_default_weights();
        let mentors: Vec<Mentor> = (0..5).map(|i| create_mentor(&format!("{}@x", i), 2)).collect();
        let mentees: Vec<Mentee> = (0..3).map(|i| create_mentee(&format!("{}@y", i))).collect();

        let outcome = matcher.run(&mentors, &mentees).unwrap();

        assert_eq!(outcome.iterations_run(), 1);
        assert_eq!(outcome.fallback_count(), 0);
        assert_eq!(outcome.matches.len(), 3);
    }

    #[test]
    fn test_fallback_when_no_rounds() {
        let matcher = Matcher::with_default_weights().with_max_iterations(0);
        let mentors = vec![create_mentor("a@x", 1), create_mentor("b@x", 1)];
        let mentees = vec![create_mentee("x@y"), create_mentee("y@y"), create_mentee("z@y")];

        let outcome = matcher.run(&mentors, &mentees).unwrap();

        assert!(outcome.rounds.is_empty());
        assert_eq!(outcome.fallback_count(), 3);
        let mentor_order: Vec<&str> = outcome.matches.iter().map(|p| p.mentor.email()).collect();
        assert_eq!(mentor_order, vec!["a@x", "b@x", "a@x"]);
    }

    #[test]
    fn test_custom_solver_routes_everyone_to_fallback() {
        let matcher = Matcher::with_default_weights().with_solver(NoopSolver);
        let mentors = vec![create_mentor("a@x", 5)];
        let mentees = vec![create_mentee("x@y"), create_mentee("y@y")];

        let outcome = matcher.run(&mentors, &mentees).unwrap();

        assert_eq!(outcome.rounds.len(), DEFAULT_MAX_ITERATIONS);
        assert!(outcome.rounds.iter().all(|r| r.assigned == 0));
        assert_eq!(outcome.fallback_count(), 2);
    }

    #[test]
    fn test_final_loads_match_recorded_pairs() {
        let matcher = Matcher::with_default_weights().with_max_iterations(1);
        let mentors = vec![create_mentor("a@x", 1), create_mentor("b@x", 2)];
        let mentees: Vec<Mentee> = (0..5).map(|i| create_mentee(&format!("{}@y", i))).collect();

        let outcome = matcher.run(&mentors, &mentees).unwrap();

        assert_eq!(outcome.fallback_count(), 3);
        let counted: BTreeMap<String, u32> = loads_from(&outcome.matches).into_iter().collect();
        assert_eq!(outcome.loads, counted);
        assert_eq!(outcome.loads.values().sum::<u32>(), 5);
    }

    #[test]
    fn test_idle_mentor_reported_at_zero() {
        let matcher = Matcher::with_default_weights();
        let mentors: Vec<Mentor> = (0..3).map(|i| create_mentor(&format!("{}@x", i), 1)).collect();
        let mentees = vec![create_mentee("x@y")];

        let outcome = matcher.run(&mentors, &mentees).unwrap();

        assert_eq!(outcome.loads.len(), 3);
        assert_eq!(outcome.loads.values().filter(|&&load| load == 0).count(), 2);
    }

    #[test]
    fn test_identical_mentees_removed_by_position() {
        let matcher = Matcher::with_default_weights();
        let mentors = vec![create_mentor("a@x", 3)];
        let mentees = vec![create_mentee("same@y"), create_mentee("same@y"), create_mentee("same@y")];

        let outcome = matcher.run(&mentors, &mentees).unwrap();

        assert_eq!(outcome.matches.len(), 3);
        assert_eq!(outcome.rounds.len(), 3);
        assert!(outcome.rounds.iter().all(|r| r.assigned == 1));
    }

    #[test]
    fn test_empty_inputs() {
        let matcher = Matcher::with_default_weights();
        let mentors = vec![create_mentor("a@x", 1)];

        let outcome = matcher.run(&mentors, &[]).unwrap();
        assert!(outcome.matches.is_empty());

        let err = matcher.run(&[], &[create_mentee("x@y")]).unwrap_err();
        assert!(matches!(err, MatchError::NoMentors { mentees: 1 }));
    }

    #[test]
    fn test_similarity_recorded_with_decay() {
        let matcher = Matcher::with_default_weights();
        let mentors = vec![create_mentor("a@x", 1)];
        let mentees = vec![create_mentee("x@y")];

        let outcome = matcher.run(&mentors, &mentees).unwrap();

        // same major 2 + commitment 2 + term 3 + seniority 1 = 8, doubled on round 0
        assert_eq!(outcome.matches[0].similarity, 16.0);
        assert_eq!(outcome.matches[0].phase, MatchPhase::Optimal { iteration: 0 });
    }
}
