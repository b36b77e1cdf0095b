use crate::models::{year_rank, MatchPreference, Mentee, Mentor, ScoringWeights};

/// Default per-iteration multipliers; the last entry applies to every later iteration
pub const DEFAULT_ITERATION_MULTIPLIERS: [f64; 3] = [2.0, 1.5, 1.0];

/// Contribution of each similarity rule before iteration decay
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimilarityBreakdown {
    pub preference: f64,
    pub commitment: f64,
    pub support: f64,
    pub communication: f64,
    pub term: f64,
    pub seniority: f64,
}

impl SimilarityBreakdown {
    pub fn total(&self) -> f64 {
        self.preference + self.commitment + self.support + self.communication + self.term + self.seniority
    }
}

/// Calculate how well a mentor fits a mentee on the given 0-based iteration
///
/// Scoring formula:
/// similarity = (
///     preference_tier +       # school/major policy the mentee asked for
///     commitment +            # equal meeting frequency, or off by one
///     support_overlap * 2 +   # mentor expertise covering requested support
///     comm_overlap +          # shared communication methods
///     term +                  # equal term, or mentor offers longer
///     seniority               # mentor is further along
/// ) * iteration_multiplier
pub fn calculate_similarity(
    mentor: &Mentor,
    mentee: &Mentee,
    iteration: usize,
    weights: &ScoringWeights,
) -> f64 {
    score_breakdown(mentor, mentee, weights).total() * iteration_multiplier(iteration, &DEFAULT_ITERATION_MULTIPLIERS)
}

/// Same as [`calculate_similarity`] with a caller-supplied multiplier table
pub fn calculate_similarity_with(
    mentor: &Mentor,
    mentee: &Mentee,
    iteration: usize,
    weights: &ScoringWeights,
    multipliers: &[f64],
) -> f64 {
    score_breakdown(mentor, mentee, weights).total() * iteration_multiplier(iteration, multipliers)
}

/// Per-rule contributions for one pair, without iteration decay
pub fn score_breakdown(mentor: &Mentor, mentee: &Mentee, weights: &ScoringWeights) -> SimilarityBreakdown {
    SimilarityBreakdown {
        preference: preference_score(mentor, mentee, weights),
        commitment: commitment_score(mentor.profile.time_commitment, mentee.profile.time_commitment, weights),
        support: mentor.expertise_areas.intersection(&mentee.desired_support_areas).count() as f64
            * weights.support_overlap,
        communication: mentor
            .communication_methods
            .intersection(&mentee.preferred_comm_methods)
            .count() as f64
            * weights.communication_overlap,
        term: term_score(mentor, mentee, weights),
        seniority: if year_rank(&mentor.profile.year) > year_rank(&mentee.profile.year) {
            weights.seniority
        } else {
            0.0
        },
    }
}

/// Multiplier for an iteration; iterations past the table reuse its last entry
#[inline]
pub fn iteration_multiplier(iteration: usize, multipliers: &[f64]) -> f64 {
    multipliers
        .get(iteration)
        .or_else(|| multipliers.last())
        .copied()
        .unwrap_or(1.0)
}

#[inline]
fn preference_score(mentor: &Mentor, mentee: &Mentee, weights: &ScoringWeights) -> f64 {
    let (m, e) = (&mentor.profile, &mentee.profile);
    match &mentee.preferred_mentor_match {
        MatchPreference::SameSchoolAndMajor if m.same_major(e) && m.same_school(e) => weights.same_school_and_major,
        MatchPreference::SameMajor if m.same_major(e) => weights.same_major,
        MatchPreference::SameSchool if m.same_school(e) => weights.same_school,
        MatchPreference::NoPreference => weights.no_preference,
        _ => 0.0,
    }
}

#[inline]
fn commitment_score(mentor: f64, mentee: f64, weights: &ScoringWeights) -> f64 {
    if mentor == mentee {
        weights.commitment_exact
    } else if (mentor - mentee).abs() == 1.0 {
        weights.commitment_near
    } else {
        0.0
    }
}

#[inline]
fn term_score(mentor: &Mentor, mentee: &Mentee, weights: &ScoringWeights) -> f64 {
    if mentor.mentoring_term == mentee.desired_mentoring_term {
        weights.term_exact
    } else if mentor.mentoring_term.exceeds(&mentee.desired_mentoring_term) {
        weights.term_partial
    } else {
        0.0
    }
}
