use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Which side of the program an applicant signed up for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
}

impl Role {
    /// Parse the survey's role selector. Case and surrounding whitespace are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mentor" => Some(Role::Mentor),
            "mentee" => Some(Role::Mentee),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Mentor => f.write_str("mentor"),
            Role::Mentee => f.write_str("mentee"),
        }
    }
}

/// How closely a mentee wants their mentor's school and major to line up with theirs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPreference {
    SameSchoolAndMajor,
    SameMajor,
    SameSchool,
    NoPreference,
    Unrecognized(String),
}

impl MatchPreference {
    /// Parse a survey answer into a preference policy
    ///
    /// Only the exact snake_case tokens are recognized; anything else,
    /// including a blank answer, is kept as `Unrecognized`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "same_school_and_major" => MatchPreference::SameSchoolAndMajor,
            "same_major" => MatchPreference::SameMajor,
            "same_school" => MatchPreference::SameSchool,
            "no_preference" => MatchPreference::NoPreference,
            other => MatchPreference::Unrecognized(other.to_string()),
        }
    }
}

impl Default for MatchPreference {
    fn default() -> Self {
        MatchPreference::NoPreference
    }
}

/// Length of mentoring relationship an applicant is after
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentoringTerm {
    Short,
    Medium,
    Long,
    Other(String),
}

impl MentoringTerm {
    /// Parse a term answer; only the bare `short`, `medium` and `long` keywords
    /// take part in the partial-credit ladder, other text compares verbatim
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "short" => MentoringTerm::Short,
            "medium" => MentoringTerm::Medium,
            "long" => MentoringTerm::Long,
            other => MentoringTerm::Other(other.to_string()),
        }
    }

    /// Whether a mentor offering `self` covers a shorter `requested` term
    pub fn exceeds(&self, requested: &MentoringTerm) -> bool {
        matches!(
            (self, requested),
            (MentoringTerm::Long, MentoringTerm::Medium)
                | (MentoringTerm::Long, MentoringTerm::Short)
                | (MentoringTerm::Medium, MentoringTerm::Short)
        )
    }
}

impl Default for MentoringTerm {
    fn default() -> Self {
        MentoringTerm::Medium
    }
}

/// Ordinal rank for a grade-level label; unknown labels rank 0
#[inline]
pub fn year_rank(year: &str) -> u8 {
    match year {
        "First-year" => 1,
        "Second-year" => 2,
        "Junior" => 3,
        "Senior" => 4,
        "Masters/Graduate" => 5,
        _ => 0,
    }
}

/// Fields shared by every applicant regardless of role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub email: String,
    pub pronouns: String,
    pub year: String,
    pub major: String,
    #[serde(default)]
    pub school: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub timezone: f64,
    #[serde(rename = "timeCommitment")]
    pub time_commitment: f64,
    #[serde(default)]
    pub races: BTreeSet<String>,
}

impl Student {
    /// Both sides named a school and it is the same one
    pub fn same_school(&self, other: &Student) -> bool {
        match (&self.school, &other.school) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn same_major(&self, other: &Student) -> bool {
        self.major == other.major
    }
}

/// A mentor applicant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    #[serde(flatten)]
    pub profile: Student,
    /// Advisory target; the matcher may exceed it
    #[serde(rename = "numMentees")]
    pub num_mentees: u32,
    #[serde(rename = "preferredMenteeMajor")]
    pub preferred_mentee_major: String,
    #[serde(rename = "mentoringTerm")]
    pub mentoring_term: MentoringTerm,
    #[serde(rename = "expertiseAreas", default)]
    pub expertise_areas: BTreeSet<String>,
    #[serde(rename = "supportAreas", default)]
    pub support_areas: BTreeSet<String>,
    #[serde(rename = "communicationMethods", default)]
    pub communication_methods: BTreeSet<String>,
}

impl Mentor {
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }
}

/// A mentee applicant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentee {
    #[serde(flatten)]
    pub profile: Student,
    #[serde(rename = "preferredMentorMatch")]
    pub preferred_mentor_match: MatchPreference,
    #[serde(rename = "desiredMentoringTerm")]
    pub desired_mentoring_term: MentoringTerm,
    #[serde(rename = "desiredSupportAreas", default)]
    pub desired_support_areas: BTreeSet<String>,
    #[serde(rename = "preferredCommMethods", default)]
    pub preferred_comm_methods: BTreeSet<String>,
}

impl Mentee {
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }
}

/// Scoring weights, one per similarity rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
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

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            same_school_and_major: 3.0,
            same_major: 2.0,
            same_school: 2.0,
            no_preference: 1.0,
            commitment_exact: 2.0,
            commitment_near: 1.0,
            support_overlap: 2.0,
            communication_overlap: 1.0,
            term_exact: 3.0,
            term_partial: 1.0,
            seniority: 1.0,
        }
    }
}
