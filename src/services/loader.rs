use crate::models::{MatchPreference, Mentee, Mentor, MentoringTerm, Role, Student};
use crate::services::commitment::parse_time_commitment;
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const EMAIL: &str = "Email Address";
pub const PRONOUNS: &str = "Pronouns";
pub const GRADE_LEVEL: &str = "Current Grade Level";
pub const MAJOR: &str = "Current Major";
pub const ROLE: &str = "Please select wether you want to be a mentor or mentee";
/// Stored with a trailing space in the survey export; headers are trimmed on read
pub const MEETING_FREQUENCY: &str = "How many times would you expect to meet with your mentee/mentees";
pub const MENTEE_CAPACITY: &str = "How many mentees would you prefer supporting?";
pub const MENTOR_MAJOR_PREFERENCE: &str = "Would you prefer if your mentee is in the same school & major as you?";
pub const MENTEE_MATCH_PREFERENCE: &str = "Would you prefer if your mentor is in the same school & major as you?";
pub const MENTORING_TERM: &str = "Would you prefer short-term or long-term mentoring relationships?";

const REQUIRED_COLUMNS: &[&str] = &[
    FIRST_NAME,
    LAST_NAME,
    EMAIL,
    PRONOUNS,
    GRADE_LEVEL,
    MAJOR,
    ROLE,
    MEETING_FREQUENCY,
];

/// Errors that can occur while loading survey responses
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read responses: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),
}

/// Everyone who signed up, split by role, in file order
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub mentors: Vec<Mentor>,
    pub mentees: Vec<Mentee>,
    /// Rows dropped for an unrecognized role
    pub skipped: usize,
}

/// Load a survey export from disk
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Roster, LoadError> {
    let file = std::fs::File::open(path)?;
    read_roster(file)
}

/// Parse survey responses into mentors and mentees
///
/// Rows with a role other than "mentor" or "mentee" are skipped with a
/// warning. A missing column needed by a row is fatal.
pub fn read_roster<R: Read>(reader: R) -> Result<Roster, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(LoadError::MissingColumn(missing.to_string()));
    }
    // Only fatal once a mentor row turns up
    let missing_mentor_column = [MENTEE_CAPACITY, MENTOR_MAJOR_PREFERENCE]
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == *column));
    let answered = AnsweredColumns {
        term: headers.iter().any(|h| h == MENTORING_TERM),
        match_preference: headers.iter().any(|h| h == MENTEE_MATCH_PREFERENCE),
    };

    let mut roster = Roster::default();
    let mut mentor_emails = HashSet::new();
    let mut mentee_emails = HashSet::new();

    for record in csv_reader.deserialize::<ResponseRow>() {
        let row = record?;
        let name = row.full_name();

        match Role::parse(&row.role) {
            Some(Role::Mentor) => {
                if !mentor_emails.insert(row.email.clone()) {
                    warn!(email = %row.email, "duplicate mentor email; loads will be shared");
                }
                if let Some(column) = missing_mentor_column {
                    return Err(LoadError::MissingColumn(column.to_string()));
                }
                roster.mentors.push(row.into_mentor(name, answered));
            }
            Some(Role::Mentee) => {
                if !mentee_emails.insert(row.email.clone()) {
                    warn!(email = %row.email, "duplicate mentee email");
                }
                roster.mentees.push(row.into_mentee(name, answered));
            }
            None => {
                warn!(role = %row.role.trim().to_lowercase(), name = %name, "unrecognized role, skipping row");
                roster.skipped += 1;
            }
        }
    }

    info!(
        mentors = roster.mentors.len(),
        mentees = roster.mentees.len(),
        skipped = roster.skipped,
        "loaded survey responses"
    );

    Ok(roster)
}

/// Which optional answer columns the export carries
///
/// An absent column takes the default answer. A blank cell in a present
/// column is parsed like any other answer.
#[derive(Debug, Clone, Copy)]
struct AnsweredColumns {
    term: bool,
    match_preference: bool,
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    #[serde(rename = "First Name")]
    first_name: String,
    #[serde(rename = "Last Name")]
    last_name: String,
    #[serde(rename = "Email Address")]
    email: String,
    #[serde(rename = "Pronouns")]
    pronouns: String,
    #[serde(rename = "Current Grade Level")]
    year: String,
    #[serde(rename = "Current Major")]
    major: String,
    #[serde(rename = "Current School", default)]
    school: Option<String>,
    #[serde(rename = "Please select wether you want to be a mentor or mentee")]
    role: String,
    #[serde(rename = "How many times would you expect to meet with your mentee/mentees")]
    meeting_frequency: String,
    #[serde(rename = "How many mentees would you prefer supporting?", default)]
    mentee_capacity: Option<String>,
    #[serde(rename = "Would you prefer if your mentee is in the same school & major as you?", default)]
    mentor_major_preference: Option<String>,
    #[serde(rename = "Would you prefer if your mentor is in the same school & major as you?", default)]
    mentee_match_preference: Option<String>,
    #[serde(rename = "Would you prefer short-term or long-term mentoring relationships?", default)]
    mentoring_term: Option<String>,
}

impl ResponseRow {
    fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn student(&self, name: String, role: Role) -> Student {
        Student {
            name,
            email: self.email.clone(),
            pronouns: self.pronouns.clone(),
            year: self.year.clone(),
            major: self.major.clone(),
            school: self.school.clone().filter(|s| !s.is_empty()),
            role,
            timezone: 0.0,
            time_commitment: parse_time_commitment(&self.meeting_frequency),
            races: BTreeSet::new(),
        }
    }

    fn term(&self, answered: AnsweredColumns) -> MentoringTerm {
        if answered.term {
            MentoringTerm::parse(self.mentoring_term.as_deref().unwrap_or_default())
        } else {
            MentoringTerm::default()
        }
    }

    fn into_mentor(self, name: String, answered: AnsweredColumns) -> Mentor {
        let capacity = self.mentee_capacity.as_deref().unwrap_or_default();

        Mentor {
            profile: self.student(name, Role::Mentor),
            // Truncates like the capacity answer's integer part; negatives floor at 0
            num_mentees: parse_time_commitment(capacity) as u32,
            preferred_mentee_major: self.mentor_major_preference.clone().unwrap_or_default(),
            mentoring_term: self.term(answered),
            expertise_areas: BTreeSet::new(),
            support_areas: BTreeSet::new(),
            communication_methods: BTreeSet::new(),
        }
    }

    fn into_mentee(self, name: String, answered: AnsweredColumns) -> Mentee {
        let preferred_mentor_match = if answered.match_preference {
            MatchPreference::parse(self.mentee_match_preference.as_deref().unwrap_or_default())
        } else {
            MatchPreference::default()
        };

        Mentee {
            profile: self.student(name, Role::Mentee),
            preferred_mentor_match,
            desired_mentoring_term: self.term(answered),
            desired_support_areas: BTreeSet::new(),
            preferred_comm_methods: BTreeSet::new(),
        }
    }
}
