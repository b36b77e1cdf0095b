use crate::models::{MatchPair, Mentee};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing results
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write matches: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub const MATCH_HEADER: [&str; 4] = ["Mentor Name", "Mentor Email", "Mentee Name", "Mentee Email"];
pub const UNMATCHED_HEADER: &str = "Unmatched Mentees";

/// Write one row per pair, then an "Unmatched Mentees" section if anyone is left over
pub fn write_matches<W: Write>(writer: W, matches: &[MatchPair], unmatched: &[Mentee]) -> Result<(), WriteError> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    csv_writer.write_record(MATCH_HEADER)?;
    for pair in matches {
        csv_writer.write_record([pair.mentor.name(), pair.mentor.email(), pair.mentee.name(), pair.mentee.email()])?;
    }

    if unmatched.is_empty() {
        csv_writer.flush()?;
        return Ok(());
    }

    // Separator is a bare newline, written past the csv encoder
    let mut inner = csv_writer.into_inner().map_err(|e| e.into_error())?;
    inner.write_all(b"\n")?;

    let mut section = csv::WriterBuilder::new().flexible(true).from_writer(inner);
    section.write_record([UNMATCHED_HEADER])?;
    for mentee in unmatched {
        section.write_record([mentee.name(), mentee.email()])?;
    }
    section.flush()?;
    Ok(())
}

/// Write results to `path`, creating parent directories as needed
pub fn save_matches<P: AsRef<Path>>(path: P, matches: &[MatchPair], unmatched: &[Mentee]) -> Result<(), WriteError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_matches(std::io::BufWriter::new(file), matches, unmatched)?;
    tracing::info!(path = %path.display(), rows = matches.len(), "saved matches");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchPhase, MatchPreference, Mentor, MentoringTerm, Role, Student};
    use std::collections::BTreeSet;

    fn student(name: &str, email: &str, role: Role) -> Student {
        Student {
            name: name.to_string(),
            email: email.to_string(),
            pronouns: String::new(),
            year: String::new(),
            major: String::new(),
            school: None,
            role,
            timezone: 0.0,
            time_commitment: 0.0,
            races: BTreeSet::new(),
        }
    }

    fn mentee(name: &str, email: &str) -> Mentee {
        Mentee {
            profile: student(name, email, Role::Mentee),
            preferred_mentor_match: MatchPreference::NoPreference,
            desired_mentoring_term: MentoringTerm::Medium,
            desired_support_areas: BTreeSet::new(),
            preferred_comm_methods: BTreeSet::new(),
        }
    }

    fn pair(mentor_name: &str, mentor_email: &str, mentee_name: &str, mentee_email: &str) -> MatchPair {
        MatchPair {
            mentor: Mentor {
                profile: student(mentor_name, mentor_email, Role::Mentor),
                num_mentees: 1,
                preferred_mentee_major: String::new(),
                mentoring_term: MentoringTerm::Medium,
                expertise_areas: BTreeSet::new(),
                support_areas: BTreeSet::new(),
                communication_methods: BTreeSet::new(),
            },
            mentee: mentee(mentee_name, mentee_email),
            phase: MatchPhase::Optimal { iteration: 0 },
            similarity: 12.0,
        }
    }

    fn render(matches: &[MatchPair], unmatched: &[Mentee]) -> String {
        let mut buffer = Vec::new();
        write_matches(&mut buffer, matches, unmatched).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_writes_header_and_rows() {
        let output = render(&[pair("Ada Lovelace", "ada@x", "Alan Turing", "alan@x")], &[]);

        assert_eq!(
            output,
            "Mentor Name,Mentor Email,Mentee Name,Mentee Email\nAda Lovelace,ada@x,Alan Turing,alan@x\n"
        );
    }

    #[test]
    fn test_unmatched_section() {
        let output = render(
            &[pair("Ada Lovelace", "ada@x", "Alan Turing", "alan@x")],
            &[mentee("Grace Hopper", "grace@x")],
        );

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Unmatched Mentees");
        assert_eq!(lines[4], "Grace Hopper,grace@x");
    }

    #[test]
    fn test_only_header_when_empty() {
        let output = render(&[], &[]);
        assert_eq!(output, "Mentor Name,Mentor Email,Mentee Name,Mentee Email\n");
    }

    #[test]
    fn test_save_matches_writes_unmatched_section_to_disk() {
        let dir = std::env::temp_dir().join(format!("mentor-match-writer-{}", std::process::id()));
        let path = dir.join("nested").join("matches.csv");

        save_matches(
            &path,
            &[pair("Ada Lovelace", "ada@x", "Alan Turing", "alan@x")],
            &[mentee("Grace Hopper", "grace@x")],
        )
        .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("\nUnmatched Mentees\nGrace Hopper,grace@x\n"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
