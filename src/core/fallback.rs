use crate::core::loads::MentorLoads;
use crate::models::{Mentee, Mentor};

/// Index of the mentor with the lowest current load; the earliest one wins ties
#[inline]
pub fn least_loaded_mentor(mentors: &[Mentor], loads: &MentorLoads) -> Option<usize> {
    mentors
        .iter()
        .enumerate()
        .min_by_key(|(idx, mentor)| (loads.get(mentor.email()), *idx))
        .map(|(idx, _)| idx)
}

/// Place every leftover mentee, in order, on whichever mentor is least loaded at that moment
///
/// Returns `(mentor index, mentee)` placements and updates `loads` as it goes.
/// Capacity is ignored here. Returns an empty list when there are no mentors.
pub fn place_leftovers<'m>(
    mentors: &[Mentor],
    leftovers: Vec<&'m Mentee>,
    loads: &mut MentorLoads,
) -> Vec<(usize, &'m Mentee)> {
    let mut placements = Vec::with_capacity(leftovers.len());

    for mentee in leftovers {
        let Some(idx) = least_loaded_mentor(mentors, loads) else {
            break;
        };
        let mentor = &mentors[idx];
        let load = loads.increment(mentor.email());

        tracing::debug!(
            mentor = mentor.email(),
            mentee = mentee.email(),
            load,
            capacity = mentor.num_mentees,
            "fallback placement"
        );
        placements.push((idx, mentee));
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchPreference, MentoringTerm, Role, Student};
    use std::collections::BTreeSet;

    fn student(email: &str, role: Role) -> Student {
        Student {
            name: email.to_string(),
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

    fn mentor(email: &str) -> Mentor {
        Mentor {
            profile: student(email, Role::Mentor),
            num_mentees: 1,
            preferred_mentee_major: String::new(),
            mentoring_term: MentoringTerm::Medium,
            expertise_areas: BTreeSet::new(),
            support_areas: BTreeSet::new(),
            communication_methods: BTreeSet::new(),
        }
    }

    fn mentee(email: &str) -> Mentee {
        Mentee {
            profile: student(email, Role::Mentee),
            preferred_mentor_match: MatchPreference::NoPreference,
            desired_mentoring_term: MentoringTerm::Medium,
            desired_support_areas: BTreeSet::new(),
            preferred_comm_methods: BTreeSet::new(),
        }
    }

    #[test]
    fn test_tie_break_prefers_earlier_mentor() {
        let mentors = vec![mentor("a@x"), mentor("b@x"), mentor("c@x")];
        let loads = MentorLoads::new(&mentors);
        assert_eq!(least_loaded_mentor(&mentors, &loads), Some(0));
    }

    #[test]
    fn test_picks_minimum_load() {
        let mentors = vec![mentor("a@x"), mentor("b@x"), mentor("c@x")];
        let mut loads = MentorLoads::new(&mentors);
        loads.increment("a@x");
        loads.increment("c@x");
        assert_eq!(least_loaded_mentor(&mentors, &loads), Some(1));
    }

    #[test]
    fn test_spreads_leftovers_round_robin() {
        let mentors = vec![mentor("a@x"), mentor("b@x")];
        let mut loads = MentorLoads::new(&mentors);
        loads.increment("a@x");

        let (x, y, z) = (mentee("x@x"), mentee("y@x"), mentee("z@x"));
        let placements = place_leftovers(&mentors, vec![&x, &y, &z], &mut loads);

        let order: Vec<(usize, &str)> = placements.iter().map(|(i, m)| (*i, m.email())).collect();
        assert_eq!(order, vec![(1, "x@x"), (0, "y@x"), (1, "z@x")]);
        assert_eq!(loads.get("a@x"), 2);
        assert_eq!(loads.get("b@x"), 2);
    }

    #[test]
    fn test_no_mentors() {
        let x = mentee("x@x");
        let mut loads = MentorLoads::default();
        assert!(place_leftovers(&[], vec![&x], &mut loads).is_empty());
    }
}
