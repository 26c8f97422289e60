//! Skill Overlap Matcher — boolean overlap between a job's required skills and seeker profiles.
//!
//! No scoring or ranking: a seeker either shares at least one skill with the job or does not.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::user::{Role, SeekerProfile};

/// Returns the seekers whose skill set intersects `required_skills`.
///
/// - An empty `required_skills` matches nobody.
/// - Non-seekers and seekers without skills never match.
/// - Each seeker appears at most once, however many skills overlap.
/// - Output is sorted by phone number, then id.
pub fn matching_seekers<'a>(
    required_skills: &HashSet<Uuid>,
    seekers: &'a [SeekerProfile],
) -> Vec<&'a SeekerProfile> {
    if required_skills.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut matched: Vec<&SeekerProfile> = seekers
        .iter()
        .filter(|s| s.role == Role::Seeker)
        .filter(|s| s.skill_ids.iter().any(|id| required_skills.contains(id)))
        .filter(|s| seen.insert(s.id))
        .collect();

    matched.sort_by(|a, b| {
        a.phone_number
            .cmp(&b.phone_number)
            .then_with(|| a.id.cmp(&b.id))
    });
    matched
}

/// Count-only variant used for the employer's postings overview.
pub fn match_count(required_skills: &[Uuid], seekers: &[SeekerProfile]) -> usize {
    let required: HashSet<Uuid> = required_skills.iter().copied().collect();
    matching_seekers(&required, seekers).len()
}
