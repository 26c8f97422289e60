//! Job search used by the chat bridge.
//!
//! Skill matching is word-level: the query and every required-skill name are lowercased
//! and split on whitespace, and any shared word counts. A single common word (e.g. "a")
//! therefore matches any skill containing it; this is deliberate and kept for product review.
//! Location matching is case-insensitive substring containment.

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::Job;

pub const NO_JOBS_FOUND: &str = "No jobs found matching your criteria.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    pub job_id: Uuid,
    pub title: String,
    pub location_area: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "jobs", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(Vec<JobSummary>),
    NoJobsFound,
}

impl SearchOutcome {
    /// Human-readable listing for the conversational front-end.
    pub fn render(&self) -> String {
        match self {
            SearchOutcome::NoJobsFound => NO_JOBS_FOUND.to_string(),
            SearchOutcome::Found(jobs) => {
                let lines: Vec<String> = jobs
                    .iter()
                    .map(|j| format!("- '{}' in {}", j.title, j.location_area))
                    .collect();
                format!("I found the following jobs:\n{}", lines.join("\n"))
            }
        }
    }
}

/// Filters `jobs` by skill words and/or location. Blank criteria count as absent; at least
/// one must be present.
pub fn find_jobs(
    jobs: &[Job],
    skill_query: Option<&str>,
    location_query: Option<&str>,
) -> Result<SearchOutcome, AppError> {
    let skill_query = skill_query.map(str::trim).filter(|q| !q.is_empty());
    let location_query = location_query.map(str::trim).filter(|q| !q.is_empty());

    if skill_query.is_none() && location_query.is_none() {
        return Err(AppError::InvalidQuery(
            "Provide a skill or a location to search for jobs".to_string(),
        ));
    }

    let skill_words = skill_query.map(words);
    let location = location_query.map(str::to_lowercase);

    let matches: Vec<JobSummary> = jobs
        .iter()
        .filter(|job| match &skill_words {
            None => true,
            Some(query) => job
                .required_skills
                .iter()
                .any(|skill| !query.is_disjoint(&words(&skill.name))),
        })
        .filter(|job| match &location {
            None => true,
            Some(loc) => job.location_area.to_lowercase().contains(loc.as_str()),
        })
        .map(|job| JobSummary {
            job_id: job.id,
            title: job.title.clone(),
            location_area: job.location_area.clone(),
        })
        .collect();

    if matches.is_empty() {
        Ok(SearchOutcome::NoJobsFound)
    } else {
        Ok(SearchOutcome::Found(matches))
    }
}

fn words(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
