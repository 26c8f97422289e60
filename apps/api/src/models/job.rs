use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::skill::Skill;

#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location_area: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request body for job creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: Option<String>,
    pub location_area: String,
    pub required_skill_ids: Vec<Uuid>,
}

/// A job with its required skills resolved.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location_area: String,
    pub owner_id: Uuid,
    pub required_skills: Vec<Skill>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn from_row(row: JobRow, required_skills: Vec<Skill>) -> Self {
        Job {
            id: row.id,
            title: row.title,
            description: row.description,
            location_area: row.location_area,
            owner_id: row.owner_id,
            required_skills,
            created_at: row.created_at,
        }
    }

    pub fn required_skill_ids(&self) -> Vec<Uuid> {
        self.required_skills.iter().map(|s| s.id).collect()
    }
}

/// An employer's posting together with how many seekers currently match it.
#[derive(Debug, Clone, Serialize)]
pub struct PostingWithMatches {
    #[serde(flatten)]
    pub job: Job,
    pub match_count: usize,
}
