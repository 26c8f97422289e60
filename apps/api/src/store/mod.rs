//! Persistence collaborator.
//!
//! Handlers and the job-posting pipeline only talk to `JobBoardStore`; `PgStore` is the
//! production backend. `AppState` holds an `Arc<dyn JobBoardStore>`.

pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, NewJob};
use crate::models::skill::{NewSkill, Skill};
use crate::models::user::{NewUser, SeekerProfile, UserRow};

pub use postgres::PgStore;

#[async_trait]
pub trait JobBoardStore: Send + Sync {
    async fn create_skill(&self, skill: &NewSkill) -> Result<Skill, AppError>;

    /// Case-insensitive lookup.
    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, AppError>;

    async fn list_skills(&self, skip: i64, limit: i64) -> Result<Vec<Skill>, AppError>;

    async fn create_user(&self, user: &NewUser) -> Result<UserRow, AppError>;

    async fn find_user_by_phone(&self, phone_number: &str) -> Result<Option<UserRow>, AppError>;

    async fn skills_for_user(&self, user_id: Uuid) -> Result<Vec<Skill>, AppError>;

    /// Replaces the user's whole skill set. Unknown ids fail with `NotFound` and leave the
    /// existing set untouched.
    async fn replace_user_skills(
        &self,
        user_id: Uuid,
        skill_ids: &[Uuid],
    ) -> Result<Vec<Skill>, AppError>;

    /// Inserts the job and its required-skill associations as one atomic unit.
    async fn create_job(&self, job: &NewJob, owner_id: Uuid) -> Result<Job, AppError>;

    async fn required_skills_for_job(&self, job_id: Uuid) -> Result<Vec<Uuid>, AppError>;

    /// Newest first. `limit = None` returns every job.
    async fn list_jobs(&self, skip: i64, limit: Option<i64>) -> Result<Vec<Job>, AppError>;

    async fn jobs_owned_by(&self, owner_id: Uuid) -> Result<Vec<Job>, AppError>;

    /// Every active seeker with their skill ids.
    async fn seeker_profiles(&self) -> Result<Vec<SeekerProfile>, AppError>;
}

/// Sorts and deduplicates a list of skill ids so association inserts never repeat a pair.
pub fn distinct_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut ids = ids.to_vec();
    ids.sort();
    ids.dedup();
    ids
}

#[cfg(test)]
pub mod memory;
