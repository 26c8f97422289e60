//! Job-Posting Orchestrator.
//!
//! Flow: authorize → persist job + skill associations atomically → schedule fan-out →
//! return. The fan-out is only enqueued; its outcome never reaches the caller.

use tracing::info;

use crate::errors::AppError;
use crate::matching::fanout::MatchTask;
use crate::matching::matcher::match_count;
use crate::matching::queue::NotificationQueue;
use crate::models::job::{Job, NewJob, PostingWithMatches};
use crate::models::user::{Actor, Role};
use crate::store::JobBoardStore;

pub async fn post_job(
    store: &dyn JobBoardStore,
    queue: &NotificationQueue,
    actor: Actor,
    request: NewJob,
) -> Result<Job, AppError> {
    if actor.role != Role::Employer {
        return Err(AppError::PermissionDenied(
            "Only employers can post jobs".to_string(),
        ));
    }

    let request = NewJob {
        title: request.title.trim().to_string(),
        description: request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        location_area: request.location_area.trim().to_string(),
        required_skill_ids: request.required_skill_ids,
    };
    if request.title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if request.location_area.is_empty() {
        return Err(AppError::Validation(
            "location_area cannot be empty".to_string(),
        ));
    }

    let job = store.create_job(&request, actor.id).await?;
    info!(
        job_id = %job.id,
        owner_id = %actor.id,
        required_skills = job.required_skills.len(),
        "Job posted"
    );

    queue.enqueue(MatchTask {
        job_id: job.id,
        job_title: job.title.clone(),
    });

    Ok(job)
}

/// The employer's own postings, each with its current number of matching seekers.
pub async fn my_postings(
    store: &dyn JobBoardStore,
    actor: Actor,
) -> Result<Vec<PostingWithMatches>, AppError> {
    if actor.role != Role::Employer {
        return Err(AppError::PermissionDenied(
            "Only employers have job postings".to_string(),
        ));
    }

    let jobs = store.jobs_owned_by(actor.id).await?;
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let seekers = store.seeker_profiles().await?;
    Ok(jobs
        .into_iter()
        .map(|job| {
            let match_count = match_count(&job.required_skill_ids(), &seekers);
            PostingWithMatches { job, match_count }
        })
        .collect())
}
