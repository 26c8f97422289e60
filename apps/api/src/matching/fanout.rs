//! One unit of background work: match a freshly created job against every seeker and
//! notify each match. Runs on the notification queue, never on the request path.

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::matcher::matching_seekers;
use crate::matching::notifier::{NotificationError, Notifier};
use crate::store::JobBoardStore;

/// A committed job awaiting fan-out. Required skills are re-read from the store.
#[derive(Debug, Clone)]
pub struct MatchTask {
    pub job_id: Uuid,
    pub job_title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FanOutReport {
    pub matched: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Matches and notifies. A store failure aborts this unit only; a delivery failure, or a
/// delivery exceeding `delivery_timeout`, is logged and the remaining seekers are still
/// attempted.
pub async fn run_fanout(
    store: &dyn JobBoardStore,
    notifier: &dyn Notifier,
    task: &MatchTask,
    delivery_timeout: Duration,
) -> Result<FanOutReport, AppError> {
    let required: HashSet<Uuid> = store
        .required_skills_for_job(task.job_id)
        .await?
        .into_iter()
        .collect();
    if required.is_empty() {
        info!(job_id = %task.job_id, "Job has no required skills; skipping notifications");
        return Ok(FanOutReport::default());
    }

    let seekers = store.seeker_profiles().await?;
    let matched = matching_seekers(&required, &seekers);

    let mut report = FanOutReport {
        matched: matched.len(),
        ..FanOutReport::default()
    };

    for seeker in matched {
        let delivery = tokio::time::timeout(
            delivery_timeout,
            notifier.notify(&seeker.name, &seeker.phone_number, &task.job_title),
        )
        .await
        .unwrap_or_else(|_| {
            Err(NotificationError::Transport(format!(
                "no response within {}s",
                delivery_timeout.as_secs_f32()
            )))
        });

        match delivery {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                report.failed += 1;
                warn!(
                    job_id = %task.job_id,
                    seeker_id = %seeker.id,
                    "Notification failed: {e}"
                );
            }
        }
    }

    info!(
        job_id = %task.job_id,
        matched = report.matched,
        delivered = report.delivered,
        failed = report.failed,
        "Job match fan-out complete"
    );
    Ok(report)
}
