//! Bounded background queue for job-match fan-outs.
//!
//! `enqueue` never waits: a full or closed queue drops the task with a warning, so job
//! creation latency is independent of seeker count and notification latency. A single
//! dispatcher drains the queue and runs each fan-out on its own task, at most `workers`
//! at a time.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::matching::fanout::{run_fanout, MatchTask};
use crate::matching::notifier::Notifier;
use crate::store::JobBoardStore;

#[derive(Clone)]
pub struct NotificationQueue {
    sender: mpsc::Sender<MatchTask>,
}

impl NotificationQueue {
    /// Starts the dispatcher and returns the producer handle. The dispatcher exits once every
    /// `NotificationQueue` clone has been dropped and the backlog is drained.
    pub fn spawn(
        store: Arc<dyn JobBoardStore>,
        notifier: Arc<dyn Notifier>,
        capacity: usize,
        workers: usize,
        delivery_timeout: Duration,
    ) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::channel::<MatchTask>(capacity.max(1));
        let permits = Arc::new(Semaphore::new(workers.max(1)));

        let dispatcher = tokio::spawn(async move {
            while let Some(task) = receiver.recv().await {
                let Ok(permit) = permits.clone().acquire_owned().await else {
                    break;
                };
                let store = store.clone();
                let notifier = notifier.clone();
                tokio::spawn(async move {
                    let _permit = permit;
                    if let Err(e) = run_fanout(store.as_ref(), notifier.as_ref(), &task, delivery_timeout)
                        .await {
                        error!(job_id = %task.job_id, "Job match fan-out aborted: {e}");
                    }
                });
            }
            info!("Notification dispatcher stopped");
        });

        (Self { sender }, dispatcher)
    }

    /// Schedules a fan-out without waiting. Returns `false` if the task was dropped.
    pub fn enqueue(&self, task: MatchTask) -> bool {
        let job_id = task.job_id;
        match self.sender.try_send(task) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(%job_id, "Notification queue full; dropping fan-out");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(%job_id, "Notification queue closed; dropping fan-out");
                false
            }
        }
    }
}
