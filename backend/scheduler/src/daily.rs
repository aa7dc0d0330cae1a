//! The daily check-in loop and the per-cycle batch runner.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{error, info, warn};
use uuid::Uuid;

use napsign_core::{BatchOutcome, SignService};

use crate::fire_time::Schedule;

/// Fixed delay between consecutive check-in calls, so a long group list does
/// not trip NapCat's rate limiting.
pub const PACING_DELAY: Duration = Duration::from_millis(100);

/// Fixed pause after an unexpected batch failure before the loop resumes.
pub const RECOVERY_PAUSE: Duration = Duration::from_secs(60);

/// Run one batch: list the groups, then check in each one sequentially.
///
/// A listing failure or an empty list ends the cycle with a zero outcome —
/// that is a terminal result for the day, not a fault. Per-group failures
/// are recorded and the batch keeps going; partial failure is a normal
/// completion.
pub async fn run_batch<S: SignService + ?Sized>(service: &S) -> BatchOutcome {
    let run_id = Uuid::new_v4();
    info!(run_id = %run_id, "Starting daily check-in batch");

    let groups = match service.list_groups().await {
        Ok(groups) => groups,
        Err(e) => {
            error!(run_id = %run_id, error = %e, "Group listing failed; ending this cycle");
            return BatchOutcome::empty();
        }
    };
    if groups.is_empty() {
        info!(run_id = %run_id, "No groups to check in; ending this cycle");
        return BatchOutcome::empty();
    }
    info!(run_id = %run_id, group_count = groups.len(), "Got group list");

    let mut outcome = BatchOutcome::empty();
    for group in &groups {
        match service.check_in(group).await {
            Ok(message) => {
                info!(run_id = %run_id, group = %group, message = %message, "Group checked in");
                outcome.record_success();
            }
            Err(e) => {
                warn!(run_id = %run_id, group = %group, error = %e, "Group check-in failed");
                outcome.record_failure(group.clone(), &e);
            }
        }
        time::sleep(PACING_DELAY).await;
    }

    info!(
        run_id = %run_id,
        total = outcome.total,
        succeeded = outcome.succeeded,
        failed = outcome.failed,
        "Daily check-in batch finished"
    );
    if outcome.failed > 0 {
        warn!(run_id = %run_id, details = %outcome.failure_summary(), "Check-in failures");
    }
    outcome
}

/// The long-lived daily scheduler.
///
/// States: Idle (compute the next fire) → Waiting (sleep) → Running (one
/// batch in its own task) → Idle. A panic escaping the batch task is logged
/// and followed by [`RECOVERY_PAUSE`]; the loop itself never exits on error.
/// The stop flag is honored only while Waiting, never mid-batch.
pub struct DailyScheduler<S> {
    schedule: Schedule,
    service: Arc<S>,
    stop: watch::Receiver<bool>,
}

impl<S: SignService + 'static> DailyScheduler<S> {
    pub fn new(schedule: Schedule, service: Arc<S>, stop: watch::Receiver<bool>) -> Self {
        Self {
            schedule,
            service,
            stop,
        }
    }

    /// The startup hook: spawn the loop onto the runtime. Called once per
    /// process lifetime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        info!(
            fire_time = %self.schedule.fire_time(),
            offset = %self.schedule.offset(),
            "Daily check-in scheduler started"
        );

        loop {
            // Always re-derived from wall-clock now; one fire per day falls
            // out of "now" having advanced past today's target.
            let now = Utc::now();
            let wait = self.schedule.until_next_fire(now);
            info!(
                next_fire = %self.schedule.next_fire_local(now),
                wait_secs = wait.as_secs(),
                "Waiting for next fire time"
            );

            tokio::select! {
                _ = time::sleep(wait) => {}
                changed = self.stop.changed() => {
                    if changed.is_err() || *self.stop.borrow() {
                        info!("Stop signal received; scheduler exiting");
                        break;
                    }
                    continue;
                }
            }

            // Run the batch in its own task so a panic is contained there
            // instead of taking the loop down.
            let service = Arc::clone(&self.service);
            let batch = tokio::spawn(async move { run_batch(service.as_ref()).await });
            if let Err(e) = batch.await {
                error!(error = %e, "Batch run failed unexpectedly; pausing before rescheduling");
                time::sleep(RECOVERY_PAUSE).await;
            }
        }
    }
}
