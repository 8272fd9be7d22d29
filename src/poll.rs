//! Polling for variants produced by a generation request.
//!
//! DESIGN
//! ======
//! Generation has no completion signal: the backend only ever shows the
//! result as a longer variant list. The poll task waits, refetches the list
//! and stops once it holds more variants than the caller's baseline. Waits
//! start at the configured initial delay and double per attempt up to a cap,
//! each scaled by a random jitter factor so concurrent sessions don't refetch
//! in lockstep.
//!
//! ERROR HANDLING
//! ==============
//! A transient fetch failure (transport error, 429, 5xx) is logged and
//! retried on the next attempt. An expired session or any other error status
//! aborts at once with [`PollOutcome::Failed`]. Running out of
//! attempts is not an error: [`PollOutcome::Exhausted`] carries the last list
//! seen, or the last error if no fetch ever succeeded.

use std::sync::Arc;
use std::time::Duration;

use api::ApiError;
use api::ProjectService;
use api::types::{DesignVariant, ProjectId};
use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::PollConfig;

/// How a variant poll ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The list grew past the baseline.
    Ready(Vec<DesignVariant>),
    /// Attempts ran out; carries the last list fetched.
    Exhausted(Vec<DesignVariant>),
    /// [`PollHandle::cancel`] was called or the handle was dropped.
    Cancelled,
    /// The poll gave up on an error.
    Failed(ApiError),
}

/// Handle to a running variant poll.
///
/// Dropping the handle cancels the poll.
#[derive(Debug)]
pub struct PollHandle {
    project_id: ProjectId,
    cancel: watch::Sender<bool>,
    task: JoinHandle<PollOutcome>,
}

impl PollHandle {
    /// Project whose variants are being polled.
    #[must_use]
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Ask the task to stop at its next wait or fetch.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the poll to end.
    pub async fn wait(self) -> PollOutcome {
        let Self { cancel, task, .. } = self;
        let outcome = task.await;
        drop(cancel);
        match outcome {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => PollOutcome::Cancelled,
            Err(e) => {
                warn!(error = %e, "variant poll task failed");
                PollOutcome::Failed(ApiError::Request(format!("poll task failed: {e}")))
            }
        }
    }
}

/// Spawn a task that polls `project_id`'s variants until there are more than `baseline`.
pub fn spawn_variant_poll<S>(service: Arc<S>, project_id: ProjectId, baseline: usize, config: PollConfig) -> PollHandle
where
    S: ProjectService + ?Sized + 'static,
{
    let (cancel, mut cancelled) = watch::channel(false);
    info!(
        project_id,
        baseline,
        initial_delay_ms = config.initial_delay_ms,
        max_delay_ms = config.max_delay_ms,
        max_attempts = config.max_attempts,
        "variant poll started"
    );

    let task = tokio::spawn(async move {
        let mut last_seen: Option<Vec<DesignVariant>> = None;
        let mut last_error: Option<ApiError> = None;

        for attempt in 1..=config.max_attempts {
            let delay = jittered(config.base_delay(attempt), config.jitter);
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                _ = cancelled.changed() => {
                    debug!(project_id, attempt, "variant poll cancelled");
                    return PollOutcome::Cancelled;
                }
            }

            let fetched = tokio::select! {
                result = service.list_variants(project_id) => result,
                _ = cancelled.changed() => {
                    debug!(project_id, attempt, "variant poll cancelled mid-fetch");
                    return PollOutcome::Cancelled;
                }
            };

            match fetched {
                Ok(variants) if variants.len() > baseline => {
                    info!(project_id, attempt, count = variants.len(), "new variant available");
                    return PollOutcome::Ready(variants);
                }
                Ok(variants) => {
                    debug!(project_id, attempt, count = variants.len(), "no new variant yet");
                    last_seen = Some(variants);
                }
                Err(e) if e.is_session_expired() => {
                    warn!(project_id, attempt, "variant poll stopped: session expired");
                    return PollOutcome::Failed(e);
                }
                Err(e) if !e.retryable() => {
                    warn!(project_id, attempt, error = %e, code = e.error_code(), "variant poll stopped");
                    return PollOutcome::Failed(e);
                }
                Err(e) => {
                    warn!(project_id, attempt, error = %e, code = e.error_code(), "variant fetch failed; retrying");
                    last_error = Some(e);
                }
            }
        }

        info!(project_id, attempts = config.max_attempts, "variant poll gave up");
        match (last_seen, last_error) {
            (Some(variants), _) => PollOutcome::Exhausted(variants),
            (None, Some(e)) => PollOutcome::Failed(e),
            (None, None) => PollOutcome::Exhausted(Vec::new()),
        }
    });

    PollHandle { project_id, cancel, task }
}

const MAX_JITTER: f64 = 0.99;

/// `base` scaled by a random factor in `1 ± jitter`. Jitter outside
/// `[0, MAX_JITTER]` is clamped; NaN means none.
fn jittered(base: Duration, jitter: f64) -> Duration {
    let jitter = if jitter.is_nan() { 0.0 } else { jitter.clamp(0.0, MAX_JITTER) };
    if jitter <= 0.0 {
        return base;
    }
    let factor = rand::rng().random_range((1.0 - jitter)..=(1.0 + jitter));
    base.mul_f64(factor.max(0.0))
}

#[cfg(test)]
#[path = "poll_test.rs"]
mod tests;
