//! Run status polling with a bounded budget.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use super::RelayError;
use crate::assistant::{AssistantApi, AssistantError, Run, RunStatus};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 60;

/// How often and how many times to check a run before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    /// `max_attempts` is clamped to at least one status check.
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Upper bound on time spent sleeping between checks.
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_POLL_MAX_ATTEMPTS)
    }
}

/// A run that reached `completed`, with the number of status checks it took.
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub run: Run,
    pub status_checks: u32,
}

/// Check the run until it completes, dead-ends, or the budget runs out.
///
/// The first check is issued immediately; subsequent checks are spaced by
/// `policy.interval`.
pub async fn wait_for_completion(
    api: &dyn AssistantApi,
    thread_id: &str,
    run_id: &str,
    policy: &PollPolicy,
) -> Result<CompletedRun, RelayError> {
    let mut status_checks = 0;
    loop {
        let run = api.retrieve_run(thread_id, run_id).await?;
        status_checks += 1;

        if run.status == RunStatus::Completed {
            return Ok(CompletedRun { run, status_checks });
        }
        if run.status.is_dead_end() {
            return Err(AssistantError::RunEnded {
                run_id: run.id,
                status: run.status,
            }
            .into());
        }
        if status_checks >= policy.max_attempts {
            return Err(RelayError::Timeout {
                run_id: run_id.to_string(),
                attempts: status_checks,
            });
        }

        debug!(thread_id, run_id, status = %run.status, status_checks, "run pending");
        sleep(policy.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_attempts_clamped_to_one() {
        let policy = PollPolicy::new(Duration::from_millis(10), 0);
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.budget(), Duration::ZERO);
    }

    #[test]
    fn default_policy_is_one_second_sixty_attempts() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(1));
        assert_eq!(policy.max_attempts, 60);
        assert_eq!(policy.budget(), Duration::from_secs(59));
    }
}
