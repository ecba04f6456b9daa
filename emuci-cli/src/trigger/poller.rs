//! Queue poller
//!
//! Waits for a submitted job to leave the build server's queue. The wait is
//! modelled as a small state machine: a pure [`QueueState::advance`] decides
//! the next state and backoff from each poll, and [`wait_for_executable`]
//! drives it against the server.

use emuci_client::{BuildServer, ClientError};
use emuci_core::dto::queue::Executable;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Bounded linear backoff for queue polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Wait after the first unresolved poll
    pub base_delay: Duration,
    /// Extra wait added for each further unresolved poll
    pub delay_step: Duration,
}

impl RetryPolicy {
    /// Wait after the unresolved poll with 0-based index `attempt_index`
    pub fn delay(&self, attempt_index: u32) -> Duration {
        self.base_delay + self.delay_step * attempt_index
    }
}

impl Default for RetryPolicy {
    /// 10 polls, waiting 10s, 20s, ... 100s after each unresolved one
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_secs(10),
            delay_step: Duration::from_secs(10),
        }
    }
}

/// Where a queued submission stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueState {
    /// Submitted, not polled yet
    Submitted,
    /// Polled `attempts` times without an executable
    Pending { attempts: u32 },
    /// The submission started running
    Resolved { executable: Executable, attempts: u32 },
    /// The retry budget ran out; the submission is no longer watched
    Abandoned { attempts: u32 },
}

/// Result of feeding one poll into the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: QueueState,
    /// Backoff to wait before the next action
    pub wait: Option<Duration>,
}

impl QueueState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QueueState::Resolved { .. } | QueueState::Abandoned { .. }
        )
    }

    /// Number of polls made so far
    pub fn attempts(&self) -> u32 {
        match self {
            QueueState::Submitted => 0,
            QueueState::Pending { attempts }
            | QueueState::Resolved { attempts, .. }
            | QueueState::Abandoned { attempts } => *attempts,
        }
    }

    /// Applies one poll result
    ///
    /// An observed executable resolves the item immediately. Otherwise the
    /// poll is charged against the budget and its backoff is returned; the
    /// last unresolved poll still waits out its backoff before the item is
    /// abandoned, so a never-resolving item is given every delay of the
    /// policy. Terminal states do not change.
    pub fn advance(self, executable: Option<Executable>, policy: &RetryPolicy) -> Transition {
        if self.is_terminal() {
            return Transition {
                state: self,
                wait: None,
            };
        }

        let attempts = self.attempts() + 1;
        match executable {
            Some(executable) => Transition {
                state: QueueState::Resolved {
                    executable,
                    attempts,
                },
                wait: None,
            },
            None => Transition {
                state: if attempts >= policy.max_attempts {
                    QueueState::Abandoned { attempts }
                } else {
                    QueueState::Pending { attempts }
                },
                wait: Some(policy.delay(attempts - 1)),
            },
        }
    }
}

/// Polls queue item `queue_id` until it resolves or the budget is exhausted
///
/// A failed poll is charged against the budget like an unresolved one and
/// waits the same backoff.
///
/// # Returns
/// A terminal state: [`QueueState::Resolved`] or [`QueueState::Abandoned`].
/// When the budget runs out and the last poll failed, that poll's error.
pub async fn wait_for_executable(
    server: &dyn BuildServer,
    queue_id: u64,
    policy: &RetryPolicy,
) -> Result<QueueState, ClientError> {
    let mut state = QueueState::Submitted;
    let mut last_error = None;

    loop {
        let attempt = state.attempts() + 1;
        let (executable, status) = match server.queue_item(queue_id).await {
            Ok(item) => {
                debug!(
                    "Queue item {} poll {}: executable={}",
                    queue_id,
                    attempt,
                    item.is_resolved()
                );
                last_error = None;
                let status = format!(
                    "url: {} ({})",
                    item.url,
                    item.why.as_deref().unwrap_or("no reason given")
                );
                (item.executable, status)
            }
            Err(e) => {
                warn!("Poll {} of queue item {} failed: {}", attempt, queue_id, e);
                let status = format!("(poll failed: {})", e);
                last_error = Some(e);
                (None, status)
            }
        };

        let transition = state.advance(executable, policy);
        state = transition.state;

        if let Some(wait) = transition.wait {
            info!(
                "Waiting for queued item: {} {}; next check in {}s",
                queue_id,
                status,
                wait.as_secs()
            );
            tokio::time::sleep(wait).await;
        }

        if state.is_terminal() {
            return match last_error {
                Some(e) => Err(e),
                None => Ok(state),
            };
        }
    }
}
