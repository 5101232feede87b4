//! Bounded retry combinator.
//!
//! Notification delivery and most store calls are wrapped in [`retry`]: a
//! fixed number of attempts with a fixed delay between them. The first
//! success short-circuits, as does any non-transient error. Delivery is
//! therefore at-least-once and downstream consumers must tolerate
//! duplicates.

use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Attempt count and inter-attempt delay for a [`retry`] call.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Must be at least 1.
    pub attempts: u32,
    /// Delay between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt count and delay.
    #[must_use]
    pub const fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// A policy that never waits, for tests and in-process collaborators.
    #[must_use]
    pub const fn immediate(attempts: u32) -> Self {
        Self::new(attempts, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(200))
    }
}

/// Runs `op` until it succeeds or the policy is exhausted.
///
/// Only transient errors ([`AppError::is_transient`]) are retried;
/// validation and ownership failures short-circuit on the first attempt.
/// `label` names the operation in retry logs.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or the first
/// non-transient error immediately.
pub async fn retry<T, F, Fut>(policy: RetryPolicy, label: &str, mut op: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let attempts = policy.attempts.max(1);
    let mut last_error = AppError::internal(format!("{label}: retry ran zero attempts"));
    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_transient() && attempt < attempts => {
                tracing::warn!(
                    operation = label,
                    attempt,
                    attempts,
                    error = %error,
                    "transient failure, retrying"
                );
                last_error = error;
                tokio::time::sleep(policy.delay).await;
            }
            Err(error) => return Err(error),
        }
    }
    Err(last_error)
}
