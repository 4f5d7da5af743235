use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::error::GatewayError;

/// Fixed-delay retry budget applied uniformly to every outbound call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// Run `operation`, retrying transient failures on a fixed delay.
///
/// Non-transient errors are returned immediately. When a transient error
/// survives the whole budget it is wrapped in
/// [`GatewayError::RetriesExhausted`] so callers can tell the difference
/// from a first-attempt failure; they are expected to treat both the same.
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut call: F,
) -> Result<T, GatewayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    let mut attempt = 1u32;
    loop {
        match call().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(operation, attempt, "call succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if !err.is_transient() => return Err(err),
            Err(err) if attempt >= policy.max_attempts => {
                warn!(operation, attempts = attempt, error = %err, "retries exhausted");
                return Err(GatewayError::RetriesExhausted {
                    operation,
                    attempts: attempt,
                    source: Box::new(err),
                });
            }
            Err(err) => {
                warn!(operation, attempt, error = %err, "transient failure, retrying");
                sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
