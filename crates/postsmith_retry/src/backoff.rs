//! Delays between rate-limited attempts.

use std::time::Duration;
use tracing::{info, instrument};

/// Safety margin added on top of a provider-suggested wait.
const HINT_MARGIN_MS: u64 = 1000;

/// Sizes and applies the delay before retrying a rate-limited call.
///
/// A positive provider hint of `W` seconds yields `ceil(W * 1000) + 1000` ms.
/// Without a usable hint the delay is `base_delay * 2^attempt`, with `attempt`
/// counting retries already performed (0 for the first retry).
///
/// # Examples
///
/// ```
/// use postsmith_retry::Backoff;
/// use std::time::Duration;
///
/// let backoff = Backoff::from_millis(2000);
/// assert_eq!(backoff.delay_for(0, None), Duration::from_millis(2000));
/// assert_eq!(backoff.delay_for(2, None), Duration::from_millis(8000));
/// assert_eq!(backoff.delay_for(2, Some(5.2)), Duration::from_millis(6200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    base_delay_ms: u64,
}

impl Backoff {
    /// Create a backoff starting at `base_delay_ms`.
    pub fn from_millis(base_delay_ms: u64) -> Self {
        Self { base_delay_ms }
    }

    /// Base delay for the first un-hinted retry.
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Compute the delay for the given retry index and optional hint.
    ///
    /// Zero, negative, NaN and infinite hints fall back to the exponential
    /// formula. The exponential delay saturates instead of overflowing.
    pub fn delay_for(&self, attempt: u32, suggested_wait_secs: Option<f64>) -> Duration {
        match suggested_wait_secs.filter(|w| w.is_finite() && *w > 0.0) {
            Some(wait) => Duration::from_millis(hint_millis(wait).saturating_add(HINT_MARGIN_MS)),
            None => {
                let millis = 2u64
                    .checked_pow(attempt)
                    .and_then(|factor| self.base_delay_ms.checked_mul(factor))
                    .unwrap_or(u64::MAX);
                Duration::from_millis(millis)
            }
        }
    }

    /// Suspend the calling task for the computed delay and return it.
    ///
    /// Only the calling task sleeps; other in-flight requests keep running.
    #[instrument(level = "debug", skip(self))]
    pub async fn wait(&self, attempt: u32, suggested_wait_secs: Option<f64>) -> Duration {
        let delay = self.delay_for(attempt, suggested_wait_secs);
        info!(
            delay_ms = delay.as_millis() as u64,
            attempt,
            hinted = suggested_wait_secs.is_some(),
            "Backing off before retry"
        );
        tokio::time::sleep(delay).await;
        delay
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::from_millis(2000)
    }
}

/// `ceil(wait * 1000)`, ignoring floating-point noise below a nanosecond.
fn hint_millis(wait_secs: f64) -> u64 {
    let millis = wait_secs * 1000.0;
    let rounded = millis.round();
    if (millis - rounded).abs() < 1e-6 {
        rounded as u64
    } else {
        millis.ceil() as u64
    }
}
