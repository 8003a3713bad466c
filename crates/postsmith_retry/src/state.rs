//! Per-request retry bookkeeping.

use crate::ModelTier;

/// Retry budget and tier of one logical request.
///
/// Owned by a single request for its whole lifetime. The attempt budget only
/// decreases, and the tier can be lowered at most once.
///
/// # Examples
///
/// ```
/// use postsmith_retry::{ModelTier, RetryState};
///
/// let mut state = RetryState::new(3, ModelTier::Standard);
/// assert!(state.record_rate_limit());  // 2 left, retry
/// assert!(state.record_rate_limit());  // 1 left, retry
/// assert!(!state.record_rate_limit()); // 0 left, give up
/// assert_eq!(state.attempts_remaining(), 0);
/// assert_eq!(state.retries(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    attempts_remaining: u32,
    retries: u32,
    network_calls: u32,
    tier: ModelTier,
    downgraded: bool,
}

impl RetryState {
    /// Start a request with `max_attempts` rate-limited attempts at `tier`.
    pub fn new(max_attempts: u32, tier: ModelTier) -> Self {
        Self {
            attempts_remaining: max_attempts,
            retries: 0,
            network_calls: 0,
            tier,
            downgraded: false,
        }
    }

    /// Attempts left in the budget.
    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    /// Rate-limit retries granted so far; doubles as the backoff exponent.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Network calls made so far, including a fallback attempt.
    pub fn network_calls(&self) -> u32 {
        self.network_calls
    }

    /// Tier the next attempt targets.
    pub fn tier(&self) -> ModelTier {
        self.tier
    }

    /// Whether the one permitted downgrade has been used.
    pub fn downgraded(&self) -> bool {
        self.downgraded
    }

    /// Note that a network call is about to be made.
    pub fn record_call(&mut self) {
        self.network_calls = self.network_calls.saturating_add(1);
    }

    /// Charge a rate-limited attempt to the budget.
    ///
    /// Returns `true` if the request may retry, `false` once the budget is
    /// spent. A spent budget stays spent.
    pub fn record_rate_limit(&mut self) -> bool {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        if self.attempts_remaining > 0 {
            self.retries += 1;
            true
        } else {
            false
        }
    }

    /// Lower the tier once, returning the new tier.
    ///
    /// Returns `None` if a downgrade already happened or `tier` has no lower
    /// tier; the state is left unchanged in that case.
    pub fn downgrade(&mut self) -> Option<ModelTier> {
        if self.downgraded {
            return None;
        }
        let lower = self.tier.downgrade()?;
        self.tier = lower;
        self.downgraded = true;
        Some(lower)
    }
}
