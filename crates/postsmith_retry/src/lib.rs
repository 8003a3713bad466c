//! Failure classification, backoff and model tier selection.
//!
//! These are the building blocks the generation client composes into its
//! retry/fallback state machine:
//!
//! - [`classify`] sorts a [`RemoteError`](postsmith_error::RemoteError) into a
//!   [`FailureClass`]
//! - [`Backoff`] sizes and applies the delay before a rate-limited retry
//! - [`TierSelector`] picks the starting [`ModelTier`] and the one permitted
//!   downgrade
//! - [`RetryState`] tracks one logical request's budget and tier
//!
//! Configuration ([`PostsmithConfig`]) lives here as well, since it is mostly
//! retry and model-tier settings.

mod backoff;
mod classifier;
mod config;
mod state;
mod tier;

pub use backoff::Backoff;
pub use classifier::{AttemptOutcome, FailureClass, classify};
pub use config::{ApiConfig, ModelCatalog, PostsmithConfig, RetryConfig, StorageConfig};
pub use state::RetryState;
pub use tier::{ModelTier, TierSelector};
