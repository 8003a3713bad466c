//! Model tiers and the selector that maps requests onto them.

use crate::ModelCatalog;
use postsmith_core::Capability;
use serde::{Deserialize, Serialize};

/// Capability level of the backend model targeted by a request.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum ModelTier {
    /// Default model, available to every key
    #[display("standard")]
    Standard,
    /// High-resolution model, may be permission-gated
    #[display("pro")]
    Pro,
}

impl ModelTier {
    /// The next lower tier, or `None` at the bottom.
    ///
    /// ```
    /// use postsmith_retry::ModelTier;
    ///
    /// assert_eq!(ModelTier::Pro.downgrade(), Some(ModelTier::Standard));
    /// assert_eq!(ModelTier::Standard.downgrade(), None);
    /// ```
    pub fn downgrade(self) -> Option<ModelTier> {
        match self {
            ModelTier::Pro => Some(ModelTier::Standard),
            ModelTier::Standard => None,
        }
    }
}

/// Chooses tiers for requests and resolves tiers to backend model ids.
///
/// # Examples
///
/// ```
/// use postsmith_core::{AspectRatio, Capability, ImageSize};
/// use postsmith_retry::{ModelCatalog, ModelTier, TierSelector};
///
/// let selector = TierSelector::new(ModelCatalog::default());
/// let hi_res = Capability::Image { aspect_ratio: AspectRatio::Square, size: ImageSize::Size4K };
///
/// assert_eq!(selector.initial_tier(&hi_res), ModelTier::Pro);
/// assert_eq!(selector.initial_tier(&Capability::Text), ModelTier::Standard);
/// assert_eq!(selector.model_for(&hi_res, ModelTier::Pro), "gemini-3-pro-image-preview");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TierSelector {
    catalog: ModelCatalog,
}

impl TierSelector {
    /// Create a selector over the given model catalog.
    pub fn new(catalog: ModelCatalog) -> Self {
        Self { catalog }
    }

    /// Tier a fresh request starts at: `Pro` for `2K`/`4K` images, else `Standard`.
    pub fn initial_tier(&self, capability: &Capability) -> ModelTier {
        if capability.is_high_resolution() {
            ModelTier::Pro
        } else {
            ModelTier::Standard
        }
    }

    /// The tier to fall back to after a permission failure.
    pub fn downgrade(&self, tier: ModelTier) -> Option<ModelTier> {
        tier.downgrade()
    }

    /// Backend model id serving `capability` at `tier`.
    pub fn model_for(&self, capability: &Capability, tier: ModelTier) -> &str {
        match (capability, tier) {
            (Capability::Text, _) => &self.catalog.text,
            (Capability::Image { .. }, ModelTier::Standard) => &self.catalog.image_standard,
            (Capability::Image { .. }, ModelTier::Pro) => &self.catalog.image_pro,
        }
    }

    /// The model catalog in use.
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postsmith_core::{AspectRatio, ImageSize};

    fn image(size: ImageSize) -> Capability {
        Capability::Image {
            aspect_ratio: AspectRatio::Portrait9x16,
            size,
        }
    }

    #[test]
    fn standard_resolution_images_start_standard() {
        let selector = TierSelector::new(ModelCatalog::default());
        assert_eq!(selector.initial_tier(&image(ImageSize::Size1K)), ModelTier::Standard);
        assert_eq!(selector.initial_tier(&image(ImageSize::Size2K)), ModelTier::Pro);
    }

    #[test]
    fn text_ignores_tier_when_resolving_model() {
        let selector = TierSelector::new(ModelCatalog::default());
        assert_eq!(
            selector.model_for(&Capability::Text, ModelTier::Pro),
            selector.model_for(&Capability::Text, ModelTier::Standard)
        );
    }

    #[test]
    fn downgrade_never_climbs() {
        let selector = TierSelector::new(ModelCatalog::default());
        let mut tier = ModelTier::Pro;
        let mut steps = 0;
        while let Some(lower) = selector.downgrade(tier) {
            assert!(lower < tier);
            tier = lower;
            steps += 1;
        }
        assert_eq!(steps, 1);
        assert_eq!(tier, ModelTier::Standard);
    }
}
