//! Host-facing enhancer contract and the ordered registry that dispatches to enhancers.

use crate::{
    cache::key::CacheKey,
    foundation::{
        core::{DayOfYear, ImageKind, ImageSize},
        error::{MontageError, MontageResult},
    },
    library::model::EntityId,
};

pub(crate) mod playlist;

/// Relative ordering of enhancers; lower runs earlier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EnhancerPriority {
    First,
    Second,
    #[default]
    Third,
    Fourth,
    Last,
}

/// Where the daily rotation gets its day from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DaySource {
    /// Local calendar date at call time.
    #[default]
    System,
    Fixed(DayOfYear),
}

impl DaySource {
    pub fn day(self) -> DayOfYear {
        match self {
            Self::System => DayOfYear::today(),
            Self::Fixed(d) => d,
        }
    }
}

/// An image post-processor the host applies to an entity's artwork.
///
/// `cache_key` and `enhanced_size` must be cheap relative to `enhance` and must agree with what
/// `enhance` would produce for the same library state.
pub trait ImageEnhancer: Send + Sync {
    /// Short identifier used in logs and combined cache keys.
    fn name(&self) -> &'static str;

    fn priority(&self) -> EnhancerPriority {
        EnhancerPriority::default()
    }

    fn supports(&self, entity: EntityId, kind: ImageKind) -> bool;

    fn cache_key(&self, entity: EntityId, kind: ImageKind) -> MontageResult<CacheKey>;

    fn enhanced_size(
        &self,
        entity: EntityId,
        kind: ImageKind,
        original: ImageSize,
    ) -> MontageResult<ImageSize>;

    /// Return the enhanced image. `original` is consumed; it may be returned unchanged.
    fn enhance(
        &self,
        entity: EntityId,
        kind: ImageKind,
        original: image::DynamicImage,
    ) -> MontageResult<image::DynamicImage>;
}

/// Explicit, priority-ordered list of enhancers. Registration order breaks priority ties.
#[derive(Default)]
pub struct EnhancerRegistry {
    enhancers: Vec<Box<dyn ImageEnhancer>>,
}

impl EnhancerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, enhancer: Box<dyn ImageEnhancer>) {
        let at = self
            .enhancers
            .partition_point(|e| e.priority() <= enhancer.priority());
        self.enhancers.insert(at, enhancer);
    }

    pub fn len(&self) -> usize {
        self.enhancers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enhancers.is_empty()
    }

    /// Enhancers that apply to `(entity, kind)`, in run order.
    pub fn enhancers_for(
        &self,
        entity: EntityId,
        kind: ImageKind,
    ) -> impl Iterator<Item = &dyn ImageEnhancer> {
        self.enhancers
            .iter()
            .map(|e| &**e)
            .filter(move |e| e.supports(entity, kind))
    }

    /// Combined key of every applicable enhancer, or `None` when none applies.
    pub fn cache_key(&self, entity: EntityId, kind: ImageKind) -> MontageResult<Option<String>> {
        let mut parts = Vec::new();
        for e in self.enhancers_for(entity, kind) {
            parts.push(format!("{}:{}", e.name(), e.cache_key(entity, kind)?));
        }
        if parts.is_empty() {
            return Ok(None);
        }
        Ok(Some(parts.join("|")))
    }

    /// Size after every applicable enhancer has run.
    pub fn enhanced_size(
        &self,
        entity: EntityId,
        kind: ImageKind,
        original: ImageSize,
    ) -> MontageResult<ImageSize> {
        let mut size = original;
        for e in self.enhancers_for(entity, kind) {
            size = e.enhanced_size(entity, kind, size)?;
        }
        Ok(size)
    }

    /// Run every applicable enhancer in order, each receiving the previous one's output.
    #[tracing::instrument(skip(self, original))]
    pub fn enhance(
        &self,
        entity: EntityId,
        kind: ImageKind,
        original: image::DynamicImage,
    ) -> MontageResult<image::DynamicImage> {
        let mut img = original;
        for e in self.enhancers_for(entity, kind) {
            tracing::debug!(enhancer = e.name(), "applying enhancer");
            img = e.enhance(entity, kind, img)?;
        }
        Ok(img)
    }
}

impl std::fmt::Debug for EnhancerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.enhancers.iter().map(|e| e.name()))
            .finish()
    }
}

/// Reject requests an enhancer was not built for.
pub(crate) fn ensure_supported(
    enhancer: &dyn ImageEnhancer,
    entity: EntityId,
    kind: ImageKind,
) -> MontageResult<()> {
    if enhancer.supports(entity, kind) {
        return Ok(());
    }
    Err(MontageError::unsupported(format!(
        "{} does not handle {kind} images for entity {entity}",
        enhancer.name()
    )))
}

#[cfg(test)]
#[path = "../tests/unit/enhance/registry.rs"]
mod tests;
