use std::sync::Arc;

use crate::{
    cache::key::{CacheKey, cache_key},
    config::CollageConfig,
    enhance::{DaySource, EnhancerPriority, ImageEnhancer, ensure_supported},
    foundation::{
        core::{CollageStyle, ImageKind, ImageSize},
        error::{MontageError, MontageResult},
    },
    layout::grid::size_only,
    library::{graph::EntityGraph, model::EntityId},
    render::{
        CompositeImage, RenderRequest,
        compositor::{Compositor, CompositorOpts},
    },
    select::{
        candidates::{ImageCandidate, select_candidates},
        rotation::{RotationMode, stable_subset},
    },
};

/// Renders playlist artwork as a collage of its members' artwork.
///
/// Handles [`ImageKind::Primary`] (2x2 poster grid) and [`ImageKind::Thumb`] (three-panel strip)
/// for playlist entities. Every call re-resolves candidates from the graph; nothing is memoized.
pub struct PlaylistCollageEnhancer<G: EntityGraph + ?Sized> {
    graph: Arc<G>,
    rotation: RotationMode,
    day: DaySource,
    compositor: Compositor,
}

impl<G: EntityGraph + ?Sized> PlaylistCollageEnhancer<G> {
    pub fn new(graph: Arc<G>) -> Self {
        Self {
            graph,
            rotation: RotationMode::default(),
            day: DaySource::System,
            compositor: Compositor::default(),
        }
    }

    pub fn with_config(graph: Arc<G>, config: &CollageConfig) -> MontageResult<Self> {
        Ok(Self {
            graph,
            rotation: config.rotation,
            day: config.day_source()?,
            compositor: Compositor::new(config.compositor_opts()),
        })
    }

    pub fn with_day_source(mut self, day: DaySource) -> Self {
        self.day = day;
        self
    }

    pub fn with_rotation(mut self, rotation: RotationMode) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_compositor_opts(mut self, opts: CompositorOpts) -> Self {
        self.compositor = Compositor::new(opts);
        self
    }

    /// Today's rotated candidates for the playlist `entity`, in render order.
    pub fn collage_candidates(&self, entity: EntityId) -> MontageResult<Vec<ImageCandidate>> {
        let members = self.graph.members(entity).ok_or_else(|| {
            MontageError::unsupported(format!("entity {entity} is not a collection"))
        })?;
        let all = select_candidates(members, self.graph.as_ref());
        let picked = stable_subset(&all, self.day.day(), self.rotation);
        tracing::debug!(
            %entity,
            resolved = all.len(),
            picked = picked.len(),
            "collage candidates"
        );
        Ok(picked)
    }

    /// Render the collage for `(entity, kind)`; `None` when there is nothing to draw.
    #[tracing::instrument(skip(self))]
    pub fn render_collage(
        &self,
        entity: EntityId,
        kind: ImageKind,
    ) -> MontageResult<Option<CompositeImage>> {
        ensure_supported(self, entity, kind)?;
        let req = RenderRequest {
            style: CollageStyle::for_kind(kind)?,
            candidates: self.collage_candidates(entity)?,
        };
        self.compositor.render(&req)
    }
}

impl<G: EntityGraph + ?Sized> ImageEnhancer for PlaylistCollageEnhancer<G> {
    fn name(&self) -> &'static str {
        "playlist-collage"
    }

    fn priority(&self) -> EnhancerPriority {
        EnhancerPriority::First
    }

    fn supports(&self, entity: EntityId, kind: ImageKind) -> bool {
        matches!(kind, ImageKind::Primary | ImageKind::Thumb)
            && self.graph.kind(entity).is_some_and(|k| k.is_collection())
    }

    fn cache_key(&self, entity: EntityId, kind: ImageKind) -> MontageResult<CacheKey> {
        ensure_supported(self, entity, kind)?;
        Ok(cache_key(&self.collage_candidates(entity)?))
    }

    fn enhanced_size(
        &self,
        entity: EntityId,
        kind: ImageKind,
        original: ImageSize,
    ) -> MontageResult<ImageSize> {
        ensure_supported(self, entity, kind)?;
        let style = CollageStyle::for_kind(kind)?;
        let count = self.collage_candidates(entity)?.len();
        Ok(size_only(count, style, original))
    }

    fn enhance(
        &self,
        entity: EntityId,
        kind: ImageKind,
        original: image::DynamicImage,
    ) -> MontageResult<image::DynamicImage> {
        match self.render_collage(entity, kind)? {
            Some(collage) => Ok(collage.into_image()),
            None => Ok(original),
        }
    }
}

impl<G: EntityGraph + ?Sized> std::fmt::Debug for PlaylistCollageEnhancer<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistCollageEnhancer")
            .field("rotation", &self.rotation)
            .field("day", &self.day)
            .field("compositor", &self.compositor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/enhance/playlist.rs"]
mod tests;
