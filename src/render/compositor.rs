use rayon::prelude::*;

use crate::{
    assets::decode::load_source_image,
    foundation::{
        core::ImageSize,
        error::{MontageError, MontageResult},
    },
    layout::grid::{CollageLayout, LayoutShape, layout},
    render::{CompositeImage, RenderRequest, canvas::Canvas},
    select::candidates::ImageCandidate,
};

/// What to do when one panel's source image cannot be read or decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum PanelFailurePolicy {
    /// Fail the whole collage with the first failing panel's error.
    #[default]
    Abort,
    /// Fill the failed panel's cell with a solid colour and keep going.
    Placeholder {
        #[serde(default = "default_placeholder_rgba")]
        rgba: [u8; 4],
    },
}

fn default_placeholder_rgba() -> [u8; 4] {
    [0, 0, 0, 255]
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CompositorOpts {
    pub on_panel_error: PanelFailurePolicy,
    /// Decode panel sources on the rayon pool.
    pub parallel_decode: bool,
}

/// Stateless collage renderer.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    opts: CompositorOpts,
}

impl Compositor {
    pub fn new(opts: CompositorOpts) -> Self {
        Self { opts }
    }

    /// Lay out and compose `req`. `Ok(None)` means there are no candidates and the host should
    /// keep its original image.
    pub fn render(&self, req: &RenderRequest) -> MontageResult<Option<CompositeImage>> {
        // Only a pass-through layout reports the original size, and it is never drawn.
        let plan = layout(req.candidates.len(), req.style, ImageSize::new(0, 0));
        if plan.shape == LayoutShape::PassThrough {
            return Ok(None);
        }
        self.compose(&req.candidates, &plan).map(Some)
    }

    /// Draw `candidates` into `plan`'s cells, in cell order.
    ///
    /// With fewer candidates than cells this degrades to [`Compositor::compose_single`].
    #[tracing::instrument(
        skip(self, candidates, plan),
        fields(shape = ?plan.shape, candidate_count = candidates.len())
    )]
    pub fn compose(
        &self,
        candidates: &[ImageCandidate],
        plan: &CollageLayout,
    ) -> MontageResult<CompositeImage> {
        let Some(first) = candidates.first() else {
            return Err(MontageError::validation(
                "compose requires at least one candidate",
            ));
        };
        if plan.shape == LayoutShape::PassThrough {
            return Err(MontageError::validation(
                "pass-through layout has nothing to compose",
            ));
        }
        if plan.shape == LayoutShape::Single || candidates.len() < plan.cells.len() {
            return self.compose_single(first);
        }

        let used = &candidates[..plan.cells.len()];
        let sources: Vec<MontageResult<image::DynamicImage>> = if self.opts.parallel_decode {
            used.par_iter()
                .map(|c| load_source_image(&c.image_path))
                .collect()
        } else {
            used.iter()
                .map(|c| load_source_image(&c.image_path))
                .collect()
        };

        let mut canvas = Canvas::allocate(plan.canvas)?;
        for ((cell, source), cand) in plan.cells.iter().zip(sources).zip(used) {
            match (source, self.opts.on_panel_error) {
                (Ok(img), _) => canvas.draw_scaled(&img, *cell),
                (Err(e), PanelFailurePolicy::Abort) => return Err(e),
                (Err(e), PanelFailurePolicy::Placeholder { rgba }) => {
                    tracing::warn!(
                        source = %cand.source,
                        error = %e,
                        "panel replaced by placeholder"
                    );
                    canvas.fill_rect(*cell, rgba);
                }
            }
        }
        Ok(CompositeImage::new(canvas.into_image()))
    }

    /// The candidate's image at its native resolution, unscaled.
    pub fn compose_single(&self, candidate: &ImageCandidate) -> MontageResult<CompositeImage> {
        load_source_image(&candidate.image_path).map(CompositeImage::new)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
