use crate::foundation::core::{CollageStyle, ImageSize, RectPx};

/// Edge length of square (poster) collages.
pub const SQUARE_IMAGE_SIZE: u32 = 800;
/// Width of thumb (strip) collages.
pub const THUMB_IMAGE_WIDTH: u32 = 1600;
/// Height of thumb (strip) collages.
pub const THUMB_IMAGE_HEIGHT: u32 = 900;

const SQUARE_GRID_CELLS: usize = 4;
const THUMB_STRIP_PANELS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutShape {
    /// No candidates: the host keeps its original image.
    PassThrough,
    /// Too few candidates for the grid: the first candidate is used as-is.
    Single,
    /// Three overlapping full-height panels.
    Strip,
    /// 2x2 quadrants.
    Grid,
}

/// Canvas size plus one placement rectangle per drawn candidate, in draw order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollageLayout {
    pub shape: LayoutShape,
    pub canvas: ImageSize,
    pub cells: Vec<RectPx>,
}

impl CollageLayout {
    /// Number of candidates this layout draws.
    pub fn candidates_used(&self) -> usize {
        self.cells.len()
    }
}

fn shape_for(candidate_count: usize, style: CollageStyle) -> LayoutShape {
    match (style, candidate_count) {
        (_, 0) => LayoutShape::PassThrough,
        (CollageStyle::Square, n) if n < SQUARE_GRID_CELLS => LayoutShape::Single,
        (CollageStyle::Square, _) => LayoutShape::Grid,
        (CollageStyle::Thumb, n) if n < THUMB_STRIP_PANELS => LayoutShape::Single,
        (CollageStyle::Thumb, _) => LayoutShape::Strip,
    }
}

fn canvas_for(style: CollageStyle) -> ImageSize {
    match style {
        CollageStyle::Square => ImageSize::new(SQUARE_IMAGE_SIZE, SQUARE_IMAGE_SIZE),
        CollageStyle::Thumb => ImageSize::new(THUMB_IMAGE_WIDTH, THUMB_IMAGE_HEIGHT),
    }
}

/// Canvas size a render would produce, without computing cells or touching any image.
///
/// Returns `original` when there is nothing to draw.
pub fn size_only(candidate_count: usize, style: CollageStyle, original: ImageSize) -> ImageSize {
    match shape_for(candidate_count, style) {
        LayoutShape::PassThrough => original,
        _ => canvas_for(style),
    }
}

/// Choose the collage shape for `candidate_count` candidates and place its cells.
pub fn layout(candidate_count: usize, style: CollageStyle, original: ImageSize) -> CollageLayout {
    let shape = shape_for(candidate_count, style);
    let canvas = size_only(candidate_count, style, original);
    let cells = match shape {
        LayoutShape::PassThrough => Vec::new(),
        LayoutShape::Single => vec![RectPx::new(0, 0, canvas.width, canvas.height)],
        LayoutShape::Strip => strip_cells(canvas),
        LayoutShape::Grid => grid_cells(canvas),
    };
    tracing::debug!(?shape, ?style, candidate_count, "collage layout");
    CollageLayout {
        shape,
        canvas,
        cells,
    }
}

// Panels are two thirds of the width and advance by half a panel, so each one covers the right
// half of its predecessor; the last panel runs off the right edge.
fn strip_cells(canvas: ImageSize) -> Vec<RectPx> {
    let cell_w = 2 * (canvas.width / 3);
    let stride = i64::from(cell_w / 2);
    (0..THUMB_STRIP_PANELS as i64)
        .map(|col| RectPx::new(col * stride, 0, cell_w, canvas.height))
        .collect()
}

fn grid_cells(canvas: ImageSize) -> Vec<RectPx> {
    let cell = canvas.width / 2;
    let mut out = Vec::with_capacity(SQUARE_GRID_CELLS);
    for row in 0..2i64 {
        for col in 0..2i64 {
            out.push(RectPx::new(
                col * i64::from(cell),
                row * i64::from(cell),
                cell,
                cell,
            ));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
