use std::path::{Path, PathBuf};

use super::*;
use crate::{
    foundation::core::{CollageStyle, ImageSize},
    library::model::EntityId,
};

const RED: [u8; 4] = [220, 0, 0, 255];
const GREEN: [u8; 4] = [0, 200, 0, 255];
const BLUE: [u8; 4] = [0, 0, 210, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "montage_compositor_{name}_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn png(&self, file: &str, w: u32, h: u32, px: [u8; 4]) -> PathBuf {
        let path = self.dir.join(file);
        image::RgbaImage::from_pixel(w, h, image::Rgba(px))
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        path
    }

    fn garbage(&self, file: &str) -> PathBuf {
        let path = self.dir.join(file);
        std::fs::write(&path, b"not an image").unwrap();
        path
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

fn cand(raw: u128, path: &Path) -> ImageCandidate {
    ImageCandidate {
        source: EntityId::from_u128(raw),
        image_path: path.to_path_buf(),
        name: format!("c{raw}"),
    }
}

fn pixel(img: &CompositeImage, x: u32, y: u32) -> [u8; 4] {
    img.image().to_rgba8().get_pixel(x, y).0
}

fn square_plan(n: usize) -> CollageLayout {
    layout(n, CollageStyle::Square, ImageSize::new(1, 1))
}

#[test]
fn square_grid_places_candidates_in_supplied_order() {
    let fx = Fixture::new("grid");
    let cands = vec![
        cand(1, &fx.png("a.png", 8, 8, RED)),
        cand(2, &fx.png("b.png", 16, 4, GREEN)),
        cand(3, &fx.png("c.png", 3, 9, BLUE)),
        cand(4, &fx.png("d.png", 5, 5, WHITE)),
    ];
    let out = Compositor::default().compose(&cands, &square_plan(4)).unwrap();
    assert_eq!(out.size(), ImageSize::new(800, 800));
    assert_eq!(pixel(&out, 200, 200), RED);
    assert_eq!(pixel(&out, 600, 200), GREEN);
    assert_eq!(pixel(&out, 200, 600), BLUE);
    assert_eq!(pixel(&out, 600, 600), WHITE);
}

#[test]
fn square_with_three_candidates_is_first_image_unscaled() {
    let fx = Fixture::new("square_single");
    let cands = vec![
        cand(1, &fx.png("a.png", 37, 21, GREEN)),
        cand(2, &fx.png("b.png", 8, 8, RED)),
        cand(3, &fx.png("c.png", 8, 8, BLUE)),
    ];
    let plan = square_plan(cands.len());
    assert_eq!(plan.shape, LayoutShape::Single);
    let out = Compositor::default().compose(&cands, &plan).unwrap();
    assert_eq!(out.size(), ImageSize::new(37, 21));
    assert_eq!(pixel(&out, 36, 20), GREEN);
}

#[test]
fn grid_layout_with_too_few_candidates_degrades_to_single() {
    let fx = Fixture::new("degrade");
    let cands = vec![cand(1, &fx.png("a.png", 10, 12, RED))];
    let out = Compositor::default().compose(&cands, &square_plan(4)).unwrap();
    assert_eq!(out.size(), ImageSize::new(10, 12));
}

#[test]
fn thumb_strip_overlaps_first_three_panels() {
    let fx = Fixture::new("strip");
    let cands = vec![
        cand(1, &fx.png("a.png", 8, 8, RED)),
        cand(2, &fx.png("b.png", 8, 8, GREEN)),
        cand(3, &fx.png("c.png", 8, 8, BLUE)),
        cand(4, &fx.png("d.png", 8, 8, WHITE)),
    ];
    let plan = layout(cands.len(), CollageStyle::Thumb, ImageSize::new(1, 1));
    let out = Compositor::default().compose(&cands, &plan).unwrap();
    assert_eq!(out.size(), ImageSize::new(1600, 900));
    // Each panel covers the right half of the one before it.
    assert_eq!(pixel(&out, 100, 450), RED);
    assert_eq!(pixel(&out, 532, 10), RED);
    assert_eq!(pixel(&out, 533, 10), GREEN);
    assert_eq!(pixel(&out, 1065, 890), GREEN);
    assert_eq!(pixel(&out, 1066, 0), BLUE);
    assert_eq!(pixel(&out, 1599, 899), BLUE);
}

#[test]
fn parallel_decode_matches_sequential() {
    let fx = Fixture::new("parallel");
    let cands = vec![
        cand(1, &fx.png("a.png", 8, 8, RED)),
        cand(2, &fx.png("b.png", 8, 8, GREEN)),
        cand(3, &fx.png("c.png", 8, 8, BLUE)),
        cand(4, &fx.png("d.png", 8, 8, WHITE)),
    ];
    let seq = Compositor::default().compose(&cands, &square_plan(4)).unwrap();
    let par = Compositor::new(CompositorOpts {
        parallel_decode: true,
        ..CompositorOpts::default()
    })
    .compose(&cands, &square_plan(4))
    .unwrap();
    assert_eq!(seq.image().to_rgba8(), par.image().to_rgba8());
}

#[test]
fn abort_policy_fails_whole_collage_on_bad_panel() {
    let fx = Fixture::new("abort");
    let bad = fx.garbage("bad.png");
    let cands = vec![
        cand(1, &fx.png("a.png", 8, 8, RED)),
        cand(2, &bad),
        cand(3, &fx.png("c.png", 8, 8, BLUE)),
        cand(4, &fx.png("d.png", 8, 8, WHITE)),
    ];
    let err = Compositor::default()
        .compose(&cands, &square_plan(4))
        .unwrap_err();
    let MontageError::Source { path, .. } = err else {
        panic!("expected source error");
    };
    assert_eq!(path, bad);
}

#[test]
fn placeholder_policy_fills_failed_cell() {
    let fx = Fixture::new("placeholder");
    let cands = vec![
        cand(1, &fx.png("a.png", 8, 8, RED)),
        cand(2, &fx.dir.join("missing.png")),
        cand(3, &fx.png("c.png", 8, 8, BLUE)),
        cand(4, &fx.png("d.png", 8, 8, WHITE)),
    ];
    let grey = [90, 90, 90, 255];
    let out = Compositor::new(CompositorOpts {
        on_panel_error: PanelFailurePolicy::Placeholder { rgba: grey },
        parallel_decode: false,
    })
    .compose(&cands, &square_plan(4))
    .unwrap();
    assert_eq!(pixel(&out, 200, 200), RED);
    assert_eq!(pixel(&out, 600, 200), grey);
    assert_eq!(pixel(&out, 600, 600), WHITE);
}

#[test]
fn single_mode_failure_aborts_regardless_of_policy() {
    let fx = Fixture::new("single_fail");
    let cands = vec![cand(1, &fx.garbage("bad.png"))];
    let c = Compositor::new(CompositorOpts {
        on_panel_error: PanelFailurePolicy::Placeholder { rgba: WHITE },
        parallel_decode: false,
    });
    assert!(c.compose(&cands, &square_plan(1)).is_err());
}

#[test]
fn compose_without_candidates_is_a_validation_error() {
    let err = Compositor::default()
        .compose(&[], &square_plan(4))
        .unwrap_err();
    assert!(matches!(err, MontageError::Validation(_)));
}

#[test]
fn render_signals_pass_through_for_empty_request() {
    let req = RenderRequest {
        style: CollageStyle::Thumb,
        candidates: vec![],
    };
    assert!(Compositor::default().render(&req).unwrap().is_none());
}

#[test]
fn policy_serde_shapes() {
    let p: PanelFailurePolicy = serde_json::from_str(r#"{"mode":"abort"}"#).unwrap();
    assert_eq!(p, PanelFailurePolicy::Abort);
    let p: PanelFailurePolicy = serde_json::from_str(r#"{"mode":"placeholder"}"#).unwrap();
    assert_eq!(p, PanelFailurePolicy::Placeholder { rgba: [0, 0, 0, 255] });
}
