//! Montage renders collection artwork for playlists.
//!
//! Given a playlist, Montage picks one representative image per member, narrows them to a
//! daily-rotating subset of at most four, and draws a single collage: a 2x2 poster grid for
//! primary artwork or an overlapping three-panel strip for wide thumbnails.
//!
//! # Pipeline overview
//!
//! 1. **Select**: `members + EntityGraph -> Vec<ImageCandidate>` (artwork cascade, de-duplicated)
//! 2. **Rotate**: `candidates + DayOfYear -> ≤ 4 candidates` ordered by display name
//! 3. **Key**: `candidates -> CacheKey` for the host's image cache
//! 4. **Layout**: `count + CollageStyle -> CollageLayout` (pass-through, single, strip, or grid)
//! 5. **Compose**: `candidates + CollageLayout -> CompositeImage`
//!
//! [`PlaylistCollageEnhancer`] runs all five behind the [`ImageEnhancer`] contract, and
//! [`EnhancerRegistry`] dispatches host requests to every registered enhancer in priority order.
//!
//! Every stage is a pure function of the library snapshot and the reference day; no state is kept
//! between calls, so renders for different playlists can run concurrently.
#![forbid(unsafe_code)]

mod assets;
mod cache;
mod config;
mod enhance;
mod foundation;
mod layout;
mod library;
mod render;
mod select;

pub use assets::decode::{decode_image, load_source_image, read_source};
pub use cache::key::{CACHE_KEY_VERSION, CacheKey, cache_key};
pub use config::CollageConfig;
pub use enhance::playlist::PlaylistCollageEnhancer;
pub use enhance::{DaySource, EnhancerPriority, EnhancerRegistry, ImageEnhancer};
pub use foundation::core::{CollageStyle, DayOfYear, ImageKind, ImageSize, RectPx};
pub use foundation::error::{MontageError, MontageResult};
pub use layout::grid::{
    CollageLayout, LayoutShape, SQUARE_IMAGE_SIZE, THUMB_IMAGE_HEIGHT, THUMB_IMAGE_WIDTH, layout,
    size_only,
};
pub use library::graph::{EntityGraph, LibrarySnapshot};
pub use library::model::{
    CollectionMember, EntityId, EntityKind, LibraryItem, MemberRole, PlaylistDef,
};
pub use render::canvas::Canvas;
pub use render::compositor::{Compositor, CompositorOpts, PanelFailurePolicy};
pub use render::{CompositeImage, OutputFormat, RenderRequest};
pub use select::candidates::{ImageCandidate, select_candidates};
pub use select::rotation::{MAX_COLLAGE_CANDIDATES, RotationMode, stable_subset};
