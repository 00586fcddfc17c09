//! Read-only view of the media library the collage engine draws from.

pub(crate) mod graph;
pub(crate) mod model;
