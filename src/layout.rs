//! Collage shape selection and cell placement.

pub(crate) mod grid;
