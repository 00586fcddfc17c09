//! Source image IO and decoding.

pub(crate) mod decode;
