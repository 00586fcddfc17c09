//! Candidate resolution and daily rotation.

pub(crate) mod candidates;
pub(crate) mod rotation;
