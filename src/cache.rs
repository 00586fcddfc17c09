//! Cache keys handed to the host's image cache.

pub(crate) mod key;
