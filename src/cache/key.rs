use crate::select::candidates::ImageCandidate;

/// Bumped whenever the rendering of an unchanged candidate list changes.
pub const CACHE_KEY_VERSION: &str = "3";

/// Opaque cache key for one rendered collage.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// `"{version}_{id},{id},..."` over the candidates in the order given.
pub fn cache_key(candidates: &[ImageCandidate]) -> CacheKey {
    cache_key_with_version(CACHE_KEY_VERSION, candidates)
}

pub(crate) fn cache_key_with_version(version: &str, candidates: &[ImageCandidate]) -> CacheKey {
    let ids = candidates
        .iter()
        .map(|c| c.source.to_string())
        .collect::<Vec<_>>()
        .join(",");
    CacheKey(format!("{version}_{ids}"))
}

#[cfg(test)]
#[path = "../../tests/unit/cache/key.rs"]
mod tests;
