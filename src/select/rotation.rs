use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::{foundation::core::DayOfYear, select::candidates::ImageCandidate};

/// Upper bound on candidates kept after rotation (the 2x2 grid).
pub const MAX_COLLAGE_CANDIDATES: usize = 4;

const ROTATION_SEED: u64 = 0x6d6f_6e74_6167_6501;

/// How the daily subset of candidates is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// Per-candidate shuffle keyed on `xxh3(day, position, entity id)`, so both the day and the
    /// resolved member order steer the pick.
    #[default]
    DailyHash,
    /// Ignores the day: takes the last four candidates in reverse order. Matches collages rendered
    /// by hosts that derived one random offset per day and subtracted the index from it.
    LegacyReverse,
}

/// Pick at most [`MAX_COLLAGE_CANDIDATES`] candidates for `day`, returned in ascending
/// display-name order (stable for equal names).
///
/// Pure in `(candidates, day, mode)`: the same inputs always yield the same subset and order.
pub fn stable_subset(
    candidates: &[ImageCandidate],
    day: DayOfYear,
    mode: RotationMode,
) -> Vec<ImageCandidate> {
    let mut picked: Vec<ImageCandidate> = match mode {
        RotationMode::DailyHash => {
            let mut keyed: Vec<(u64, usize)> = candidates
                .iter()
                .enumerate()
                .map(|(idx, c)| (daily_key(day, idx, c), idx))
                .collect();
            keyed.sort_unstable();
            keyed
                .into_iter()
                .take(MAX_COLLAGE_CANDIDATES)
                .map(|(_, idx)| candidates[idx].clone())
                .collect()
        }
        RotationMode::LegacyReverse => candidates
            .iter()
            .rev()
            .take(MAX_COLLAGE_CANDIDATES)
            .cloned()
            .collect(),
    };
    picked.sort_by(|a, b| a.name.cmp(&b.name));
    picked
}

fn daily_key(day: DayOfYear, idx: usize, c: &ImageCandidate) -> u64 {
    // Positions past u32::MAX alias; no playlist gets near that.
    let pos = u32::try_from(idx).unwrap_or(u32::MAX);
    let mut buf = [0u8; 22];
    buf[..2].copy_from_slice(&day.get().to_le_bytes());
    buf[2..6].copy_from_slice(&pos.to_le_bytes());
    buf[6..].copy_from_slice(c.source.as_bytes());
    xxh3_64_with_seed(&buf, ROTATION_SEED)
}

#[cfg(test)]
#[path = "../../tests/unit/select/rotation.rs"]
mod tests;
