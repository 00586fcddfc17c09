use std::path::PathBuf;

use super::*;
use crate::library::model::EntityId;

fn cand(raw: u128, name: &str) -> ImageCandidate {
    ImageCandidate {
        source: EntityId::from_u128(raw),
        image_path: PathBuf::from(format!("{raw}.jpg")),
        name: name.to_string(),
    }
}

fn pool(n: u128) -> Vec<ImageCandidate> {
    (0..n).map(|i| cand(i + 1, &format!("item {i:02}"))).collect()
}

fn day(d: u16) -> DayOfYear {
    DayOfYear::new(d).unwrap()
}

fn ids(c: &[ImageCandidate]) -> Vec<EntityId> {
    c.iter().map(|c| c.source).collect()
}

#[test]
fn same_day_same_subset_and_order() {
    let p = pool(12);
    let a = stable_subset(&p, day(200), RotationMode::DailyHash);
    let b = stable_subset(&p, day(200), RotationMode::DailyHash);
    assert_eq!(a, b);
    assert_eq!(a.len(), MAX_COLLAGE_CANDIDATES);
}

#[test]
fn daily_hash_rotates_across_days() {
    let p = pool(20);
    let first = ids(&stable_subset(&p, day(1), RotationMode::DailyHash));
    let changed =
        (2..=30).any(|d| ids(&stable_subset(&p, day(d), RotationMode::DailyHash)) != first);
    assert!(changed);
}

#[test]
fn daily_hash_is_a_true_shuffle_not_a_reversal() {
    let p = pool(20);
    let reversed = ids(&stable_subset(&p, day(1), RotationMode::LegacyReverse));
    assert_eq!(reversed, [17u128, 18, 19, 20].map(EntityId::from_u128).to_vec());

    let shuffled = ids(&stable_subset(&p, day(1), RotationMode::DailyHash));
    assert_eq!(shuffled, [2u128, 14, 17, 20].map(EntityId::from_u128).to_vec());
    assert_ne!(shuffled, reversed);
}

#[test]
fn daily_hash_pins_per_day_picks() {
    let p = pool(20);
    let picks = |d: u16| ids(&stable_subset(&p, day(d), RotationMode::DailyHash));
    assert_eq!(picks(2), [3u128, 8, 11, 18].map(EntityId::from_u128).to_vec());
    assert_eq!(picks(3), [8u128, 15, 18, 19].map(EntityId::from_u128).to_vec());
}

#[test]
fn daily_hash_follows_resolved_member_order() {
    let p = pool(9);
    let mut shuffled = p.clone();
    shuffled.reverse();
    shuffled.swap(0, 4);
    let a = ids(&stable_subset(&p, day(77), RotationMode::DailyHash));
    let b = ids(&stable_subset(&shuffled, day(77), RotationMode::DailyHash));
    assert_eq!(a, [3u128, 5, 7, 8].map(EntityId::from_u128).to_vec());
    assert_eq!(b, [1u128, 2, 7, 8].map(EntityId::from_u128).to_vec());
}

#[test]
fn legacy_mode_takes_last_four_reversed_then_sorts_by_name() {
    let p = vec![
        cand(1, "a"),
        cand(2, "b"),
        cand(3, "z"),
        cand(4, "c"),
        cand(5, "y"),
        cand(6, "d"),
    ];
    let out = stable_subset(&p, day(10), RotationMode::LegacyReverse);
    let names: Vec<&str> = out.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["c", "d", "y", "z"]);

    // Day does not matter in legacy mode.
    assert_eq!(out, stable_subset(&p, day(300), RotationMode::LegacyReverse));
}

#[test]
fn small_pools_keep_every_candidate_sorted_by_name() {
    let p = vec![cand(1, "Zulu"), cand(2, "Alpha"), cand(3, "Mike")];
    for mode in [RotationMode::DailyHash, RotationMode::LegacyReverse] {
        let out = stable_subset(&p, day(5), mode);
        let names: Vec<&str> = out.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Mike", "Zulu"]);
    }
}

#[test]
fn name_sort_is_stable_for_ties() {
    let p = vec![cand(1, "same"), cand(2, "same")];
    let out = stable_subset(&p, day(5), RotationMode::LegacyReverse);
    assert_eq!(ids(&out), vec![EntityId::from_u128(2), EntityId::from_u128(1)]);
}

#[test]
fn empty_pool_yields_nothing() {
    assert!(stable_subset(&[], day(1), RotationMode::DailyHash).is_empty());
}

#[test]
fn mode_serde_names() {
    let m: RotationMode = serde_json::from_str("\"legacy_reverse\"").unwrap();
    assert_eq!(m, RotationMode::LegacyReverse);
    assert_eq!(RotationMode::default(), RotationMode::DailyHash);
}
