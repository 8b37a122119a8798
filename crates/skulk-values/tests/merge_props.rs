//! Property-based tests for array merge.
//!
//! Arrays are generated from ordered maps so timestamps are sorted and
//! unique. A `BTreeMap` extended with `b` after `a` is the reference model
//! for last-writer-wins.

use alopex_skulk_values::{
    merged_len, ArrayPool, ArrayValue, IntegerArray, OutputSizing, PoolConfig, StringArray,
    TimeValueArray,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn to_array<T: ArrayValue>(map: &BTreeMap<i64, T>) -> TimeValueArray<T> {
    map.iter().map(|(&ts, v)| (ts, v.clone())).collect()
}

fn model<T: ArrayValue>(a: &BTreeMap<i64, T>, b: &BTreeMap<i64, T>) -> BTreeMap<i64, T> {
    let mut merged = a.clone();
    merged.extend(b.iter().map(|(&ts, v)| (ts, v.clone())));
    merged
}

/// Small timestamp domain so that overlaps are common.
fn series_strategy() -> impl Strategy<Value = BTreeMap<i64, i64>> {
    prop::collection::btree_map(-200i64..200, any::<i64>(), 0..64)
}

fn text_series_strategy() -> impl Strategy<Value = BTreeMap<i64, String>> {
    prop::collection::btree_map(0i64..100, "[a-z]{0,8}", 0..32)
}

proptest! {
    /// Merge matches the map model: union of timestamps, b wins on collision.
    #[test]
    fn test_merge_matches_model(a in series_strategy(), b in series_strategy()) {
        let mut merged = to_array(&a);
        merged.merge(&to_array(&b));

        prop_assert_eq!(merged, to_array(&model(&a, &b)));
    }

    /// Output is sorted, duplicate-free and sized to the distinct count.
    #[test]
    fn test_merge_output_well_formed(a in series_strategy(), b in series_strategy()) {
        let (aa, bb) = (to_array(&a), to_array(&b));
        let expected_len = merged_len(&aa, &bb);

        let mut merged = aa;
        merged.merge(&bb);

        prop_assert!(merged.validate().is_ok());
        prop_assert_eq!(merged.len(), expected_len);
        prop_assert!(merged.len() >= a.len().max(b.len()));
        prop_assert!(merged.len() <= a.len() + b.len());
    }

    /// Points only in `a` keep `a`'s value; points in `b` take `b`'s value.
    #[test]
    fn test_merge_value_provenance(a in series_strategy(), b in series_strategy()) {
        let mut merged = to_array(&a);
        merged.merge(&to_array(&b));

        for (ts, v) in merged.iter() {
            match (a.get(&ts), b.get(&ts)) {
                (_, Some(bv)) => prop_assert_eq!(v, bv),
                (Some(av), None) => prop_assert_eq!(v, av),
                (None, None) => prop_assert!(false, "timestamp {} from nowhere", ts),
            }
        }
    }

    /// Both sizing strategies and the pooled path agree with plain merge.
    #[test]
    fn test_merge_strategies_agree(a in series_strategy(), b in series_strategy()) {
        let bb = to_array(&b);
        let mut plain = to_array(&a);
        plain.merge(&bb);

        let mut worst = to_array(&a);
        worst.try_merge(&bb, OutputSizing::WorstCase).unwrap();
        prop_assert_eq!(&worst, &plain);

        let mut exact = to_array(&a);
        exact.try_merge(&bb, OutputSizing::Exact).unwrap();
        prop_assert_eq!(&exact, &plain);

        let pool: ArrayPool<i64> = ArrayPool::new(PoolConfig::default());
        let mut pooled = to_array(&a);
        pool.merge(&mut pooled, &bb).unwrap();
        prop_assert_eq!(&pooled, &plain);
    }

    /// Merging the empty array is a no-op; merging into empty copies.
    #[test]
    fn test_merge_identity(a in series_strategy()) {
        let aa = to_array(&a);

        let mut left = aa.clone();
        left.merge(&IntegerArray::new());
        prop_assert_eq!(&left, &aa);

        let mut right = IntegerArray::new();
        right.merge(&aa);
        prop_assert_eq!(&right, &aa);
    }

    /// Text merge matches the model and leaves `b` intact.
    #[test]
    fn test_string_merge_matches_model(a in text_series_strategy(), b in text_series_strategy()) {
        let bb = to_array(&b);
        let mut merged = to_array(&a);
        merged.merge(&bb);

        prop_assert_eq!(merged, to_array(&model(&a, &b)));
        prop_assert_eq!(bb, to_array(&b));
    }

    /// `exclude` and `include` over the same range partition the array.
    #[test]
    fn test_exclude_include_partition(
        a in series_strategy(),
        lo in -250i64..250,
        width in 0i64..200,
    ) {
        let hi = lo + width;
        let aa = to_array(&a);

        let mut inside = aa.clone();
        inside.include(lo, hi);
        let mut outside = aa.clone();
        outside.exclude(lo, hi);

        prop_assert_eq!(inside.len() + outside.len(), aa.len());
        prop_assert!(inside.iter().all(|(ts, _)| ts >= lo && ts <= hi));
        prop_assert!(outside.iter().all(|(ts, _)| ts < lo || ts > hi));
        prop_assert_eq!(aa.contains(lo, hi), !inside.is_empty());

        let mut rejoined = outside;
        rejoined.merge(&inside);
        prop_assert_eq!(rejoined, aa);
    }
}

#[test]
fn test_pool_reuse_across_many_merges() {
    let pool: ArrayPool<String> = ArrayPool::new(PoolConfig::default().with_max_pooled_buffers(4));
    let mut acc: StringArray = (0..100i64).map(|ts| (ts, String::new())).collect();

    for round in 0..50i64 {
        let batch: StringArray = (0..10i64)
            .map(|i| (i * 10 + round % 10, format!("r{round}")))
            .collect();
        pool.merge(&mut acc, &batch).unwrap();
    }

    acc.validate().unwrap();
    assert_eq!(acc.len(), 100);
    assert_eq!(acc.min_time(), Some(0));
    assert_eq!(acc.max_time(), Some(99));
    // Round 49 was the last to write timestamps ending in 9.
    assert_eq!(acc.get(19).map(|(_, v)| v.as_str()), Some("r49"));
    assert_eq!(acc.get(10).map(|(_, v)| v.as_str()), Some("r40"));
    // Every merge needs the same worst-case capacity, so buffers get reused.
    assert!(pool.stats().hits() >= 48);
    assert!(pool.len() <= 4);
}
