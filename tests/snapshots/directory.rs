//! Snapshot directory: naming, enumeration and list bounds.

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;

use crate::common::*;

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_name_round_trip(name in "[A-Za-z0-9_.-]{1,64}") {
        let tp = TestPool::new();
        tp.pool.snap_create(&name).unwrap();
        let id = tp.pool.snap_lookup(&name).unwrap();
        prop_assert_eq!(tp.pool.snap_get_name(id).unwrap(), name);
    }

    #[test]
    fn test_list_is_complete(names in prop::collection::hash_set("[a-z]{1,12}", 0..40)) {
        let tp = TestPool::new();
        let mut expected = BTreeSet::new();
        for name in &names {
            tp.pool.snap_create(name).unwrap();
            expected.insert(tp.pool.snap_lookup(name).unwrap());
        }
        let listed: BTreeSet<SnapId> = tp.pool.snap_list(0).unwrap().into_iter().collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn test_list_bound_enforced(count in 1usize..30, bound in 1i32..30) {
        let tp = TestPool::new();
        for name in snap_names(count) {
            tp.pool.snap_create(&name).unwrap();
        }
        match tp.pool.snap_list(bound) {
            Ok(ids) => {
                prop_assert!(count <= bound as usize);
                prop_assert_eq!(ids.len(), count);
            }
            Err(e) => {
                prop_assert!(count > bound as usize);
                prop_assert_eq!(e.kind(), ErrorKind::RangeExceeded);
            }
        }
    }
}

// ============================================================================
// Ids
// ============================================================================

#[test]
fn test_ids_are_distinct_and_never_reused() {
    let tp = TestPool::new();
    let mut seen = HashSet::new();
    for round in 0..5 {
        tp.pool.snap_create("rotating").unwrap();
        let id = tp.pool.snap_lookup("rotating").unwrap();
        assert!(seen.insert(id), "id {} reused in round {}", id, round);
        assert!(!id.is_head());
        tp.pool.snap_remove("rotating").unwrap();
    }
}

#[test]
fn test_list_in_creation_order() {
    let tp = TestPool::new();
    let names = snap_names(6);
    let mut ids = Vec::new();
    for name in &names {
        tp.pool.snap_create(name).unwrap();
        ids.push(tp.pool.snap_lookup(name).unwrap());
    }
    assert_eq!(tp.pool.snap_list(0).unwrap(), ids);
}

#[test]
fn test_removed_snapshot_is_gone_everywhere() {
    let tp = TestPool::new();
    tp.pool.snap_create("a").unwrap();
    tp.pool.snap_create("b").unwrap();
    let a = tp.pool.snap_lookup("a").unwrap();
    let b = tp.pool.snap_lookup("b").unwrap();

    tp.pool.snap_remove("a").unwrap();
    assert_eq!(tp.pool.snap_list(0).unwrap(), vec![b]);
    assert!(tp.pool.snap_lookup("a").unwrap_err().is_not_found());
    assert!(tp.pool.snap_get_name(a).unwrap_err().is_not_found());
    assert!(tp.pool.snap_get_stamp(a).unwrap_err().is_not_found());
    assert!(tp.pool.snap_remove("a").unwrap_err().is_not_found());
}

#[test]
fn test_snapshots_are_per_pool() {
    let tp = TestPool::new();
    tp.client.create_pool("other").unwrap();
    let other = tp.client.open_pool("other").unwrap();

    tp.pool.snap_create("shared-name").unwrap();
    other.snap_create("shared-name").unwrap();
    assert!(other.snap_lookup("shared-name").is_ok());

    tp.pool.snap_remove("shared-name").unwrap();
    assert!(other.snap_lookup("shared-name").is_ok());
    assert_eq!(other.snap_list(0).unwrap().len(), 1);
}

// ============================================================================
// Caller-driven grow loop
// ============================================================================

#[test]
fn test_list_grow_loop() {
    let tp = TestPool::new();
    for name in snap_names(100) {
        tp.pool.snap_create(&name).unwrap();
    }

    let mut bound = 4;
    let mut attempts = 0;
    let ids = loop {
        attempts += 1;
        match tp.pool.snap_list(bound) {
            Err(e) if e.is_range_exceeded() => bound *= 2,
            other => break other.unwrap(),
        }
    };
    assert_eq!(ids.len(), 100);
    assert_eq!(bound, 128);
    assert_eq!(attempts, 6);
}

#[test]
fn test_default_bound_overflow_is_reported() {
    let tp = TestPool::with_config(ClientConfig::default().with_default_list_len(8));
    for name in snap_names(9) {
        tp.pool.snap_create(&name).unwrap();
    }
    let err = tp.pool.snap_list(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeExceeded);
    assert_eq!(tp.pool.snap_list(9).unwrap().len(), 9);
}
