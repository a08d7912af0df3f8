//! End-to-end snapshot lifecycle on a single object.

use crate::common::*;

const INITIAL: &[u8] = b"initial input data";
const APPENDED: &[u8] = b" additional data appended";

#[test]
fn test_snapshot_lifecycle() {
    let tp = TestPool::new();
    let mut pool = tp.pool.clone();

    pool.write_full("obj42", INITIAL).unwrap();
    pool.snap_create("test").unwrap();
    pool.append("obj42", APPENDED).unwrap();

    // Pinned to the snapshot: only the initial 18 bytes exist
    let id = pool.snap_lookup("test").unwrap();
    pool.set_snap_read(id);
    assert_eq!(pool.read_epoch(), ReadEpoch::PinnedTo(id));
    let mut buf = [0u8; 43];
    assert_eq!(pool.read("obj42", &mut buf, 0).unwrap(), 18);
    assert_eq!(&buf[..18], INITIAL);

    // Back to live: all 43 bytes
    pool.set_snap_read(SNAP_HEAD);
    assert_eq!(pool.read("obj42", &mut buf, 0).unwrap(), 43);
    assert_eq!(&buf[..18], INITIAL);
    assert_eq!(&buf[18..], APPENDED);

    // Directory queries
    assert_eq!(pool.snap_list(0).unwrap(), vec![id]);
    assert_eq!(pool.snap_get_name(id).unwrap(), "test");
    assert!(!pool.snap_get_stamp(id).unwrap().is_epoch());

    pool.snap_remove("test").unwrap();
    assert!(pool.snap_list(0).unwrap().is_empty());
    assert!(pool.snap_lookup("test").unwrap_err().is_not_found());
}

#[test]
fn test_rollback_scenario() {
    let tp = TestPool::new();
    let pool = &tp.pool;

    pool.write_full("obj42", INITIAL).unwrap();
    pool.snap_create("bravo").unwrap();
    pool.append("obj42", APPENDED).unwrap();
    assert_eq!(pool.stat("obj42").unwrap().size, 43);

    pool.snap_rollback("obj42", "bravo").unwrap();
    assert_eq!(read_all(pool, "obj42").unwrap(), INITIAL);

    // The snapshot survives its use
    assert!(pool.snap_lookup("bravo").is_ok());
}

#[test]
fn test_stamp_is_wall_clock_time() {
    let tp = TestPool::new();
    let before = poolsnap::Timestamp::now();
    tp.pool.snap_create("t").unwrap();
    let after = poolsnap::Timestamp::now();

    let id = tp.pool.snap_lookup("t").unwrap();
    let stamp = tp.pool.snap_get_stamp(id).unwrap();
    assert!(stamp >= before);
    assert!(stamp <= after);
}
