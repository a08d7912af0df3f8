//! Cluster-side failures surface as typed errors.

use crate::common::*;

#[test]
fn test_offline_cluster_is_unreachable() {
    let tp = TestPool::new();
    tp.pool.snap_create("s").unwrap();
    tp.cluster.set_online(false);

    for err in [
        tp.pool.snap_create("t").unwrap_err(),
        tp.pool.snap_lookup("s").unwrap_err(),
        tp.pool.snap_list(0).unwrap_err(),
        tp.pool.write_full("obj", b"x").unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::Unreachable);
    }

    tp.cluster.set_online(true);
    assert_eq!(tp.pool.snap_list(0).unwrap().len(), 1);
}

#[test]
fn test_read_only_cluster_refuses_mutations() {
    let tp = TestPool::new();
    tp.pool.write_full("obj", b"x").unwrap();
    tp.pool.snap_create("s").unwrap();
    tp.cluster.set_read_only(true);

    assert_eq!(
        tp.pool.snap_create("t").unwrap_err().kind(),
        ErrorKind::PermissionDenied
    );
    assert_eq!(
        tp.pool.snap_remove("s").unwrap_err().kind(),
        ErrorKind::PermissionDenied
    );
    assert_eq!(
        tp.pool.snap_rollback("obj", "s").unwrap_err().kind(),
        ErrorKind::PermissionDenied
    );

    // Queries still work
    let id = tp.pool.snap_lookup("s").unwrap();
    assert_eq!(tp.pool.snap_get_name(id).unwrap(), "s");
    assert_eq!(read_all(&tp.pool, "obj").unwrap(), b"x");
}

#[test]
fn test_failed_create_leaves_no_snapshot() {
    let tp = TestPool::new();
    tp.cluster.set_read_only(true);
    assert!(tp.pool.snap_create("s").is_err());
    tp.cluster.set_read_only(false);
    assert!(tp.pool.snap_lookup("s").unwrap_err().is_not_found());
}

#[test]
fn test_open_missing_pool() {
    let tp = TestPool::new();
    assert!(tp.client.open_pool("nope").unwrap_err().is_not_found());
}

#[test]
fn test_deleted_pool_fails_snapshot_ops() {
    let tp = TestPool::new();
    tp.client.delete_pool("rbd").unwrap();
    assert!(tp.pool.snap_create("s").unwrap_err().is_not_found());
    assert!(tp.pool.snap_list(0).unwrap_err().is_not_found());
}

#[test]
fn test_error_context_names_the_operation() {
    let tp = TestPool::new();
    let err = tp.pool.snap_remove("ghost").unwrap_err();
    assert!(err.context().contains("snap_remove"));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn test_oversized_write_is_refused_not_fatal() {
    let tp = TestPool::new();
    tp.pool.write_full("obj", b"x").unwrap();

    let err = tp.pool.write("obj", b"x", u64::MAX - 2).unwrap_err();
    assert_eq!(err.status(), -poolsnap::errno::EFBIG);
    let err = tp
        .pool
        .write("obj", b"x", poolsnap::MAX_OBJECT_SIZE as u64)
        .unwrap_err();
    assert_eq!(err.status(), -poolsnap::errno::EFBIG);

    // The cluster keeps serving requests
    assert_eq!(read_all(&tp.pool, "obj").unwrap(), b"x");
    tp.pool.snap_create("after").unwrap();
}
