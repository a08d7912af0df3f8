//! Concurrent use of one cluster from many handles and threads.

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use parking_lot::Mutex;

use crate::common::*;

#[test]
fn test_concurrent_creates_with_distinct_names() {
    let tp = TestPool::new();
    let threads = 8;
    let per_thread = 25;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let pool = tp.reopen();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..per_thread {
                    pool.snap_create(&format!("t{}-{}", t, i)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let ids = tp.pool.snap_list(0).unwrap();
    assert_eq!(ids.len(), threads * per_thread);
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_concurrent_creates_same_name_one_winner() {
    let tp = TestPool::new();
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let pool = tp.reopen();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                pool.snap_create("contested")
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(err.is_already_exists());
    }
}

#[test]
fn test_snapshot_never_sees_torn_write() {
    let tp = TestPool::new();
    tp.pool.write_full("obj", &[0u8; 64]).unwrap();

    let writer = {
        let pool = tp.reopen();
        thread::spawn(move || {
            for i in 1..=200u8 {
                pool.write_full("obj", &[i; 64]).unwrap();
            }
        })
    };
    let mut names = Vec::new();
    for i in 0..50 {
        let name = format!("s{}", i);
        tp.pool.snap_create(&name).unwrap();
        names.push(name);
    }
    writer.join().unwrap();

    let mut pool = tp.reopen();
    for name in names {
        pool.set_snap_read(pool.snap_lookup(&name).unwrap());
        let data = read_all(&pool, "obj").unwrap();
        assert_eq!(data.len(), 64);
        assert!(data.iter().all(|b| *b == data[0]));
    }
}

#[test]
fn test_shared_handle_behind_caller_lock() {
    let tp = TestPool::new();
    tp.pool.write_full("obj", b"v0").unwrap();
    tp.pool.snap_create("s").unwrap();
    tp.pool.write_full("obj", b"v1").unwrap();
    let snap = tp.pool.snap_lookup("s").unwrap();

    let shared = Arc::new(Mutex::new(tp.reopen()));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..50 {
                    // Epoch change and read happen under one lock hold
                    let mut pool = shared.lock();
                    let (epoch, expected): (SnapId, &[u8]) =
                        if t % 2 == 0 { (snap, b"v0") } else { (SNAP_HEAD, b"v1") };
                    pool.set_snap_read(epoch);
                    assert_eq!(read_all(&pool, "obj").unwrap(), expected);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
