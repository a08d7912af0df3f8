//! The MessagePack codec path and configuration files.

use std::fs;

use crate::common::*;
use poolsnap::CONFIG_FILE_NAME;

fn msgpack() -> TestPool {
    TestPool::with_config(ClientConfig::default().with_codec(CodecKind::Msgpack))
}

#[test]
fn test_lifecycle_over_msgpack() {
    let tp = msgpack();
    let mut pool = tp.pool.clone();
    pool.write_full("obj", b"encoded").unwrap();
    pool.snap_create("s").unwrap();
    pool.append("obj", b" twice").unwrap();

    let id = pool.snap_lookup("s").unwrap();
    assert_eq!(pool.snap_list(0).unwrap(), vec![id]);
    assert_eq!(pool.snap_info(id).unwrap().name, "s");

    pool.set_snap_read(id);
    assert_eq!(read_all(&pool, "obj").unwrap(), b"encoded");
    pool.set_snap_read(SNAP_HEAD);
    assert_eq!(pool.stat("obj").unwrap().size, 13);

    pool.snap_rollback("obj", "s").unwrap();
    assert_eq!(read_all(&pool, "obj").unwrap(), b"encoded");
}

#[test]
fn test_errors_survive_msgpack() {
    let tp = msgpack();
    tp.pool.snap_create("s").unwrap();
    assert!(tp.pool.snap_create("s").unwrap_err().is_already_exists());
    assert!(tp.pool.snap_lookup("t").unwrap_err().is_not_found());
    assert!(tp.pool.snap_list(-1).is_ok());
}

#[test]
fn test_config_file_drives_client() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        "default_list_len = 2\nname_buf_len = 16\ncodec = \"msgpack\"\n",
    )
    .unwrap();

    let config = ClientConfig::from_file(&path).unwrap();
    assert_eq!(config.codec, CodecKind::Msgpack);
    let tp = TestPool::with_config(config);
    for name in snap_names(3) {
        tp.pool.snap_create(&name).unwrap();
    }
    assert!(tp.pool.snap_list(0).unwrap_err().is_range_exceeded());
}

#[test]
fn test_invalid_config_rejected_by_client() {
    let config = ClientConfig::default().with_name_buf_len(1);
    let err = Client::new(MemCluster::new(), config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
