#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");
    let catalog = common::catalog_file().unwrap();

    // 1. First run: like the first place, then stop
    let gestures1 = common::gesture_file(&["like, ,", "settle, ,"]).unwrap();
    let output1 = Command::new(cargo_bin!("tripswipe"))
        .arg(catalog.path())
        .arg(gestures1.path())
        .args(["--trip-id", "1", "--user-id", "3", "--transition-ms", "10"])
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("3,1,10,true"));

    // 2. Second run: a new session starts over at the first place and dislikes it
    let gestures2 = common::gesture_file(&["dislike, ,", "settle, ,", "like, ,", "settle, ,"])
        .unwrap();
    let output2 = Command::new(cargo_bin!("tripswipe"))
        .arg(catalog.path())
        .arg(gestures2.path())
        .args(["--trip-id", "1", "--user-id", "3", "--transition-ms", "10"])
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    // the later decision for place 10 replaces the stored one
    assert!(stdout2.contains("3,1,10,false"));
    assert!(!stdout2.contains("3,1,10,true"));
    assert!(stdout2.contains("3,1,11,true"));
}
