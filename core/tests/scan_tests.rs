use iul_core::{checksum_file, scan_dir};
use std::fs;

#[test]
fn checksum_matches_crc32_check_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("check.bin");
    fs::write(&path, b"123456789").expect("write");

    let record = checksum_file(&path).expect("checksum");
    assert_eq!(record.checksum, "CBF43926");
    assert_eq!(record.size, "9");
    assert_eq!(record.name, "check.bin");
}

#[test]
fn checksum_of_empty_file_is_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.bin");
    fs::write(&path, b"").expect("write");

    let record = checksum_file(&path).expect("checksum");
    assert_eq!(record.checksum, "0");
    assert_eq!(record.size, "0");
}

#[test]
fn scan_lists_records_in_name_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("b.txt"), b"bb").expect("write");
    fs::write(dir.path().join("a.txt"), b"a").expect("write");
    fs::write(dir.path().join("c.txt"), b"ccc").expect("write");

    let records = scan_dir(dir.path()).expect("scan");
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    assert_eq!(records[0].size, "1");
    assert_eq!(records[2].size, "3");
}

#[test]
fn scan_is_stable_across_passes() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("x.bin"), b"123456789").expect("write");
    fs::write(dir.path().join("y.bin"), b"stuff").expect("write");

    let first = scan_dir(dir.path()).expect("scan");
    let second = scan_dir(dir.path()).expect("scan");
    assert_eq!(first, second);
}

#[test]
fn scan_of_empty_dir_yields_no_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(scan_dir(dir.path()).expect("scan").is_empty());
}

#[test]
fn scan_of_missing_dir_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(scan_dir(&dir.path().join("nope")).is_err());
}
