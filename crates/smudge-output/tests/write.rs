//! File-level tests for dataset writing.

use std::fs;

use smudge_ingest::read_dataset;
use smudge_output::{LineEnding, WriteOptions, temp_path_for, write_dataset};

const CSV: &str = "Asset_ID,Latitude,Location_Status_Hash\r\n\
                   Truck_1,-65.7383,9f86d08\r\n\
                   Truck_2,22.2748,60303ae\r\n";

#[test]
fn rewrites_an_unchanged_dataset_byte_for_byte() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("input.csv");
    let output = dir.path().join("output.csv");
    fs::write(&input, CSV).expect("write input");

    let dataset = read_dataset(&input).expect("read");
    write_dataset(&dataset, &output, &WriteOptions::default()).expect("write");

    assert_eq!(fs::read_to_string(&output).expect("read output"), CSV);
    assert!(!temp_path_for(&output).exists());
}

#[test]
fn overwrites_input_in_place() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("data.csv");
    fs::write(&path, CSV).expect("write input");

    let mut dataset = read_dataset(&path).expect("read");
    dataset
        .set_value(1, "Latitude", "23.9".to_string())
        .expect("set");
    let options = WriteOptions::default().with_line_ending(LineEnding::Lf);
    write_dataset(&dataset, &path, &options).expect("write");

    let reread = read_dataset(&path).expect("reread");
    assert_eq!(reread.value(1, "Latitude"), Some("23.9"));
    assert_eq!(reread.value(1, "Location_Status_Hash"), Some("60303ae"));
    assert_eq!(reread.headers(), dataset.headers());
}

#[test]
fn creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("input.csv");
    let output = dir.path().join("nested").join("deeper").join("out.csv");
    fs::write(&input, CSV).expect("write input");

    let dataset = read_dataset(&input).expect("read");
    write_dataset(&dataset, &output, &WriteOptions::default()).expect("write");

    assert!(output.exists());
}

#[test]
fn failed_rename_keeps_existing_target() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("input.csv");
    fs::write(&input, CSV).expect("write input");
    // A directory at the target path cannot be replaced by a file.
    let target = dir.path().join("taken");
    fs::create_dir(&target).expect("create dir");
    fs::write(target.join("keep.txt"), "x").expect("write marker");

    let dataset = read_dataset(&input).expect("read");
    let result = write_dataset(&dataset, &target, &WriteOptions::default());

    assert!(result.is_err());
    assert!(target.join("keep.txt").exists());
    assert!(!temp_path_for(&target).exists());
}
