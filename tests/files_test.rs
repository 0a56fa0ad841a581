//! Integration tests for the filesystem helpers

use std::fs;

use tempfile::TempDir;
use utilkit::diag::{Capture, NullSink, Severity};
use utilkit::files::{
    create_dirs, files_in_dir, find_files, move_path, numbered_path, read_file, read_file_lines,
    remove_file, write_file, MoveOptions, WriteOptions,
};

#[test]
fn write_then_read_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.txt");

    let written = write_file(&path, "one\ntwo  \n", WriteOptions::default(), &NullSink)
        .expect("fresh file is writable");
    assert_eq!(written, path);
    assert_eq!(read_file(&path, &NullSink).unwrap(), "one\ntwo  \n");
    assert_eq!(
        read_file_lines(&path, &NullSink).unwrap(),
        vec!["one", "two"]
    );
}

#[test]
fn existing_file_is_renamed_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("note.txt");
    fs::write(&path, "original").unwrap();

    let written = write_file(&path, "new", WriteOptions::default(), &NullSink).unwrap();
    assert_eq!(written, dir.path().join("note_0.txt"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    assert_eq!(fs::read_to_string(&written).unwrap(), "new");
}

#[test]
fn existing_file_refused_without_rename() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("note.txt");
    fs::write(&path, "original").unwrap();

    let capture = Capture::new();
    let options = WriteOptions {
        rename: false,
        ..WriteOptions::default()
    };
    assert!(write_file(&path, "new", options, &capture).is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    assert_eq!(capture.messages(Severity::Warning).len(), 1);
}

#[test]
fn append_mode_appends_and_creates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log.txt");
    let options = WriteOptions {
        append: true,
        verbose: false,
        ..WriteOptions::default()
    };

    write_file(&path, "a", options, &NullSink).unwrap();
    write_file(&path, "b", options, &NullSink).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "ab");
}

#[test]
fn missing_parent_directory_is_refused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_such_dir").join("out.txt");
    assert!(write_file(&path, "x", WriteOptions::default(), &NullSink).is_none());
}

#[test]
fn numbered_path_strips_existing_suffix() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report_3.txt");
    fs::write(&path, "x").unwrap();

    let renamed = numbered_path(&path);
    let name = renamed.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("report_"));
    assert!(name.ends_with(".txt"));
    assert_ne!(renamed, path);
    assert!(!renamed.exists());
}

#[test]
fn move_into_existing_directory() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("file.txt");
    fs::write(&src, "payload").unwrap();
    let target_dir = dir.path().join("sub");
    fs::create_dir(&target_dir).unwrap();

    assert!(move_path(&src, &target_dir, MoveOptions::default(), &NullSink));
    assert!(!src.exists());
    assert_eq!(
        fs::read_to_string(target_dir.join("file.txt")).unwrap(),
        "payload"
    );
}

#[test]
fn move_refusals() {
    let dir = TempDir::new().unwrap();
    let capture = Capture::new();

    // Missing source
    assert!(!move_path(
        &dir.path().join("ghost.txt"),
        &dir.path().join("dest.txt"),
        MoveOptions::default(),
        &capture,
    ));

    // Missing destination parent
    let src = dir.path().join("real.txt");
    fs::write(&src, "x").unwrap();
    assert!(!move_path(
        &src,
        &dir.path().join("no_such").join("dest.txt"),
        MoveOptions::default(),
        &capture,
    ));

    // Directory into itself
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    assert!(!move_path(&sub, &sub, MoveOptions::default(), &capture));

    // Existing target without rename
    let dest = dir.path().join("taken.txt");
    fs::write(&dest, "y").unwrap();
    assert!(!move_path(&src, &dest, MoveOptions::default(), &capture));
    assert!(src.exists());

    assert_eq!(capture.messages(Severity::Warning).len(), 4);
}

#[test]
fn move_renames_existing_target_when_asked() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("data.txt");
    fs::write(&src, "new").unwrap();
    let dest = dir.path().join("data_dest.txt");
    fs::write(&dest, "old").unwrap();

    let options = MoveOptions {
        rename: true,
        ..MoveOptions::default()
    };
    assert!(move_path(&src, &dest, options, &NullSink));
    assert_eq!(fs::read_to_string(&dest).unwrap(), "old");
    assert_eq!(
        fs::read_to_string(dir.path().join("data_dest_0.txt")).unwrap(),
        "new"
    );
}

#[test]
fn files_in_dir_is_not_recursive() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();
    fs::write(dir.path().join("b.txt"), "").unwrap();
    fs::write(dir.path().join("c.md"), "").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("nested.txt"), "").unwrap();

    let found = files_in_dir(dir.path(), "*.txt", &NullSink);
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
}

#[test]
fn files_in_dir_warns_on_missing_directory() {
    let dir = TempDir::new().unwrap();
    let capture = Capture::new();
    let found = files_in_dir(&dir.path().join("nope"), "*", &capture);
    assert!(found.is_empty());
    assert_eq!(capture.messages(Severity::Warning).len(), 1);
}

#[test]
fn find_files_walks_recursively() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("top.txt"), "").unwrap();
    let deep = dir.path().join("a").join("b");
    fs::create_dir_all(&deep).unwrap();
    fs::write(deep.join("deep.txt"), "").unwrap();
    fs::write(deep.join("skip.md"), "").unwrap();

    let mut names: Vec<String> = find_files(dir.path(), "*.txt", &NullSink)
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["deep.txt", "top.txt"]);
}

#[test]
fn create_dirs_creates_missing_only() {
    let dir = TempDir::new().unwrap();
    let existing = dir.path().join("already");
    fs::create_dir(&existing).unwrap();
    let fresh = dir.path().join("new").join("nested");

    let capture = Capture::new();
    create_dirs([&existing, &fresh], &capture);
    assert!(fresh.is_dir());
    // Only the missing directory is announced
    assert_eq!(capture.messages(Severity::Info).len(), 1);
}

#[test]
fn remove_file_reports_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gone.txt");
    fs::write(&path, "x").unwrap();

    assert!(remove_file(&path, &NullSink));
    assert!(!path.exists());

    let capture = Capture::new();
    assert!(!remove_file(&path, &capture));
    assert_eq!(capture.messages(Severity::Warning).len(), 1);
}
