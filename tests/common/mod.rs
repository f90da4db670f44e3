//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use taskline::{Session, Storage};
use tempfile::TempDir;

/// Wednesday 2025-03-05 08:00, the reference time for every session in tests
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 5)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

/// Path to a not-yet-created data file inside a fresh temp directory
pub fn temp_data_file() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("tasks.txt");
    (dir, path)
}

/// Open a session on `path` with the fixed clock
pub fn open_session(path: &Path) -> (Session, String) {
    Session::open_with_clock(Storage::new(path), Box::new(fixed_now))
}

/// Open a session on a data file pre-filled with `content`
pub fn session_with_file(content: &str) -> (Session, TempDir, PathBuf) {
    let (dir, path) = temp_data_file();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    let (session, _) = open_session(&path);
    (session, dir, path)
}

/// Feed several lines and return the last reply text
pub fn run_lines(session: &mut Session, lines: &[&str]) -> String {
    let mut last = String::new();
    for line in lines {
        last = session.handle_line(line).text;
    }
    last
}
