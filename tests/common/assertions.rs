//! Custom test assertions for end-to-end tests

use std::path::Path;
use walkdir::WalkDir;

/// Names of all regular files below `dir`, sorted
pub fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Assert that no in-flight `.part` file was left behind
pub fn assert_no_partial_files(dir: &Path) {
    let partial: Vec<String> = files_in(dir)
        .into_iter()
        .filter(|name| name.ends_with(".part"))
        .collect();
    assert!(partial.is_empty(), "partial files left behind: {partial:?}");
}
