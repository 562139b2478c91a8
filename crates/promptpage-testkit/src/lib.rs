//! Test utilities for promptpage
//!
//! This crate provides shared testing utilities used across the promptpage workspace.

pub mod fixtures;

use tempfile::TempDir;

pub use fixtures::{
    sample_base_catalog, sample_delta_catalog, write_sample_workspace, SampleWorkspace,
    STOCK_ANALYSIS_TEMPLATE, WEEKLY_REVIEW_TEMPLATE,
};

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// All test temporary files end up in one gitignored location that is easy to
/// clean up manually. The directory is removed when the returned `TempDir` is
/// dropped.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot be
/// created.
///
/// # Examples
///
/// ```rust
/// use promptpage_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("test.md");
/// std::fs::write(&file_path, "# 标题").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
