//! Shared test helpers for library integration tests.

use std::path::PathBuf;

/// Get the workspace root directory.
pub fn workspace_root() -> PathBuf {
  let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  // crates/lib -> crates -> workspace root
  manifest_dir
    .parent()
    .and_then(|p| p.parent())
    .map(|p| p.to_path_buf())
    .expect("Failed to find workspace root")
}

/// The terraform definitions exercised by the example tests.
pub fn infra_dir() -> PathBuf {
  workspace_root().join("infra")
}
