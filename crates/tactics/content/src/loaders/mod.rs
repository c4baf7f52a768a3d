//! Loaders that turn RON/TOML files into runtime values.

pub mod config;
pub mod scenario;
pub mod tree;

pub use config::ConfigLoader;
pub use scenario::ScenarioLoader;
pub use tree::TreeLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
