//! Configuration loading and project root discovery

use anyhow::{Context, Result};
use relint_core::AnalyzerConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names that mark a project root, in probe order
const ROOT_MARKERS: &[&str] = &["composer.json", "phpstan.neon", "phpstan.neon.dist", ".git"];

/// Config file name probed at the project root
const CONFIG_FILE: &str = "relint.toml";

/// Find the project root by walking up from `start`
///
/// The first directory containing a root marker wins. `None` when no marker
/// exists on the way to the filesystem root; the analyzer then runs with an
/// unset working directory.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = if start.is_dir() { start } else { start.parent()? };

    loop {
        for marker in ROOT_MARKERS {
            if current.join(marker).exists() {
                return Some(current.to_path_buf());
            }
        }

        current = current.parent()?;
    }
}

/// Load the analyzer configuration
///
/// An explicit path must exist and parse. Otherwise `relint.toml` at the
/// project root is used when present, and defaults apply when it is not.
pub fn load(explicit: Option<&Path>, root: Option<&Path>) -> Result<AnalyzerConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(root) = root else {
                debug!("no project root; using default configuration");
                return Ok(AnalyzerConfig::default());
            };
            let candidate = root.join(CONFIG_FILE);
            if !candidate.exists() {
                debug!(root = %root.display(), "no relint.toml; using default configuration");
                return Ok(AnalyzerConfig::default());
            }
            candidate
        }
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
