//! Print the resolved configuration

use crate::settings;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn run(config_path: Option<PathBuf>) -> Result<()> {
    let root = std::env::current_dir()
        .ok()
        .and_then(|cwd| settings::find_project_root(&cwd));
    let config = settings::load(config_path.as_deref(), root.as_deref())?;

    match &root {
        Some(root) => println!("# project root: {}", root.display()),
        None => println!("# project root: (none)"),
    }

    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
