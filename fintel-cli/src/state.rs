use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn fintel_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".fintel"))
}

pub fn ensure_fintel_home() -> Result<PathBuf> {
    let dir = fintel_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_fintel_home()?.join("config.json"))
}

pub fn history_path() -> Result<PathBuf> {
    Ok(ensure_fintel_home()?.join("chat_history.json"))
}
