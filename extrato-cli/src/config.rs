use anyhow::{Context, Result};
use clap::ValueEnum;
use extrato_ingest::ParserConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_extrato_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_extrato_home()?.join("config.toml"))
}

/// Load `path` (or the default location). A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn render_config(cfg: &Config) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config")
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let s = render_config(&Config::default())?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    println!("Wrote {}", p.display());
    Ok(())
}
