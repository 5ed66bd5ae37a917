use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// `$EXTRATO_HOME`, else `~/.extrato`.
pub fn extrato_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("EXTRATO_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".extrato"))
}

pub fn ensure_extrato_home() -> Result<PathBuf> {
    let dir = extrato_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Read extracted statement text from a file, or stdin for `-`.
pub fn read_statement_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut s = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut s).context("read stdin")?;
        return Ok(s);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
