//! Source directory and output file I/O.

use std::{
    fs::{create_dir_all, read_to_string, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::glob;

use crate::pipeline::SourceFile;

/// Find files matching a glob pattern in a directory.
pub fn glob_sources(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(pattern);
    let pattern_str = pattern.to_str().context("Invalid pattern path")?;
    Ok(glob(pattern_str)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(std::result::Result::ok)
        .collect())
}

/// Read every `*.svg` file in `dir`, sorted by file name.
pub fn read_sources(dir: &Path) -> Result<Vec<SourceFile>> {
    if !dir.is_dir() {
        bail!("Source directory not found: {}", dir.display());
    }

    let mut sources = glob_sources(dir, "*.svg")?
        .into_iter()
        .filter(|path| path.is_file())
        .map(|path| {
            let file_name = path
                .file_name()
                .and_then(|s| s.to_str())
                .with_context(|| format!("Invalid file name: {}", path.display()))?
                .to_string();
            let contents = read_to_string(&path)
                .with_context(|| format!("Failed to read source: {}", path.display()))?;
            Ok(SourceFile::new(file_name, contents))
        })
        .collect::<Result<Vec<_>>>()?;
    sources.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(sources)
}

/// Create a directory and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir).with_context(|| format!("Failed to create directory: {}", dir.display()))
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    write(path, text).with_context(|| format!("Failed to write: {}", path.display()))
}
