//! Binary font compilation through `fontmake`.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result, bail};
use log::info;

/// The compiler command line for `ufo`, writing into `out_dir`.
pub fn fontmake_command(ufo: &Path, out_dir: &Path) -> Command {
    let mut command = Command::new("fontmake");
    command
        .arg("-u")
        .arg(ufo)
        .args(["-o", "otf", "--output-dir"])
        .arg(out_dir);
    command
}

/// Compile `ufo` to OpenType CFF in `out_dir`.
pub fn compile_otf(ufo: &Path, out_dir: &Path) -> Result<PathBuf> {
    let mut command = fontmake_command(ufo, out_dir);
    info!("Running: {command:?}");
    let status = command
        .status()
        .context("Failed to run fontmake; is it installed and on PATH?")?;
    if !status.success() {
        bail!("fontmake failed for {} ({status})", ufo.display());
    }
    Ok(out_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fontmake_command() {
        let command = fontmake_command(Path::new("out/Hand-Regular.ufo"), Path::new("out"));
        assert_eq!(command.get_program(), "fontmake");
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["-u", "out/Hand-Regular.ufo", "-o", "otf", "--output-dir", "out"]);
    }
}
