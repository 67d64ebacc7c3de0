//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use svgfont_core::{BuildOptions, GlyphSet, Skipped, assemble, build};

#[derive(Parser)]
#[command(name = "svgfont")]
#[command(about = "Build a UFO font and feature file from SVG glyph drawings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct SourceArgs {
    /// Directory of `<codepoint>.svg` and `<base>-ssNN.svg` sources
    #[arg(long, default_value = "svgs")]
    pub svg_dir: PathBuf,
    /// JSON build configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the UFO and features.fea, optionally compiling an OTF
    Build {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
        /// Run fontmake on the written UFO
        #[arg(long)]
        compile: bool,
    },
    /// Show what a build would produce without writing anything
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the generated feature file
    Features {
        #[command(flatten)]
        source: SourceArgs,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { source, out_dir, compile } => {
                let mut options = BuildOptions::new(source.svg_dir, out_dir).with_compile(compile);
                options.config = source.config;
                let report = build(&options)?;

                print_skipped(&report.skipped);
                println!(
                    "Built {} glyphs ({} alternates), {} features, {} kerning pairs",
                    report.glyphs,
                    report.alternates,
                    report.features.len(),
                    report.kerning_pairs
                );
                println!("  UFO: {}", report.ufo_path.display());
                println!("  Features: {}", report.features_path.display());
                if let Some(dir) = report.compiled_dir {
                    println!("  OTF: {}", dir.display());
                }
            }
            Commands::Check { source } => {
                let (_, set) = assemble(&source.svg_dir, source.config.as_deref())?;
                print_glyphs(&set);
                print_skipped(&set.skipped);
                let tags: Vec<_> = set.feature_tags().iter().map(ToString::to_string).collect();
                if !tags.is_empty() {
                    println!("Features: {}", tags.join(" "));
                }
                println!("{} glyphs, {} skipped", set.len(), set.skipped.len());
            }
            Commands::Features { source } => {
                let (_, set) = assemble(&source.svg_dir, source.config.as_deref())?;
                print!("{}", set.rules.to_fea());
            }
        }
        Ok(())
    }
}

fn print_glyphs(set: &GlyphSet) {
    for glyph in set.glyphs.values() {
        let codepoint = glyph
            .codepoint
            .map(|cp| format!("U+{cp:04X}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<16} {:>8} {:>6} {:>3} contours",
            glyph.name.as_str(),
            codepoint,
            glyph.width,
            glyph.outline.len()
        );
    }
}

fn print_skipped(skipped: &[Skipped]) {
    for entry in skipped {
        println!("  Skipped {}: {}", entry.source, entry.reason);
    }
}
