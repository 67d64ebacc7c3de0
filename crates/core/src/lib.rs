//! svgfont core: build a UFO font source and feature file from a directory
//! of SVG glyph drawings.

pub mod compile;
pub mod config;
pub mod error;
pub mod glyph;
pub mod io;
pub mod pipeline;
pub mod source;
pub mod ufo;

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use log::info;

pub use config::{BuildConfig, Config, FontConfig, GlyphOverride};
pub use error::Error;
pub use glyph::{Glyph, KerningTable};
pub use pipeline::{GlyphPipeline, GlyphSet, Sizing, SkipReason, Skipped, SourceFile};
pub use source::{SourceError, parse_path_data, parse_svg, primitive_path};
pub use svgfont_features::{FeatureTag, GlyphName};

/// Name of the standalone feature file written next to the UFO.
pub const FEATURES_FILE_NAME: &str = "features.fea";

/// Inputs of one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub svg_dir: PathBuf,
    pub out_dir: PathBuf,
    pub config: Option<PathBuf>,
    /// Also compile an OpenType font with `fontmake`.
    pub compile: bool,
}

impl BuildOptions {
    pub fn new(svg_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            svg_dir: svg_dir.into(),
            out_dir: out_dir.into(),
            config: None,
            compile: false,
        }
    }

    pub fn with_config(mut self, config: impl Into<PathBuf>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn with_compile(mut self, compile: bool) -> Self {
        self.compile = compile;
        self
    }
}

/// What a build produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub ufo_path: PathBuf,
    pub features_path: PathBuf,
    /// Directory holding the compiled font, when compilation ran.
    pub compiled_dir: Option<PathBuf>,
    pub glyphs: usize,
    pub alternates: usize,
    pub skipped: Vec<Skipped>,
    pub features: Vec<FeatureTag>,
    pub kerning_pairs: usize,
}

/// Load the configuration and run the glyph pipeline over `svg_dir`,
/// without writing anything.
pub fn assemble(svg_dir: &Path, config: Option<&Path>) -> Result<(Config, GlyphSet)> {
    let config = Config::load_or_default(config)?;
    let sources = io::read_sources(svg_dir)?;
    info!("Found {} sources in {}", sources.len(), svg_dir.display());
    let set = GlyphPipeline::new(&config).run(&sources);
    Ok((config, set))
}

/// Run a full build: pipeline, UFO, feature file and optional compilation.
pub fn build(options: &BuildOptions) -> Result<BuildReport> {
    let start = Instant::now();
    let (config, set) = assemble(&options.svg_dir, options.config.as_deref())?;

    io::ensure_dir(&options.out_dir)?;

    let ufo_path = options.out_dir.join(ufo::ufo_file_name(&config));
    let font = ufo::to_font(&set, &config)?;
    ufo::write_ufo(&font, &ufo_path)
        .with_context(|| format!("Failed to write {}", ufo_path.display()))?;
    info!("Wrote {}", ufo_path.display());

    let features_path = options.out_dir.join(FEATURES_FILE_NAME);
    io::write_text(&features_path, &font.features)?;
    info!("Wrote {}", features_path.display());

    let compiled_dir = if options.compile {
        Some(compile::compile_otf(&ufo_path, &options.out_dir)?)
    } else {
        None
    };

    info!("Build finished in {:.2}s", start.elapsed().as_secs_f64());

    Ok(BuildReport {
        ufo_path,
        features_path,
        compiled_dir,
        glyphs: set.len(),
        alternates: set.alternate_count(),
        features: set.feature_tags(),
        kerning_pairs: set.kerning.len(),
        skipped: set.skipped,
    })
}
