//! Build configuration.
//!
//! Configuration is a JSON document; every field has a default, so `{}` is a
//! complete configuration:
//!
//! ```json
//! {
//!   "font": { "family_name": "Hand", "units_per_em": 1000, "default_width": 600 },
//!   "build": { "vertical_flip": true, "baseline_offset": 200, "sidebearing_margin": 40 },
//!   "glyphs": { "U+0041": { "width": 640 }, "uni0061.ss01": { "left_margin": 30 } },
//!   "kerning": { "A": { "V": -80 } }
//! }
//! ```
//!
//! Glyph keys in `glyphs` and `kerning` may be glyph names or anything a
//! source file may be named after (`U+0041`, `0041`, `A`, `a-ss01`).

use std::{
    collections::{BTreeMap, HashMap},
    fs::read_to_string,
    path::Path,
    str::FromStr,
};

use log::warn;
use serde::{Deserialize, Serialize};
use svgfont_features::{GlyphName, resolve_glyph_key};
use svgfont_outline::CoordinateMapper;

use crate::error::{Error, Result};

/// Font-wide naming and vertical metrics.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FontConfig {
    pub family_name: String,
    pub style_name: String,
    pub units_per_em: u16,
    pub ascender: i32,
    pub descender: i32,
    pub x_height: i32,
    pub cap_height: i32,
    /// Advance width for glyphs with no geometry and no override.
    pub default_width: i32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family_name: "Untitled".to_string(),
            style_name: "Regular".to_string(),
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            x_height: 500,
            cap_height: 750,
            default_width: 1000,
        }
    }
}

/// How source geometry is placed in the em square.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Source y axis points down (SVG convention).
    pub vertical_flip: bool,
    /// Distance of the baseline from the source origin, in source units.
    pub baseline_offset: i32,
    pub auto_sidebearing: bool,
    /// Left and right margin used by automatic sidebearings.
    pub sidebearing_margin: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            vertical_flip: true,
            baseline_offset: 200,
            auto_sidebearing: true,
            sidebearing_margin: 50.0,
        }
    }
}

/// Manual spacing for one glyph. Each field takes priority over automatic
/// sidebearings independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlyphOverride {
    pub width: Option<i32>,
    /// Desired distance from the origin to the shape's left edge.
    pub left_margin: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub build: BuildConfig,
    pub glyphs: BTreeMap<String, GlyphOverride>,
    pub kerning: BTreeMap<String, BTreeMap<String, i32>>,
}

impl Config {
    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse().map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(
            self.font.units_per_em,
            self.build.baseline_offset,
            self.build.vertical_flip,
        )
    }

    /// Per-glyph overrides keyed by canonical glyph name.
    ///
    /// When two keys name the same glyph, the first in key order wins.
    pub fn overrides(&self) -> HashMap<GlyphName, GlyphOverride> {
        let mut overrides = HashMap::new();
        for (key, value) in &self.glyphs {
            let name = resolve_glyph_key(key);
            if overrides.contains_key(&name) {
                warn!("glyphs.{key}: {name} already configured, ignored");
                continue;
            }
            overrides.insert(name, *value);
        }
        overrides
    }

    /// Kerning pairs with canonical glyph names, in key order. Keys naming
    /// the same glyph are not merged here; [`KerningTable::resolve`] keeps
    /// the first.
    ///
    /// [`KerningTable::resolve`]: crate::glyph::KerningTable::resolve
    pub fn kerning_pairs(&self) -> Vec<(GlyphName, GlyphName, i32)> {
        self.kerning
            .iter()
            .flat_map(|(left, row)| {
                let left = resolve_glyph_key(left);
                row.iter()
                    .map(move |(right, value)| (left.clone(), resolve_glyph_key(right), *value))
            })
            .collect()
    }
}

impl FromStr for Config {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}
