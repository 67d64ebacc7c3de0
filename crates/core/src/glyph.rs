//! Realized glyphs and kerning.

use std::collections::{BTreeMap, HashSet};

use log::{debug, warn};
use svgfont_features::GlyphName;
use svgfont_outline::GlyphOutline;

/// A glyph ready for font assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub name: GlyphName,
    pub codepoint: Option<u32>,
    pub width: i32,
    pub outline: GlyphOutline,
    pub is_alternate: bool,
}

impl Glyph {
    /// A glyph with no contours.
    pub fn blank(name: GlyphName, codepoint: Option<u32>, width: i32) -> Self {
        Self {
            name,
            codepoint,
            width,
            outline: GlyphOutline::new(),
            is_alternate: false,
        }
    }
}

/// Kerning adjustments between realized glyphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KerningTable {
    pairs: BTreeMap<(GlyphName, GlyphName), i32>,
}

impl KerningTable {
    /// Keep the pairs whose glyphs are both in `realized`.
    ///
    /// Pairs naming an absent glyph are dropped without a warning; kerning
    /// is commonly shared between fonts with different glyph coverage. When
    /// two entries name the same pair, the first is kept.
    pub fn resolve(
        pairs: impl IntoIterator<Item = (GlyphName, GlyphName, i32)>,
        realized: &HashSet<GlyphName>,
    ) -> Self {
        let mut table = Self::default();
        for (left, right, value) in pairs {
            if !realized.contains(&left) || !realized.contains(&right) {
                debug!("Dropped kerning {left} {right} {value}: glyph not in font");
                continue;
            }
            if let Some(kept) = table.pairs.get(&(left.clone(), right.clone())) {
                warn!("Kerning {left} {right} {value} ignored: already set to {kept}");
                continue;
            }
            table.pairs.insert((left, right), value);
        }
        table
    }

    pub fn get(&self, left: &str, right: &str) -> Option<i32> {
        self.pairs
            .get(&(GlyphName::new(left), GlyphName::new(right)))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs ordered by left, then right glyph name.
    pub fn iter(&self) -> impl Iterator<Item = (&GlyphName, &GlyphName, i32)> {
        self.pairs.iter().map(|((left, right), value)| (left, right, *value))
    }
}
