//! Glyph names and source-name parsing.
//!
//! Sources are named after the character they draw (`U+0041`, `0041`, `A`)
//! or after an alternate of one (`U+0061-ss01`, `a-cv02`). Glyphs get
//! production names derived from the codepoint, so every downstream tool
//! agrees on them without a shared catalog.

use std::{
    borrow::Borrow,
    fmt::{Display, Formatter, Result},
    ops::Deref,
};

use crate::variant::VariantKind;

/// Name of the required first glyph.
pub const NOTDEF: &str = ".notdef";

/// Codepoint of the space glyph.
pub const SPACE: u32 = 0x20;

/// A glyph name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphName(String);

impl GlyphName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn notdef() -> Self {
        Self::new(NOTDEF)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for GlyphName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for GlyphName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for GlyphName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for GlyphName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for GlyphName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for GlyphName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GlyphName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for GlyphName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<GlyphName> for String {
    fn from(GlyphName(name): GlyphName) -> Self {
        name
    }
}

/// `uniXXXX` up to U+FFFF, `uXXXXX` above.
pub fn production_name(codepoint: u32) -> GlyphName {
    if codepoint <= 0xFFFF {
        GlyphName(format!("uni{codepoint:04X}"))
    } else {
        GlyphName(format!("u{codepoint:05X}"))
    }
}

/// `<base>.ssNN` / `<base>.cvNN`.
pub fn alternate_name(base: &GlyphName, kind: VariantKind, number: u8) -> GlyphName {
    GlyphName(format!("{base}.{}", kind.tag(number)))
}

/// What a source name says about the glyph it draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceName {
    /// A regular glyph for this codepoint.
    Codepoint(u32),
    /// An alternate of `base`.
    Variant {
        base: GlyphName,
        kind: VariantKind,
        number: u8,
    },
}

impl SourceName {
    /// The glyph name this source realizes.
    pub fn glyph_name(&self) -> GlyphName {
        match self {
            SourceName::Codepoint(cp) => production_name(*cp),
            SourceName::Variant { base, kind, number } => alternate_name(base, *kind, *number),
        }
    }
}

fn parse_hex(digits: &str) -> Option<u32> {
    if !(4..=6).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Parse a codepoint designator: `U+` and 4–6 hex digits, bare 4–6 hex
/// digits, or a single character.
///
/// Values that are not Unicode scalar values are rejected.
pub fn parse_codepoint(designator: &str) -> Option<u32> {
    let codepoint = if let Some(hex) = designator.strip_prefix("U+") {
        parse_hex(hex)?
    } else if let Some(cp) = parse_hex(designator) {
        cp
    } else {
        let mut chars = designator.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => u32::from(c),
            _ => return None,
        }
    };
    char::from_u32(codepoint).map(u32::from)
}

/// Canonical base name: production name for codepoint designators,
/// otherwise the name unchanged.
pub fn canonical_base(base: &str) -> GlyphName {
    match parse_codepoint(base) {
        Some(cp) => production_name(cp),
        None => GlyphName::new(base),
    }
}

fn parse_variant(stem: &str) -> Option<SourceName> {
    let (base, suffix) = stem.rsplit_once('-')?;
    if base.is_empty() {
        return None;
    }
    let (kind, digits) = if let Some(digits) = suffix.strip_prefix("ss") {
        (VariantKind::StylisticSet, digits)
    } else if let Some(digits) = suffix.strip_prefix("cv") {
        (VariantKind::CharacterVariant, digits)
    } else {
        return None;
    };
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number: u8 = digits.parse().ok()?;
    if !kind.accepts(number) {
        return None;
    }
    Some(SourceName::Variant { base: canonical_base(base), kind, number })
}

/// Parse a source file stem.
///
/// A single-character stem is taken as that character. Otherwise anything
/// from the first `.` on is dropped, then the rest is matched in order as
/// `U+XXXX`, bare hex, a single character, and finally `<base>-ssNN` or
/// `<base>-cvNN`.
pub fn parse_source_name(stem: &str) -> Option<SourceName> {
    let mut chars = stem.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(SourceName::Codepoint(u32::from(c)));
    }

    let base = stem.split('.').next().unwrap_or(stem);
    if let Some(cp) = parse_codepoint(base) {
        return Some(SourceName::Codepoint(cp));
    }
    parse_variant(base)
}

/// Resolve a user-supplied glyph key (as found in configuration) to a glyph
/// name.
///
/// Keys naming a source (`U+0041`, `A`, `a-ss01`) resolve like source files
/// do; anything else is taken to already be a glyph name.
pub fn resolve_glyph_key(key: &str) -> GlyphName {
    if key == NOTDEF {
        return GlyphName::notdef();
    }
    match parse_source_name(key) {
        Some(name) => name.glyph_name(),
        None => GlyphName::new(key),
    }
}
