//! # Glyph Naming and Alternate Features
//!
//! Source-name parsing, production glyph names, stylistic set / character
//! variant detection, and generation of the substitution features that
//! expose those alternates.
//!
//! ## Example
//!
//! ```
//! use std::collections::HashSet;
//!
//! use svgfont_features::{FeatureTag, GlyphName, detect, synthesize};
//!
//! let scan = detect(["U+0061", "U+0061-ss01"]);
//! let realized: HashSet<GlyphName> =
//!     ["uni0061", "uni0061.ss01"].into_iter().map(GlyphName::from).collect();
//! let rules = synthesize(&scan.records, &realized);
//! assert!(rules.get(FeatureTag::new(b"ss01")).is_some());
//! println!("{}", rules.to_fea());
//! ```

mod naming;
mod rules;
mod tag;
mod variant;

pub use naming::{
    GlyphName, NOTDEF, SPACE, SourceName, alternate_name, canonical_base, parse_codepoint,
    parse_source_name, production_name, resolve_glyph_key,
};
pub use rules::{FeatureBlock, RuleSet, Statement, synthesize};
pub use tag::FeatureTag;
pub use variant::{RejectedVariant, VariantKind, VariantRecord, VariantScan, detect};
