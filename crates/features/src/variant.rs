//! Stylistic set and character variant detection.

use std::collections::HashMap;

use log::warn;

use crate::{
    naming::{GlyphName, SourceName, alternate_name, parse_source_name},
    tag::FeatureTag,
};

/// Kind of alternate a source provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantKind {
    /// `ssNN`, valid for 01–20.
    StylisticSet,
    /// `cvNN`, valid for 01–99.
    CharacterVariant,
}

impl VariantKind {
    fn prefix(self) -> &'static [u8; 2] {
        match self {
            VariantKind::StylisticSet => b"ss",
            VariantKind::CharacterVariant => b"cv",
        }
    }

    /// Whether `number` maps to a registered feature tag.
    pub fn accepts(self, number: u8) -> bool {
        match self {
            VariantKind::StylisticSet => (1..=20).contains(&number),
            VariantKind::CharacterVariant => (1..=99).contains(&number),
        }
    }

    pub fn tag(self, number: u8) -> FeatureTag {
        FeatureTag::numbered(self.prefix(), number)
    }
}

/// One alternate glyph and the base glyph it stands in for.
///
/// The base is a weak reference by name, resolved against the realized
/// glyph set at rule synthesis time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub alternate_name: GlyphName,
    pub base_name: GlyphName,
    pub kind: VariantKind,
    pub number: u8,
    /// Identifier the record was detected from.
    pub source_ref: String,
}

impl VariantRecord {
    pub fn tag(&self) -> FeatureTag {
        self.kind.tag(self.number)
    }
}

/// An identifier whose alternate name was already claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedVariant {
    pub source_ref: String,
    pub alternate_name: GlyphName,
    /// Identifier that claimed the name first.
    pub claimed_by: String,
}

/// Result of scanning identifiers for variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantScan {
    pub records: Vec<VariantRecord>,
    pub rejected: Vec<RejectedVariant>,
}

/// Find the alternates among `identifiers`, in the order given.
///
/// Identifiers that are not variants are ignored. When two identifiers
/// resolve to the same alternate name the first one wins and the later one
/// is reported in [`VariantScan::rejected`].
pub fn detect<I, S>(identifiers: I) -> VariantScan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scan = VariantScan::default();
    let mut claimed: HashMap<GlyphName, usize> = HashMap::new();

    for identifier in identifiers {
        let identifier = identifier.as_ref();
        let Some(SourceName::Variant { base, kind, number }) = parse_source_name(identifier)
        else {
            continue;
        };
        let alternate = alternate_name(&base, kind, number);

        if let Some(&idx) = claimed.get(&alternate) {
            let claimed_by = scan.records[idx].source_ref.clone();
            warn!("{identifier}: alternate {alternate} already provided by {claimed_by}, skipped");
            scan.rejected.push(RejectedVariant {
                source_ref: identifier.to_string(),
                alternate_name: alternate,
                claimed_by,
            });
            continue;
        }

        claimed.insert(alternate.clone(), scan.records.len());
        scan.records.push(VariantRecord {
            alternate_name: alternate,
            base_name: base,
            kind,
            number,
            source_ref: identifier.to_string(),
        });
    }

    scan
}
