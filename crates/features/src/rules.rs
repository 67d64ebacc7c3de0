//! Substitution feature synthesis and feature-file rendering.
//!
//! Only the small subset of the feature-file language needed for
//! alternates is produced:
//!
//! ```text
//! feature ss01 {
//!     sub uni0061 by uni0061.ss01;
//! } ss01;
//!
//! feature cv01 {
//!     sub uni0067 from [uni0067.cv01 uni0067.alt];
//! } cv01;
//! ```

use std::{
    collections::{BTreeMap, HashSet},
    fmt::{self, Display, Formatter},
};

use indexmap::IndexMap;
use log::info;

use crate::{
    naming::GlyphName,
    tag::FeatureTag,
    variant::{VariantKind, VariantRecord},
};

/// One statement inside a feature block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `sub <target> by <replacement>;`
    Single {
        target: GlyphName,
        replacement: GlyphName,
    },
    /// `sub <target> from [<alternates>];`
    OneOf {
        target: GlyphName,
        alternates: Vec<GlyphName>,
    },
    /// `feature <tag>;`
    Reference(FeatureTag),
}

impl Statement {
    /// Single substitution for one alternate, one-of-many otherwise.
    fn alternates(target: &GlyphName, alternates: &[GlyphName]) -> Self {
        match alternates {
            [only] => Statement::Single {
                target: target.clone(),
                replacement: only.clone(),
            },
            _ => Statement::OneOf {
                target: target.clone(),
                alternates: alternates.to_vec(),
            },
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Single { target, replacement } => write!(f, "sub {target} by {replacement};"),
            Statement::OneOf { target, alternates } => {
                write!(f, "sub {target} from [")?;
                for (idx, alternate) in alternates.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{alternate}")?;
                }
                f.write_str("];")
            }
            Statement::Reference(tag) => write!(f, "feature {tag};"),
        }
    }
}

/// A `feature <tag> { ... } <tag>;` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureBlock {
    pub tag: FeatureTag,
    pub statements: Vec<Statement>,
}

impl Display for FeatureBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "feature {} {{", self.tag)?;
        for statement in &self.statements {
            writeln!(f, "    {statement}")?;
        }
        writeln!(f, "}} {};", self.tag)
    }
}

/// Generated feature blocks keyed by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    features: BTreeMap<FeatureTag, FeatureBlock>,
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn get(&self, tag: FeatureTag) -> Option<&FeatureBlock> {
        self.features.get(&tag)
    }

    /// Rendered text of one feature block.
    pub fn rule_text(&self, tag: FeatureTag) -> Option<String> {
        self.get(tag).map(ToString::to_string)
    }

    /// Blocks in output order: `aalt`, `salt`, then the remaining tags sorted.
    pub fn blocks(&self) -> impl Iterator<Item = &FeatureBlock> {
        let head = [FeatureTag::AALT, FeatureTag::SALT]
            .into_iter()
            .filter_map(|tag| self.features.get(&tag));
        let rest = self
            .features
            .values()
            .filter(|block| block.tag != FeatureTag::AALT && block.tag != FeatureTag::SALT);
        head.chain(rest)
    }

    pub fn tags(&self) -> impl Iterator<Item = FeatureTag> + '_ {
        self.blocks().map(|block| block.tag)
    }

    /// The whole feature file.
    pub fn to_fea(&self) -> String {
        self.to_string()
    }

    fn insert(&mut self, tag: FeatureTag, statements: Vec<Statement>) {
        self.features.insert(tag, FeatureBlock { tag, statements });
    }
}

impl Display for RuleSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (idx, block) in self.blocks().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

type Alternates = IndexMap<GlyphName, Vec<GlyphName>>;

fn push_alternate(groups: &mut Alternates, base: &GlyphName, alternate: &GlyphName) {
    let alternates = groups.entry(base.clone()).or_default();
    if !alternates.contains(alternate) {
        alternates.push(alternate.clone());
    }
}

/// Build the alternate-substitution features for `records`.
///
/// Records whose base or alternate is missing from `realized` are dropped
/// without a diagnostic, so optional glyphs never produce dangling
/// references.
pub fn synthesize(records: &[VariantRecord], realized: &HashSet<GlyphName>) -> RuleSet {
    let mut grouped: BTreeMap<(FeatureTag, VariantKind), Alternates> = BTreeMap::new();
    let mut all: Alternates = IndexMap::new();

    for record in records
        .iter()
        .filter(|r| realized.contains(&r.alternate_name) && realized.contains(&r.base_name))
    {
        let group = grouped.entry((record.tag(), record.kind)).or_default();
        push_alternate(group, &record.base_name, &record.alternate_name);
        push_alternate(&mut all, &record.base_name, &record.alternate_name);
    }

    let mut rules = RuleSet::default();
    if all.is_empty() {
        return rules;
    }

    for ((tag, kind), bases) in &grouped {
        let statements = bases
            .iter()
            .map(|(base, alternates)| match kind {
                VariantKind::StylisticSet => Statement::alternates(base, &alternates[..1]),
                VariantKind::CharacterVariant => Statement::alternates(base, alternates),
            })
            .collect();
        rules.insert(*tag, statements);
    }

    let salt = all
        .iter()
        .map(|(base, alternates)| Statement::alternates(base, alternates))
        .collect();
    rules.insert(FeatureTag::SALT, salt);

    let references = std::iter::once(FeatureTag::SALT)
        .chain(grouped.keys().map(|(tag, _)| *tag))
        .map(Statement::Reference)
        .collect();
    rules.insert(FeatureTag::AALT, references);

    let alternates: usize = all.values().map(Vec::len).sum();
    info!("Generated {} features from {alternates} alternates", rules.len());
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::detect;

    fn realized(names: &[&str]) -> HashSet<GlyphName> {
        names.iter().map(|n| GlyphName::new(*n)).collect()
    }

    #[test]
    fn test_stylistic_set_and_character_variant() {
        let records = detect(["U+0061-ss01", "U+0061-cv01", "U+0067-ss01"]).records;
        let glyphs = realized(&[
            "uni0061",
            "uni0061.ss01",
            "uni0061.cv01",
            "uni0067",
            "uni0067.ss01",
        ]);
        let rules = synthesize(&records, &glyphs);

        let tags: Vec<_> = rules.tags().map(|t| t.to_string()).collect();
        assert_eq!(tags, ["aalt", "salt", "cv01", "ss01"]);

        assert_eq!(
            rules.rule_text(FeatureTag::new(b"ss01")).unwrap(),
            "feature ss01 {\n    sub uni0061 by uni0061.ss01;\n    sub uni0067 by uni0067.ss01;\n} ss01;\n"
        );
        assert_eq!(
            rules.rule_text(FeatureTag::new(b"cv01")).unwrap(),
            "feature cv01 {\n    sub uni0061 by uni0061.cv01;\n} cv01;\n"
        );
        assert_eq!(
            rules.rule_text(FeatureTag::SALT).unwrap(),
            "feature salt {\n    sub uni0061 from [uni0061.ss01 uni0061.cv01];\n    sub uni0067 by uni0067.ss01;\n} salt;\n"
        );
        assert_eq!(
            rules.rule_text(FeatureTag::AALT).unwrap(),
            "feature aalt {\n    feature salt;\n    feature cv01;\n    feature ss01;\n} aalt;\n"
        );
    }

    #[test]
    fn test_single_alternate_in_salt() {
        let records = detect(["U+0061-ss01"]).records;
        let rules = synthesize(&records, &realized(&["uni0061", "uni0061.ss01"]));
        assert_eq!(
            rules.get(FeatureTag::SALT).unwrap().statements,
            vec![Statement::Single {
                target: GlyphName::new("uni0061"),
                replacement: GlyphName::new("uni0061.ss01"),
            }]
        );
    }

    #[test]
    fn test_character_variant_one_of_many() {
        let record = |alternate: &str, source: &str| VariantRecord {
            alternate_name: GlyphName::new(alternate),
            base_name: GlyphName::new("uni0067"),
            kind: VariantKind::CharacterVariant,
            number: 2,
            source_ref: source.to_string(),
        };
        let records = [record("uni0067.cv02", "g-cv02"), record("uni0067.alt", "g.alt")];
        let rules = synthesize(
            &records,
            &realized(&["uni0067", "uni0067.cv02", "uni0067.alt"]),
        );
        assert_eq!(
            rules.rule_text(FeatureTag::new(b"cv02")).unwrap(),
            "feature cv02 {\n    sub uni0067 from [uni0067.cv02 uni0067.alt];\n} cv02;\n"
        );
    }

    #[test]
    fn test_stylistic_set_uses_first_alternate() {
        let record = |alternate: &str| VariantRecord {
            alternate_name: GlyphName::new(alternate),
            base_name: GlyphName::new("uni0061"),
            kind: VariantKind::StylisticSet,
            number: 1,
            source_ref: alternate.to_string(),
        };
        let records = [record("uni0061.ss01"), record("uni0061.ss01b")];
        let rules = synthesize(
            &records,
            &realized(&["uni0061", "uni0061.ss01", "uni0061.ss01b"]),
        );
        assert_eq!(
            rules.get(FeatureTag::new(b"ss01")).unwrap().statements,
            vec![Statement::Single {
                target: GlyphName::new("uni0061"),
                replacement: GlyphName::new("uni0061.ss01"),
            }]
        );
    }

    #[test]
    fn test_dangling_references_excluded() {
        let records = detect(["U+0061-ss01", "U+0062-ss02", "U+0063-cv01"]).records;
        // uni0062 (base) and uni0063.cv01 (alternate) were never realized.
        let glyphs = realized(&["uni0061", "uni0061.ss01", "uni0062.ss02", "uni0063"]);
        let rules = synthesize(&records, &glyphs);

        let fea = rules.to_fea();
        assert!(!fea.contains("uni0062"));
        assert!(!fea.contains("uni0063"));
        assert!(!fea.contains("ss02"));
        assert!(!fea.contains("cv01"));
        assert!(rules.get(FeatureTag::new(b"ss01")).is_some());
    }

    #[test]
    fn test_no_records_no_features() {
        let rules = synthesize(&[], &realized(&["uni0061"]));
        assert!(rules.is_empty());
        assert_eq!(rules.to_fea(), "");
    }

    #[test]
    fn test_deterministic_output() {
        let identifiers = ["U+0061-ss01", "U+0061-cv01", "U+0062-cv01", "U+0062-ss03"];
        let glyphs = realized(&[
            "uni0061",
            "uni0061.ss01",
            "uni0061.cv01",
            "uni0062",
            "uni0062.cv01",
            "uni0062.ss03",
        ]);
        let first = synthesize(&detect(identifiers).records, &glyphs).to_fea();
        let second = synthesize(&detect(identifiers).records, &glyphs).to_fea();
        assert_eq!(first, second);
        assert!(first.starts_with("feature aalt {"));
    }
}
