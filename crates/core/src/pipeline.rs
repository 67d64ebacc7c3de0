//! The glyph pipeline: from named SVG sources to realized glyphs, kerning
//! and alternate-substitution features.
//!
//! Each source goes through classification (regular or alternate), naming,
//! shape parsing, sizing and outline assembly. Sources are processed in
//! file-name order, regular glyphs before alternates, so the output depends
//! only on the set of inputs.

use std::{
    collections::{HashMap, HashSet},
    fmt::{self, Display, Formatter},
    path::Path,
};

use indexmap::IndexMap;
use log::{debug, info, warn};
use svgfont_features::{
    FeatureTag, GlyphName, RuleSet, SPACE, SourceName, VariantRecord, detect,
    parse_source_name, production_name, synthesize,
};
use svgfont_outline::{BBox, ContourAssembler, CoordinateMapper, GlyphOutline, ShapeSource, plan};

use crate::{
    config::{Config, GlyphOverride},
    glyph::{Glyph, KerningTable},
    source::parse_svg,
};

/// One SVG glyph source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name, the sort key.
    pub file_name: String,
    /// File name without its `.svg` extension.
    pub stem: String,
    pub contents: String,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let stem = Path::new(&file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&file_name)
            .to_string();
        Self {
            file_name,
            stem,
            contents: contents.into(),
        }
    }
}

/// Why a source produced no glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file name names neither a character nor an alternate.
    UnparseableName,
    /// An earlier source already produced this glyph.
    DuplicateName(GlyphName),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnparseableName => f.write_str("cannot infer a glyph from the file name"),
            SkipReason::DuplicateName(name) => write!(f, "{name} is already provided"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub source: String,
    pub reason: SkipReason,
}

/// Final advance width and horizontal shift of one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    pub width: i32,
    pub offset: f64,
}

/// Everything the pipeline produced for one run.
#[derive(Debug, Clone, Default)]
pub struct GlyphSet {
    /// Realized glyphs in glyph order.
    pub glyphs: IndexMap<GlyphName, Glyph>,
    pub kerning: KerningTable,
    /// Variant records whose source was realized.
    pub variants: Vec<VariantRecord>,
    pub rules: RuleSet,
    pub skipped: Vec<Skipped>,
}

impl GlyphSet {
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.get(name)
    }

    pub fn glyph_order(&self) -> impl Iterator<Item = &GlyphName> {
        self.glyphs.keys()
    }

    pub fn alternate_count(&self) -> usize {
        self.glyphs.values().filter(|g| g.is_alternate).count()
    }

    pub fn feature_tags(&self) -> Vec<FeatureTag> {
        self.rules.tags().collect()
    }
}

/// A source that has been named and is waiting to be shaped.
struct Named<'a> {
    source: &'a SourceFile,
    name: GlyphName,
    codepoint: Option<u32>,
    is_alternate: bool,
}

/// Turns sources into a [`GlyphSet`] under one [`Config`].
#[derive(Debug)]
pub struct GlyphPipeline<'c> {
    config: &'c Config,
    mapper: CoordinateMapper,
    overrides: HashMap<GlyphName, GlyphOverride>,
}

impl<'c> GlyphPipeline<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            mapper: config.mapper(),
            overrides: config.overrides(),
        }
    }

    /// Run the pipeline over `sources`, in any order.
    pub fn run(&self, sources: &[SourceFile]) -> GlyphSet {
        let mut sorted: Vec<&SourceFile> = sources.iter().collect();
        sorted.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        let mut set = GlyphSet::default();
        let mut regular = Vec::new();
        let mut alternates = Vec::new();
        for source in sorted {
            match parse_source_name(&source.stem) {
                Some(SourceName::Codepoint(cp)) => regular.push((source, cp)),
                Some(SourceName::Variant { .. }) => alternates.push(source),
                None => {
                    let reason = SkipReason::UnparseableName;
                    warn!("Skipping {}: {reason}", source.file_name);
                    set.skipped.push(Skipped {
                        source: source.file_name.clone(),
                        reason,
                    });
                }
            }
        }

        let mut named = Vec::new();
        for (source, cp) in regular {
            named.push(Named {
                source,
                name: production_name(cp),
                codepoint: Some(cp),
                is_alternate: false,
            });
        }

        let scan = detect(alternates.iter().map(|source| source.stem.as_str()));
        let by_stem: HashMap<&str, &SourceFile> =
            alternates.iter().map(|source| (source.stem.as_str(), *source)).collect();
        for rejected in &scan.rejected {
            if let Some(source) = by_stem.get(rejected.source_ref.as_str()) {
                set.skipped.push(Skipped {
                    source: source.file_name.clone(),
                    reason: SkipReason::DuplicateName(rejected.alternate_name.clone()),
                });
            }
        }
        for record in &scan.records {
            if let Some(&source) = by_stem.get(record.source_ref.as_str()) {
                named.push(Named {
                    source,
                    name: record.alternate_name.clone(),
                    codepoint: None,
                    is_alternate: true,
                });
            }
        }

        set.glyphs.insert(GlyphName::notdef(), self.blank(GlyphName::notdef(), None));
        let space = production_name(SPACE);
        if !named.iter().any(|n| n.name == space) {
            set.glyphs.insert(space.clone(), self.blank(space, Some(SPACE)));
        }

        for entry in named {
            if set.glyphs.contains_key(&entry.name) {
                warn!("Skipping {}: {} is already provided", entry.source.file_name, entry.name);
                set.skipped.push(Skipped {
                    source: entry.source.file_name.clone(),
                    reason: SkipReason::DuplicateName(entry.name),
                });
                continue;
            }
            let glyph = self.realize(&entry);
            set.glyphs.insert(entry.name, glyph);
        }

        let realized: HashSet<GlyphName> = set.glyphs.keys().cloned().collect();
        set.variants = scan
            .records
            .into_iter()
            .filter(|record| {
                set.glyphs
                    .get(&record.alternate_name)
                    .is_some_and(|glyph| glyph.is_alternate)
            })
            .collect();
        set.rules = synthesize(&set.variants, &realized);
        set.kerning = KerningTable::resolve(self.config.kerning_pairs(), &realized);

        info!(
            "Realized {} glyphs ({} alternates), skipped {} sources, {} kerning pairs",
            set.len(),
            set.alternate_count(),
            set.skipped.len(),
            set.kerning.len()
        );
        set
    }

    fn blank(&self, name: GlyphName, codepoint: Option<u32>) -> Glyph {
        let width = self.size(&name, None).width;
        Glyph::blank(name, codepoint, width)
    }

    fn realize(&self, entry: &Named) -> Glyph {
        let shape = parse_svg(&entry.source.contents).unwrap_or_else(|err| {
            warn!("{}: {err}; using no geometry", entry.source.file_name);
            ShapeSource::default()
        });
        let bbox = shape.bounds();
        let sizing = self.size(&entry.name, bbox.as_ref());

        let assembler = ContourAssembler::new(self.mapper.with_x_shift(sizing.offset));
        let mut outline = GlyphOutline::new();
        for path in &shape.paths {
            outline.extend(assembler.assemble(path));
        }

        Glyph {
            name: entry.name.clone(),
            codepoint: entry.codepoint,
            width: sizing.width,
            outline,
            is_alternate: entry.is_alternate,
        }
    }

    /// Width and offset for a glyph, each resolved separately as manual
    /// override, then automatic sidebearings, then the default.
    pub fn size(&self, name: &GlyphName, bbox: Option<&BBox>) -> Sizing {
        let manual = self.overrides.get(name).copied().unwrap_or_default();
        let auto = if self.config.build.auto_sidebearing {
            plan(bbox, self.config.build.sidebearing_margin)
        } else {
            None
        };

        let width = manual
            .width
            .or(auto.map(|p| p.width))
            .unwrap_or(self.config.font.default_width);
        let offset = match (manual.left_margin, bbox) {
            (Some(left), Some(bbox)) => left - bbox.min_x,
            _ => auto.map_or(0.0, |p| p.horizontal_offset),
        };

        debug!("{name}: width {width}, offset {offset}");
        Sizing { width, offset }
    }
}
