//! UFO font source output.

use std::path::Path;

use norad::{ContourPoint, Font, Name, PointType, fontinfo::NonNegativeIntegerOrFloat};
use plist::Value;
use svgfont_outline::{Contour, FontPoint, Op};

use crate::{
    config::Config,
    error::{Error, Result},
    glyph::Glyph,
    pipeline::GlyphSet,
};

/// Lib key holding the glyph order.
pub const GLYPH_ORDER_KEY: &str = "public.glyphOrder";

/// `<family>-<style>.ufo`, with spaces removed.
pub fn ufo_file_name(config: &Config) -> String {
    let family: String = config.font.family_name.split_whitespace().collect();
    let style: String = config.font.style_name.split_whitespace().collect();
    format!("{family}-{style}.ufo")
}

/// Assemble a UFO font from a glyph set.
pub fn to_font(set: &GlyphSet, config: &Config) -> Result<Font> {
    let mut font = Font::new();

    let info = &mut font.font_info;
    info.family_name = Some(config.font.family_name.clone());
    info.style_name = Some(config.font.style_name.clone());
    info.units_per_em = NonNegativeIntegerOrFloat::new(f64::from(config.font.units_per_em));
    info.ascender = Some(f64::from(config.font.ascender));
    info.descender = Some(f64::from(config.font.descender));
    info.x_height = Some(f64::from(config.font.x_height));
    info.cap_height = Some(f64::from(config.font.cap_height));

    let layer = font.default_layer_mut();
    for glyph in set.glyphs.values() {
        layer.insert_glyph(to_norad_glyph(glyph)?);
    }

    for (left, right, value) in set.kerning.iter() {
        font.kerning
            .entry(Name::new(left)?)
            .or_default()
            .insert(Name::new(right)?, f64::from(value));
    }

    font.features = set.rules.to_fea();

    let order = set
        .glyph_order()
        .map(|name| Value::String(name.to_string()))
        .collect();
    font.lib.insert(GLYPH_ORDER_KEY.to_string(), Value::Array(order));

    Ok(font)
}

/// Write `font` to `path`, replacing any existing UFO there.
pub fn write_ufo(font: &Font, path: &Path) -> Result<()> {
    font.save(path)?;
    Ok(())
}

fn to_norad_glyph(glyph: &Glyph) -> Result<norad::Glyph> {
    Name::new(&glyph.name)?;
    let mut ufo_glyph = norad::Glyph::new(&glyph.name);
    ufo_glyph.width = f64::from(glyph.width);
    if let Some(cp) = glyph.codepoint {
        let c = char::from_u32(cp).ok_or(Error::InvalidCodepoint(cp))?;
        ufo_glyph.codepoints.insert(c);
    }
    ufo_glyph.contours = glyph.outline.iter().map(to_norad_contour).collect();
    Ok(ufo_glyph)
}

fn point(p: FontPoint, typ: PointType) -> ContourPoint {
    ContourPoint::new(p.x(), p.y(), typ, false, None, None)
}

fn push_op(points: &mut Vec<ContourPoint>, op: &Op) {
    match *op {
        Op::Line(p) => points.push(point(p, PointType::Line)),
        Op::Curve(c1, c2, p) => {
            points.push(point(c1, PointType::OffCurve));
            points.push(point(c2, PointType::OffCurve));
            points.push(point(p, PointType::Curve));
        }
    }
}

/// Convert a contour to UFO points.
///
/// Open contours start with a `move` point. Closed contours drop the
/// on-curve point the closing operation ends on; the start point takes that
/// operation's type and any trailing off-curve points wrap around to it.
fn to_norad_contour(contour: &Contour) -> norad::Contour {
    let mut points = Vec::with_capacity(contour.ops().len() * 3 + 1);

    match contour.ops().split_last() {
        Some((last, rest)) if contour.is_closed() => {
            let typ = match last {
                Op::Line(_) => PointType::Line,
                Op::Curve(..) => PointType::Curve,
            };
            points.push(point(contour.start(), typ));
            for op in rest {
                push_op(&mut points, op);
            }
            if let Op::Curve(c1, c2, _) = *last {
                points.push(point(c1, PointType::OffCurve));
                points.push(point(c2, PointType::OffCurve));
            }
        }
        _ => {
            points.push(point(contour.start(), PointType::Move));
            for op in contour.ops() {
                push_op(&mut points, op);
            }
        }
    }

    norad::Contour::new(points, None)
}

#[cfg(test)]
mod tests {
    use svgfont_features::GlyphName;
    use svgfont_outline::{ContourAssembler, CoordinateMapper, PathSegment, SourcePoint};

    use super::*;
    use crate::pipeline::{GlyphPipeline, SourceFile};

    fn contour(segments: &[PathSegment]) -> Contour {
        ContourAssembler::new(CoordinateMapper::identity())
            .assemble(segments)
            .remove(0)
    }

    fn p(x: f64, y: f64) -> SourcePoint {
        SourcePoint::new(x, y)
    }

    fn types(contour: &norad::Contour) -> Vec<PointType> {
        contour.points.iter().map(|pt| pt.typ.clone()).collect()
    }

    #[test]
    fn test_closed_line_contour() {
        let c = contour(&[
            PathSegment::line(p(0.0, 0.0), p(10.0, 0.0)),
            PathSegment::line(p(10.0, 0.0), p(10.0, 10.0)),
            PathSegment::line(p(10.0, 10.0), p(0.0, 0.0)),
        ]);
        let ufo = to_norad_contour(&c);
        assert_eq!(types(&ufo), [PointType::Line, PointType::Line, PointType::Line]);
        let coords: Vec<_> = ufo.points.iter().map(|pt| (pt.x, pt.y)).collect();
        assert_eq!(coords, [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    }

    #[test]
    fn test_closed_curve_contour_wraps_off_curves() {
        let c = contour(&[
            PathSegment::line(p(0.0, 0.0), p(10.0, 0.0)),
            PathSegment::cubic(p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(0.0, 0.0)),
        ]);
        let ufo = to_norad_contour(&c);
        assert_eq!(
            types(&ufo),
            [PointType::Curve, PointType::Line, PointType::OffCurve, PointType::OffCurve]
        );
        assert_eq!((ufo.points[3].x, ufo.points[3].y), (0.0, 10.0));
    }

    #[test]
    fn test_open_contour() {
        let c = contour(&[
            PathSegment::line(p(0.0, 0.0), p(10.0, 0.0)),
            PathSegment::quadratic(p(10.0, 0.0), p(15.0, 5.0), p(10.0, 10.0)),
        ]);
        let ufo = to_norad_contour(&c);
        assert_eq!(
            types(&ufo),
            [
                PointType::Move,
                PointType::Line,
                PointType::OffCurve,
                PointType::OffCurve,
                PointType::Curve
            ]
        );
    }

    #[test]
    fn test_ufo_file_name() {
        let mut config = Config::default();
        assert_eq!(ufo_file_name(&config), "Untitled-Regular.ufo");
        config.font.family_name = "Dillo Hand".to_string();
        config.font.style_name = "Semi Bold".to_string();
        assert_eq!(ufo_file_name(&config), "DilloHand-SemiBold.ufo");
    }

    #[test]
    fn test_to_font() {
        let config: Config = r#"{"font": {"family_name": "Hand"}, "kerning": {"A": {"B": -20}}}"#
            .parse()
            .unwrap();
        let square = r#"<svg><path d="M100 100 L300 100 L300 300 Z"/></svg>"#;
        let sources = [
            SourceFile::new("A.svg", square),
            SourceFile::new("B.svg", square),
            SourceFile::new("A-ss01.svg", square),
        ];
        let set = GlyphPipeline::new(&config).run(&sources);
        let font = to_font(&set, &config).unwrap();

        assert_eq!(font.font_info.family_name.as_deref(), Some("Hand"));
        assert_eq!(font.font_info.ascender, Some(800.0));
        assert_eq!(font.default_layer().len(), 5);

        let a = font.default_layer().get_glyph("uni0041").unwrap();
        assert_eq!(a.width, 300.0);
        assert_eq!(a.codepoints.iter().collect::<Vec<_>>(), ['A']);
        assert_eq!(a.contours.len(), 1);

        let kern = &font.kerning[&Name::new("uni0041").unwrap()];
        assert_eq!(kern[&Name::new("uni0042").unwrap()], -20.0);
        assert!(font.features.contains("feature ss01"));

        let Some(Value::Array(order)) = font.lib.get(GLYPH_ORDER_KEY) else {
            panic!("missing glyph order");
        };
        let order: Vec<_> = order.iter().filter_map(Value::as_string).collect();
        assert_eq!(order, [".notdef", "uni0020", "uni0041", "uni0042", "uni0041.ss01"]);
    }

    #[test]
    fn test_invalid_codepoint() {
        let glyph = Glyph::blank(GlyphName::new("bad"), Some(0xD800), 100);
        assert!(matches!(to_norad_glyph(&glyph), Err(Error::InvalidCodepoint(0xD800))));
    }
}
