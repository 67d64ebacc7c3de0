//! SVG glyph source parsing.
//!
//! Only the geometry is read. Every `<path>` is decomposed into absolute
//! [`PathSegment`]s, and so are the basic shapes: `<rect>`, `<circle>`,
//! `<ellipse>`, `<line>`, `<polyline>` and `<polygon>`. The first four are
//! also kept as [`Primitive`]s, which size the glyph when none of them has
//! drawable extent. Transforms, styling and `<use>` references are not
//! interpreted.

use std::str::FromStr;

use kurbo::Vec2;
use roxmltree::{Document, Node};
use svgfont_outline::{ArcGeometry, PathSegment, Primitive, ShapeSource, SourcePoint};
use svgtypes::{Length, PathParser, PathSegment as Token, PointsParser};

/// Why a source document yielded no usable geometry.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Malformed SVG: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Malformed path data: {0}")]
    PathData(#[from] svgtypes::Error),

    #[error("Path data must start with a moveto")]
    MissingMoveTo,

    #[error("Invalid {attribute} on <{element}>: '{value}'")]
    Attribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
}

/// Parse an SVG document into its shapes, in document order.
pub fn parse_svg(text: &str) -> Result<ShapeSource, SourceError> {
    let document = Document::parse(text)?;
    let mut shape = ShapeSource::default();

    for node in document.descendants().filter(Node::is_element) {
        match node.tag_name().name() {
            "path" => {
                if let Some(d) = node.attribute("d") {
                    shape.paths.push(parse_path_data(d)?);
                }
            }
            "rect" => push_primitive(
                &mut shape,
                Primitive::Rect {
                    x: length(&node, "rect", "x")?,
                    y: length(&node, "rect", "y")?,
                    width: length(&node, "rect", "width")?,
                    height: length(&node, "rect", "height")?,
                },
            ),
            "circle" => push_primitive(
                &mut shape,
                Primitive::Circle {
                    cx: length(&node, "circle", "cx")?,
                    cy: length(&node, "circle", "cy")?,
                    r: length(&node, "circle", "r")?,
                },
            ),
            "ellipse" => push_primitive(
                &mut shape,
                Primitive::Ellipse {
                    cx: length(&node, "ellipse", "cx")?,
                    cy: length(&node, "ellipse", "cy")?,
                    rx: length(&node, "ellipse", "rx")?,
                    ry: length(&node, "ellipse", "ry")?,
                },
            ),
            "line" => push_primitive(
                &mut shape,
                Primitive::Line {
                    x1: length(&node, "line", "x1")?,
                    y1: length(&node, "line", "y1")?,
                    x2: length(&node, "line", "x2")?,
                    y2: length(&node, "line", "y2")?,
                },
            ),
            "polyline" => push_path(&mut shape, poly_path(&node, false)),
            "polygon" => push_path(&mut shape, poly_path(&node, true)),
            _ => {}
        }
    }

    Ok(shape)
}

fn push_path(shape: &mut ShapeSource, segments: Vec<PathSegment>) {
    if !segments.is_empty() {
        shape.paths.push(segments);
    }
}

fn push_primitive(shape: &mut ShapeSource, primitive: Primitive) {
    push_path(shape, primitive_path(&primitive));
    shape.primitives.push(primitive);
}

/// Outline of a basic shape, drawn the way the equivalent path data would
/// be. Shapes without area (or a zero-length line) draw nothing.
///
/// Rectangles run clockwise from their origin corner; circles and ellipses
/// are two half arcs starting from the leftmost point.
pub fn primitive_path(primitive: &Primitive) -> Vec<PathSegment> {
    match *primitive {
        Primitive::Rect { x, y, width, height } => {
            if width <= 0.0 || height <= 0.0 {
                return Vec::new();
            }
            polyline(
                &[
                    SourcePoint::new(x, y),
                    SourcePoint::new(x + width, y),
                    SourcePoint::new(x + width, y + height),
                    SourcePoint::new(x, y + height),
                ],
                true,
            )
        }
        Primitive::Circle { cx, cy, r } => ellipse(cx, cy, r, r),
        Primitive::Ellipse { cx, cy, rx, ry } => ellipse(cx, cy, rx, ry),
        Primitive::Line { x1, y1, x2, y2 } => {
            polyline(&[SourcePoint::new(x1, y1), SourcePoint::new(x2, y2)], false)
        }
    }
}

fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<PathSegment> {
    if rx <= 0.0 || ry <= 0.0 {
        return Vec::new();
    }
    let left = SourcePoint::new(cx - rx, cy);
    let right = SourcePoint::new(cx + rx, cy);
    let geometry = ArcGeometry {
        radii: Vec2::new(rx, ry),
        x_rotation: 0.0,
        large_arc: true,
        sweep: false,
    };
    vec![
        PathSegment::arc(left, right, geometry),
        PathSegment::arc(right, left, geometry),
    ]
}

/// Lines through `points`, plus a closing line back to the first point when
/// `closed` and not already there. Zero-length steps are dropped.
fn polyline(points: &[SourcePoint], closed: bool) -> Vec<PathSegment> {
    let mut segments: Vec<PathSegment> = points
        .windows(2)
        .filter(|pair| pair[0] != pair[1])
        .map(|pair| PathSegment::line(pair[0], pair[1]))
        .collect();
    if let (true, Some(&first), Some(&last)) = (closed, points.first(), points.last()) {
        if first != last && !segments.is_empty() {
            segments.push(PathSegment::line(last, first));
        }
    }
    segments
}

/// `<polyline>`/`<polygon>` outline from the `points` attribute. A trailing
/// unpaired coordinate is ignored.
fn poly_path(node: &Node, closed: bool) -> Vec<PathSegment> {
    let points: Vec<SourcePoint> = node
        .attribute("points")
        .map(|value| PointsParser::from(value).map(|(x, y)| SourcePoint::new(x, y)).collect())
        .unwrap_or_default();
    polyline(&points, closed)
}

/// Numeric value of a length attribute, ignoring its unit. Missing
/// attributes are zero.
fn length(node: &Node, element: &'static str, attribute: &'static str) -> Result<f64, SourceError> {
    let Some(value) = node.attribute(attribute) else {
        return Ok(0.0);
    };
    Length::from_str(value)
        .map(|length| length.number)
        .map_err(|_| SourceError::Attribute {
            element,
            attribute,
            value: value.to_string(),
        })
}

/// Tracks the current point and reflection state while walking path data.
#[derive(Debug, Default)]
struct Cursor {
    current: Option<SourcePoint>,
    subpath_start: SourcePoint,
    /// Second control point of the previous cubic, for `S`.
    last_cubic: Option<SourcePoint>,
    /// Control point of the previous quadratic, for `T`.
    last_quad: Option<SourcePoint>,
}

impl Cursor {
    fn point(&self, abs: bool, x: f64, y: f64) -> SourcePoint {
        match (abs, self.current) {
            (false, Some(current)) => SourcePoint::new(current.x + x, current.y + y),
            _ => SourcePoint::new(x, y),
        }
    }

    fn current(&self) -> Result<SourcePoint, SourceError> {
        self.current.ok_or(SourceError::MissingMoveTo)
    }

    fn reflect(control: Option<SourcePoint>, about: SourcePoint) -> SourcePoint {
        control.map_or(about, |c| about + (about - c))
    }
}

/// Decompose SVG path data into absolute segments.
///
/// `H`/`V` become lines, `S`/`T` get their reflected control point and `Z`
/// adds a closing line when the path is not already back at its start.
pub fn parse_path_data(d: &str) -> Result<Vec<PathSegment>, SourceError> {
    let mut segments = Vec::new();
    let mut cursor = Cursor::default();

    for token in PathParser::from(d) {
        let token = token?;
        let mut last_cubic = None;
        let mut last_quad = None;

        match token {
            Token::MoveTo { abs, x, y } => {
                let point = cursor.point(abs, x, y);
                cursor.current = Some(point);
                cursor.subpath_start = point;
            }
            Token::LineTo { abs, x, y } => {
                let start = cursor.current()?;
                let end = cursor.point(abs, x, y);
                segments.push(PathSegment::line(start, end));
                cursor.current = Some(end);
            }
            Token::HorizontalLineTo { abs, x } => {
                let start = cursor.current()?;
                let end = SourcePoint::new(if abs { x } else { start.x + x }, start.y);
                segments.push(PathSegment::line(start, end));
                cursor.current = Some(end);
            }
            Token::VerticalLineTo { abs, y } => {
                let start = cursor.current()?;
                let end = SourcePoint::new(start.x, if abs { y } else { start.y + y });
                segments.push(PathSegment::line(start, end));
                cursor.current = Some(end);
            }
            Token::CurveTo { abs, x1, y1, x2, y2, x, y } => {
                let start = cursor.current()?;
                let c1 = cursor.point(abs, x1, y1);
                let c2 = cursor.point(abs, x2, y2);
                let end = cursor.point(abs, x, y);
                segments.push(PathSegment::cubic(start, c1, c2, end));
                cursor.current = Some(end);
                last_cubic = Some(c2);
            }
            Token::SmoothCurveTo { abs, x2, y2, x, y } => {
                let start = cursor.current()?;
                let c1 = Cursor::reflect(cursor.last_cubic, start);
                let c2 = cursor.point(abs, x2, y2);
                let end = cursor.point(abs, x, y);
                segments.push(PathSegment::cubic(start, c1, c2, end));
                cursor.current = Some(end);
                last_cubic = Some(c2);
            }
            Token::Quadratic { abs, x1, y1, x, y } => {
                let start = cursor.current()?;
                let control = cursor.point(abs, x1, y1);
                let end = cursor.point(abs, x, y);
                segments.push(PathSegment::quadratic(start, control, end));
                cursor.current = Some(end);
                last_quad = Some(control);
            }
            Token::SmoothQuadratic { abs, x, y } => {
                let start = cursor.current()?;
                let control = Cursor::reflect(cursor.last_quad, start);
                let end = cursor.point(abs, x, y);
                segments.push(PathSegment::quadratic(start, control, end));
                cursor.current = Some(end);
                last_quad = Some(control);
            }
            Token::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let start = cursor.current()?;
                let end = cursor.point(abs, x, y);
                let geometry = ArcGeometry {
                    radii: Vec2::new(rx, ry),
                    x_rotation: x_axis_rotation.to_radians(),
                    large_arc,
                    sweep,
                };
                segments.push(PathSegment::arc(start, end, geometry));
                cursor.current = Some(end);
            }
            Token::ClosePath { .. } => {
                let start = cursor.current()?;
                if start != cursor.subpath_start {
                    segments.push(PathSegment::line(start, cursor.subpath_start));
                }
                cursor.current = Some(cursor.subpath_start);
            }
        }

        cursor.last_cubic = last_cubic;
        cursor.last_quad = last_quad;
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> SourcePoint {
        SourcePoint::new(x, y)
    }

    #[test]
    fn test_absolute_and_relative_lines() {
        let segments = parse_path_data("M10 10 L20 10 l0 10 H0 v-20").unwrap();
        assert_eq!(
            segments,
            vec![
                PathSegment::line(p(10.0, 10.0), p(20.0, 10.0)),
                PathSegment::line(p(20.0, 10.0), p(20.0, 20.0)),
                PathSegment::line(p(20.0, 20.0), p(0.0, 20.0)),
                PathSegment::line(p(0.0, 20.0), p(0.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_close_path_adds_closing_line() {
        let segments = parse_path_data("M0 0 L10 0 L10 10 Z").unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2], PathSegment::line(p(10.0, 10.0), p(0.0, 0.0)));
    }

    #[test]
    fn test_close_path_at_start_adds_nothing() {
        let segments = parse_path_data("M0 0 L10 0 L0 0 Z").unwrap();
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_close_then_draw_continues_from_start() {
        let segments = parse_path_data("M5 5 L10 5 Z l1 1").unwrap();
        assert_eq!(segments.last(), Some(&PathSegment::line(p(5.0, 5.0), p(6.0, 6.0))));
    }

    #[test]
    fn test_smooth_cubic_reflects_control() {
        let segments = parse_path_data("M0 0 C0 10 10 10 10 0 S20 -10 20 0").unwrap();
        assert_eq!(
            segments[1],
            PathSegment::cubic(p(10.0, 0.0), p(10.0, -10.0), p(20.0, -10.0), p(20.0, 0.0))
        );
    }

    #[test]
    fn test_smooth_cubic_without_previous_uses_current() {
        let segments = parse_path_data("M0 0 S10 10 20 0").unwrap();
        assert_eq!(
            segments[0],
            PathSegment::cubic(p(0.0, 0.0), p(0.0, 0.0), p(10.0, 10.0), p(20.0, 0.0))
        );
    }

    #[test]
    fn test_quadratic_and_smooth_quadratic() {
        let segments = parse_path_data("M0 0 Q5 10 10 0 t10 0").unwrap();
        assert_eq!(segments[0], PathSegment::quadratic(p(0.0, 0.0), p(5.0, 10.0), p(10.0, 0.0)));
        assert_eq!(segments[1], PathSegment::quadratic(p(10.0, 0.0), p(15.0, -10.0), p(20.0, 0.0)));
    }

    #[test]
    fn test_arc() {
        let segments = parse_path_data("M0 0 A10 10 90 0 1 20 0").unwrap();
        let PathSegment::Arc { start, end, geometry } = segments[0] else {
            panic!("expected arc, got {:?}", segments[0]);
        };
        assert_eq!(start, p(0.0, 0.0));
        assert_eq!(end, p(20.0, 0.0));
        assert_eq!(geometry.radii, Vec2::new(10.0, 10.0));
        assert!((geometry.x_rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(!geometry.large_arc);
        assert!(geometry.sweep);
    }

    #[test]
    fn test_multiple_subpaths_stay_in_sequence() {
        let segments = parse_path_data("M0 0 L10 0 Z M20 0 L30 0 Z").unwrap();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[2].start(), p(20.0, 0.0));
    }

    #[test]
    fn test_malformed_path_data() {
        assert!(parse_path_data("M0 0 L10").is_err());
    }

    #[test]
    fn test_parse_svg_paths_and_primitives() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1000 1000">
            <g>
                <path d="M100 100 L200 100 L200 200 Z"/>
                <rect x="10" y="20" width="30px" height="40"/>
                <circle cx="50" cy="50" r="5"/>
            </g>
        </svg>"#;
        let shape = parse_svg(svg).unwrap();
        assert_eq!(shape.paths.len(), 3);
        assert_eq!(shape.paths[0].len(), 3);
        assert_eq!(
            shape.primitives,
            vec![
                Primitive::Rect { x: 10.0, y: 20.0, width: 30.0, height: 40.0 },
                Primitive::Circle { cx: 50.0, cy: 50.0, r: 5.0 },
            ]
        );
    }

    #[test]
    fn test_rect_is_drawn_as_closed_lines() {
        let segments = primitive_path(&Primitive::Rect { x: 10.0, y: 20.0, width: 30.0, height: 40.0 });
        assert_eq!(
            segments,
            vec![
                PathSegment::line(p(10.0, 20.0), p(40.0, 20.0)),
                PathSegment::line(p(40.0, 20.0), p(40.0, 60.0)),
                PathSegment::line(p(40.0, 60.0), p(10.0, 60.0)),
                PathSegment::line(p(10.0, 60.0), p(10.0, 20.0)),
            ]
        );
    }

    #[test]
    fn test_circle_is_drawn_as_two_arcs() {
        let segments = primitive_path(&Primitive::Circle { cx: 50.0, cy: 50.0, r: 5.0 });
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start(), p(45.0, 50.0));
        assert_eq!(segments[0].end(), p(55.0, 50.0));
        assert_eq!(segments[1].end(), p(45.0, 50.0));
        let bbox = svgfont_outline::path_bounds(&segments).unwrap();
        assert_eq!((bbox.min_x, bbox.max_x), (45.0, 55.0));
        // Arcs are measured through their cubic approximation.
        assert!((bbox.min_y - 45.0).abs() < 0.1);
        assert!((bbox.max_y - 55.0).abs() < 0.1);
    }

    #[test]
    fn test_degenerate_primitives_draw_nothing() {
        assert!(primitive_path(&Primitive::Rect { x: 0.0, y: 0.0, width: 10.0, height: 0.0 }).is_empty());
        assert!(primitive_path(&Primitive::Circle { cx: 0.0, cy: 0.0, r: 0.0 }).is_empty());
        assert!(primitive_path(&Primitive::Ellipse { cx: 0.0, cy: 0.0, rx: 3.0, ry: 0.0 }).is_empty());
        assert!(primitive_path(&Primitive::Line { x1: 1.0, y1: 1.0, x2: 1.0, y2: 1.0 }).is_empty());
    }

    #[test]
    fn test_polygon_and_polyline() {
        let svg = r#"<svg>
            <polygon points="0,0 10,0 10,10"/>
            <polyline points="20 0, 30 0 30 10 40"/>
            <polygon points="5,5"/>
        </svg>"#;
        let shape = parse_svg(svg).unwrap();
        assert!(shape.primitives.is_empty());
        assert_eq!(shape.paths.len(), 2);
        assert_eq!(shape.paths[0].len(), 3);
        assert_eq!(shape.paths[0][2], PathSegment::line(p(10.0, 10.0), p(0.0, 0.0)));
        assert_eq!(
            shape.paths[1],
            vec![
                PathSegment::line(p(20.0, 0.0), p(30.0, 0.0)),
                PathSegment::line(p(30.0, 0.0), p(30.0, 10.0)),
            ]
        );
        let bbox = shape.bounds().unwrap();
        assert_eq!((bbox.min_x, bbox.max_x, bbox.max_y), (0.0, 30.0, 10.0));
    }

    #[test]
    fn test_parse_svg_shapes_bounds() {
        let svg = r#"<svg><ellipse cx="10" cy="10" rx="4" ry="2"/><line x1="0" y1="0" x2="5" y2="9"/></svg>"#;
        let shape = parse_svg(svg).unwrap();
        assert!(shape.has_path_data());
        let bbox = shape.bounds().unwrap();
        assert_eq!((bbox.min_x, bbox.min_y, bbox.max_x), (0.0, 0.0, 14.0));
        assert!((bbox.max_y - 12.0).abs() < 0.1);
    }

    #[test]
    fn test_degenerate_shape_falls_back_to_primitive_bounds() {
        let shape = parse_svg(r#"<svg><rect x="3" y="4" width="6" height="0"/></svg>"#).unwrap();
        assert!(!shape.has_path_data());
        let bbox = shape.bounds().unwrap();
        assert_eq!((bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y), (3.0, 4.0, 9.0, 4.0));
    }

    #[test]
    fn test_parse_svg_errors() {
        assert!(matches!(parse_svg("<svg><path d=").unwrap_err(), SourceError::Xml(_)));
        assert!(matches!(
            parse_svg(r#"<svg><rect width="wide"/></svg>"#).unwrap_err(),
            SourceError::Attribute { element: "rect", attribute: "width", .. }
        ));
    }
}
