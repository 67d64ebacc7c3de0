//! Typed path segments in source space.

use kurbo::{Arc, CubicBez, Line, ParamCurveExtrema, PathEl, QuadBez, Rect, SvgArc, Vec2};

use crate::mapper::SourcePoint;

/// Elliptical arc parameters, as found in SVG path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub radii: Vec2,
    /// Rotation of the ellipse's x axis, in radians.
    pub x_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

impl ArcGeometry {
    fn svg_arc(&self, start: SourcePoint, end: SourcePoint) -> SvgArc {
        SvgArc {
            from: start,
            to: end,
            radii: self.radii,
            x_rotation: self.x_rotation,
            large_arc: self.large_arc,
            sweep: self.sweep,
        }
    }

    /// Decompose the arc from `start` to `end` into cubic beziers.
    ///
    /// Returns `None` for degenerate arcs (zero radius or coincident
    /// endpoints), which render as straight lines.
    pub fn to_cubics(
        &self,
        start: SourcePoint,
        end: SourcePoint,
        tolerance: f64,
    ) -> Option<Vec<CubicBez>> {
        let arc = Arc::from_svg_arc(&self.svg_arc(start, end))?;
        let mut current = start;
        let mut cubics = Vec::new();
        for el in arc.append_iter(tolerance) {
            if let PathEl::CurveTo(c1, c2, p) = el {
                cubics.push(CubicBez::new(current, c1, c2, p));
                current = p;
            }
        }
        Some(cubics)
    }
}

/// Arc decomposition tolerance, in source units.
pub(crate) const ARC_TOLERANCE: f64 = 0.1;

/// One decomposed segment of a source path.
///
/// `Other` covers segment kinds the outline builder has no special
/// handling for; it is drawn as a straight line to its end point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    Line {
        start: SourcePoint,
        end: SourcePoint,
    },
    Quadratic {
        start: SourcePoint,
        control: SourcePoint,
        end: SourcePoint,
    },
    Cubic {
        start: SourcePoint,
        control1: SourcePoint,
        control2: SourcePoint,
        end: SourcePoint,
    },
    Arc {
        start: SourcePoint,
        end: SourcePoint,
        geometry: ArcGeometry,
    },
    Other {
        start: SourcePoint,
        end: SourcePoint,
    },
}

impl PathSegment {
    pub fn line(start: SourcePoint, end: SourcePoint) -> Self {
        Self::Line { start, end }
    }

    pub fn quadratic(start: SourcePoint, control: SourcePoint, end: SourcePoint) -> Self {
        Self::Quadratic {
            start,
            control,
            end,
        }
    }

    pub fn cubic(
        start: SourcePoint,
        control1: SourcePoint,
        control2: SourcePoint,
        end: SourcePoint,
    ) -> Self {
        Self::Cubic {
            start,
            control1,
            control2,
            end,
        }
    }

    pub fn arc(start: SourcePoint, end: SourcePoint, geometry: ArcGeometry) -> Self {
        Self::Arc {
            start,
            end,
            geometry,
        }
    }

    pub fn start(&self) -> SourcePoint {
        match *self {
            Self::Line { start, .. }
            | Self::Quadratic { start, .. }
            | Self::Cubic { start, .. }
            | Self::Arc { start, .. }
            | Self::Other { start, .. } => start,
        }
    }

    pub fn end(&self) -> SourcePoint {
        match *self {
            Self::Line { end, .. }
            | Self::Quadratic { end, .. }
            | Self::Cubic { end, .. }
            | Self::Arc { end, .. }
            | Self::Other { end, .. } => end,
        }
    }

    /// Exact (extrema-based) bounding box in source space.
    pub fn bounding_box(&self) -> Rect {
        match *self {
            Self::Line { start, end } | Self::Other { start, end } => {
                ParamCurveExtrema::bounding_box(&Line::new(start, end))
            }
            Self::Quadratic {
                start,
                control,
                end,
            } => ParamCurveExtrema::bounding_box(&QuadBez::new(start, control, end)),
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => ParamCurveExtrema::bounding_box(&CubicBez::new(start, control1, control2, end)),
            Self::Arc {
                start,
                end,
                geometry,
            } => match geometry.to_cubics(start, end, ARC_TOLERANCE) {
                Some(cubics) => cubics
                    .iter()
                    .map(ParamCurveExtrema::bounding_box)
                    .fold(Rect::from_points(start, end), |acc, r| acc.union(r)),
                None => Rect::from_points(start, end),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    fn pt(x: f64, y: f64) -> SourcePoint {
        SourcePoint::new(x, y)
    }

    #[test]
    fn test_endpoints() {
        let seg = PathSegment::cubic(pt(0.0, 0.0), pt(1.0, 2.0), pt(3.0, 4.0), pt(5.0, 6.0));
        assert_eq!(seg.start(), pt(0.0, 0.0));
        assert_eq!(seg.end(), pt(5.0, 6.0));
    }

    #[test]
    fn test_quadratic_bbox_uses_extrema() {
        // Peak of this quadratic is at y = 50, not at the control point.
        let seg = PathSegment::quadratic(pt(0.0, 0.0), pt(50.0, 100.0), pt(100.0, 0.0));
        let bbox = seg.bounding_box();
        assert!((bbox.y1 - 50.0).abs() < 1e-9);
        assert_eq!(bbox.x0, 0.0);
        assert_eq!(bbox.x1, 100.0);
    }

    #[test]
    fn test_semicircle_arc_decomposes() {
        let geometry = ArcGeometry {
            radii: Vec2::new(50.0, 50.0),
            x_rotation: 0.0,
            large_arc: false,
            sweep: true,
        };
        let cubics = geometry.to_cubics(pt(0.0, 50.0), pt(100.0, 50.0), 0.1).unwrap();
        assert!(!cubics.is_empty());
        let last = cubics.last().unwrap();
        assert!((last.p3.x - 100.0).abs() < 1e-6);
        assert!((last.p3.y - 50.0).abs() < 1e-6);

        let bbox = PathSegment::arc(pt(0.0, 50.0), pt(100.0, 50.0), geometry).bounding_box();
        assert!((bbox.x0 - 0.0).abs() < 1e-6);
        assert!((bbox.x1 - 100.0).abs() < 1e-6);
        assert!((bbox.y1 - bbox.y0 - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_degenerate_arc() {
        let geometry = ArcGeometry {
            radii: Vec2::new(0.0, 0.0),
            x_rotation: PI / 4.0,
            large_arc: true,
            sweep: false,
        };
        assert!(geometry.to_cubics(pt(0.0, 0.0), pt(10.0, 0.0), 0.1).is_none());
    }
}
