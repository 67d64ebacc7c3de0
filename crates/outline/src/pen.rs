//! Drawing sinks and segment flattening.

use log::warn;

use crate::{
    contour::{Contour, GlyphOutline, Op},
    mapper::{CoordinateMapper, FontPoint},
    segment::{ARC_TOLERANCE, PathSegment},
};

/// A drawing sink receiving font-unit outline operations.
pub trait Pen {
    fn move_to(&mut self, p: FontPoint);
    fn line_to(&mut self, p: FontPoint);
    fn curve_to(&mut self, c1: FontPoint, c2: FontPoint, p: FontPoint);
    fn close_path(&mut self);
    fn end_path(&mut self);
}

/// Draws [`PathSegment`]s into a [`Pen`] as line-to and cubic curve-to
/// operations, mapping every point through a [`CoordinateMapper`].
#[derive(Debug, Clone, Copy)]
pub struct SegmentFlattener {
    mapper: CoordinateMapper,
    arc_tolerance: f64,
}

impl SegmentFlattener {
    pub fn new(mapper: CoordinateMapper) -> Self {
        Self { mapper, arc_tolerance: ARC_TOLERANCE }
    }

    /// Set the arc-to-cubic decomposition tolerance (source units).
    pub fn with_arc_tolerance(mut self, tolerance: f64) -> Self {
        self.arc_tolerance = tolerance;
        self
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Emit the drawing operations for one segment.
    ///
    /// The segment's start point is assumed to be the pen's current point.
    pub fn flatten<P: Pen + ?Sized>(&self, segment: &PathSegment, pen: &mut P) {
        let map = |p| self.mapper.map(p);
        match *segment {
            PathSegment::Line { end, .. } | PathSegment::Other { end, .. } => {
                pen.line_to(map(end));
            }
            PathSegment::Quadratic {
                start,
                control,
                end,
            } => {
                let p0 = map(start);
                let q = map(control);
                let p2 = map(end);
                let c1 = p0.toward(q, 2.0 / 3.0);
                let c2 = p2.toward(q, 2.0 / 3.0);
                pen.curve_to(c1, c2, p2);
            }
            PathSegment::Cubic {
                control1,
                control2,
                end,
                ..
            } => {
                pen.curve_to(map(control1), map(control2), map(end));
            }
            PathSegment::Arc {
                start,
                end,
                geometry,
            } => match geometry.to_cubics(start, end, self.arc_tolerance) {
                Some(cubics) => {
                    for cubic in cubics {
                        pen.curve_to(map(cubic.p1), map(cubic.p2), map(cubic.p3));
                    }
                }
                None => pen.line_to(map(end)),
            },
        }
    }
}

/// A [`Pen`] that records what it is given into a [`GlyphOutline`].
///
/// Paths without any drawing operation after their move are dropped.
#[derive(Debug, Default)]
pub struct OutlinePen {
    outline: GlyphOutline,
    current: Option<(FontPoint, Vec<Op>)>,
}

impl OutlinePen {
    pub fn new() -> Self {
        Self::default()
    }

    fn finish(&mut self, closed: bool) {
        if let Some((start, ops)) = self.current.take()
            && !ops.is_empty()
        {
            self.outline.push(Contour::new(start, ops, closed));
        }
    }

    fn push(&mut self, op: Op) {
        match self.current.as_mut() {
            Some((_, ops)) => ops.push(op),
            None => warn!("Drawing operation without a current point, ignored"),
        }
    }

    /// Finish any open path and return the recorded outline.
    pub fn into_outline(mut self) -> GlyphOutline {
        self.finish(false);
        self.outline
    }
}

impl Pen for OutlinePen {
    fn move_to(&mut self, p: FontPoint) {
        self.finish(false);
        self.current = Some((p, Vec::new()));
    }

    fn line_to(&mut self, p: FontPoint) {
        self.push(Op::Line(p));
    }

    fn curve_to(&mut self, c1: FontPoint, c2: FontPoint, p: FontPoint) {
        self.push(Op::Curve(c1, c2, p));
    }

    fn close_path(&mut self) {
        self.finish(true);
    }

    fn end_path(&mut self) {
        self.finish(false);
    }
}
