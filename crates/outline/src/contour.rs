//! Contours, outlines, and assembly of segment runs into contours.

use std::slice::Iter;

use crate::{
    mapper::{CoordinateMapper, FontPoint},
    pen::{OutlinePen, Pen, SegmentFlattener},
    segment::PathSegment,
};

/// Per-axis tolerance for continuity and closing decisions, in font units.
pub const EPSILON: f64 = 1e-6;

/// A drawing operation following a contour's start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Line(FontPoint),
    Curve(FontPoint, FontPoint, FontPoint),
}

impl Op {
    /// The on-curve point this operation ends at.
    pub fn end(&self) -> FontPoint {
        match *self {
            Op::Line(p) | Op::Curve(_, _, p) => p,
        }
    }
}

/// One continuous sub-path: a start point followed by at least one
/// operation, either closed or left open.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    start: FontPoint,
    ops: Vec<Op>,
    closed: bool,
}

impl Contour {
    pub(crate) fn new(start: FontPoint, ops: Vec<Op>, closed: bool) -> Self {
        debug_assert!(!ops.is_empty());
        Self { start, ops, closed }
    }

    pub fn start(&self) -> FontPoint {
        self.start
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The last on-curve point.
    pub fn end(&self) -> FontPoint {
        self.ops.last().map(Op::end).unwrap_or(self.start)
    }

    /// Replay this contour into another pen.
    pub fn draw<P: Pen + ?Sized>(&self, pen: &mut P) {
        pen.move_to(self.start);
        for op in &self.ops {
            match *op {
                Op::Line(p) => pen.line_to(p),
                Op::Curve(c1, c2, p) => pen.curve_to(c1, c2, p),
            }
        }
        if self.closed {
            pen.close_path();
        } else {
            pen.end_path();
        }
    }
}

/// The ordered contours of one glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    contours: Vec<Contour>,
}

impl GlyphOutline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, contour: Contour) {
        self.contours.push(contour);
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Contour> {
        self.contours.iter()
    }
}

impl Extend<Contour> for GlyphOutline {
    fn extend<T: IntoIterator<Item = Contour>>(&mut self, iter: T) {
        self.contours.extend(iter);
    }
}

impl<'a> IntoIterator for &'a GlyphOutline {
    type Item = &'a Contour;
    type IntoIter = Iter<'a, Contour>;

    fn into_iter(self) -> Self::IntoIter {
        self.contours.iter()
    }
}

/// Groups a segment sequence into contours by positional continuity.
///
/// Continuity and closing are both decided on mapped coordinates, with
/// [`EPSILON`] per axis.
#[derive(Debug, Clone, Copy)]
pub struct ContourAssembler {
    flattener: SegmentFlattener,
}

impl ContourAssembler {
    pub fn new(mapper: CoordinateMapper) -> Self {
        Self { flattener: SegmentFlattener::new(mapper) }
    }

    pub fn with_flattener(flattener: SegmentFlattener) -> Self {
        Self { flattener }
    }

    fn mapper(&self) -> &CoordinateMapper {
        self.flattener.mapper()
    }

    /// Split `segments` into maximal continuous runs.
    pub fn split<'s>(&self, segments: &'s [PathSegment]) -> Vec<&'s [PathSegment]> {
        let mut runs = Vec::new();
        let mut run_start = 0;
        let mut previous_end: Option<FontPoint> = None;

        for (idx, segment) in segments.iter().enumerate() {
            let start = self.mapper().map(segment.start());
            if let Some(prev) = previous_end
                && !prev.approx_eq(&start, EPSILON)
            {
                runs.push(&segments[run_start..idx]);
                run_start = idx;
            }
            previous_end = Some(self.mapper().map(segment.end()));
        }
        if run_start < segments.len() {
            runs.push(&segments[run_start..]);
        }
        runs
    }

    /// Draw every continuous run of `segments` into `pen`.
    pub fn draw<P: Pen + ?Sized>(&self, segments: &[PathSegment], pen: &mut P) {
        for run in self.split(segments) {
            let (Some(first), Some(last)) = (run.first(), run.last()) else {
                continue;
            };
            let start = self.mapper().map(first.start());
            let end = self.mapper().map(last.end());

            pen.move_to(start);
            for segment in run {
                self.flattener.flatten(segment, pen);
            }
            if start.approx_eq(&end, EPSILON) {
                pen.close_path();
            } else {
                pen.end_path();
            }
        }
    }

    pub fn assemble(&self, segments: &[PathSegment]) -> Vec<Contour> {
        let mut pen = OutlinePen::new();
        self.draw(segments, &mut pen);
        pen.into_outline().contours
    }
}
