//! Source-space bounding boxes.

use kurbo::Rect;

use crate::segment::PathSegment;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Min of mins, max of maxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

impl From<Rect> for BBox {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.x1, rect.y1)
    }
}

/// A primitive shape described by explicit position and size attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
}

impl Primitive {
    pub fn bbox(&self) -> BBox {
        match *self {
            Primitive::Rect { x, y, width, height } => BBox::from(Rect::new(x, y, x + width, y + height)),
            Primitive::Circle { cx, cy, r } => BBox::new(cx - r, cy - r, cx + r, cy + r),
            Primitive::Ellipse { cx, cy, rx, ry } => BBox::new(cx - rx, cy - ry, cx + rx, cy + ry),
            Primitive::Line { x1, y1, x2, y2 } => BBox::from(Rect::new(x1, y1, x2, y2)),
        }
    }
}

/// Union of the segment bounding boxes of one path, or `None` if it has no
/// segments.
pub fn path_bounds(segments: &[PathSegment]) -> Option<BBox> {
    segments
        .iter()
        .map(|segment| BBox::from(segment.bounding_box()))
        .reduce(|acc, bbox| acc.union(&bbox))
}

/// The geometry found in one source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeSource {
    /// Decomposed paths, one entry per source path element.
    pub paths: Vec<Vec<PathSegment>>,
    /// Primitive shapes, used only for bounds when no path data exists.
    pub primitives: Vec<Primitive>,
}

impl ShapeSource {
    pub fn new(paths: Vec<Vec<PathSegment>>, primitives: Vec<Primitive>) -> Self {
        Self { paths, primitives }
    }

    pub fn has_path_data(&self) -> bool {
        self.paths.iter().any(|path| !path.is_empty())
    }

    /// Source-space bounding box.
    ///
    /// The union of every path's own bounds; when there is no path data at
    /// all, the union of the primitive shapes' analytic bounds; otherwise
    /// `None`.
    pub fn bounds(&self) -> Option<BBox> {
        if self.has_path_data() {
            return self
                .paths
                .iter()
                .filter_map(|path| path_bounds(path))
                .reduce(|acc, bbox| acc.union(&bbox));
        }
        self.primitives
            .iter()
            .map(Primitive::bbox)
            .reduce(|acc, bbox| acc.union(&bbox))
    }
}
