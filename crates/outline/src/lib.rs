//! # Glyph Outline Geometry
//!
//! Turn decomposed source paths into font-unit glyph outlines.
//!
//! The pieces are small and composable:
//!
//! - [`CoordinateMapper`] maps source-space points into font units
//! - [`SegmentFlattener`] draws one [`PathSegment`] into a [`Pen`]
//! - [`ContourAssembler`] splits a segment run into closed or open [`Contour`]s
//! - [`ShapeSource::bounds`] and [`plan`] derive spacing from source geometry
//!
//! ## Example
//!
//! ```
//! use svgfont_outline::{ContourAssembler, CoordinateMapper, PathSegment, SourcePoint};
//!
//! let mapper = CoordinateMapper::new(1000, 200, true);
//! let segments = [
//!     PathSegment::line(SourcePoint::new(0.0, 0.0), SourcePoint::new(100.0, 0.0)),
//!     PathSegment::line(SourcePoint::new(100.0, 0.0), SourcePoint::new(0.0, 0.0)),
//! ];
//! let contours = ContourAssembler::new(mapper).assemble(&segments);
//! assert_eq!(contours.len(), 1);
//! assert!(contours[0].is_closed());
//! ```

mod bounds;
mod contour;
mod mapper;
mod pen;
mod segment;
mod sidebearing;

pub use bounds::{BBox, Primitive, ShapeSource, path_bounds};
pub use contour::{Contour, ContourAssembler, EPSILON, GlyphOutline, Op};
pub use mapper::{CoordinateMapper, FontPoint, SourcePoint};
pub use pen::{OutlinePen, Pen, SegmentFlattener};
pub use segment::{ArcGeometry, PathSegment};
pub use sidebearing::{SidebearingPlan, plan};
