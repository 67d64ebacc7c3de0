//! Source-space to font-unit coordinate mapping.

/// A point in source (drawing) space.
pub type SourcePoint = kurbo::Point;

/// A point in font-unit space.
///
/// Only [`CoordinateMapper`] produces these, so every `FontPoint` in an
/// outline has gone through the same transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontPoint {
    x: f64,
    y: f64,
}

impl FontPoint {
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Per-axis comparison within `eps`.
    pub fn approx_eq(&self, other: &FontPoint, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    /// The point `t` of the way from `self` to `target`.
    ///
    /// Computed as `self + t * (target - self)` per axis, which is the exact
    /// form used for quadratic degree elevation.
    pub(crate) fn toward(self, target: FontPoint, t: f64) -> FontPoint {
        FontPoint {
            x: self.x + t * (target.x - self.x),
            y: self.y + t * (target.y - self.y),
        }
    }

    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

/// Maps source-space points into font units.
///
/// With `vertical_flip` set, `y' = units_per_em - y - baseline_offset`;
/// otherwise `y' = y - baseline_offset`. `x' = x + x_shift`, where the shift
/// defaults to zero and carries the sidebearing placement offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    units_per_em: u16,
    baseline_offset: i32,
    vertical_flip: bool,
    x_shift: f64,
}

impl CoordinateMapper {
    pub fn new(units_per_em: u16, baseline_offset: i32, vertical_flip: bool) -> Self {
        Self {
            units_per_em,
            baseline_offset,
            vertical_flip,
            x_shift: 0.0,
        }
    }

    /// A mapper that leaves coordinates untouched.
    pub fn identity() -> Self {
        Self::new(0, 0, false)
    }

    /// Same transform, with `dx` added to every x coordinate.
    pub fn with_x_shift(self, dx: f64) -> Self {
        Self { x_shift: dx, ..self }
    }

    pub fn x_shift(&self) -> f64 {
        self.x_shift
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub fn baseline_offset(&self) -> i32 {
        self.baseline_offset
    }

    pub fn vertical_flip(&self) -> bool {
        self.vertical_flip
    }

    pub fn map(&self, point: SourcePoint) -> FontPoint {
        let baseline = f64::from(self.baseline_offset);
        let y = if self.vertical_flip {
            f64::from(self.units_per_em) - point.y - baseline
        } else {
            point.y - baseline
        };
        FontPoint { x: point.x + self.x_shift, y }
    }

    /// Inverse of [`map`](Self::map).
    pub fn unmap(&self, point: FontPoint) -> SourcePoint {
        let baseline = f64::from(self.baseline_offset);
        let y = if self.vertical_flip {
            f64::from(self.units_per_em) - point.y - baseline
        } else {
            point.y + baseline
        };
        SourcePoint::new(point.x - self.x_shift, y)
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_maps_baseline_to_zero() {
        let mapper = CoordinateMapper::new(1000, 200, true);
        let p = mapper.map(SourcePoint::new(12.0, 800.0));
        assert_eq!(p.x(), 12.0);
        assert_eq!(p.y(), 0.0);

        let top = mapper.map(SourcePoint::new(0.0, 0.0));
        assert_eq!(top.y(), 800.0);
    }

    #[test]
    fn test_no_flip_only_shifts() {
        let mapper = CoordinateMapper::new(1000, 200, false);
        let p = mapper.map(SourcePoint::new(5.0, 250.0));
        assert_eq!(p.x(), 5.0);
        assert_eq!(p.y(), 50.0);
    }

    #[test]
    fn test_x_shift() {
        let mapper = CoordinateMapper::new(1000, 0, false).with_x_shift(-5.0);
        let p = mapper.map(SourcePoint::new(10.0, 0.0));
        assert_eq!(p.x(), 5.0);
    }

    #[test]
    fn test_round_trip() {
        let points = [
            SourcePoint::new(0.0, 0.0),
            SourcePoint::new(123.456, -78.9),
            SourcePoint::new(1e4, 3.3e-3),
            SourcePoint::new(-250.5, 999.999),
        ];
        let mappers = [
            CoordinateMapper::new(1000, 200, true),
            CoordinateMapper::new(2048, -37, false),
            CoordinateMapper::new(1000, 200, true).with_x_shift(17.25),
            CoordinateMapper::identity(),
        ];

        for mapper in mappers {
            for point in points {
                let back = mapper.unmap(mapper.map(point));
                assert!((back.x - point.x).abs() < 1e-9, "{mapper:?} {point:?}");
                assert!((back.y - point.y).abs() < 1e-9, "{mapper:?} {point:?}");
            }
        }
    }

    #[test]
    fn test_toward_two_thirds() {
        let mapper = CoordinateMapper::identity();
        let p0 = mapper.map(SourcePoint::new(0.0, 0.0));
        let q = mapper.map(SourcePoint::new(50.0, 100.0));
        let c1 = p0.toward(q, 2.0 / 3.0);
        assert!((c1.x() - 100.0 / 3.0).abs() < 1e-9);
        assert!((c1.y() - 200.0 / 3.0).abs() < 1e-9);
    }
}
