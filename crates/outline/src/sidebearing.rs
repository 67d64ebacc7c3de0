//! Automatic sidebearing planning.

use crate::bounds::BBox;

/// Advance width and horizontal placement derived from a glyph's bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebearingPlan {
    pub width: i32,
    pub left_margin: i32,
    pub right_margin: i32,
    /// Shift that puts the shape's left edge exactly `margin` from the origin.
    pub horizontal_offset: f64,
}

/// Plan equal left and right margins of `margin` units around `bbox`.
///
/// Width and margins are truncated with `floor`, not rounded.
pub fn plan(bbox: Option<&BBox>, margin: f64) -> Option<SidebearingPlan> {
    let bbox = bbox?;
    let glyph_width = bbox.max_x - bbox.min_x;
    let width = (margin + glyph_width + margin).floor() as i32;
    let margin_units = margin.floor() as i32;

    Some(SidebearingPlan {
        width,
        left_margin: margin_units,
        right_margin: margin_units,
        horizontal_offset: margin - bbox.min_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan() {
        let bbox = BBox::new(10.0, 0.0, 90.0, 100.0);
        let plan = plan(Some(&bbox), 5.0).unwrap();
        assert_eq!(plan.width, 90);
        assert_eq!(plan.left_margin, 5);
        assert_eq!(plan.right_margin, 5);
        assert_eq!(plan.horizontal_offset, -5.0);
    }

    #[test]
    fn test_plan_floors() {
        let bbox = BBox::new(0.25, 0.0, 80.9, 10.0);
        let plan = plan(Some(&bbox), 10.5).unwrap();
        // 10.5 + 80.65 + 10.5 = 101.65
        assert_eq!(plan.width, 101);
        assert_eq!(plan.left_margin, 10);
        assert_eq!(plan.right_margin, 10);
        assert!((plan.horizontal_offset - 10.25).abs() < 1e-12);
    }

    #[test]
    fn test_plan_without_bbox() {
        assert_eq!(plan(None, 50.0), None);
    }
}
