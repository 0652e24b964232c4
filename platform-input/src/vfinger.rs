//! Virtual second finger for pinch-to-zoom, rotate and tilt.
//!
//! While the left button is held with Ctrl (or Shift), every mouse position
//! is mirrored through the frame center (or its vertical axis) and emitted
//! as a second touch pointer, so a single mouse can drive two-finger
//! gestures. The gesture's pivot is therefore always the center of the
//! screen.

use mirror_common::{Point, Size};

/// Mirror `point` within `size`: about the vertical axis when `invert_x`,
/// about the horizontal axis when `invert_y`. Applying the same reflection
/// twice yields the original point.
pub fn reflect_point(mut point: Point, size: Size, invert_x: bool, invert_y: bool) -> Point {
    if invert_x {
        point.x = size.width - point.x;
    }
    if invert_y {
        point.y = size.height - point.y;
    }
    point
}

/// Virtual-finger state. `down` flips only when the corresponding touch
/// message was accepted by the outbound queue.
#[derive(Debug, Default)]
pub(crate) struct VirtualFinger {
    pub(crate) down: bool,
    pub(crate) invert_x: bool,
    pub(crate) invert_y: bool,
}

impl VirtualFinger {
    /// Reflect a frame-space point according to the current inversion flags.
    pub(crate) fn reflect(&self, point: Point, frame_size: Size) -> Point {
        reflect_point(point, frame_size, self.invert_x, self.invert_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reflect_both_axes_is_center_symmetry() {
        let size = Size::new(400, 600);
        assert_eq!(
            reflect_point(Point::new(100, 50), size, true, true),
            Point::new(300, 550)
        );
    }

    #[test]
    fn test_reflect_x_only_is_tilt_mirror() {
        let size = Size::new(400, 600);
        assert_eq!(
            reflect_point(Point::new(100, 50), size, true, false),
            Point::new(300, 50)
        );
    }

    #[test]
    fn test_reflect_no_axes_is_identity() {
        let size = Size::new(400, 600);
        let p = Point::new(17, 23);
        assert_eq!(reflect_point(p, size, false, false), p);
    }

    proptest! {
        /// Reflection is an involution for any point and flag combination.
        #[test]
        fn test_reflect_involution(
            x in -10_000i32..10_000,
            y in -10_000i32..10_000,
            w in 1i32..10_000,
            h in 1i32..10_000,
            invert_x: bool,
            invert_y: bool,
        ) {
            let p = Point::new(x, y);
            let size = Size::new(w, h);
            let once = reflect_point(p, size, invert_x, invert_y);
            let twice = reflect_point(once, size, invert_x, invert_y);
            prop_assert_eq!(twice, p);
        }
    }
}
