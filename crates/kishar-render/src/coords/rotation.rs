use super::Vec2;

/// Rotation about a pivot, composed with a final translation.
///
/// This is the full transform vocabulary the renderer needs: shape corners
/// are built in local space, rotated around the pivot, then translated to
/// their draw position. There is no transform stack and no 3D.
#[derive(Debug, Copy, Clone)]
pub struct Rotation {
    sin: f32,
    cos: f32,
    pivot: Vec2,
}

impl Rotation {
    /// Rotation by `angle` radians (clockwise in +Y-down pixel space) around
    /// `pivot` in the shape's local coordinates.
    #[inline]
    pub fn around(angle: f32, pivot: Vec2) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { sin, cos, pivot }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self { sin: 0.0, cos: 1.0, pivot: Vec2::zero() }
    }

    /// True when this is a no-op rotation (angle 0 exactly).
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.sin == 0.0 && self.cos == 1.0
    }

    /// Applies the rotation to a local-space point: shift to the pivot,
    /// rotate, shift back.
    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        let d = p - self.pivot;
        Vec2::new(
            d.x * self.cos - d.y * self.sin + self.pivot.x,
            d.x * self.sin + d.y * self.cos + self.pivot.y,
        )
    }

    /// Rotates each corner in place and translates by `offset`.
    pub fn apply_corners<const N: usize>(&self, corners: &mut [Vec2; N], offset: Vec2) {
        for c in corners.iter_mut() {
            *c = self.apply(*c) + offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn identity_is_noop() {
        let r = Rotation::identity();
        assert!(r.is_identity());
        assert_eq!(r.apply(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn quarter_turn_about_origin() {
        let r = Rotation::around(std::f32::consts::FRAC_PI_2, Vec2::zero());
        // +90° in +Y-down space maps +X onto +Y.
        assert!(close(r.apply(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn pivot_point_is_fixed() {
        let pivot = Vec2::new(5.0, 7.0);
        let r = Rotation::around(1.234, pivot);
        assert!(close(r.apply(pivot), pivot));
    }

    #[test]
    fn corners_rotate_and_translate() {
        let r = Rotation::around(std::f32::consts::PI, Vec2::new(1.0, 1.0));
        let mut corners = [Vec2::zero(), Vec2::new(2.0, 0.0)];
        r.apply_corners(&mut corners, Vec2::new(10.0, 10.0));
        assert!(close(corners[0], Vec2::new(12.0, 12.0)));
        assert!(close(corners[1], Vec2::new(10.0, 12.0)));
    }
}
