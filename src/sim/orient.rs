//! Rigid orientation of the whole disk toward the pointer

use glam::Vec2;

use crate::{cartesian_to_polar, normalize_angle};

/// Local direction that is turned to face the pointer (rim vertex 1 at rest)
pub const FRONT: Vec2 = Vec2::X;

/// Rotation (radians) that makes [`FRONT`] point from `center` at `pointer`.
///
/// Returns `current` unchanged when there is no pointer or it sits exactly on
/// the center.
pub fn face_pointer(current: f32, center: Vec2, pointer: Option<Vec2>) -> f32 {
    let Some(pointer) = pointer else {
        return current;
    };
    let to_pointer = pointer - center;
    if !to_pointer.is_finite() || to_pointer.length_squared() <= f32::EPSILON * f32::EPSILON {
        return current;
    }
    let (_, theta) = cartesian_to_polar(to_pointer);
    normalize_angle(theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat2;
    use std::f32::consts::PI;

    #[test]
    fn test_faces_pointer() {
        let rotation = face_pointer(0.0, Vec2::new(1.0, 1.0), Some(Vec2::new(1.0, -3.0)));
        assert!((rotation - (-PI / 2.0)).abs() < 1e-6);
        let front = Mat2::from_angle(rotation) * FRONT;
        assert!((front - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_holds_without_pointer() {
        assert_eq!(face_pointer(0.7, Vec2::ZERO, None), 0.7);
    }

    #[test]
    fn test_holds_when_pointer_on_center() {
        assert_eq!(face_pointer(0.7, Vec2::ONE, Some(Vec2::ONE)), 0.7);
    }
}
