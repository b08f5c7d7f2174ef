//! Screen/world/local coordinate mapping
//!
//! The camera is owned elsewhere; the frame input carries its screen -> world
//! mapping explicitly so the simulation never looks one up.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// Screen -> world mapping supplied by the camera owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub screen_to_world: Affine2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            screen_to_world: Affine2::IDENTITY,
        }
    }
}

impl ViewTransform {
    /// Orthographic view centred on `world_center`, with screen Y pointing down.
    ///
    /// `pixels_per_unit` is the zoom; `screen_size` is the viewport in pixels.
    pub fn orthographic(screen_size: Vec2, world_center: Vec2, pixels_per_unit: f32) -> Self {
        let scale = 1.0 / pixels_per_unit;
        let screen_to_world = Affine2::from_translation(world_center)
            * Affine2::from_scale(Vec2::new(scale, -scale))
            * Affine2::from_translation(-screen_size * 0.5);
        Self { screen_to_world }
    }

    #[inline]
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        self.screen_to_world.transform_point2(screen)
    }
}

/// Rigid placement of the disk in the world
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub translation: Vec2,
    /// Rotation in radians
    pub rotation: f32,
}

impl Placement {
    #[inline]
    pub fn local_to_world(&self) -> Affine2 {
        Affine2::from_angle_translation(self.rotation, self.translation)
    }

    #[inline]
    pub fn world_to_local(&self, world: Vec2) -> Vec2 {
        self.local_to_world().inverse().transform_point2(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_orthographic_center_maps_to_world_center() {
        let view = ViewTransform::orthographic(Vec2::new(800.0, 600.0), Vec2::new(2.0, 1.0), 100.0);
        let world = view.to_world(Vec2::new(400.0, 300.0));
        assert!((world - Vec2::new(2.0, 1.0)).length() < 1e-5);
        // Screen down is world down
        let below = view.to_world(Vec2::new(400.0, 400.0));
        assert!((below - Vec2::new(2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_world_to_local_undoes_rotation() {
        let placement = Placement {
            translation: Vec2::new(3.0, 0.0),
            rotation: FRAC_PI_2,
        };
        // World point one unit above the disk is on local +X after a quarter turn
        let local = placement.world_to_local(Vec2::new(3.0, 1.0));
        assert!((local - Vec2::new(1.0, 0.0)).length() < 1e-5);
    }
}
