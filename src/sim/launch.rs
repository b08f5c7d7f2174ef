//! Slingshot motion of the whole disk
//!
//! Releasing a press that began inside the disk flings the body away from
//! the release point, faster the further the pointer was dragged. Launch
//! eligibility is tracked apart from the mesh contact, so a drag that comes
//! back inside the disk still launches when it is released.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Translation state of the disk body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Launcher {
    /// Aim vector set at release (world units); scaled by speed when applied
    pub velocity: Vec2,
    /// Controls paused: presses and releases are ignored
    pub paused: bool,
    /// A press began inside the disk and has not been released yet
    pub armed: bool,
}

impl Launcher {
    /// A press landed; arms the launcher when it hit the disk
    pub fn press(&mut self, inside: bool) {
        if !self.paused && inside {
            self.armed = true;
        }
    }

    /// Aim away from the release point if a press armed the launcher
    pub fn release(&mut self, body: Vec2, pointer_world: Vec2) {
        if self.paused || !self.armed {
            return;
        }
        let aim = body - pointer_world;
        if aim.is_finite() {
            self.velocity = aim;
            self.armed = false;
            log::debug!("Launched with aim {aim}");
        }
    }

    /// Advance the body translation
    pub fn advance(&self, translation: &mut Vec2, speed: f32, dt: f32) {
        *translation += self.velocity * speed * dt;
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_aims_away_from_pointer() {
        let mut launcher = Launcher::default();
        launcher.press(true);
        launcher.release(Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert_eq!(launcher.velocity, Vec2::new(-2.0, 0.0));

        let mut translation = Vec2::ZERO;
        launcher.advance(&mut translation, 1.5, 0.5);
        assert_eq!(translation, Vec2::new(-1.5, 0.0));
    }

    #[test]
    fn test_release_without_press_ignored() {
        let mut launcher = Launcher::default();
        launcher.press(false);
        launcher.release(Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert_eq!(launcher.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_paused_release_ignored() {
        let mut launcher = Launcher::default();
        launcher.press(true);
        launcher.set_paused(true);
        launcher.release(Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert_eq!(launcher.velocity, Vec2::ZERO);
        // Still armed once controls resume
        launcher.set_paused(false);
        launcher.release(Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert_eq!(launcher.velocity, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn test_press_while_paused_does_not_arm() {
        let mut launcher = Launcher::default();
        launcher.set_paused(true);
        launcher.press(true);
        launcher.set_paused(false);
        launcher.release(Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert_eq!(launcher.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_release_disarms() {
        let mut launcher = Launcher::default();
        launcher.press(true);
        launcher.release(Vec2::ZERO, Vec2::new(1.0, 0.0));
        launcher.release(Vec2::ZERO, Vec2::new(0.0, 3.0));
        assert_eq!(launcher.velocity, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_stop() {
        let mut launcher = Launcher::default();
        launcher.press(true);
        launcher.release(Vec2::ONE, Vec2::ZERO);
        launcher.stop();
        let mut translation = Vec2::ONE;
        launcher.advance(&mut translation, 1.0, 1.0);
        assert_eq!(translation, Vec2::ONE);
    }
}
