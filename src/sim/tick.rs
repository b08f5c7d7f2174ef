//! Per-frame update
//!
//! Order matters: orientation first (rigid, independent of vertices), then the
//! stretch (may overwrite selected vertices), then relaxation, which must see
//! the selected vertices at their pointer-driven positions so they act as
//! moving anchors for their free neighbours. Launch motion moves the body last.

use super::contact::{self, ContactAction, PointerPhase, PointerSample};
use super::orient::face_pointer;
use super::relax::{Dynamics, SpringParams, relax};
use super::state::Surface;
use super::stretch::stretch_toward;
use super::view::ViewTransform;
use crate::consts::MAX_FRAME_DT;

/// Everything the disk needs from the outside for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// The single active pointer, if any
    pub pointer: Option<PointerSample>,
    /// Camera mapping for the pointer
    pub view: ViewTransform,
    /// Collision radius of the disk, shared with collision logic elsewhere
    pub bounding_radius: f32,
}

impl FrameInput {
    pub fn new(pointer: Option<PointerSample>, view: ViewTransform, bounding_radius: f32) -> Self {
        Self {
            pointer,
            view,
            bounding_radius,
        }
    }

    /// No pointer on screen
    pub fn idle(view: ViewTransform, bounding_radius: f32) -> Self {
        Self::new(None, view, bounding_radius)
    }
}

/// Advance the disk by one frame
pub fn tick(surface: &mut Surface, input: &FrameInput, dt: f32) {
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
    // Springs only; the body still moves by the full frame time
    let relax_dt = dt.min(MAX_FRAME_DT);

    let pointer_world = input
        .pointer
        .map(|p| input.view.to_world(p.screen))
        .filter(|w| w.is_finite());

    // Orientation
    surface.placement.rotation = face_pointer(
        surface.placement.rotation,
        surface.placement.translation,
        pointer_world,
    );

    // Stretch
    if let (Some(sample), Some(world)) = (input.pointer, pointer_world) {
        let local = surface.placement.world_to_local(world);
        // Launch arming follows the raw phases, not the mesh contact
        match sample.phase {
            PointerPhase::Began => {
                let inside = contact::hit_test(local, input.bounding_radius);
                surface.launcher.press(inside);
            }
            PointerPhase::Ended | PointerPhase::Cancelled => {
                surface.launcher.release(surface.placement.translation, world);
            }
            PointerPhase::Moved => {}
        }
        let action = contact::advance(&mut surface.contact, sample.phase, local, input.bounding_radius);
        apply_contact_action(surface, action);
    }
    if !surface.contact.is_active() {
        surface.clear_selection();
    }

    // Relaxation
    if relax_dt > 0.0 {
        let params = SpringParams {
            stiffness: surface.config.stiffness,
            rest_pull: surface.config.rest_pull,
        };
        let Surface {
            topology,
            positions,
            velocities,
            accelerations,
            pinned,
            ..
        } = &mut *surface;
        relax(
            Dynamics {
                positions,
                velocities,
                accelerations,
            },
            &topology.rest,
            &topology.adjacency,
            pinned,
            params,
            relax_dt,
        );
    }

    // Launch
    surface
        .launcher
        .advance(&mut surface.placement.translation, surface.config.launch_speed, dt);

    surface.frame += 1;
}

fn apply_contact_action(surface: &mut Surface, action: ContactAction) {
    match action {
        ContactAction::None | ContactAction::Release | ContactAction::Reenter => {}
        ContactAction::Begin { at } => {
            let lead = contact::nearest_outer_vertex(surface.topology(), &surface.positions, at);
            let mut selection = std::mem::take(&mut surface.selection);
            contact::build_selection(surface.topology(), lead, &mut selection);
            surface.selection = selection;
            surface.set_selection_pins();
        }
        ContactAction::Stretch { from, to } => {
            let report = stretch_toward(
                &mut surface.positions,
                &surface.selection,
                from,
                to,
                &surface.config,
            );
            log::trace!(
                "Stretch: {} iterations, lead {} from pointer",
                report.iterations,
                report.lead_distance
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DetailPreset, SurfaceConfig};
    use crate::consts::SIM_DT;
    use glam::Vec2;

    const RADIUS: f32 = 1.0;

    fn surface() -> Surface {
        Surface::new(SurfaceConfig::from_preset(DetailPreset::Low))
    }

    fn input(phase: PointerPhase, x: f32, y: f32) -> FrameInput {
        FrameInput::new(
            Some(PointerSample::new(phase, Vec2::new(x, y))),
            ViewTransform::default(),
            RADIUS,
        )
    }

    fn idle() -> FrameInput {
        FrameInput::idle(ViewTransform::default(), RADIUS)
    }

    #[test]
    fn test_idle_frames_keep_rest_shape() {
        let mut s = surface();
        for _ in 0..30 {
            tick(&mut s, &idle(), SIM_DT);
        }
        assert_eq!(s.positions(), s.rest());
        assert_eq!(s.frame, 30);
    }

    #[test]
    fn test_tap_without_drag_leaves_shape() {
        let mut s = surface();
        let before = s.positions().to_vec();

        tick(&mut s, &input(PointerPhase::Began, 0.9, 0.0), SIM_DT);
        assert!(s.contact().is_active());
        assert_eq!(s.selection().len(), s.topology().verts_per_row as usize);
        assert_eq!(s.selection()[0], 1);

        tick(&mut s, &input(PointerPhase::Ended, 0.9, 0.0), SIM_DT);
        assert!(!s.contact().is_active());
        assert!(s.selection().is_empty());
        assert_eq!(s.positions(), before.as_slice());
    }

    #[test]
    fn test_press_outside_registers_nothing() {
        let mut s = surface();
        s.nudge(5, Vec2::new(0.05, 0.0));
        let energy = s.displacement_energy();

        tick(&mut s, &input(PointerPhase::Began, 3.0, 0.0), SIM_DT);
        assert!(!s.contact().is_active());
        assert!(s.selection().is_empty());

        for _ in 0..200 {
            tick(&mut s, &input(PointerPhase::Moved, 3.0, 0.0), SIM_DT);
        }
        assert!(s.displacement_energy() < energy);
    }

    #[test]
    fn test_drag_out_stretches_rim_then_recovers() {
        let mut s = surface();
        tick(&mut s, &input(PointerPhase::Began, 0.5, 0.0), SIM_DT);
        tick(&mut s, &input(PointerPhase::Moved, 1.3, 0.0), SIM_DT);

        let lead = s.positions()[1];
        assert!(lead.x > 1.15, "lead at {lead}");
        // Lead is pinned, so it stays where the stretch left it
        tick(&mut s, &input(PointerPhase::Moved, 1.3, 0.0), SIM_DT);
        assert_eq!(s.positions()[1], lead);

        // Free vertex just inside the lead gets dragged outward by its spring
        let inner = s.topology().index(1, 0) as usize;
        for _ in 0..10 {
            tick(&mut s, &input(PointerPhase::Moved, 1.3, 0.0), SIM_DT);
        }
        assert!(s.positions()[inner].length() > s.rest()[inner].length());

        tick(&mut s, &input(PointerPhase::Ended, 1.3, 0.0), SIM_DT);
        assert!(s.selection().is_empty());
        s.stop_motion();

        for _ in 0..3000 {
            tick(&mut s, &idle(), SIM_DT);
        }
        assert!(s.displacement_energy() < 1e-6, "energy {}", s.displacement_energy());
    }

    #[test]
    fn test_reentry_releases_selection() {
        let mut s = surface();
        tick(&mut s, &input(PointerPhase::Began, 0.5, 0.0), SIM_DT);
        tick(&mut s, &input(PointerPhase::Moved, 1.4, 0.0), SIM_DT);
        assert!(!s.selection().is_empty());

        tick(&mut s, &input(PointerPhase::Moved, 0.4, 0.0), SIM_DT);
        assert!(!s.contact().is_active());
        assert!(s.selection().is_empty());
        // Re-entry is not a release: no slingshot yet
        assert_eq!(s.launch_velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_release_after_reentry_still_launches() {
        let mut s = surface();
        tick(&mut s, &input(PointerPhase::Began, 0.5, 0.0), SIM_DT);
        tick(&mut s, &input(PointerPhase::Moved, 1.6, 0.0), SIM_DT);
        tick(&mut s, &input(PointerPhase::Moved, 0.9, 0.0), SIM_DT);
        assert!(!s.contact().is_active());

        tick(&mut s, &input(PointerPhase::Ended, 0.9, 0.0), SIM_DT);
        assert!((s.launch_velocity() - Vec2::new(-0.9, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_press_while_paused_never_launches() {
        let mut s = surface();
        s.pause_controls(true);
        tick(&mut s, &input(PointerPhase::Began, 0.5, 0.0), SIM_DT);
        s.pause_controls(false);
        tick(&mut s, &input(PointerPhase::Ended, 0.5, 0.0), SIM_DT);
        assert_eq!(s.launch_velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_launch_uses_full_frame_time() {
        let mut s = surface();
        tick(&mut s, &input(PointerPhase::Began, 0.5, 0.0), SIM_DT);
        tick(&mut s, &input(PointerPhase::Ended, 0.5, 0.0), SIM_DT);
        assert_eq!(s.launch_velocity(), Vec2::new(-0.5, 0.0));

        // Slow frame: springs are clamped, the body is not
        let start = s.translation();
        tick(&mut s, &idle(), 0.1);
        assert!((s.translation().x - (start.x - 0.05)).abs() < 1e-6);
        assert!(s.positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_release_launches_away_from_pointer() {
        let mut s = surface();
        tick(&mut s, &input(PointerPhase::Began, 0.0, 0.5), SIM_DT);
        tick(&mut s, &input(PointerPhase::Moved, 0.0, 1.5), SIM_DT);
        tick(&mut s, &input(PointerPhase::Ended, 0.0, 1.5), SIM_DT);
        assert!(s.launch_velocity().y < 0.0);

        let start = s.translation();
        for _ in 0..10 {
            tick(&mut s, &idle(), SIM_DT);
        }
        assert!(s.translation().y < start.y);
    }

    #[test]
    fn test_paused_controls_do_not_launch() {
        let mut s = surface();
        s.pause_controls(true);
        tick(&mut s, &input(PointerPhase::Began, 0.5, 0.0), SIM_DT);
        tick(&mut s, &input(PointerPhase::Ended, 0.5, 0.0), SIM_DT);
        assert_eq!(s.launch_velocity(), Vec2::ZERO);
        assert_eq!(s.translation(), Vec2::ZERO);
    }

    #[test]
    fn test_orientation_follows_pointer_and_holds() {
        let mut s = surface();
        tick(&mut s, &input(PointerPhase::Moved, 0.0, 4.0), SIM_DT);
        assert!((s.rotation() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        tick(&mut s, &idle(), SIM_DT);
        assert!((s.rotation() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_mapped_through_rotation() {
        // Pointer straight above: the disk turns so its front faces up and the
        // nearest rim vertex is still vertex 1
        let mut s = surface();
        tick(&mut s, &input(PointerPhase::Began, 0.0, 0.8), SIM_DT);
        assert_eq!(s.selection().first(), Some(&1));
    }

    #[test]
    fn test_bad_dt_skips_integration() {
        let mut s = surface();
        s.nudge(5, Vec2::new(0.05, 0.0));
        tick(&mut s, &idle(), SIM_DT);
        let snapshot = s.positions().to_vec();
        tick(&mut s, &idle(), f32::NAN);
        tick(&mut s, &idle(), -1.0);
        assert_eq!(s.positions(), snapshot.as_slice());
        assert_eq!(s.frame, 3);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            input(PointerPhase::Began, 0.3, 0.2),
            input(PointerPhase::Moved, 1.2, 0.7),
            input(PointerPhase::Moved, 1.6, 0.4),
            input(PointerPhase::Ended, 1.6, 0.4),
            idle(),
        ];
        let mut a = surface();
        let mut b = surface();
        for frame in &inputs {
            tick(&mut a, frame, SIM_DT);
            tick(&mut b, frame, SIM_DT);
        }
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.translation(), b.translation());
    }
}
