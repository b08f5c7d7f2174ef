//! Directional stretching of the rim toward the pointer
//!
//! The lead vertex (nearest the initial touch) moves the most; vertices
//! further along the selection ordering get a smaller, `atan`-eased share of
//! each step, so the rim is pulled into a tapered bulge instead of translated.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use crate::config::SurfaceConfig;

/// Easing parameters for one pointer sample
#[derive(Debug, Clone, Copy)]
pub struct StretchCurve {
    /// Normalisation so the curve equals `step` at `x = 1`
    scale: f32,
    /// Offset proportional to the raw pointer delta
    offset: f32,
    decay: f32,
}

impl StretchCurve {
    pub fn new(step: f32, decay: f32, gain: f32, raw_delta: f32) -> Self {
        let offset = gain * raw_delta;
        Self {
            scale: step / (FRAC_PI_2 - (1.0 - offset).atan()),
            offset,
            decay,
        }
    }

    /// Displacement for the vertex at `position` in the selection ordering
    #[inline]
    pub fn eased_step(&self, position: usize) -> f32 {
        self.scale * (FRAC_PI_2 - (self.decay * (position + 1) as f32 - self.offset).atan())
    }
}

/// Outcome of one correction loop, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StretchReport {
    pub iterations: u32,
    /// Lead distance to the pointer when the loop stopped
    pub lead_distance: f32,
}

/// Pull the selected rim vertices toward `pointer`.
///
/// `from` is the previous pointer sample. Runs the correction loop until the
/// lead is within tolerance, stops closing in, or the iteration cap is hit.
/// A zero or non-finite delta is a no-op.
pub fn stretch_toward(
    positions: &mut [Vec2],
    selection: &[u32],
    from: Vec2,
    pointer: Vec2,
    config: &SurfaceConfig,
) -> StretchReport {
    let Some(&lead) = selection.first() else {
        return StretchReport::default();
    };
    let lead = lead as usize;

    let delta = pointer - from;
    let raw = delta.length();
    let mut distance = positions[lead].distance(pointer);
    if raw <= f32::EPSILON || !raw.is_finite() {
        return StretchReport {
            iterations: 0,
            lead_distance: distance,
        };
    }
    let dir = delta / raw;
    let curve = StretchCurve::new(
        config.stretch_step,
        config.stretch_decay,
        config.contact_gain,
        raw,
    );

    let mut iterations = 0;
    while distance > config.stretch_tolerance && iterations < config.max_correction_steps {
        let lead_step = dir * curve.eased_step(0);
        let next = (positions[lead] + lead_step).distance(pointer);
        if next >= distance {
            // Heading away or about to overshoot: keep the closest position
            break;
        }

        positions[lead] += lead_step;
        // Both vertices of a pair take the same step; an even ring ends on a lone vertex
        for (pair, i) in selection[1..].chunks(2).zip((1..).step_by(2)) {
            let step = dir * curve.eased_step(i);
            for &vertex in pair {
                positions[vertex as usize] += step;
            }
        }
        iterations += 1;
        distance = next;
    }

    if iterations == config.max_correction_steps {
        log::debug!("Stretch hit correction cap, lead {distance} from pointer");
    }

    StretchReport {
        iterations,
        lead_distance: distance,
    }
}
