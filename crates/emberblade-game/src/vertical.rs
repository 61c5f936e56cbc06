//! Gravity integration and ground-snap resolution
//!
//! Two-state machine per actor: Falling accumulates gravity; Grounded
//! holds zero vertical velocity and eases the actor onto the detected
//! surface. The orchestrator integrates gravity before the horizontal
//! move and applies the vertical impulse after the ground check, so a
//! freshly detected fall takes effect one tick later. That lag is part
//! of the observable settling behavior and must not be reordered.

use glam::Vec3;

use emberblade_collision::StaticCollisionSet;

use crate::config::GroundConfig;

/// Vertical motion state for an actor
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalMotion {
    /// Current vertical velocity in units per second
    pub velocity: f32,
    /// Whether the actor is resting on a detected surface
    pub grounded: bool,
}

impl VerticalMotion {
    /// Integrate gravity for one tick and return the vertical impulse to
    /// apply after ground resolution. Grounded actors hold zero velocity.
    pub fn integrate(&mut self, config: &GroundConfig, delta: f32) -> f32 {
        if self.grounded {
            self.velocity = 0.0;
        } else {
            self.velocity += config.gravity * delta;
        }
        self.velocity * delta
    }

    /// Ground check: cast straight down from above the actor and settle
    /// onto the nearest surface when the feet are at or below the
    /// threshold. Returns whether any surface was found below.
    ///
    /// An empty collision set (environment not loaded yet) reports no
    /// ground and leaves the velocity untouched.
    pub fn resolve_ground(
        &mut self,
        position: &mut Vec3,
        collision: &StaticCollisionSet,
        config: &GroundConfig,
    ) -> bool {
        let origin = *position + Vec3::Y * config.ray_origin_lift;
        let hits = collision.raycast(origin, Vec3::NEG_Y);

        let Some(nearest) = hits.first() else {
            self.grounded = false;
            return false;
        };

        let ground_y = nearest.point.y;
        let foot_y = position.y - config.player_height / 2.0;
        let distance_to_ground = foot_y - ground_y;

        // Covers both penetration (distance < 0) and near-ground.
        if distance_to_ground < config.ground_threshold {
            self.grounded = true;
            self.velocity = 0.0;
            let target_y = ground_y + config.player_height / 2.0;
            position.y += (target_y - position.y) * config.snap_factor;
        } else {
            self.grounded = false;
        }
        true
    }
}
