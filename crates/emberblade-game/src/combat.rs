//! Melee attack resolution and cooldown bookkeeping

use glam::Vec3;

use emberblade_collision::{raycast_triangles, Triangle};
use emberblade_core::ActorId;

use crate::config::CombatConfig;

/// Attack lockout state for an actor.
///
/// `active` only flips on from false; re-triggering while active is
/// ignored. The session resets once `elapsed` reaches the cooldown.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackSession {
    /// Whether an attack is currently in flight
    pub active: bool,
    /// Seconds since the active attack started
    pub elapsed: f32,
}

impl AttackSession {
    /// Try to begin an attack. Returns false while one is in flight.
    pub fn try_begin(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.elapsed = 0.0;
        true
    }

    /// Advance the cooldown. Returns true on the tick the session resets.
    pub fn update(&mut self, cooldown: f32, delta: f32) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += delta;
        if self.elapsed >= cooldown {
            self.active = false;
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

/// Outcome of an attack attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    /// Ignored: a previous attack is still in flight
    Locked,
    /// The swing hit nothing within reach
    Missed,
    /// The swing landed
    Hit { target: ActorId, distance: f32 },
}

/// A world-space target surface tagged with its owning actor. The owner
/// id is a non-owning back-reference used only to route damage.
#[derive(Debug, Clone, Copy)]
pub struct TargetSurface {
    pub owner: ActorId,
    pub triangle: Triangle,
}

/// Raycast the swing direction against target surfaces and pick the
/// nearest owner within reach. Returns `None` when nothing is in range;
/// a degenerate direction also resolves to a miss.
pub fn resolve_swing(
    origin: Vec3,
    direction: Vec3,
    targets: &[TargetSurface],
    config: &CombatConfig,
) -> Option<(ActorId, f32)> {
    let triangles: Vec<Triangle> = targets.iter().map(|target| target.triangle).collect();
    let hits = raycast_triangles(origin, direction, &triangles);
    let nearest = hits.first()?;
    if nearest.distance > config.reach {
        return None;
    }
    Some((targets[nearest.triangle].owner, nearest.distance))
}
