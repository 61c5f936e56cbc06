//! Simulation tuning

use serde::{Deserialize, Serialize};

/// Movement tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Base walking speed in units per second
    pub base_speed: f32,
    /// Run speed multiplier (forward + sprint)
    pub run_multiplier: f32,
    /// Backward multiplier; negative moves away from facing
    pub back_multiplier: f32,
    /// Strafe speed multiplier
    pub strafe_multiplier: f32,
    /// Orientation smoothing rate; the per-tick slerp factor is
    /// `turn_rate * delta`, clamped to 1
    pub turn_rate: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_speed: 1.4,
            run_multiplier: 2.5,
            back_multiplier: -1.0,
            strafe_multiplier: 2.0,
            turn_rate: 4.0,
        }
    }
}

/// Gravity and ground-snap tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundConfig {
    /// Gravitational acceleration on the Y axis
    pub gravity: f32,
    /// Actor capsule height; feet sit half a height below the position
    pub player_height: f32,
    /// Height above the actor position the ground ray starts from
    pub ray_origin_lift: f32,
    /// Foot-to-ground distance below which the actor counts as grounded
    pub ground_threshold: f32,
    /// Per-tick lerp factor easing the actor onto a detected surface
    pub snap_factor: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            player_height: 1.0,
            ray_origin_lift: 0.5,
            ground_threshold: 0.05,
            snap_factor: 0.25,
        }
    }
}

/// Melee combat tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Seconds an attack locks out further attacks
    pub cooldown: f32,
    /// Maximum distance a swing can land at
    pub reach: f32,
    /// Damage per landed swing
    pub damage: f32,
    /// Height above the attacker position the swing ray starts from
    pub origin_lift: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            cooldown: 0.8,
            reach: 4.0,
            damage: 50.0,
            origin_lift: 0.5,
        }
    }
}

/// Bundled configuration for the frame orchestrator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldConfig {
    pub movement: MovementConfig,
    pub ground: GroundConfig,
    pub combat: CombatConfig,
}
