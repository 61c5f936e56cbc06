//! Locomotion branch selection and facing
//!
//! Movement intent is resolved against an ordered branch table; the first
//! branch whose predicate matches wins. Forward movement deliberately
//! shadows strafing: holding W and A yields Walk, never StrafeLeft.

use glam::{Quat, Vec3};

use emberblade_core::math::{flatten_to_ground, yaw_facing};

use crate::animation::clip_names;
use crate::config::MovementConfig;
use crate::input::{InputAction, InputState};

/// Which movement branch was selected for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Run,
    Walk,
    Back,
    StrafeLeft,
    StrafeRight,
    Idle,
}

/// One locomotion branch: an intent predicate, a velocity rule, and the
/// animation it requests
struct Branch {
    kind: BranchKind,
    clip: &'static str,
    clip_speed: f32,
    matches: fn(&InputState) -> bool,
    velocity: fn(forward: Vec3, config: &MovementConfig) -> Vec3,
}

/// Horizontal-plane perpendicular of a facing, to its left
fn left_of(forward: Vec3) -> Vec3 {
    Vec3::new(forward.z, 0.0, -forward.x)
}

/// The branch table, in priority order. The trailing idle branch always
/// matches.
const BRANCHES: [Branch; 6] = [
    Branch {
        kind: BranchKind::Run,
        clip: clip_names::RUN,
        clip_speed: 1.8,
        matches: |input| {
            input.is_held(InputAction::MoveForward) && input.is_held(InputAction::Sprint)
        },
        velocity: |forward, config| forward * (config.base_speed * config.run_multiplier),
    },
    Branch {
        kind: BranchKind::Walk,
        clip: clip_names::WALK,
        clip_speed: 1.5,
        matches: |input| input.is_held(InputAction::MoveForward),
        velocity: |forward, config| forward * config.base_speed,
    },
    Branch {
        kind: BranchKind::Back,
        clip: clip_names::RUN_BACK,
        clip_speed: 1.5,
        matches: |input| input.is_held(InputAction::MoveBackward),
        velocity: |forward, config| forward * (config.base_speed * config.back_multiplier),
    },
    Branch {
        kind: BranchKind::StrafeLeft,
        clip: clip_names::RUN_LEFT,
        clip_speed: 1.0,
        matches: |input| input.is_held(InputAction::StrafeLeft),
        velocity: |forward, config| left_of(forward) * (config.base_speed * config.strafe_multiplier),
    },
    Branch {
        kind: BranchKind::StrafeRight,
        clip: clip_names::RUN_RIGHT,
        clip_speed: 1.0,
        matches: |input| input.is_held(InputAction::StrafeRight),
        velocity: |forward, config| {
            -left_of(forward) * (config.base_speed * config.strafe_multiplier)
        },
    },
    Branch {
        kind: BranchKind::Idle,
        clip: clip_names::IDLE,
        clip_speed: 1.0,
        matches: |_| true,
        velocity: |_, _| Vec3::ZERO,
    },
];

/// Result of resolving one tick of movement intent
#[derive(Debug, Clone, Copy)]
pub struct LocomotionOutput {
    /// Horizontal displacement for this tick (XZ plane)
    pub displacement: Vec3,
    /// Facing to turn toward; `None` when the camera direction was
    /// degenerate and the previous facing should be kept
    pub target_facing: Option<Quat>,
    /// Which branch won
    pub branch: BranchKind,
    /// Animation clip the branch requests
    pub clip: &'static str,
    /// Playback speed for that clip
    pub clip_speed: f32,
}

/// Resolve movement intent against the camera facing for one tick.
pub fn resolve(
    input: &InputState,
    camera_forward: Vec3,
    config: &MovementConfig,
    delta: f32,
) -> LocomotionOutput {
    let Some(forward) = flatten_to_ground(camera_forward) else {
        // Camera looking straight up or down: keep the old facing and
        // stand still for this tick.
        return LocomotionOutput {
            displacement: Vec3::ZERO,
            target_facing: None,
            branch: BranchKind::Idle,
            clip: clip_names::IDLE,
            clip_speed: 1.0,
        };
    };

    let mut selected = &BRANCHES[BRANCHES.len() - 1];
    for branch in &BRANCHES {
        if (branch.matches)(input) {
            selected = branch;
            break;
        }
    }

    LocomotionOutput {
        displacement: (selected.velocity)(forward, config) * delta,
        target_facing: Some(yaw_facing(forward)),
        branch: selected.kind,
        clip: selected.clip,
        clip_speed: selected.clip_speed,
    }
}

/// Smoothly turn a facing toward a target at `turn_rate` per second.
/// Never snaps: the slerp factor is clamped to 1.
pub fn turn_toward(current: Quat, target: Quat, turn_rate: f32, delta: f32) -> Quat {
    current.slerp(target, (turn_rate * delta).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(actions: &[InputAction]) -> InputState {
        let mut state = InputState::new();
        for &action in actions {
            state.held.insert(action);
        }
        state
    }

    fn resolve_default(input: &InputState) -> LocomotionOutput {
        resolve(input, Vec3::Z, &MovementConfig::default(), 1.0)
    }

    #[test]
    fn test_forward_shadows_strafe() {
        let input = held(&[InputAction::MoveForward, InputAction::StrafeLeft]);
        let out = resolve_default(&input);
        assert_eq!(out.branch, BranchKind::Walk);
        assert_eq!(out.clip, clip_names::WALK);
    }

    #[test]
    fn test_run_takes_priority_over_walk() {
        let input = held(&[InputAction::MoveForward, InputAction::Sprint]);
        let out = resolve_default(&input);
        assert_eq!(out.branch, BranchKind::Run);
        assert!((out.displacement - Vec3::Z * 3.5).length() < 1e-5);
        assert_eq!(out.clip_speed, 1.8);
    }

    #[test]
    fn test_sprint_alone_is_idle() {
        let input = held(&[InputAction::Sprint]);
        let out = resolve_default(&input);
        assert_eq!(out.branch, BranchKind::Idle);
        assert_eq!(out.displacement, Vec3::ZERO);
    }

    #[test]
    fn test_walk_displacement() {
        let input = held(&[InputAction::MoveForward]);
        let out = resolve(&input, Vec3::Z, &MovementConfig::default(), 0.5);
        assert!((out.displacement - Vec3::Z * 0.7).length() < 1e-5);
    }

    #[test]
    fn test_backward_is_negative_walk() {
        let input = held(&[InputAction::MoveBackward]);
        let out = resolve_default(&input);
        assert_eq!(out.branch, BranchKind::Back);
        assert!((out.displacement - Vec3::Z * -1.4).length() < 1e-5);
    }

    #[test]
    fn test_strafe_directions_are_perpendicular() {
        let left = resolve_default(&held(&[InputAction::StrafeLeft]));
        let right = resolve_default(&held(&[InputAction::StrafeRight]));
        assert_eq!(left.branch, BranchKind::StrafeLeft);
        assert_eq!(right.branch, BranchKind::StrafeRight);
        // Camera forward +Z: left is +X under the (z, 0, -x)
        // convention, right is its mirror.
        assert!((left.displacement - Vec3::new(2.8, 0.0, 0.0)).length() < 1e-5);
        assert!((right.displacement - Vec3::new(-2.8, 0.0, 0.0)).length() < 1e-5);
        assert!(left.displacement.dot(Vec3::Z).abs() < 1e-6);
    }

    #[test]
    fn test_camera_pitch_is_flattened() {
        let input = held(&[InputAction::MoveForward]);
        let steep = Vec3::new(0.0, -0.9, 0.1).normalize();
        let out = resolve(&input, steep, &MovementConfig::default(), 1.0);
        assert_eq!(out.displacement.y, 0.0);
        assert!((out.displacement.length() - 1.4).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_camera_idles() {
        let input = held(&[InputAction::MoveForward]);
        let out = resolve(&input, Vec3::Y, &MovementConfig::default(), 1.0);
        assert_eq!(out.branch, BranchKind::Idle);
        assert_eq!(out.displacement, Vec3::ZERO);
        assert!(out.target_facing.is_none());
    }

    #[test]
    fn test_turn_toward_clamps_factor() {
        let current = Quat::IDENTITY;
        let target = Quat::from_rotation_y(1.0);
        let turned = turn_toward(current, target, 4.0, 10.0);
        assert!(turned.angle_between(target) < 1e-5);
    }

    #[test]
    fn test_turn_toward_is_gradual() {
        let current = Quat::IDENTITY;
        let target = Quat::from_rotation_y(1.0);
        let turned = turn_toward(current, target, 4.0, 1.0 / 60.0);
        assert!(turned.angle_between(current) < 0.1);
        assert!(turned.angle_between(target) > 0.5);
    }
}
