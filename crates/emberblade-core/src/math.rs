//! Math helpers shared by the locomotion and camera-facing code

use glam::{Quat, Vec3};

/// Squared length below which a direction is considered degenerate
pub const DIRECTION_EPSILON: f32 = 1e-8;

/// Project a direction onto the horizontal plane and renormalize.
///
/// Returns `None` when the flattened vector is degenerate, e.g. a camera
/// looking straight up or down.
pub fn flatten_to_ground(direction: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= DIRECTION_EPSILON {
        None
    } else {
        Some(flat.normalize())
    }
}

/// Yaw-only facing quaternion that rotates world forward (+Z) toward a
/// horizontal direction.
pub fn yaw_facing(direction: Vec3) -> Quat {
    Quat::from_rotation_y(direction.x.atan2(direction.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_removes_vertical() {
        let dir = flatten_to_ground(Vec3::new(0.0, -5.0, 1.0)).unwrap();
        assert_eq!(dir, Vec3::Z);
    }

    #[test]
    fn test_flatten_degenerate_camera() {
        assert!(flatten_to_ground(Vec3::Y).is_none());
        assert!(flatten_to_ground(Vec3::new(0.0, -1.0, 0.0)).is_none());
        assert!(flatten_to_ground(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_yaw_facing_world_forward() {
        let facing = yaw_facing(Vec3::Z);
        assert!(facing.angle_between(Quat::IDENTITY) < 1e-5);
    }

    #[test]
    fn test_yaw_facing_quarter_turn() {
        let facing = yaw_facing(Vec3::X);
        let rotated = facing * Vec3::Z;
        assert!((rotated - Vec3::X).length() < 1e-5);
    }
}
