//! Ray primitives and intersection tests

use glam::Vec3;

use crate::mesh::{Aabb, Triangle};

/// Intersections closer than this along the ray are ignored
const T_MIN: f32 = 1e-5;

/// Guard for near-parallel ray/triangle and axis-parallel slab cases
const PARALLEL_EPSILON: f32 = 1e-6;

/// A ray with a normalized direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `dir`. Returns `None` for a degenerate
    /// direction; callers treat that as a no-intersection query.
    pub fn new(origin: Vec3, dir: Vec3) -> Option<Self> {
        let dir = dir.try_normalize()?;
        Some(Self { origin, dir })
    }

    /// Point along the ray at parameter `t`
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// A single ray intersection. `triangle` indexes into whatever surface
/// collection the query ran against.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    pub triangle: usize,
}

/// Möller–Trumbore ray/triangle intersection. Hits on both faces count;
/// returns the ray parameter of the hit.
pub fn ray_triangle(ray: &Ray, tri: &Triangle) -> Option<f32> {
    let edge1 = tri.b - tri.a;
    let edge2 = tri.c - tri.a;

    let p = ray.dir.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - tri.a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray.dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= T_MIN).then_some(t)
}

/// Slab-method ray/AABB overlap test
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> bool {
    let inv_dir = Vec3::new(
        if ray.dir.x.abs() > PARALLEL_EPSILON {
            1.0 / ray.dir.x
        } else {
            f32::MAX
        },
        if ray.dir.y.abs() > PARALLEL_EPSILON {
            1.0 / ray.dir.y
        } else {
            f32::MAX
        },
        if ray.dir.z.abs() > PARALLEL_EPSILON {
            1.0 / ray.dir.z
        } else {
            f32::MAX
        },
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    tmax >= 0.0 && tmin <= tmax
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle_at(z: f32) -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
        )
    }

    #[test]
    fn test_ray_triangle_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let t = ray_triangle(&ray, &unit_triangle_at(3.0)).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
        assert!((ray.at(t) - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_ray_triangle_backface_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z).unwrap();
        assert!(ray_triangle(&ray, &unit_triangle_at(3.0)).is_some());
    }

    #[test]
    fn test_ray_triangle_behind_origin() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z).unwrap();
        assert!(ray_triangle(&ray, &unit_triangle_at(3.0)).is_none());
    }

    #[test]
    fn test_ray_triangle_outside() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::Z).unwrap();
        assert!(ray_triangle(&ray, &unit_triangle_at(3.0)).is_none());
    }

    #[test]
    fn test_degenerate_direction() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_ray_aabb() {
        let aabb = Aabb {
            min: Vec3::new(-1.0, -1.0, 2.0),
            max: Vec3::new(1.0, 1.0, 4.0),
        };
        let hit = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let miss = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        let behind = Ray::new(Vec3::ZERO, -Vec3::Z).unwrap();
        assert!(ray_aabb(&hit, &aabb));
        assert!(!ray_aabb(&miss, &aabb));
        assert!(!ray_aabb(&behind, &aabb));
    }

    #[test]
    fn test_ray_aabb_origin_inside() {
        let aabb = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, -0.8, 0.5)).unwrap();
        assert!(ray_aabb(&ray, &aabb));
    }

    #[test]
    fn test_ray_aabb_axis_parallel_miss() {
        // Direction has a zero Y component and the origin sits above the
        // box, so the Y slab can never be entered.
        let aabb = Aabb {
            min: Vec3::new(-1.0, -1.0, 2.0),
            max: Vec3::new(1.0, 1.0, 4.0),
        };
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Z).unwrap();
        assert!(!ray_aabb(&ray, &aabb));
    }
}
