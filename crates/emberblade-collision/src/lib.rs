//! Emberblade Collision - spatial queries for the simulation
//!
//! Provides ordered raycasts against two kinds of surface collections:
//! the static environment (BVH-accelerated, built once after load) and
//! small dynamic target-surface sets (brute force).

mod bvh;
mod mesh;
mod ray;

pub use bvh::Bvh;
pub use mesh::{Aabb, MeshError, Triangle, TriangleMesh};
pub use ray::{Ray, RayHit};

use glam::Vec3;

/// Static environment geometry for ground and environment raycasts.
///
/// Built once from the loaded environment meshes and read-only afterward;
/// hosts swap in a fully built set rather than appending to a live one.
#[derive(Debug, Clone, Default)]
pub struct StaticCollisionSet {
    bvh: Bvh,
}

impl StaticCollisionSet {
    /// Build the set from loaded environment meshes
    pub fn build(meshes: &[TriangleMesh]) -> Self {
        let triangles: Vec<Triangle> = meshes
            .iter()
            .flat_map(|mesh| mesh.triangles.iter().copied())
            .collect();
        Self {
            bvh: Bvh::build(triangles),
        }
    }

    /// Whether any geometry has been registered
    pub fn is_empty(&self) -> bool {
        self.bvh.is_empty()
    }

    /// Total triangle count
    pub fn triangle_count(&self) -> usize {
        self.bvh.len()
    }

    /// Cast a ray and return every intersection, nearest first.
    ///
    /// A degenerate direction or an empty set yields no hits; both are
    /// valid outcomes, not errors.
    pub fn raycast(&self, origin: Vec3, direction: Vec3) -> Vec<RayHit> {
        let Some(ray) = Ray::new(origin, direction) else {
            return Vec::new();
        };
        let mut hits = Vec::new();
        self.bvh.raycast_into(&ray, &mut hits);
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

/// Brute-force ordered raycast over a small triangle set, e.g. the
/// hitboxes of nearby targets. `RayHit::triangle` indexes into `triangles`.
pub fn raycast_triangles(origin: Vec3, direction: Vec3, triangles: &[Triangle]) -> Vec<RayHit> {
    let Some(ray) = Ray::new(origin, direction) else {
        return Vec::new();
    };
    let mut hits: Vec<RayHit> = triangles
        .iter()
        .enumerate()
        .filter_map(|(index, tri)| {
            ray::ray_triangle(&ray, tri).map(|t| RayHit {
                point: ray.at(t),
                distance: t,
                triangle: index,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
