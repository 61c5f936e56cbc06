//! Bounding-volume hierarchy over triangle soups
//!
//! Median-split build over triangle centroids with an iterative traversal.
//! Keeps the per-tick ground raycast cheap against large static geometry.

use crate::mesh::{Aabb, Triangle};
use crate::ray::{ray_aabb, ray_triangle, Ray, RayHit};

/// Leaves hold at most this many triangles
const LEAF_SIZE: usize = 8;

#[derive(Debug, Clone)]
struct Node {
    aabb: Aabb,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
enum NodeKind {
    /// Range into the triangle ordering
    Leaf { start: usize, count: usize },
    /// Child node indices
    Interior { left: usize, right: usize },
}

/// A static triangle hierarchy. Built once, queried read-only.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    triangles: Vec<Triangle>,
    /// Triangle indices, partitioned so each leaf owns a contiguous range
    order: Vec<usize>,
    nodes: Vec<Node>,
}

impl Bvh {
    /// Build a hierarchy over the given triangles
    pub fn build(triangles: Vec<Triangle>) -> Self {
        let mut order: Vec<usize> = (0..triangles.len()).collect();
        let mut nodes = Vec::new();
        if !triangles.is_empty() {
            let count = order.len();
            build_node(&triangles, &mut order, 0, count, &mut nodes);
        }
        Self {
            triangles,
            order,
            nodes,
        }
    }

    /// Number of triangles in the hierarchy
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the hierarchy holds no triangles
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangle by index, as reported in `RayHit::triangle`
    pub fn triangle(&self, index: usize) -> Option<&Triangle> {
        self.triangles.get(index)
    }

    /// Append every intersection along `ray` to `out` (unsorted)
    pub fn raycast_into(&self, ray: &Ray, out: &mut Vec<RayHit>) {
        if self.nodes.is_empty() {
            return;
        }

        let mut stack = vec![0usize];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if !ray_aabb(ray, &node.aabb) {
                continue;
            }
            match node.kind {
                NodeKind::Leaf { start, count } => {
                    for &tri_index in &self.order[start..start + count] {
                        if let Some(t) = ray_triangle(ray, &self.triangles[tri_index]) {
                            out.push(RayHit {
                                point: ray.at(t),
                                distance: t,
                                triangle: tri_index,
                            });
                        }
                    }
                }
                NodeKind::Interior { left, right } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
    }
}

/// Recursively build the node covering `order[start..start + count]`,
/// returning its index.
fn build_node(
    triangles: &[Triangle],
    order: &mut [usize],
    start: usize,
    count: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let mut aabb = Aabb::EMPTY;
    for &tri_index in &order[start..start + count] {
        aabb = aabb.union(triangles[tri_index].aabb());
    }

    let node_index = nodes.len();
    nodes.push(Node {
        aabb,
        kind: NodeKind::Leaf { start, count },
    });

    if count <= LEAF_SIZE {
        return node_index;
    }

    // Split at the centroid median along the widest axis.
    let extent = aabb.extent();
    let axis = if extent.x >= extent.y && extent.x >= extent.z {
        0
    } else if extent.y >= extent.z {
        1
    } else {
        2
    };
    order[start..start + count].sort_unstable_by(|&a, &b| {
        let ca = triangles[a].centroid()[axis];
        let cb = triangles[b].centroid()[axis];
        ca.total_cmp(&cb)
    });

    let mid = count / 2;
    let left = build_node(triangles, order, start, mid, nodes);
    let right = build_node(triangles, order, start + mid, count - mid, nodes);
    nodes[node_index].kind = NodeKind::Interior { left, right };
    node_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Flat grid of triangles in the y=0 plane
    fn grid(cells: i32) -> Vec<Triangle> {
        let mut triangles = Vec::new();
        for x in 0..cells {
            for z in 0..cells {
                let o = Vec3::new(x as f32, 0.0, z as f32);
                let (dx, dz) = (Vec3::X, Vec3::Z);
                triangles.push(Triangle::new(o, o + dx, o + dx + dz));
                triangles.push(Triangle::new(o, o + dx + dz, o + dz));
            }
        }
        triangles
    }

    #[test]
    fn test_bvh_matches_brute_force() {
        let triangles = grid(8);
        let bvh = Bvh::build(triangles.clone());

        let ray = Ray::new(Vec3::new(3.3, 5.0, 4.7), -Vec3::Y).unwrap();

        let mut bvh_hits = Vec::new();
        bvh.raycast_into(&ray, &mut bvh_hits);

        let brute: Vec<usize> = triangles
            .iter()
            .enumerate()
            .filter(|(_, tri)| ray_triangle(&ray, tri).is_some())
            .map(|(i, _)| i)
            .collect();

        let mut from_bvh: Vec<usize> = bvh_hits.iter().map(|h| h.triangle).collect();
        from_bvh.sort_unstable();
        assert_eq!(from_bvh, brute);
        assert!(!from_bvh.is_empty());
    }

    #[test]
    fn test_bvh_miss() {
        let bvh = Bvh::build(grid(4));
        let ray = Ray::new(Vec3::new(-10.0, 5.0, -10.0), -Vec3::Y).unwrap();
        let mut hits = Vec::new();
        bvh.raycast_into(&ray, &mut hits);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_empty_bvh() {
        let bvh = Bvh::build(Vec::new());
        assert!(bvh.is_empty());
        let ray = Ray::new(Vec3::ZERO, Vec3::Y).unwrap();
        let mut hits = Vec::new();
        bvh.raycast_into(&ray, &mut hits);
        assert!(hits.is_empty());
    }
}
