//! Triangle surfaces and bounding boxes

use glam::Vec3;

/// A single triangle surface in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    /// Create a triangle from three corners
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Centroid of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Tight bounding box around the triangle
    pub fn aabb(&self) -> Aabb {
        Aabb {
            min: self.a.min(self.b).min(self.c),
            max: self.a.max(self.b).max(self.c),
        }
    }

    /// Translate all three corners by an offset
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            a: self.a + offset,
            b: self.b + offset,
            c: self.c + offset,
        }
    }
}

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// The empty box; unioning anything into it yields that thing's bounds
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Smallest box containing both inputs
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Extent along each axis
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Errors raised while assembling collision geometry from loader output
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },

    #[error("index count {0} is not a multiple of three")]
    TruncatedIndices(usize),
}

/// A triangulated surface group, e.g. one mesh of a loaded environment
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Create a mesh from pre-built triangles
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Assemble a mesh from the vertex/index buffers a model loader hands
    /// over. Indices are consumed three at a time.
    pub fn from_buffers(positions: &[Vec3], indices: &[u32]) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::TruncatedIndices(indices.len()));
        }

        let fetch = |index: u32| -> Result<Vec3, MeshError> {
            positions
                .get(index as usize)
                .copied()
                .ok_or(MeshError::IndexOutOfBounds {
                    index,
                    vertex_count: positions.len(),
                })
        };

        let mut triangles = Vec::with_capacity(indices.len() / 3);
        for corner in indices.chunks_exact(3) {
            triangles.push(Triangle::new(
                fetch(corner[0])?,
                fetch(corner[1])?,
                fetch(corner[2])?,
            ));
        }

        Ok(Self { triangles })
    }

    /// Number of triangles in the mesh
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh holds no triangles
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}
