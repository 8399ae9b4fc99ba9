//! Vertex and triangle primitives for block meshes.

use glam::{Vec2, Vec3};

/// Attributes for a single vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in block space (0-1 for a full block).
    pub coord: Vec3,
    /// Texture coordinate within the referenced texture.
    pub texture_coord: Vec2,
    /// Tint colour (RGB).
    pub tint: Vec3,
}

impl Vertex {
    pub fn new(coord: Vec3, texture_coord: Vec2, tint: Vec3) -> Self {
        Self {
            coord,
            texture_coord,
            tint,
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            coord: Vec3::ZERO,
            texture_coord: Vec2::ZERO,
            tint: Vec3::ONE,
        }
    }
}

/// The vertex and texture indexes that make up a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub vert_index_a: usize,
    pub vert_index_b: usize,
    pub vert_index_c: usize,
    /// Index into the owning mesh's texture list.
    pub texture_index: usize,
}

impl Triangle {
    pub fn new(a: usize, b: usize, c: usize, texture_index: usize) -> Self {
        Self {
            vert_index_a: a,
            vert_index_b: b,
            vert_index_c: c,
            texture_index,
        }
    }
}

/// The geometry of a block mesh for one culling direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockMeshPart {
    /// Vertex data.
    pub verts: Vec<Vertex>,
    /// Triangles indexing into `verts`.
    pub triangles: Vec<Triangle>,
}

impl BlockMeshPart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        let index = self.verts.len();
        self.verts.push(vertex);
        index
    }

    /// Add a quad (two triangles) by vertex indices.
    /// Vertices are provided in order around the quad. Triangles are wound CCW for front-facing.
    pub fn add_quad(&mut self, i0: usize, i1: usize, i2: usize, i3: usize, texture_index: usize) {
        self.triangles.push(Triangle::new(i0, i2, i1, texture_index));
        self.triangles.push(Triangle::new(i0, i3, i2, texture_index));
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Append another part, offsetting its vertex indices and remapping its
    /// texture indices through `texture_map`.
    pub fn append(&mut self, other: &BlockMeshPart, texture_map: &[usize]) {
        let offset = self.verts.len();
        self.verts.extend_from_slice(&other.verts);
        self.triangles.extend(other.triangles.iter().map(|t| Triangle {
            vert_index_a: t.vert_index_a + offset,
            vert_index_b: t.vert_index_b + offset,
            vert_index_c: t.vert_index_c + offset,
            texture_index: texture_map[t.texture_index],
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_part(x: f32, texture_index: usize) -> BlockMeshPart {
        let mut part = BlockMeshPart::new();
        for (dx, dz) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
            part.add_vertex(Vertex::new(Vec3::new(x + dx, 0.0, dz), Vec2::ZERO, Vec3::ONE));
        }
        part.triangles.push(Triangle::new(0, 1, 2, texture_index));
        part
    }

    #[test]
    fn test_quad() {
        let mut part = BlockMeshPart::new();
        for _ in 0..4 {
            part.add_vertex(Vertex::default());
        }
        part.add_quad(0, 1, 2, 3, 0);

        assert_eq!(part.vertex_count(), 4);
        assert_eq!(part.triangle_count(), 2);
        // CCW winding: (0,2,1) and (0,3,2)
        assert_eq!(part.triangles[0], Triangle::new(0, 2, 1, 0));
        assert_eq!(part.triangles[1], Triangle::new(0, 3, 2, 0));
    }

    #[test]
    fn test_append_offsets_and_remaps() {
        let mut a = triangle_part(0.0, 0);
        let b = triangle_part(2.0, 0);

        a.append(&b, &[3]);

        assert_eq!(a.vertex_count(), 6);
        assert_eq!(a.triangles[1], Triangle::new(3, 4, 5, 3));
        assert_eq!(a.verts[3].coord, Vec3::new(2.0, 0.0, 0.0));
    }
}
