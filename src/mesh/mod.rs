//! Block mesh data model.
//!
//! A [`BlockMesh`] holds the geometry of a single block split into seven parts,
//! one per [`BlockMeshCullDirection`]. Meshes are values: [`merge_block_meshes`]
//! and [`BlockMesh::rotate`] build new meshes and leave their inputs untouched.

pub mod cube;
pub mod geometry;

pub use cube::{get_cube, get_unit_cube, CUBE_FACE_ORDER};
pub use geometry::{BlockMeshPart, Triangle, Vertex};

use crate::error::{PackError, Result};
use crate::types::Direction;
use glam::{Mat3, Vec3};
use std::collections::HashMap;

/// The transparency of a block mesh.
///
/// Ordered from most to least occluding, so merging takes the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockMeshTransparency {
    /// Occupies the whole block and is opaque.
    FullOpaque = 0,
    /// Occupies the whole block and has at least one translucent face.
    FullTranslucent = 1,
    /// Does not occupy the whole block.
    Partial = 2,
}

/// The direction a mesh part is culled by.
/// The discriminant is the index into [`BlockMesh::parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockMeshCullDirection {
    /// Not culled by any neighbouring block.
    None = 0,
    Up = 1,
    Down = 2,
    North = 3,
    East = 4,
    South = 5,
    West = 6,
}

impl BlockMeshCullDirection {
    /// All cull directions in part order.
    pub const ALL: [BlockMeshCullDirection; 7] = [
        BlockMeshCullDirection::None,
        BlockMeshCullDirection::Up,
        BlockMeshCullDirection::Down,
        BlockMeshCullDirection::North,
        BlockMeshCullDirection::East,
        BlockMeshCullDirection::South,
        BlockMeshCullDirection::West,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Map a model face key (`None` or "up", "down", ...) to a cull direction.
    pub fn from_face_key(key: Option<&str>) -> Option<Self> {
        match key {
            None => Some(BlockMeshCullDirection::None),
            Some(key) => Direction::from_str(key).map(Self::from),
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            BlockMeshCullDirection::None => None,
            BlockMeshCullDirection::Up => Some(Direction::Up),
            BlockMeshCullDirection::Down => Some(Direction::Down),
            BlockMeshCullDirection::North => Some(Direction::North),
            BlockMeshCullDirection::East => Some(Direction::East),
            BlockMeshCullDirection::South => Some(Direction::South),
            BlockMeshCullDirection::West => Some(Direction::West),
        }
    }
}

impl From<Direction> for BlockMeshCullDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => BlockMeshCullDirection::Up,
            Direction::Down => BlockMeshCullDirection::Down,
            Direction::North => BlockMeshCullDirection::North,
            Direction::East => BlockMeshCullDirection::East,
            Direction::South => BlockMeshCullDirection::South,
            Direction::West => BlockMeshCullDirection::West,
        }
    }
}

/// All the data that makes up a block mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMesh {
    /// The transparency state of this block mesh.
    pub transparency: BlockMeshTransparency,
    /// Texture paths used by this mesh. [`Triangle::texture_index`] indexes this list.
    pub textures: Vec<String>,
    /// Mesh parts indexed by [`BlockMeshCullDirection`].
    pub parts: [Option<BlockMeshPart>; 7],
}

impl Default for BlockMesh {
    fn default() -> Self {
        Self {
            transparency: BlockMeshTransparency::Partial,
            textures: Vec::new(),
            parts: Default::default(),
        }
    }
}

impl BlockMesh {
    pub fn new(
        transparency: BlockMeshTransparency,
        textures: Vec<String>,
        parts: [Option<BlockMeshPart>; 7],
    ) -> Self {
        Self {
            transparency,
            textures,
            parts,
        }
    }

    /// Get the part culled by the given direction.
    pub fn part(&self, cull: BlockMeshCullDirection) -> Option<&BlockMeshPart> {
        self.parts[cull.index()].as_ref()
    }

    /// Total vertex count across all parts.
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().flatten().map(|p| p.vertex_count()).sum()
    }

    /// Total triangle count across all parts.
    pub fn triangle_count(&self) -> usize {
        self.parts.iter().flatten().map(|p| p.triangle_count()).sum()
    }

    /// Check if the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().flatten().all(|p| p.is_empty())
    }

    /// Check that every triangle indexes vertices of its own part and an
    /// entry of [`textures`](Self::textures).
    pub fn validate(&self) -> Result<()> {
        for (cull, part) in BlockMeshCullDirection::ALL.iter().zip(&self.parts) {
            let Some(part) = part else {
                continue;
            };
            for (i, t) in part.triangles.iter().enumerate() {
                let max_vertex = t.vert_index_a.max(t.vert_index_b).max(t.vert_index_c);
                if max_vertex >= part.verts.len() {
                    return Err(PackError::InvalidMesh(format!(
                        "{:?} triangle {} uses vertex {} of {}",
                        cull,
                        i,
                        max_vertex,
                        part.verts.len()
                    )));
                }
                if t.texture_index >= self.textures.len() {
                    return Err(PackError::InvalidMesh(format!(
                        "{:?} triangle {} uses texture {} of {}",
                        cull,
                        i,
                        t.texture_index,
                        self.textures.len()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Rotate the mesh about the block centre in quarter turns, X first then Y.
    /// Any step count is accepted; the usual range is -3 to 3.
    ///
    /// Vertex coordinates are rotated and each culled part moves to the part
    /// of its rotated direction.
    pub fn rotate(&self, rotx: i32, roty: i32) -> BlockMesh {
        if rotx.rem_euclid(4) == 0 && roty.rem_euclid(4) == 0 {
            return self.clone();
        }

        let basis = |d: Direction| Vec3::from(d.rotate(rotx, roty).normal());
        let matrix = Mat3::from_cols(
            basis(Direction::East),
            basis(Direction::Up),
            basis(Direction::South),
        );
        let centre = Vec3::splat(0.5);

        let mut parts: [Option<BlockMeshPart>; 7] = Default::default();
        for cull in BlockMeshCullDirection::ALL {
            let Some(part) = &self.parts[cull.index()] else {
                continue;
            };
            let target = match cull.direction() {
                Some(direction) => BlockMeshCullDirection::from(direction.rotate(rotx, roty)),
                None => BlockMeshCullDirection::None,
            };
            let mut rotated = part.clone();
            for vert in &mut rotated.verts {
                vert.coord = matrix * (vert.coord - centre) + centre;
            }
            parts[target.index()] = Some(rotated);
        }

        BlockMesh {
            transparency: self.transparency,
            textures: self.textures.clone(),
            parts,
        }
    }
}

/// Merge multiple block meshes into one, in the given order.
///
/// The result takes the most occluding transparency of its inputs (an empty
/// merge is [`BlockMeshTransparency::Partial`]). Parts are concatenated per
/// cull direction in input order and textures are de-duplicated in first-seen
/// order, so the output depends on the order of `meshes`.
///
/// # Panics
///
/// If a triangle's texture index is out of range. Check untrusted meshes
/// with [`BlockMesh::validate`] first.
pub fn merge_block_meshes<'a>(meshes: impl IntoIterator<Item = &'a BlockMesh>) -> BlockMesh {
    let mut merged = BlockMesh::default();
    let mut texture_indices: HashMap<String, usize> = HashMap::new();

    for mesh in meshes {
        merged.transparency = merged.transparency.min(mesh.transparency);

        let texture_map: Vec<usize> = mesh
            .textures
            .iter()
            .map(|texture| {
                *texture_indices.entry(texture.clone()).or_insert_with(|| {
                    merged.textures.push(texture.clone());
                    merged.textures.len() - 1
                })
            })
            .collect();

        for (index, part) in mesh.parts.iter().enumerate() {
            if let Some(part) = part {
                merged.parts[index]
                    .get_or_insert_with(BlockMeshPart::new)
                    .append(part, &texture_map);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn single_triangle_mesh(texture: &str, cull: BlockMeshCullDirection, x: f32) -> BlockMesh {
        let mut part = BlockMeshPart::new();
        for (dx, dz) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
            part.add_vertex(Vertex::new(Vec3::new(x + dx, 0.0, dz), Vec2::ZERO, Vec3::ONE));
        }
        part.triangles.push(Triangle::new(0, 1, 2, 0));

        let mut mesh = BlockMesh::new(
            BlockMeshTransparency::Partial,
            vec![texture.to_string()],
            Default::default(),
        );
        mesh.parts[cull.index()] = Some(part);
        mesh
    }

    #[test]
    fn test_merge_concatenates_in_order() {
        let a = single_triangle_mesh("block/a", BlockMeshCullDirection::None, 0.0);
        let b = single_triangle_mesh("block/b", BlockMeshCullDirection::None, 5.0);

        let merged = merge_block_meshes([&a, &b]);
        assert_eq!(merged.textures, vec!["block/a", "block/b"]);

        let part = merged.part(BlockMeshCullDirection::None).unwrap();
        assert_eq!(part.vertex_count(), 6);
        assert_eq!(part.triangles[1], Triangle::new(3, 4, 5, 1));
        assert_eq!(part.verts[3].coord.x, 5.0);
    }

    #[test]
    fn test_merge_is_order_sensitive() {
        let a = single_triangle_mesh("block/a", BlockMeshCullDirection::Up, 0.0);
        let b = single_triangle_mesh("block/b", BlockMeshCullDirection::Up, 5.0);

        assert_ne!(merge_block_meshes([&a, &b]), merge_block_meshes([&b, &a]));
    }

    #[test]
    fn test_merge_shares_textures() {
        let a = single_triangle_mesh("block/stone", BlockMeshCullDirection::Up, 0.0);
        let b = single_triangle_mesh("block/stone", BlockMeshCullDirection::Down, 0.0);

        let merged = merge_block_meshes([&a, &b]);
        assert_eq!(merged.textures, vec!["block/stone"]);
        assert!(merged.part(BlockMeshCullDirection::Up).is_some());
        assert!(merged.part(BlockMeshCullDirection::Down).is_some());
        assert!(merged.part(BlockMeshCullDirection::North).is_none());
    }

    #[test]
    fn test_merge_takes_most_opaque_transparency() {
        let mut a = single_triangle_mesh("block/a", BlockMeshCullDirection::None, 0.0);
        let mut b = a.clone();
        a.transparency = BlockMeshTransparency::FullTranslucent;
        b.transparency = BlockMeshTransparency::FullOpaque;

        assert_eq!(
            merge_block_meshes([&a, &b]).transparency,
            BlockMeshTransparency::FullOpaque
        );
        assert_eq!(merge_block_meshes([&a]).transparency, BlockMeshTransparency::FullTranslucent);
        assert_eq!(
            merge_block_meshes(std::iter::empty()).transparency,
            BlockMeshTransparency::Partial
        );
    }

    #[test]
    fn test_merge_leaves_inputs_untouched() {
        let a = single_triangle_mesh("block/a", BlockMeshCullDirection::None, 0.0);
        let b = single_triangle_mesh("block/b", BlockMeshCullDirection::None, 5.0);
        let before = a.clone();

        let _ = merge_block_meshes([&a, &b]);
        assert_eq!(a, before);
    }

    #[test]
    fn test_rotate_moves_cull_parts() {
        let mesh = get_unit_cube(
            "block/down",
            "block/up",
            "block/north",
            "block/east",
            "block/south",
            "block/west",
            BlockMeshTransparency::FullOpaque,
        );

        // A quarter turn around Y carries the north face to the east.
        let rotated = mesh.rotate(0, 1);
        let east = rotated.part(BlockMeshCullDirection::East).unwrap();
        let texture = east.triangles[0].texture_index;
        assert_eq!(rotated.textures[texture], "block/north");
        for vert in &east.verts {
            assert!((vert.coord.x - 1.0).abs() < 1e-6);
        }

        // The top face stays on top under Y rotation.
        let up = rotated.part(BlockMeshCullDirection::Up).unwrap();
        assert_eq!(rotated.textures[up.triangles[0].texture_index], "block/up");
        for vert in &up.verts {
            assert!((vert.coord.y - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_rotate_identity_and_full_turn() {
        let mesh = get_unit_cube("a", "b", "c", "d", "e", "f", BlockMeshTransparency::FullOpaque);
        assert_eq!(mesh.rotate(0, 0), mesh);
        assert_eq!(mesh.rotate(4, -4), mesh);
        assert_eq!(mesh.rotate(1, 0).rotate(-1, 0), mesh);
    }

    #[test]
    fn test_face_keys() {
        assert_eq!(
            BlockMeshCullDirection::from_face_key(None),
            Some(BlockMeshCullDirection::None)
        );
        assert_eq!(
            BlockMeshCullDirection::from_face_key(Some("west")),
            Some(BlockMeshCullDirection::West)
        );
        assert_eq!(BlockMeshCullDirection::from_face_key(Some("bogus")), None);
    }

    #[test]
    fn test_validate_rejects_bad_indices() {
        let mesh = single_triangle_mesh("block/a", BlockMeshCullDirection::Up, 0.0);
        assert!(mesh.validate().is_ok());

        let mut bad_texture = mesh.clone();
        bad_texture.parts[BlockMeshCullDirection::Up.index()]
            .as_mut()
            .unwrap()
            .triangles[0]
            .texture_index = 3;
        assert!(matches!(bad_texture.validate(), Err(PackError::InvalidMesh(_))));

        let mut bad_vertex = mesh;
        bad_vertex.parts[BlockMeshCullDirection::Up.index()]
            .as_mut()
            .unwrap()
            .triangles[0]
            .vert_index_c = 7;
        assert!(matches!(bad_vertex.validate(), Err(PackError::InvalidMesh(_))));

        assert!(BlockMesh::default().validate().is_ok());
    }
}
