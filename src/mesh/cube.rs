//! Axis-aligned cube construction.

use super::{BlockMesh, BlockMeshCullDirection, BlockMeshPart, BlockMeshTransparency, Vertex};
use crate::types::Direction;
use glam::{Vec2, Vec3};

/// Face order used by [`get_cube`] for its texture array.
pub const CUBE_FACE_ORDER: [Direction; 6] = [
    Direction::Down,
    Direction::Up,
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

/// Build a full-block cube with one texture per face.
pub fn get_unit_cube(
    down: &str,
    up: &str,
    north: &str,
    east: &str,
    south: &str,
    west: &str,
    transparency: BlockMeshTransparency,
) -> BlockMesh {
    get_cube(
        Vec3::ZERO,
        Vec3::ONE,
        [down, up, north, east, south, west],
        transparency,
        Vec3::ONE,
    )
}

/// Build an axis-aligned box between `min` and `max` (block space, 0-1).
///
/// `textures` follows [`CUBE_FACE_ORDER`]. A face lying on the block boundary
/// goes into the part for its own direction; inner faces are never culled.
/// Each face gets four vertices and two triangles, with UVs taken from the
/// face's position on the block.
pub fn get_cube(
    min: Vec3,
    max: Vec3,
    textures: [&str; 6],
    transparency: BlockMeshTransparency,
    tint: Vec3,
) -> BlockMesh {
    let mut mesh = BlockMesh {
        transparency,
        ..BlockMesh::default()
    };

    for (direction, texture) in CUBE_FACE_ORDER.into_iter().zip(textures) {
        let texture_index = match mesh.textures.iter().position(|t| t == texture) {
            Some(index) => index,
            None => {
                mesh.textures.push(texture.to_string());
                mesh.textures.len() - 1
            }
        };

        let cull = if on_block_boundary(direction, min, max) {
            BlockMeshCullDirection::from(direction)
        } else {
            BlockMeshCullDirection::None
        };

        let part = mesh.parts[cull.index()].get_or_insert_with(BlockMeshPart::new);
        let positions = face_positions(direction, min, max);
        let uvs = face_uvs(direction, min, max);
        let indices: Vec<usize> = positions
            .iter()
            .zip(uvs)
            .map(|(pos, uv)| part.add_vertex(Vertex::new(*pos, uv, tint)))
            .collect();
        part.add_quad(indices[0], indices[1], indices[2], indices[3], texture_index);
    }

    mesh
}

fn on_block_boundary(direction: Direction, min: Vec3, max: Vec3) -> bool {
    match direction {
        Direction::Down => min.y <= 0.0,
        Direction::Up => max.y >= 1.0,
        Direction::North => min.z <= 0.0,
        Direction::South => max.z >= 1.0,
        Direction::West => min.x <= 0.0,
        Direction::East => max.x >= 1.0,
    }
}

/// Corner positions of a face, ordered to match [`face_uvs`].
fn face_positions(direction: Direction, from: Vec3, to: Vec3) -> [Vec3; 4] {
    match direction {
        Direction::Down => [
            Vec3::new(from.x, from.y, to.z),
            Vec3::new(to.x, from.y, to.z),
            Vec3::new(to.x, from.y, from.z),
            Vec3::new(from.x, from.y, from.z),
        ],
        Direction::Up => [
            Vec3::new(from.x, to.y, from.z),
            Vec3::new(to.x, to.y, from.z),
            Vec3::new(to.x, to.y, to.z),
            Vec3::new(from.x, to.y, to.z),
        ],
        Direction::North => [
            Vec3::new(to.x, to.y, from.z),
            Vec3::new(from.x, to.y, from.z),
            Vec3::new(from.x, from.y, from.z),
            Vec3::new(to.x, from.y, from.z),
        ],
        Direction::South => [
            Vec3::new(from.x, to.y, to.z),
            Vec3::new(to.x, to.y, to.z),
            Vec3::new(to.x, from.y, to.z),
            Vec3::new(from.x, from.y, to.z),
        ],
        Direction::West => [
            Vec3::new(from.x, to.y, from.z),
            Vec3::new(from.x, to.y, to.z),
            Vec3::new(from.x, from.y, to.z),
            Vec3::new(from.x, from.y, from.z),
        ],
        Direction::East => [
            Vec3::new(to.x, to.y, to.z),
            Vec3::new(to.x, to.y, from.z),
            Vec3::new(to.x, from.y, from.z),
            Vec3::new(to.x, from.y, to.z),
        ],
    }
}

/// UVs for a face: top-left, top-right, bottom-right, bottom-left.
/// V runs downwards, so vertical faces flip Y.
fn face_uvs(direction: Direction, from: Vec3, to: Vec3) -> [Vec2; 4] {
    let (u1, v1, u2, v2) = match direction {
        Direction::Down | Direction::Up => (from.x, from.z, to.x, to.z),
        Direction::North | Direction::South => (from.x, 1.0 - to.y, to.x, 1.0 - from.y),
        Direction::West | Direction::East => (from.z, 1.0 - to.y, to.z, 1.0 - from.y),
    };
    [
        Vec2::new(u1, v1),
        Vec2::new(u2, v1),
        Vec2::new(u2, v2),
        Vec2::new(u1, v2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cube_has_six_culled_faces() {
        let tex = "minecraft:block/stone";
        let mesh = get_unit_cube(tex, tex, tex, tex, tex, tex, BlockMeshTransparency::FullOpaque);

        assert_eq!(mesh.textures, vec![tex]);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.part(BlockMeshCullDirection::None).is_none());
        for direction in Direction::ALL {
            let part = mesh.part(direction.into()).unwrap();
            assert_eq!(part.vertex_count(), 4);
            assert_eq!(part.triangle_count(), 2);
        }
    }

    #[test]
    fn test_face_lies_on_its_side() {
        let mesh = get_unit_cube("d", "u", "n", "e", "s", "w", BlockMeshTransparency::FullOpaque);
        let east = mesh.part(BlockMeshCullDirection::East).unwrap();
        assert!(east.verts.iter().all(|v| v.coord.x == 1.0));
        assert_eq!(mesh.textures[east.triangles[0].texture_index], "e");

        let down = mesh.part(BlockMeshCullDirection::Down).unwrap();
        assert!(down.verts.iter().all(|v| v.coord.y == 0.0));
        assert_eq!(mesh.textures[down.triangles[0].texture_index], "d");
    }

    #[test]
    fn test_inner_faces_are_not_culled() {
        // A bottom slab: only the top face is inside the block.
        let mesh = get_cube(
            Vec3::ZERO,
            Vec3::new(1.0, 0.5, 1.0),
            ["t"; 6],
            BlockMeshTransparency::Partial,
            Vec3::ONE,
        );
        assert!(mesh.part(BlockMeshCullDirection::Up).is_none());
        let inner = mesh.part(BlockMeshCullDirection::None).unwrap();
        assert!(inner.verts.iter().all(|v| v.coord.y == 0.5));

        let north = mesh.part(BlockMeshCullDirection::North).unwrap();
        assert!(north.verts.iter().all(|v| v.texture_coord.y >= 0.5));
    }
}
