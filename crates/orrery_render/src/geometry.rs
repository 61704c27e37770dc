//! Static vertex data for the scene's primitive geometry: the skybox cube, the
//! wooden box exterior, its transparent window face, the face-culling test box,
//! and the world-space metal floor quad.

use crate::vertex::{ModelVertex, SkyVertex, TexturedVertex};

fn sky(position: [f32; 3]) -> SkyVertex {
    SkyVertex { position }
}

fn tex(position: [f32; 3], tex_coords: [f32; 2]) -> TexturedVertex {
    TexturedVertex {
        position,
        tex_coords,
    }
}

/// Unit cube, positions only, viewed from the inside.
pub fn skybox_vertices() -> Vec<SkyVertex> {
    [
        // -Z face
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        // -X face
        [-1.0, -1.0, 1.0],
        [-1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, 1.0, 1.0],
        [-1.0, -1.0, 1.0],
        // +X face
        [1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [1.0, 1.0, -1.0],
        [1.0, -1.0, -1.0],
        // +Z face
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [1.0, -1.0, 1.0],
        [-1.0, -1.0, 1.0],
        // +Y face
        [-1.0, 1.0, -1.0],
        [1.0, 1.0, -1.0],
        [1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
        [-1.0, 1.0, -1.0],
        // -Y face
        [-1.0, -1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
    ]
    .into_iter()
    .map(sky)
    .collect()
}

/// Five faces of the wooden box; the +X face is left open for the transparent
/// window quad drawn afterwards.
pub fn box_exterior_vertices() -> Vec<TexturedVertex> {
    [
        // -Z face
        ([-0.5, -0.5, -0.5], [0.0, 0.0]),
        ([0.5, -0.5, -0.5], [1.0, 0.0]),
        ([0.5, 0.5, -0.5], [1.0, 1.0]),
        ([0.5, 0.5, -0.5], [1.0, 1.0]),
        ([-0.5, 0.5, -0.5], [0.0, 1.0]),
        ([-0.5, -0.5, -0.5], [0.0, 0.0]),
        // -X face
        ([-0.5, 0.5, 0.5], [1.0, 0.0]),
        ([-0.5, 0.5, -0.5], [1.0, 1.0]),
        ([-0.5, -0.5, -0.5], [0.0, 1.0]),
        ([-0.5, -0.5, -0.5], [0.0, 1.0]),
        ([-0.5, -0.5, 0.5], [0.0, 0.0]),
        ([-0.5, 0.5, 0.5], [1.0, 0.0]),
        // +Z face
        ([-0.5, -0.5, 0.5], [0.0, 0.0]),
        ([0.5, -0.5, 0.5], [1.0, 0.0]),
        ([0.5, 0.5, 0.5], [1.0, 1.0]),
        ([0.5, 0.5, 0.5], [1.0, 1.0]),
        ([-0.5, 0.5, 0.5], [0.0, 1.0]),
        ([-0.5, -0.5, 0.5], [0.0, 0.0]),
        // -Y face
        ([-0.5, -0.5, -0.5], [0.0, 1.0]),
        ([0.5, -0.5, -0.5], [1.0, 1.0]),
        ([0.5, -0.5, 0.5], [1.0, 0.0]),
        ([0.5, -0.5, 0.5], [1.0, 0.0]),
        ([-0.5, -0.5, 0.5], [0.0, 0.0]),
        ([-0.5, -0.5, -0.5], [0.0, 1.0]),
        // +Y face
        ([-0.5, 0.5, -0.5], [0.0, 1.0]),
        ([0.5, 0.5, -0.5], [1.0, 1.0]),
        ([0.5, 0.5, 0.5], [1.0, 0.0]),
        ([0.5, 0.5, 0.5], [1.0, 0.0]),
        ([-0.5, 0.5, 0.5], [0.0, 0.0]),
        ([-0.5, 0.5, -0.5], [0.0, 1.0]),
    ]
    .into_iter()
    .map(|(p, t)| tex(p, t))
    .collect()
}

/// The semi-transparent +X window face of the wooden box. Must be drawn after
/// the opaque exterior so blending composites against it.
pub fn window_face_vertices() -> Vec<TexturedVertex> {
    [
        ([0.5, 0.5, 0.5], [1.0, 0.0]),
        ([0.5, 0.5, -0.5], [1.0, 1.0]),
        ([0.5, -0.5, -0.5], [0.0, 1.0]),
        ([0.5, -0.5, -0.5], [0.0, 1.0]),
        ([0.5, -0.5, 0.5], [0.0, 0.0]),
        ([0.5, 0.5, 0.5], [1.0, 0.0]),
    ]
    .into_iter()
    .map(|(p, t)| tex(p, t))
    .collect()
}

/// Full cube with mixed winding: drawn through the front-face-culling pipeline
/// (clockwise front faces, front culled) so the interior never renders.
pub fn culled_box_vertices() -> Vec<TexturedVertex> {
    [
        ([-0.5, -0.5, -0.5], [0.0, 0.0]),
        ([0.5, -0.5, -0.5], [1.0, 0.0]),
        ([0.5, 0.5, -0.5], [1.0, 1.0]),
        ([0.5, 0.5, -0.5], [1.0, 1.0]),
        ([-0.5, 0.5, -0.5], [0.0, 1.0]),
        ([-0.5, -0.5, -0.5], [0.0, 0.0]),
        //
        ([-0.5, -0.5, 0.5], [0.0, 0.0]),
        ([0.5, 0.5, 0.5], [1.0, 1.0]),
        ([0.5, -0.5, 0.5], [1.0, 0.0]),
        ([0.5, 0.5, 0.5], [1.0, 1.0]),
        ([-0.5, -0.5, 0.5], [0.0, 0.0]),
        ([-0.5, 0.5, 0.5], [0.0, 1.0]),
        //
        ([-0.5, 0.5, 0.5], [1.0, 0.0]),
        ([-0.5, -0.5, -0.5], [0.0, 1.0]),
        ([-0.5, 0.5, -0.5], [1.0, 1.0]),
        ([-0.5, -0.5, -0.5], [0.0, 1.0]),
        ([-0.5, 0.5, 0.5], [1.0, 0.0]),
        ([-0.5, -0.5, 0.5], [0.0, 0.0]),
        //
        ([0.5, 0.5, 0.5], [1.0, 0.0]),
        ([0.5, 0.5, -0.5], [1.0, 1.0]),
        ([0.5, -0.5, -0.5], [0.0, 1.0]),
        ([0.5, -0.5, -0.5], [0.0, 1.0]),
        ([0.5, -0.5, 0.5], [0.0, 0.0]),
        ([0.5, 0.5, 0.5], [1.0, 0.0]),
        //
        ([-0.5, -0.5, -0.5], [0.0, 1.0]),
        ([0.5, -0.5, 0.5], [1.0, 0.0]),
        ([0.5, -0.5, -0.5], [1.0, 1.0]),
        ([0.5, -0.5, 0.5], [1.0, 0.0]),
        ([-0.5, -0.5, -0.5], [0.0, 1.0]),
        ([-0.5, -0.5, 0.5], [0.0, 0.0]),
        //
        ([-0.5, 0.5, -0.5], [0.0, 1.0]),
        ([0.5, 0.5, -0.5], [1.0, 1.0]),
        ([0.5, 0.5, 0.5], [1.0, 0.0]),
        ([0.5, 0.5, 0.5], [1.0, 0.0]),
        ([-0.5, 0.5, 0.5], [0.0, 0.0]),
        ([-0.5, 0.5, -0.5], [0.0, 1.0]),
    ]
    .into_iter()
    .map(|(p, t)| tex(p, t))
    .collect()
}

/// World-space metal floor quad under the boxes. Vertices are already placed
/// in world coordinates; the floor shader applies no model transform.
pub fn floor_vertices() -> Vec<ModelVertex> {
    [
        ([-3.0, -0.55, -4.0], [1.0, 1.0]),
        ([-3.0, -0.55, 0.0], [1.0, 0.0]),
        ([-7.0, -0.55, -4.0], [0.0, 1.0]),
        ([-3.0, -0.55, 0.0], [1.0, 0.0]),
        ([-7.0, -0.55, 0.0], [0.0, 0.0]),
        ([-7.0, -0.55, -4.0], [0.0, 1.0]),
    ]
    .into_iter()
    .map(|(position, tex_coords)| ModelVertex {
        position,
        normal: [0.0, 1.0, 0.0],
        tex_coords,
    })
    .collect()
}

/// Placeholder mesh substituted when an OBJ model fails to load: a unit cube
/// with outward normals, so the scene still shows something where the model
/// belongs.
pub fn fallback_cube_vertices() -> Vec<ModelVertex> {
    let faces: [([f32; 3], [[f32; 3]; 6]); 6] = [
        (
            [0.0, 0.0, -1.0],
            [
                [-0.5, -0.5, -0.5],
                [-0.5, 0.5, -0.5],
                [0.5, 0.5, -0.5],
                [0.5, 0.5, -0.5],
                [0.5, -0.5, -0.5],
                [-0.5, -0.5, -0.5],
            ],
        ),
        (
            [0.0, 0.0, 1.0],
            [
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, -0.5, 0.5],
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [-0.5, -0.5, 0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, -0.5],
                [-0.5, -0.5, -0.5],
            ],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                [0.5, -0.5, -0.5],
                [0.5, 0.5, -0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, -0.5, -0.5],
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [0.5, -0.5, -0.5],
                [0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [-0.5, -0.5, 0.5],
                [-0.5, -0.5, -0.5],
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                [-0.5, 0.5, -0.5],
                [-0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, -0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
    ];

    let mut vertices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        for position in corners {
            vertices.push(ModelVertex {
                position,
                normal,
                tex_coords: [0.0, 0.0],
            });
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_counts_match_scene_layout() {
        assert_eq!(skybox_vertices().len(), 36);
        assert_eq!(box_exterior_vertices().len(), 30);
        assert_eq!(window_face_vertices().len(), 6);
        assert_eq!(culled_box_vertices().len(), 36);
        assert_eq!(floor_vertices().len(), 6);
        assert_eq!(fallback_cube_vertices().len(), 36);
    }

    #[test]
    fn test_floor_is_flat_and_up_facing() {
        for v in floor_vertices() {
            assert_eq!(v.position[1], -0.55);
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_window_face_lies_on_open_box_side() {
        for v in window_face_vertices() {
            assert_eq!(v.position[0], 0.5);
        }
    }

    #[test]
    fn test_fallback_cube_normals_are_unit_axis_aligned() {
        for v in fallback_cube_vertices() {
            let len: f32 = v.normal.iter().map(|c| c * c).sum();
            assert_eq!(len, 1.0);
        }
    }
}
