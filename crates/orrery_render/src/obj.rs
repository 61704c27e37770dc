//! Wavefront OBJ loader for the scene's models.
//!
//! Parses positions, texture coordinates, normals, and faces (triangulating
//! polygons as a fan, accepting negative indices), deduplicates vertices into
//! an indexed mesh, and reconstructs normals when the file omits them. The
//! companion `.mtl` file is scanned only for the first `map_Kd` entry, which
//! names the diffuse texture.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::vertex::ModelVertex;

/// CPU-side mesh data parsed from an OBJ file, ready for buffer upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjModel {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    /// Diffuse texture path resolved relative to the OBJ file, if the
    /// material library names one.
    pub diffuse_texture: Option<PathBuf>,
}

/// Load an OBJ file and resolve its diffuse texture through the `.mtl`
/// library referenced by `mtllib`, if present.
pub fn load_obj(path: &Path) -> Result<ObjModel, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read OBJ file '{}': {e}", path.display()))?;
    let mut model = parse_obj(&data)?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    if let Some(mtl_name) = mtllib_name(&data) {
        let mtl_path = dir.join(mtl_name);
        match std::fs::read_to_string(&mtl_path) {
            Ok(mtl) => {
                model.diffuse_texture = diffuse_map_name(&mtl).map(|name| dir.join(name));
            }
            Err(err) => {
                log::warn!(
                    "Material library '{}' not readable ({err}); model renders untextured",
                    mtl_path.display()
                );
            }
        }
    }
    Ok(model)
}

/// Parse OBJ text into an indexed mesh. Fails on malformed vertex or face
/// records; unknown tags are skipped.
pub fn parse_obj(data: &str) -> Result<ObjModel, String> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut tex_coords: Vec<[f32; 2]> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut faces: Vec<[FaceIndex; 3]> = Vec::new();

    for (line_no, line) in data.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };
        match tag {
            "v" => positions.push(
                parse_vec3(&mut parts)
                    .map_err(|e| format!("invalid vertex on line {}: {e}", line_no + 1))?,
            ),
            "vt" => {
                let u = parse_f32(&mut parts)
                    .map_err(|e| format!("invalid texcoord on line {}: {e}", line_no + 1))?;
                let v = parse_f32(&mut parts)
                    .map_err(|e| format!("invalid texcoord on line {}: {e}", line_no + 1))?;
                tex_coords.push([u, v]);
            }
            "vn" => normals.push(
                parse_vec3(&mut parts)
                    .map_err(|e| format!("invalid normal on line {}: {e}", line_no + 1))?,
            ),
            "f" => {
                let polygon = parse_face(parts)
                    .map_err(|e| format!("invalid face on line {}: {e}", line_no + 1))?;
                triangulate_face(&polygon, &mut faces);
            }
            _ => {}
        }
    }

    if positions.is_empty() {
        return Err("OBJ file does not define any vertices".to_string());
    }

    let mut model = build_model(&positions, &tex_coords, &normals, &faces)?;
    if model.vertices.iter().any(|v| v.normal == [0.0; 3]) {
        compute_normals(&mut model);
    }
    Ok(model)
}

fn mtllib_name(data: &str) -> Option<&str> {
    data.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("mtllib "))
        .map(str::trim)
}

fn diffuse_map_name(mtl: &str) -> Option<&str> {
    mtl.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("map_Kd "))
        // Texture options may precede the filename; keep the last token.
        .and_then(|rest| rest.split_whitespace().last())
}

fn parse_f32<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<f32, String> {
    parts
        .next()
        .ok_or_else(|| "missing component".to_string())?
        .parse::<f32>()
        .map_err(|e| e.to_string())
}

fn parse_vec3<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<Vec3, String> {
    let x = parse_f32(parts)?;
    let y = parse_f32(parts)?;
    let z = parse_f32(parts)?;
    Ok(Vec3::new(x, y, z))
}

#[derive(Debug, Clone, Copy)]
struct FaceIndex {
    v: i32,
    vt: i32,
    vn: i32,
}

fn parse_face<'a>(parts: impl Iterator<Item = &'a str>) -> Result<Vec<FaceIndex>, String> {
    let mut indices = Vec::new();
    for part in parts {
        let mut segments = part.split('/');
        let v = segments
            .next()
            .ok_or_else(|| "missing vertex index".to_string())?
            .parse::<i32>()
            .map_err(|e| e.to_string())?;
        let vt = segments
            .next()
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<i32>().ok())
            .unwrap_or(0);
        let vn = segments
            .next()
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<i32>().ok())
            .unwrap_or(0);
        indices.push(FaceIndex { v, vt, vn });
    }
    if indices.len() < 3 {
        return Err("faces must reference at least 3 vertices".to_string());
    }
    Ok(indices)
}

fn triangulate_face(polygon: &[FaceIndex], faces: &mut Vec<[FaceIndex; 3]>) {
    for i in 1..(polygon.len() - 1) {
        faces.push([polygon[0], polygon[i], polygon[i + 1]]);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Key {
    position: usize,
    tex_coord: Option<usize>,
    normal: Option<usize>,
}

fn build_model(
    positions: &[Vec3],
    tex_coords: &[[f32; 2]],
    normals: &[Vec3],
    faces: &[[FaceIndex; 3]],
) -> Result<ObjModel, String> {
    let mut lookup: HashMap<Key, u32> = HashMap::new();
    let mut vertices: Vec<ModelVertex> = Vec::new();
    let mut indices = Vec::new();

    for face in faces {
        for idx in face {
            let pos_index = fix_index(idx.v, positions.len())
                .ok_or_else(|| "invalid vertex index".to_string())?;
            let tc_index = fix_index(idx.vt, tex_coords.len());
            let normal_index = fix_index(idx.vn, normals.len());
            let key = Key {
                position: pos_index,
                tex_coord: tc_index,
                normal: normal_index,
            };
            let next_index = vertices.len() as u32;
            let entry = lookup.entry(key).or_insert_with(|| {
                vertices.push(ModelVertex {
                    position: positions[pos_index].to_array(),
                    normal: normal_index
                        .map(|i| normals[i].to_array())
                        .unwrap_or([0.0; 3]),
                    tex_coords: tc_index.map(|i| tex_coords[i]).unwrap_or([0.0; 2]),
                });
                next_index
            });
            indices.push(*entry);
        }
    }

    Ok(ObjModel {
        vertices,
        indices,
        diffuse_texture: None,
    })
}

/// OBJ indices are 1-based; negative values count back from the end of the
/// attribute list. Zero means "absent".
fn fix_index(index: i32, len: usize) -> Option<usize> {
    if index > 0 {
        let zero_based = index as usize - 1;
        (zero_based < len).then_some(zero_based)
    } else if index < 0 {
        let abs = (-index) as usize;
        (abs <= len).then_some(len - abs)
    } else {
        None
    }
}

/// Area-weighted face normals accumulated per vertex, for files that omit
/// `vn` records.
fn compute_normals(model: &mut ObjModel) {
    let mut accum = vec![Vec3::ZERO; model.vertices.len()];

    for triangle in model.indices.chunks_exact(3) {
        let i0 = triangle[0] as usize;
        let i1 = triangle[1] as usize;
        let i2 = triangle[2] as usize;
        let p0 = Vec3::from_array(model.vertices[i0].position);
        let p1 = Vec3::from_array(model.vertices[i1].position);
        let p2 = Vec3::from_array(model.vertices[i2].position);
        // The raw cross product's magnitude is twice the face area, so larger
        // faces pull their vertices' normals harder; degenerate faces
        // contribute nothing.
        let normal = (p1 - p0).cross(p2 - p0);
        accum[i0] += normal;
        accum[i1] += normal;
        accum[i2] += normal;
    }

    for (vertex, normal) in model.vertices.iter_mut().zip(accum) {
        if vertex.normal == [0.0; 3] {
            vertex.normal = normal.normalize_or_zero().to_array();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_simple_triangle() {
        let obj = "\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let model = parse_obj(obj).unwrap();
        assert_eq!(model.indices, vec![0, 1, 2]);
        assert_eq!(model.vertices.len(), 3);
    }

    #[test]
    fn test_parses_full_face_records() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";
        let model = parse_obj(obj).unwrap();
        assert_eq!(model.vertices.len(), 3);
        assert_eq!(model.vertices[1].tex_coords, [1.0, 0.0]);
        assert_eq!(model.vertices[2].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_triangulates_quads_as_fan() {
        let obj = "\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let model = parse_obj(obj).unwrap();
        assert_eq!(model.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_negative_indices_count_from_end() {
        let obj = "\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let model = parse_obj(obj).unwrap();
        assert_eq!(model.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_computes_missing_normals() {
        let obj = "\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let model = parse_obj(obj).unwrap();
        for vertex in &model.vertices {
            let normal = Vec3::from_array(vertex.normal);
            assert!((normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_generated_normals_weighted_by_face_area() {
        // Vertex 1 is shared by a large +Z triangle and a tiny +Y triangle;
        // the accumulated normal must lean almost entirely toward +Z.
        let obj = "\
v 0 0 0
v 10 0 0
v 0 10 0
v 0 0 1
f 1 2 3
f 1 4 2
";
        let model = parse_obj(obj).unwrap();
        let shared = Vec3::from_array(model.vertices[0].normal);
        assert!(shared.z > 0.99, "normal = {shared}");
        assert!(shared.y < 0.1);
    }

    #[test]
    fn test_deduplicates_shared_corners() {
        let obj = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3
f 1 3 4
";
        let model = parse_obj(obj).unwrap();
        assert_eq!(model.vertices.len(), 4);
        assert_eq!(model.indices.len(), 6);
    }

    #[test]
    fn test_rejects_empty_file() {
        assert!(parse_obj("# nothing here\n").is_err());
    }

    #[test]
    fn test_rejects_malformed_vertex() {
        assert!(parse_obj("v 1.0 banana 3.0\nf 1 1 1\n").is_err());
    }

    #[test]
    fn test_diffuse_map_name_skips_options() {
        let mtl = "newmtl sun\nmap_Kd -bm 0.5 textures/sun.jpg\n";
        assert_eq!(diffuse_map_name(mtl), Some("textures/sun.jpg"));
    }

    #[test]
    fn test_mtllib_name_found() {
        let obj = "mtllib planet.mtl\nv 0 0 0\n";
        assert_eq!(mtllib_name(obj), Some("planet.mtl"));
    }
}
