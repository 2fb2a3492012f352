use std::path::Path;

use glam::Vec3;

use crate::AssetError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Loads every model of a Wavefront OBJ file into a single triangle list.
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let name = path.display().to_string();

        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )
        .map_err(|source| AssetError::Obj {
            path: name.clone(),
            source,
        })?;

        let mut mesh = MeshData::default();
        for model in &models {
            let part = MeshData::from_buffers(
                &name,
                &model.mesh.positions,
                &model.mesh.normals,
                &model.mesh.texcoords,
                &model.mesh.indices,
            )?;
            mesh.append(part);
        }

        if mesh.indices.is_empty() {
            return Err(AssetError::EmptyMesh(name));
        }

        log::debug!(
            "Loaded {}: {} models, {} vertices, {} triangles",
            name,
            models.len(),
            mesh.vertices.len(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }

    /// Interleaves flat attribute lists (SoA -> AoS).
    /// Missing normals are rebuilt from the triangles, missing UVs become zero.
    pub fn from_buffers(
        name: &str,
        positions: &[f32],
        normals: &[f32],
        uvs: &[f32],
        indices: &[u32],
    ) -> Result<Self, AssetError> {
        let positions: Vec<[f32; 3]> = positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();
        let count = positions.len();

        if let Some(&index) = indices.iter().find(|&&i| i as usize >= count) {
            return Err(AssetError::IndexOutOfRange {
                path: name.to_owned(),
                index,
                count,
            });
        }

        let normals: Vec<[f32; 3]> = if normals.len() == count * 3 {
            normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect()
        } else {
            smooth_normals(&positions, indices)
        };

        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex {
                position: *position,
                normal: normals[i],
                uv: if uvs.len() == count * 2 {
                    [uvs[i * 2], uvs[i * 2 + 1]]
                } else {
                    [0.0, 0.0]
                },
            })
            .collect();

        Ok(Self {
            vertices,
            indices: indices.to_vec(),
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn append(&mut self, other: MeshData) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + offset));
    }
}

/// Area-weighted vertex normals.
fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let pa = Vec3::from(positions[a]);
        let pb = Vec3::from(positions[b]);
        let pc = Vec3::from(positions[c]);

        // Cross product length is twice the triangle area, which gives the weighting.
        let face = (pb - pa).cross(pc - pa);
        accumulated[a] += face;
        accumulated[b] += face;
        accumulated[c] += face;
    }

    accumulated
        .into_iter()
        .map(|n| n.normalize_or(Vec3::Z).to_array())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two triangles forming a unit quad in the XY plane, counter-clockwise from +Z.
    const QUAD_POSITIONS: [f32; 12] = [
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.0, 1.0, 0.0,
    ];
    const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

    #[test]
    fn missing_normals_are_rebuilt_from_winding() {
        let mesh = MeshData::from_buffers("quad", &QUAD_POSITIONS, &[], &[], &QUAD_INDICES)
            .expect("valid quad");

        assert_eq!(mesh.vertices.len(), 4);
        for vertex in &mesh.vertices {
            assert!(Vec3::from(vertex.normal).abs_diff_eq(Vec3::Z, 1e-6));
            assert_eq!(vertex.uv, [0.0, 0.0]);
        }
    }

    #[test]
    fn provided_attributes_are_kept() {
        let normals = [0.0, 0.0, -1.0].repeat(4);
        let uvs = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];

        let mesh = MeshData::from_buffers("quad", &QUAD_POSITIONS, &normals, &uvs, &QUAD_INDICES)
            .expect("valid quad");

        assert_eq!(mesh.vertices[2].normal, [0.0, 0.0, -1.0]);
        assert_eq!(mesh.vertices[2].uv, [1.0, 1.0]);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let result = MeshData::from_buffers("broken", &QUAD_POSITIONS, &[], &[], &[0, 1, 4]);

        assert!(matches!(
            result,
            Err(AssetError::IndexOutOfRange { index: 4, count: 4, .. })
        ));
    }

    #[test]
    fn appended_parts_keep_their_own_vertices() {
        let mut mesh = MeshData::from_buffers("a", &QUAD_POSITIONS, &[], &[], &QUAD_INDICES)
            .expect("valid quad");
        let other = MeshData::from_buffers("b", &QUAD_POSITIONS, &[], &[], &QUAD_INDICES)
            .expect("valid quad");

        mesh.append(other);

        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn missing_file_is_an_obj_error() {
        let result = MeshData::load_obj("does/not/exist.obj");

        assert!(matches!(result, Err(AssetError::Obj { .. })));
    }
}
