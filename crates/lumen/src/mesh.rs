use anyhow::{bail, ensure, Result};
use glam::Vec3;

use crate::{
    aggregate::ShapeList,
    material::MaterialId,
    math::transform::Transform,
    shape::{Shape, Triangle},
};

/// An indexed triangle mesh built from flat scalar buffers, the
/// create-from-data entry point of the renderer.
pub struct TriMesh {
    pub positions: Vec<Vec3>,
    pub normals: Option<Vec<Vec3>>,
    pub indices: Vec<u32>,
}

/// Flatten 3-vectors into a flat scalar list, `v0.x v0.y v0.z v1.x ...`.
pub fn flatten(points: &[Vec3]) -> Vec<f32> {
    bytemuck::cast_slice(points).to_vec()
}

impl TriMesh {
    /// Build a mesh from flat `x y z` scalar buffers.
    ///
    /// Without `indices` the positions are taken as a triangle soup, three
    /// vertices per face.
    pub fn from_buffers(
        positions: &[f32],
        normals: Option<&[f32]>,
        indices: Option<&[u32]>,
    ) -> Result<Self> {
        ensure!(!positions.is_empty(), "mesh has no vertices");
        ensure!(
            positions.len() % 3 == 0,
            "position buffer length {} is not a multiple of 3",
            positions.len()
        );
        let vertex_count = positions.len() / 3;

        let positions: Vec<Vec3> = bytemuck::cast_slice(positions).to_vec();

        let normals = match normals {
            Some(normals) if normals.is_empty() => None,
            Some(normals) => {
                ensure!(
                    normals.len() == 3 * vertex_count,
                    "normal buffer length {} does not match {} vertices",
                    normals.len(),
                    vertex_count
                );
                Some(bytemuck::cast_slice(normals).to_vec())
            }
            None => None,
        };

        let indices = match indices {
            Some(indices) => {
                ensure!(
                    indices.len() % 3 == 0,
                    "index buffer length {} is not a multiple of 3",
                    indices.len()
                );
                if let Some(&oob) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                    bail!("index {oob} out of bounds for {vertex_count} vertices");
                }
                indices.to_vec()
            }
            None => {
                ensure!(
                    vertex_count % 3 == 0,
                    "triangle soup vertex count {vertex_count} is not a multiple of 3"
                );
                (0..vertex_count as u32).collect()
            }
        };

        Ok(Self {
            positions,
            normals,
            indices,
        })
    }

    pub fn has_vertex_normals(&self) -> bool {
        self.normals.is_some()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Area weighted vertex normals from face windings.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for face in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [face[0] as usize, face[1] as usize, face[2] as usize];
            let face_normal = (self.positions[i1] - self.positions[i0])
                .cross(self.positions[i2] - self.positions[i0]);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        self.normals = Some(normals.into_iter().map(Vec3::normalize_or_zero).collect());
    }

    /// Instantiate the mesh as triangle shapes, transformed into world space.
    pub fn instantiate(&self, transform: &Transform, material: MaterialId) -> ShapeList {
        let mut shapes: Vec<Box<dyn Shape>> = Vec::with_capacity(self.triangle_count());

        for face in self.indices.chunks_exact(3) {
            let vertices = [face[0], face[1], face[2]]
                .map(|i| transform.apply_point(self.positions[i as usize]));

            let triangle = match &self.normals {
                Some(normals) => Triangle {
                    vertices,
                    normals: [face[0], face[1], face[2]]
                        .map(|i| transform.apply_normal(normals[i as usize])),
                    material,
                },
                None => Triangle::flat(vertices, material),
            };
            shapes.push(Box::new(triangle));
        }

        ShapeList(shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_preserves_count_and_order() {
        let points = [Vec3::new(1., 2., 3.), Vec3::new(4., 5., 6.)];
        let flat = flatten(&points);
        assert_eq!(flat.len(), 3 * points.len());
        assert_eq!(flat, vec![1., 2., 3., 4., 5., 6.]);
    }

    #[test]
    fn soup_gets_sequential_indices() {
        let mesh = TriMesh::from_buffers(&[0.; 9], None, None).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.has_vertex_normals());
    }

    #[test]
    fn ragged_buffers_are_rejected() {
        assert!(TriMesh::from_buffers(&[0.; 8], None, None).is_err());
        assert!(TriMesh::from_buffers(&[], None, None).is_err());
        // 4 vertices cannot be a soup
        assert!(TriMesh::from_buffers(&[0.; 12], None, None).is_err());
        // mismatched normal buffer
        assert!(TriMesh::from_buffers(&[0.; 9], Some(&[0.; 6]), None).is_err());
        // out of bounds index
        assert!(TriMesh::from_buffers(&[0.; 9], None, Some(&[0, 1, 3])).is_err());
    }

    #[test]
    fn empty_normal_buffer_counts_as_absent() {
        let mesh = TriMesh::from_buffers(&[0.; 9], Some(&[]), None).unwrap();
        assert!(!mesh.has_vertex_normals());
    }

    #[test]
    fn computed_normals_face_out_of_the_plane() {
        let positions = flatten(&[
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::X,
            Vec3::new(1., 1., 0.),
            Vec3::Y,
        ]);
        let mut mesh = TriMesh::from_buffers(&positions, None, None).unwrap();
        mesh.compute_vertex_normals();

        for n in mesh.normals.as_ref().unwrap() {
            assert!(n.distance(Vec3::Z) < 1e-6);
        }
    }

    #[test]
    fn instantiate_applies_the_transform() {
        let positions = flatten(&[Vec3::ZERO, Vec3::X, Vec3::Y]);
        let mesh = TriMesh::from_buffers(&positions, None, None).unwrap();
        let list = mesh.instantiate(&Transform::scaling(Vec3::splat(0.3)), MaterialId(0));

        assert_eq!(list.len(), 1);
        let bounds = list.bounding_box();
        assert!(bounds.max.distance(Vec3::new(0.3, 0.3, 0.0)) < 1e-6);
    }
}
