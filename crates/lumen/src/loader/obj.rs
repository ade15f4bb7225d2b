use std::path::Path;

use anyhow::{Context, Result};

use crate::{
    color::Color,
    material::{texture, Diffuse, MaterialDescriptor, MaterialId},
    math::transform::Transform,
    mesh::TriMesh,
    scene::Scene,
};

pub trait ObjLoaderExt {
    /// Load every model of an OBJ file into the scene. Vertex normals are
    /// taken from the file when present and computed otherwise.
    fn load_obj<P: AsRef<Path>>(
        &mut self,
        mesh_path: P,
        transform: Transform,
        default_material: MaterialId,
    ) -> Result<()>;
}

impl ObjLoaderExt for Scene {
    fn load_obj<P: AsRef<Path>>(
        &mut self,
        mesh_path: P,
        transform: Transform,
        default_material: MaterialId,
    ) -> Result<()> {
        let mesh_path = mesh_path.as_ref();
        let mut options = tobj::GPU_LOAD_OPTIONS;
        options.single_index = true;

        let (models, materials) = tobj::load_obj(mesh_path, &options)
            .with_context(|| format!("failed to load OBJ file {}", mesh_path.display()))?;

        let mut material_ids = vec![];
        if let Ok(materials) = materials {
            for material in materials {
                let mat_id = self.insert_material(MaterialDescriptor {
                    label: Some(material.name.clone()),
                    material: Box::new(Diffuse {
                        texture: Box::new(texture::Uniform(Color::from(material.diffuse))),
                    }),
                });
                log::debug!(
                    "inserted material {} with diffuse {:?} as {mat_id:?}",
                    material.name,
                    material.diffuse,
                );
                material_ids.push(mat_id);
            }
        }

        for model in models {
            let mesh = &model.mesh;
            log::debug!(
                "loading model {}; {} faces",
                model.name,
                mesh.indices.len() / 3
            );

            let material = match mesh.material_id {
                Some(mat_id) => *material_ids.get(mat_id).unwrap_or(&default_material),
                None => default_material,
            };

            let mut tri_mesh = TriMesh::from_buffers(
                &mesh.positions,
                Some(&mesh.normals),
                Some(&mesh.indices),
            )
            .with_context(|| format!("malformed geometry in model {}", model.name))?;

            if !tri_mesh.has_vertex_normals() {
                tri_mesh.compute_vertex_normals();
            }

            self.insert_shape_list(tri_mesh.instantiate(&transform, material));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn missing_file_is_an_error() {
        let mut scene = Scene::new();
        let result = scene.load_obj(
            "does/not/exist.obj",
            Transform::IDENTITY,
            MaterialId(0),
        );
        assert!(result.is_err());
        assert!(scene.objects.is_empty());
    }

    #[test]
    fn tiny_obj_loads_and_instances() {
        let dir = std::env::temp_dir().join("lumen_obj_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tri.obj");
        std::fs::write(
            &path,
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();

        let mut scene = Scene::new();
        scene
            .load_obj(&path, Transform::scaling(Vec3::splat(2.0)), MaterialId(0))
            .unwrap();

        assert_eq!(scene.objects.len(), 1);
        use crate::shape::Shape;
        let bounds = scene.objects.bounding_box();
        assert!(bounds.max.distance(Vec3::new(2.0, 2.0, 0.0)) < 1e-6);
    }
}
