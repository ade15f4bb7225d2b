use crate::{
    aggregate::ShapeList,
    color::gray,
    material::{texture::Uniform, Emit, MaterialDescriptor, MaterialId},
    shape::Shape,
};

/// Scene under construction: shapes, materials and the dome light.
///
/// Everything is create-once; a [crate::renderer::World] snapshot is taken
/// before rendering.
pub struct Scene {
    pub objects: ShapeList,
    pub materials: Vec<MaterialDescriptor>,
    dome_material: MaterialId,
}

impl Scene {
    /// An empty scene lit by a dome light of intensity 1.
    pub fn new() -> Self {
        let mut this = Self {
            objects: ShapeList::default(),
            materials: Vec::new(),
            dome_material: MaterialId(0),
        };
        this.dome_material = this.insert_material(MaterialDescriptor {
            label: Some("Dome".to_owned()),
            material: Box::new(Emit {
                texture: Box::new(Uniform(gray(1.0))),
            }),
        });
        this
    }

    pub fn insert_object<T: Shape + 'static>(&mut self, object: T) {
        self.objects.0.push(Box::new(object))
    }

    pub fn insert_shape_list(&mut self, list: ShapeList) {
        self.objects.0.extend(list.0)
    }

    /// Insert a material and return its id.
    pub fn insert_material(&mut self, material: MaterialDescriptor) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Uniform environment light seen by every ray that escapes the scene.
    pub fn set_dome_light_intensity(&mut self, intensity: f32) {
        self.materials[self.dome_material.0].material = Box::new(Emit {
            texture: Box::new(Uniform(gray(intensity))),
        });
    }

    pub fn dome_material(&self) -> MaterialId {
        self.dome_material
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
