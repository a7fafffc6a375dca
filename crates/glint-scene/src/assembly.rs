//! Assemblies and the entities they contain.

use serde::Serialize;

use glint_math::Transform;

use crate::entity::{EntitySet, Named};
use crate::param::ParamMap;
use crate::shader::{Material, ShaderGroup, SurfaceShader};
use crate::transform::TransformSequence;

/// A named color with explicit component values.
#[derive(Debug, Clone, Serialize)]
pub struct ColorEntity {
    /// Entity name.
    pub name: String,
    /// Color parameters such as `color_space` and `multiplier`.
    pub params: ParamMap,
    /// Component values.
    pub values: Vec<f32>,
}

impl ColorEntity {
    /// A color entity from parameters and component values.
    pub fn new(name: impl Into<String>, params: ParamMap, values: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            params,
            values,
        }
    }
}

impl Named for ColorEntity {
    const KIND: &'static str = "color";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A light source.
#[derive(Debug, Clone, Serialize)]
pub struct Light {
    /// Entity name.
    pub name: String,
    /// Renderer model tag.
    pub model: String,
    /// Light parameters.
    pub params: ParamMap,
    /// Local-to-parent placement, row-major.
    pub transform: [f64; 16],
}

impl Light {
    /// An isotropic point light.
    pub fn point(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            model: "point_light".into(),
            params,
            transform: Transform::identity().to_row_major(),
        }
    }

    /// Place the light.
    pub fn set_transform(&mut self, transform: &Transform) {
        self.transform = transform.to_row_major();
    }
}

impl Named for Light {
    const KIND: &'static str = "light";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A renderable geometry wrapper.
///
/// The `model` tag names the renderer plugin that resolves `params` into
/// geometry at render time; the scene document only carries the reference.
#[derive(Debug, Clone, Serialize)]
pub struct Object {
    /// Entity name.
    pub name: String,
    /// Renderer model tag.
    pub model: String,
    /// Geometry source parameters.
    pub params: ParamMap,
}

impl Object {
    /// An object from its model tag and geometry parameters.
    pub fn new(name: impl Into<String>, model: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            params,
        }
    }
}

impl Named for Object {
    const KIND: &'static str = "object";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Places an object in an assembly and binds materials to its slots.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectInstance {
    /// Entity name.
    pub name: String,
    /// Instance parameters.
    pub params: ParamMap,
    /// Name of the instanced object.
    pub object: String,
    /// Placement, row-major.
    pub transform: [f64; 16],
    /// Slot-to-material bindings in insertion order.
    pub material_slots: ParamMap,
}

impl ObjectInstance {
    /// An instance of a named object.
    pub fn new(
        name: impl Into<String>,
        params: ParamMap,
        object: impl Into<String>,
        transform: &Transform,
        material_slots: ParamMap,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            object: object.into(),
            transform: transform.to_row_major(),
            material_slots,
        }
    }
}

impl Named for ObjectInstance {
    const KIND: &'static str = "object instance";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A container of related entities instanced into the scene as a unit.
#[derive(Debug, Clone, Serialize)]
pub struct Assembly {
    /// Entity name.
    pub name: String,
    /// Assembly parameters.
    pub params: ParamMap,
    /// Colors local to this assembly.
    pub colors: EntitySet<ColorEntity>,
    /// Lights.
    pub lights: EntitySet<Light>,
    /// Shader groups.
    pub shader_groups: EntitySet<ShaderGroup>,
    /// Surface shaders.
    pub surface_shaders: EntitySet<SurfaceShader>,
    /// Materials.
    pub materials: EntitySet<Material>,
    /// Renderable objects.
    pub objects: EntitySet<Object>,
    /// Object instances.
    pub object_instances: EntitySet<ObjectInstance>,
}

impl Assembly {
    /// An empty assembly.
    pub fn new(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            params,
            colors: EntitySet::new(),
            lights: EntitySet::new(),
            shader_groups: EntitySet::new(),
            surface_shaders: EntitySet::new(),
            materials: EntitySet::new(),
            objects: EntitySet::new(),
            object_instances: EntitySet::new(),
        }
    }
}

impl Named for Assembly {
    const KIND: &'static str = "assembly";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Places an assembly in the scene with a keyed transform sequence.
#[derive(Debug, Clone, Serialize)]
pub struct AssemblyInstance {
    /// Entity name.
    pub name: String,
    /// Instance parameters.
    pub params: ParamMap,
    /// Name of the instanced assembly.
    pub assembly: String,
    /// Keyed placement.
    pub transform_sequence: TransformSequence,
}

impl AssemblyInstance {
    /// An instance of a named assembly with no transform keyed yet.
    pub fn new(name: impl Into<String>, params: ParamMap, assembly: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params,
            assembly: assembly.into(),
            transform_sequence: TransformSequence::new(),
        }
    }

    /// Key the instance transform at a time.
    pub fn set_transform(&mut self, time: f64, transform: &Transform) {
        self.transform_sequence.set_transform(time, transform);
    }
}

impl Named for AssemblyInstance {
    const KIND: &'static str = "assembly instance";

    fn name(&self) -> &str {
        &self.name
    }
}
