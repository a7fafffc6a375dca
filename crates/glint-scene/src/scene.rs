//! The scene root: cameras, environment, and assembly tables.

use serde::Serialize;

use glint_math::Transform;

use crate::assembly::{Assembly, AssemblyInstance, ColorEntity};
use crate::entity::{EntitySet, Named};
use crate::param::ParamMap;
use crate::transform::TransformSequence;

/// An environment emission profile.
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentEdf {
    /// Entity name.
    pub name: String,
    /// Renderer model tag.
    pub model: String,
    /// Emission parameters.
    pub params: ParamMap,
}

impl EnvironmentEdf {
    /// A uniform emission profile.
    pub fn constant(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            model: "constant_environment_edf".into(),
            params,
        }
    }
}

impl Named for EnvironmentEdf {
    const KIND: &'static str = "environment EDF";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Shades rays that escape the scene.
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentShader {
    /// Entity name.
    pub name: String,
    /// Renderer model tag.
    pub model: String,
    /// Shader parameters.
    pub params: ParamMap,
}

impl EnvironmentShader {
    /// An environment shader driven by an emission profile.
    pub fn edf(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            model: "edf_environment_shader".into(),
            params,
        }
    }
}

impl Named for EnvironmentShader {
    const KIND: &'static str = "environment shader";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Binds an emission profile and shader as the scene environment.
#[derive(Debug, Clone, Serialize)]
pub struct Environment {
    /// Entity name.
    pub name: String,
    /// References to the EDF and shader entities.
    pub params: ParamMap,
}

impl Environment {
    /// An environment from its entity references.
    pub fn new(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// A camera.
///
/// Cameras sit at the origin looking down negative Z until a transform
/// is keyed.
#[derive(Debug, Clone, Serialize)]
pub struct Camera {
    /// Entity name.
    pub name: String,
    /// Renderer model tag.
    pub model: String,
    /// Camera parameters such as film dimensions and focal length.
    pub params: ParamMap,
    /// Keyed placement.
    pub transform_sequence: TransformSequence,
}

impl Camera {
    /// An ideal pinhole camera.
    pub fn pinhole(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            model: "pinhole_camera".into(),
            params,
            transform_sequence: TransformSequence::new(),
        }
    }

    /// Key the camera transform at a time.
    pub fn set_transform(&mut self, time: f64, transform: &Transform) {
        self.transform_sequence.set_transform(time, transform);
    }
}

impl Named for Camera {
    const KIND: &'static str = "camera";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Output frame settings: the rendering camera and image resolution.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// Entity name.
    pub name: String,
    /// Frame parameters.
    pub params: ParamMap,
}

impl Frame {
    /// A frame from its parameters.
    pub fn new(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// The scene root holding every entity table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scene {
    /// Cameras.
    pub cameras: EntitySet<Camera>,
    /// Scene-level colors.
    pub colors: EntitySet<ColorEntity>,
    /// Environment emission profiles.
    pub environment_edfs: EntitySet<EnvironmentEdf>,
    /// Environment shaders.
    pub environment_shaders: EntitySet<EnvironmentShader>,
    /// The bound environment, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    /// Assemblies.
    pub assemblies: EntitySet<Assembly>,
    /// Assembly instances.
    pub assembly_instances: EntitySet<AssemblyInstance>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the environment.
    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = Some(environment);
    }
}
