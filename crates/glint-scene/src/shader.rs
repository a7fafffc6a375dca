//! Shader groups, surface shaders, and materials.

use serde::Serialize;

use crate::entity::Named;
use crate::param::ParamMap;

/// One node in a shader group.
#[derive(Debug, Clone, Serialize)]
pub struct ShaderNode {
    /// Node kind, for example `"shader"` or `"surface"`.
    pub kind: String,
    /// Shader to instantiate.
    pub shader: String,
    /// Layer name the node is addressed by within the group.
    pub layer: String,
    /// Inline shader source, when the node carries uncompiled code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Node parameters.
    pub params: ParamMap,
}

/// A directed edge between two shader node layers.
#[derive(Debug, Clone, Serialize)]
pub struct ShaderConnection {
    /// Source layer name.
    pub src_layer: String,
    /// Output parameter on the source layer.
    pub src_param: String,
    /// Destination layer name.
    pub dst_layer: String,
    /// Input parameter on the destination layer.
    pub dst_param: String,
}

/// A small directed graph of shading nodes producing a surface appearance.
#[derive(Debug, Clone, Serialize)]
pub struct ShaderGroup {
    /// Group name.
    pub name: String,
    /// Nodes in insertion order.
    pub shaders: Vec<ShaderNode>,
    /// Edges in insertion order.
    pub connections: Vec<ShaderConnection>,
}

impl ShaderGroup {
    /// An empty shader group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shaders: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Append a node instantiating an already-compiled shader.
    pub fn add_shader(
        &mut self,
        kind: impl Into<String>,
        shader: impl Into<String>,
        layer: impl Into<String>,
        params: ParamMap,
    ) {
        self.shaders.push(ShaderNode {
            kind: kind.into(),
            shader: shader.into(),
            layer: layer.into(),
            source: None,
            params,
        });
    }

    /// Append a node carrying uncompiled shader source, compiled by the
    /// renderer at load time.
    pub fn add_source_shader(
        &mut self,
        kind: impl Into<String>,
        shader: impl Into<String>,
        layer: impl Into<String>,
        source: impl Into<String>,
        params: ParamMap,
    ) {
        self.shaders.push(ShaderNode {
            kind: kind.into(),
            shader: shader.into(),
            layer: layer.into(),
            source: Some(source.into()),
            params,
        });
    }

    /// Connect an output parameter of one layer to an input of another.
    pub fn add_connection(
        &mut self,
        src_layer: impl Into<String>,
        src_param: impl Into<String>,
        dst_layer: impl Into<String>,
        dst_param: impl Into<String>,
    ) {
        self.connections.push(ShaderConnection {
            src_layer: src_layer.into(),
            src_param: src_param.into(),
            dst_layer: dst_layer.into(),
            dst_param: dst_param.into(),
        });
    }
}

impl Named for ShaderGroup {
    const KIND: &'static str = "shader group";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A surface shader entity.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceShader {
    /// Entity name.
    pub name: String,
    /// Renderer model tag.
    pub model: String,
    /// Shader parameters.
    pub params: ParamMap,
}

impl SurfaceShader {
    /// A physically-based surface shader.
    pub fn physical(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            model: "physical_surface_shader".into(),
            params,
        }
    }
}

impl Named for SurfaceShader {
    const KIND: &'static str = "surface shader";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A material binding a shader group to renderable surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct Material {
    /// Entity name.
    pub name: String,
    /// Renderer model tag.
    pub model: String,
    /// Material parameters.
    pub params: ParamMap,
}

impl Material {
    /// A material whose appearance comes from an OSL shader group.
    pub fn osl(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            model: "osl_material".into(),
            params,
        }
    }
}

impl Named for Material {
    const KIND: &'static str = "material";

    fn name(&self) -> &str {
        &self.name
    }
}
