#![warn(missing_docs)]

//! Renderer scene-graph object model for the glint scene bridge.
//!
//! Mirrors the target renderer's construction contract as plain data:
//! entities are built through factory constructors carrying the renderer's
//! model tags, collected into insertion-ordered named containers, and
//! serialized as one JSON project document the renderer loads.
//!
//! Two properties hold everywhere. Containers reject duplicate names
//! ([`SceneError::DuplicateName`]) rather than silently aliasing entities,
//! and serialization order equals construction order, so identical build
//! sequences produce byte-identical documents.

pub mod assembly;
pub mod entity;
pub mod error;
pub mod param;
pub mod project;
pub mod scene;
pub mod shader;
pub mod transform;

pub use assembly::{Assembly, AssemblyInstance, ColorEntity, Light, Object, ObjectInstance};
pub use entity::{EntitySet, Named};
pub use error::{Result, SceneError};
pub use param::ParamMap;
pub use project::{Configuration, Project};
pub use scene::{Camera, Environment, EnvironmentEdf, EnvironmentShader, Frame, Scene};
pub use shader::{Material, ShaderConnection, ShaderGroup, ShaderNode, SurfaceShader};
pub use transform::{TransformSequence, TransformStep};
