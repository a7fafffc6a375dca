//! The project document: scene, frame, configurations, output.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::entity::{EntitySet, Named};
use crate::error::Result;
use crate::param::ParamMap;
use crate::scene::{Frame, Scene};

/// A named render configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Configuration {
    /// Configuration name.
    pub name: String,
    /// Base configuration this one inherits from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Configuration parameters; dotted keys address nested settings.
    pub params: ParamMap,
}

impl Configuration {
    /// A standalone configuration.
    pub fn new(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            base: None,
            params,
        }
    }

    /// A configuration inheriting from a base.
    pub fn with_base(
        name: impl Into<String>,
        base: impl Into<String>,
        params: ParamMap,
    ) -> Self {
        Self {
            name: name.into(),
            base: Some(base.into()),
            params,
        }
    }
}

impl Named for Configuration {
    const KIND: &'static str = "configuration";

    fn name(&self) -> &str {
        &self.name
    }
}

/// The root document handed to the renderer.
///
/// Serialization order follows construction order everywhere, so two
/// projects built by the same sequence of calls produce byte-identical
/// documents.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Project name.
    pub name: String,
    /// Directories searched for shaders and other render resources.
    pub search_paths: Vec<String>,
    /// Render configurations.
    pub configurations: EntitySet<Configuration>,
    /// The scene, once built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    /// The output frame, once chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<Frame>,
}

impl Project {
    /// An empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            search_paths: Vec::new(),
            configurations: EntitySet::new(),
            scene: None,
            frame: None,
        }
    }

    /// Append a resource search path.
    pub fn add_search_path(&mut self, path: impl Into<String>) {
        self.search_paths.push(path.into());
    }

    /// Install the stock `final` and `interactive` configurations.
    pub fn add_default_configurations(&mut self) -> Result<()> {
        self.configurations.insert(Configuration::with_base(
            "final",
            "base_final",
            ParamMap::new(),
        ))?;
        self.configurations.insert(Configuration::with_base(
            "interactive",
            "base_interactive",
            ParamMap::new(),
        ))?;
        Ok(())
    }

    /// Bind the scene.
    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = Some(scene);
    }

    /// Bind the output frame.
    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = Some(frame);
    }

    /// Serialize the project document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the project document to a file.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
