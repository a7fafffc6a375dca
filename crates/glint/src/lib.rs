#![warn(missing_docs)]

//! glint — bridge from a CAD geometry database to a physically-based
//! renderer.
//!
//! The crate turns a hierarchical solid-geometry database into one
//! renderer-ready project document: every region becomes a self-contained
//! assembly with a color-driven shader network, and the camera is framed
//! automatically from the model's bounding box.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use glint::{assemble, RenderSettings};
//! use glint_db::Database;
//!
//! let db = Arc::new(Database::from_path("model.json")?);
//! let objects = vec!["all.g".to_string()];
//! let (project, view) = assemble(db, &objects, &RenderSettings::default())?;
//! println!("view size {:.3}", view.view_size);
//! project.write_json("model.project.json")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assemble;
pub mod context;
pub mod error;
pub mod settings;
pub mod translate;
pub mod view;

pub use assemble::assemble;
pub use context::{RenderContext, Resource, ResourcePool};
pub use error::{RenderError, Result};
pub use settings::RenderSettings;
pub use translate::{region_object, RegionTranslator};
pub use view::{auto_frame, ViewState, FALLBACK_VIEW_SIZE};
