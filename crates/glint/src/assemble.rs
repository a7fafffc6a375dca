//! Scene assembly.
//!
//! [`assemble`] is the top of the bridge: it walks the database once to
//! translate every region, frames the result, and attaches the fixed
//! light, sky, and camera rig around the translated geometry. The output
//! is a complete project document the renderer can load directly.

use std::sync::Arc;

use log::info;

use glint_db::{walk_tree, Database, GeometrySession};
use glint_scene::{
    Assembly, AssemblyInstance, Camera, ColorEntity, Environment, EnvironmentEdf,
    EnvironmentShader, Frame, Light, ParamMap, Project, Scene,
};
use glint_math::Transform;

use crate::context::RenderContext;
use crate::error::{RenderError, Result};
use crate::settings::RenderSettings;
use crate::translate::RegionTranslator;
use crate::view::{auto_frame, ViewState};

/// Resolution substituted when width or height is left at zero.
const DEFAULT_RESOLUTION: u32 = 512;

/// Build a renderer-ready project from a database and object selection.
///
/// Fails before any traversal when `objects` is empty. Region translation
/// failures are regional (logged and skipped by the walker); a model with
/// no reachable solids or regions is fatal once framing runs.
pub fn assemble(
    database: Arc<Database>,
    objects: &[String],
    settings: &RenderSettings,
) -> Result<(Project, ViewState)> {
    if objects.is_empty() {
        return Err(RenderError::NoObjects);
    }
    settings.validate()?;

    let width = if settings.width == 0 {
        DEFAULT_RESOLUTION
    } else {
        settings.width
    };
    let height = if settings.height == 0 {
        DEFAULT_RESOLUTION
    } else {
        settings.height
    };

    let ctx = RenderContext::new(database, objects.to_vec());
    let mut scene = Scene::new();
    let translated = {
        let mut translator = RegionTranslator::new(&mut scene, &ctx);
        walk_tree(&ctx.database, objects, &mut translator)?
    };
    info!("translated {translated} region(s)");

    let session = GeometrySession::open(ctx.database.as_ref());
    let tally = session.tally(objects)?;
    let model_bounds = session.model_bounds(objects)?;
    let view = auto_frame(&tally, &model_bounds, settings)?;

    attach_light_rig(&mut scene)?;
    attach_sky(&mut scene)?;
    attach_camera(&mut scene, &view, settings, width, height)?;

    let mut project = Project::new(&settings.project_name);
    for path in &settings.search_paths {
        project.add_search_path(path);
    }
    project.add_default_configurations()?;
    for name in ["final", "interactive"] {
        let cfg = project
            .configurations
            .get_mut(name)
            .expect("default configuration");
        cfg.params
            .set("uniform_pixel_renderer.samples", settings.samples.to_string());
        cfg.params.set("rendering_threads", "1");
    }
    project.set_scene(scene);
    project.set_frame(Frame::new(
        "beauty",
        ParamMap::new()
            .insert("camera", "camera")
            .insert("resolution", format!("{width} {height}")),
    ));

    Ok((project, view))
}

/// One point light in its own assembly, placed above and behind the
/// default view.
fn attach_light_rig(scene: &mut Scene) -> Result<()> {
    let mut assembly = Assembly::new("assembly", ParamMap::new());
    assembly.colors.insert(ColorEntity::new(
        "light_intensity",
        ParamMap::new()
            .insert("color_space", "srgb")
            .insert("multiplier", "30.0"),
        vec![1.0, 1.0, 1.0],
    ))?;
    let mut light = Light::point(
        "light",
        ParamMap::new().insert("intensity", "light_intensity"),
    );
    light.set_transform(&Transform::translation(0.6, 2.0, 1.0));
    assembly.lights.insert(light)?;
    scene.assemblies.insert(assembly)?;

    let mut instance = AssemblyInstance::new("assembly_inst", ParamMap::new(), "assembly");
    instance.set_transform(0.0, &Transform::identity());
    scene.assembly_instances.insert(instance)?;
    Ok(())
}

/// A uniform white sky so unlit faces stay visible.
fn attach_sky(scene: &mut Scene) -> Result<()> {
    scene.colors.insert(ColorEntity::new(
        "sky_radiance",
        ParamMap::new()
            .insert("color_space", "srgb")
            .insert("multiplier", "0.5"),
        vec![1.0, 1.0, 1.0],
    ))?;
    scene.environment_edfs.insert(EnvironmentEdf::constant(
        "sky_edf",
        ParamMap::new().insert("radiance", "sky_radiance"),
    ))?;
    scene.environment_shaders.insert(EnvironmentShader::edf(
        "sky_shader",
        ParamMap::new().insert("environment_edf", "sky_edf"),
    ))?;
    scene.set_environment(Environment::new(
        "sky",
        ParamMap::new()
            .insert("environment_edf", "sky_edf")
            .insert("environment_shader", "sky_shader"),
    ));
    Ok(())
}

/// Place the pinhole camera at the framed eye point.
///
/// The renderer's camera space and the model space disagree on which axis
/// is up: model (X, Z, Y) maps to camera (X, Y, Z). The translation takes
/// the permuted eye point and the rotations undo azimuth about camera Y
/// and elevation about camera X.
fn attach_camera(
    scene: &mut Scene,
    view: &ViewState,
    settings: &RenderSettings,
    width: u32,
    height: u32,
) -> Result<()> {
    let film_width = 0.08 * f64::from(width) / f64::from(height);
    let mut camera = Camera::pinhole(
        "camera",
        ParamMap::new()
            .insert("film_dimensions", format!("{film_width:.6} {:.6}", 0.08))
            .insert("focal_length", "0.035"),
    );
    let eye = view.eye_point;
    let placement = Transform::translation(eye.x, eye.z, -eye.y)
        .then(&Transform::rotation_y((settings.azimuth - 270.0).to_radians()))
        .then(&Transform::rotation_x((-settings.elevation).to_radians()));
    camera.set_transform(0.0, &placement);
    scene.cameras.insert(camera)?;
    Ok(())
}
