//! Region-to-scene translation.
//!
//! [`RegionTranslator`] receives each region from the database tree-walk
//! and grows the scene by one self-contained assembly: the region's
//! geometry wrapped as a renderable object, a two-node shader network
//! carrying its color, the material binding them, and the instances that
//! place everything in the scene.

use log::debug;

use glint_db::{Combination, GeometrySession, RegionError, RegionPath, RegionVisitor};
use glint_math::Transform;
use glint_scene::{
    Assembly, AssemblyInstance, Material, Object, ObjectInstance, ParamMap, Scene, ShaderGroup,
    SurfaceShader,
};

use crate::context::RenderContext;
use crate::error::{RenderError, Result};

/// Surface shader installed in every region assembly.
const SURFACE_SHADER_NAME: &str = "Material_mat_surface_shader";

/// Wrap one region's geometry as a renderable object.
///
/// The object's parameter bag gains the context-derived `one_hit` flag;
/// geometry resolution happens in the renderer plugin at render time, so
/// the pool of per-thread resources must already be allocated.
pub fn region_object(name: &str, params: ParamMap, ctx: &RenderContext) -> Result<Object> {
    if ctx.resources.is_empty() {
        return Err(RenderError::EmptyResourcePool);
    }
    let params = params.insert("one_hit", if ctx.one_hit { "1" } else { "0" });
    Ok(Object::new(name, "brlcad_region", params))
}

/// Builds one scene assembly per visited region.
pub struct RegionTranslator<'a> {
    scene: &'a mut Scene,
    ctx: &'a RenderContext,
}

impl<'a> RegionTranslator<'a> {
    /// A translator growing `scene` from regions resolved against `ctx`.
    pub fn new(scene: &'a mut Scene, ctx: &'a RenderContext) -> Self {
        Self { scene, ctx }
    }
}

impl RegionVisitor for RegionTranslator<'_> {
    fn visit_region(
        &mut self,
        path: &RegionPath,
        comb: &Combination,
    ) -> std::result::Result<(), RegionError> {
        let region = path.leaf();
        debug!("translating {path}");

        let assembly_name = format!("{region}_object_assembly");
        let shader_name = format!("{region}_shader");
        let material_name = format!("{shader_name}_mat");
        let object_instance_name = format!("{assembly_name}_brlcad_inst");
        let assembly_instance_name = format!("{assembly_name}_inst");

        // Nothing is committed to the scene until both scene-level inserts
        // are known to succeed, so a rejected region leaves no trace.
        if self.scene.assemblies.contains(&assembly_name)
            || self.scene.assembly_instances.contains(&assembly_instance_name)
        {
            return Err(RegionError::Failed(format!(
                "derived names for {region} already present in the scene"
            )));
        }

        let session = GeometrySession::open(self.ctx.database.as_ref());
        let bounds = session.object_bounds(region)?;

        let params = ParamMap::new()
            .insert("object", region)
            .insert("object_count", self.ctx.objects.len().to_string())
            .insert("min_x", format!("{:.6}", bounds.min.x))
            .insert("min_y", format!("{:.6}", bounds.min.y))
            .insert("min_z", format!("{:.6}", bounds.min.z))
            .insert("max_x", format!("{:.6}", bounds.max.x))
            .insert("max_y", format!("{:.6}", bounds.max.y))
            .insert("max_z", format!("{:.6}", bounds.max.z));
        let object = region_object(region, params, self.ctx)
            .map_err(|e| RegionError::Failed(e.to_string()))?;

        let [r, g, b] = comb.color.unwrap_or([0, 0, 0]);
        let color = format!(
            "{:.6} {:.6} {:.6}",
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0
        );

        let mut shader_group = ShaderGroup::new(&shader_name);
        shader_group.add_shader(
            "shader",
            "as_disney_material",
            "shader_in",
            ParamMap::new().insert("in_color", color),
        );
        shader_group.add_shader("surface", "as_closure2surface", "close", ParamMap::new());
        shader_group.add_connection("shader_in", "out_outColor", "close", "in_input");

        let mut assembly = Assembly::new(&assembly_name, ParamMap::new());
        let failed = |e: glint_scene::SceneError| RegionError::Failed(e.to_string());
        assembly.shader_groups.insert(shader_group).map_err(failed)?;
        assembly
            .surface_shaders
            .insert(SurfaceShader::physical(
                SURFACE_SHADER_NAME,
                ParamMap::new().insert("lighting_samples", "1"),
            ))
            .map_err(failed)?;
        assembly
            .materials
            .insert(Material::osl(
                &material_name,
                ParamMap::new()
                    .insert("osl_surface", &shader_name)
                    .insert("surface_shader", SURFACE_SHADER_NAME),
            ))
            .map_err(failed)?;
        assembly.objects.insert(object).map_err(failed)?;
        assembly
            .object_instances
            .insert(ObjectInstance::new(
                &object_instance_name,
                ParamMap::new(),
                region,
                &Transform::identity(),
                ParamMap::new()
                    .insert("default", &material_name)
                    .insert("default2", &material_name),
            ))
            .map_err(failed)?;

        self.scene.assemblies.insert(assembly).map_err(failed)?;

        let mut instance =
            AssemblyInstance::new(&assembly_instance_name, ParamMap::new(), &assembly_name);
        instance.set_transform(0.0, &Transform::identity());
        self.scene
            .assembly_instances
            .insert(instance)
            .map_err(failed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use glint_db::{walk_tree, Combination, Database, DbObject, Member, Primitive};

    fn cube_db() -> Database {
        let mut db = Database::new("cube");
        db.insert(
            "cube.s",
            DbObject::Solid {
                shape: Primitive::Rpp {
                    min: [0.0, 0.0, 0.0],
                    max: [10.0, 10.0, 10.0],
                },
            },
        )
        .unwrap();
        db.insert(
            "cube.r",
            DbObject::Combination(Combination::region(
                vec![Member::reference("cube.s")],
                [255, 0, 0],
            )),
        )
        .unwrap();
        db
    }

    fn translate(db: Database, objects: &[&str]) -> (Scene, usize) {
        let objects: Vec<String> = objects.iter().map(|s| s.to_string()).collect();
        let ctx = RenderContext::new(Arc::new(db), objects.clone());
        let mut scene = Scene::new();
        let count = {
            let mut translator = RegionTranslator::new(&mut scene, &ctx);
            walk_tree(&ctx.database, &objects, &mut translator).unwrap()
        };
        (scene, count)
    }

    #[test]
    fn region_becomes_one_assembly_with_derived_names() {
        let (scene, count) = translate(cube_db(), &["cube.r"]);
        assert_eq!(count, 1);

        let assembly = scene.assemblies.get("cube.r_object_assembly").unwrap();
        assert!(assembly.shader_groups.contains("cube.r_shader"));
        assert!(assembly.surface_shaders.contains("Material_mat_surface_shader"));
        assert!(assembly.materials.contains("cube.r_shader_mat"));
        assert!(assembly.objects.contains("cube.r"));
        assert!(assembly
            .object_instances
            .contains("cube.r_object_assembly_brlcad_inst"));

        let instance = scene
            .assembly_instances
            .get("cube.r_object_assembly_inst")
            .unwrap();
        assert_eq!(instance.assembly, "cube.r_object_assembly");
        assert_eq!(instance.transform_sequence.steps().len(), 1);
        assert_eq!(instance.transform_sequence.steps()[0].time, 0.0);
    }

    #[test]
    fn geometry_params_carry_corners_and_object_count() {
        let (scene, _) = translate(cube_db(), &["cube.r"]);
        let assembly = scene.assemblies.get("cube.r_object_assembly").unwrap();
        let object = assembly.objects.get("cube.r").unwrap();

        assert_eq!(object.model, "brlcad_region");
        assert_eq!(object.params.get("object"), Some("cube.r"));
        assert_eq!(object.params.get("object_count"), Some("1"));
        assert_eq!(object.params.get("min_x"), Some("0.000000"));
        assert_eq!(object.params.get("min_z"), Some("0.000000"));
        assert_eq!(object.params.get("max_x"), Some("10.000000"));
        assert_eq!(object.params.get("max_z"), Some("10.000000"));
        assert_eq!(object.params.get("one_hit"), Some("1"));
    }

    #[test]
    fn shader_network_normalizes_the_region_color() {
        let (scene, _) = translate(cube_db(), &["cube.r"]);
        let assembly = scene.assemblies.get("cube.r_object_assembly").unwrap();
        let group = assembly.shader_groups.get("cube.r_shader").unwrap();

        assert_eq!(group.shaders.len(), 2);
        assert_eq!(group.shaders[0].shader, "as_disney_material");
        assert_eq!(group.shaders[0].layer, "shader_in");
        assert_eq!(
            group.shaders[0].params.get("in_color"),
            Some("1.000000 0.000000 0.000000")
        );
        assert_eq!(group.shaders[1].shader, "as_closure2surface");
        assert!(group.shaders[1].params.is_empty());

        assert_eq!(group.connections.len(), 1);
        assert_eq!(group.connections[0].src_layer, "shader_in");
        assert_eq!(group.connections[0].src_param, "out_outColor");
        assert_eq!(group.connections[0].dst_layer, "close");
        assert_eq!(group.connections[0].dst_param, "in_input");
    }

    #[test]
    fn material_binds_shader_group_and_surface_shader() {
        let (scene, _) = translate(cube_db(), &["cube.r"]);
        let assembly = scene.assemblies.get("cube.r_object_assembly").unwrap();

        let material = assembly.materials.get("cube.r_shader_mat").unwrap();
        assert_eq!(material.model, "osl_material");
        assert_eq!(material.params.get("osl_surface"), Some("cube.r_shader"));
        assert_eq!(
            material.params.get("surface_shader"),
            Some("Material_mat_surface_shader")
        );

        let surface = assembly
            .surface_shaders
            .get("Material_mat_surface_shader")
            .unwrap();
        assert_eq!(surface.params.get("lighting_samples"), Some("1"));
    }

    #[test]
    fn both_material_slots_bind_the_same_material() {
        let (scene, _) = translate(cube_db(), &["cube.r"]);
        let assembly = scene.assemblies.get("cube.r_object_assembly").unwrap();
        let instance = assembly
            .object_instances
            .get("cube.r_object_assembly_brlcad_inst")
            .unwrap();

        assert_eq!(instance.object, "cube.r");
        let slots: Vec<(&str, &str)> = instance.material_slots.iter().collect();
        assert_eq!(
            slots,
            vec![
                ("default", "cube.r_shader_mat"),
                ("default2", "cube.r_shader_mat"),
            ]
        );
    }

    #[test]
    fn uncolored_region_renders_black() {
        let mut db = Database::new("plain");
        db.insert(
            "ball.s",
            DbObject::Solid {
                shape: Primitive::Sphere {
                    center: [0.0; 3],
                    radius: 1.0,
                },
            },
        )
        .unwrap();
        db.insert(
            "ball.r",
            DbObject::Combination(Combination {
                members: vec![Member::reference("ball.s")],
                region: true,
                color: None,
            }),
        )
        .unwrap();

        let (scene, _) = translate(db, &["ball.r"]);
        let assembly = scene.assemblies.get("ball.r_object_assembly").unwrap();
        let group = assembly.shader_groups.get("ball.r_shader").unwrap();
        assert_eq!(
            group.shaders[0].params.get("in_color"),
            Some("0.000000 0.000000 0.000000")
        );
    }

    #[test]
    fn translation_is_deterministic() {
        let build = || {
            let (scene, _) = translate(cube_db(), &["cube.r"]);
            serde_json::to_string(&scene).unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn unresolvable_bounds_skip_the_region() {
        let mut db = cube_db();
        db.insert(
            "broken.r",
            DbObject::Combination(Combination::region(
                vec![Member::reference("missing.s")],
                [0, 255, 0],
            )),
        )
        .unwrap();

        let (scene, count) = translate(db, &["broken.r", "cube.r"]);
        assert_eq!(count, 1);
        assert!(!scene.assemblies.contains("broken.r_object_assembly"));
        assert!(!scene
            .assembly_instances
            .contains("broken.r_object_assembly_inst"));
        assert!(scene.assemblies.contains("cube.r_object_assembly"));
    }

    #[test]
    fn empty_resource_pool_rejects_every_region() {
        let db = cube_db();
        let objects = vec!["cube.r".to_string()];
        let mut ctx = RenderContext::new(Arc::new(db), objects.clone());
        ctx.resources = crate::context::ResourcePool::new(0);

        let mut scene = Scene::new();
        let count = {
            let mut translator = RegionTranslator::new(&mut scene, &ctx);
            walk_tree(&ctx.database, &objects, &mut translator).unwrap()
        };
        assert_eq!(count, 0);
        assert!(scene.assemblies.is_empty());
        assert!(scene.assembly_instances.is_empty());
    }

    #[test]
    fn regions_translate_in_declaration_order() {
        let mut db = Database::new("two");
        db.insert(
            "s1",
            DbObject::Solid {
                shape: Primitive::Sphere {
                    center: [0.0; 3],
                    radius: 1.0,
                },
            },
        )
        .unwrap();
        db.insert(
            "a.r",
            DbObject::Combination(Combination::region(
                vec![Member::reference("s1")],
                [10, 20, 30],
            )),
        )
        .unwrap();
        db.insert(
            "b.r",
            DbObject::Combination(Combination::region(
                vec![Member::reference("s1")],
                [40, 50, 60],
            )),
        )
        .unwrap();
        db.insert(
            "all.g",
            DbObject::Combination(Combination::group(vec![
                Member::reference("a.r"),
                Member::reference("b.r"),
            ])),
        )
        .unwrap();

        let (scene, count) = translate(db, &["all.g"]);
        assert_eq!(count, 2);
        let names: Vec<&str> = scene.assemblies.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["a.r_object_assembly", "b.r_object_assembly"]
        );
    }

    #[test]
    fn object_count_reflects_requested_top_level_objects() {
        let mut db = cube_db();
        db.insert(
            "ball.s",
            DbObject::Solid {
                shape: Primitive::Sphere {
                    center: [20.0, 0.0, 0.0],
                    radius: 2.0,
                },
            },
        )
        .unwrap();
        db.insert(
            "ball.r",
            DbObject::Combination(Combination::region(
                vec![Member::reference("ball.s")],
                [0, 0, 255],
            )),
        )
        .unwrap();

        let (scene, count) = translate(db, &["cube.r", "ball.r"]);
        assert_eq!(count, 2);
        for assembly_name in ["cube.r_object_assembly", "ball.r_object_assembly"] {
            let assembly = scene.assemblies.get(assembly_name).unwrap();
            let object = assembly.objects.iter().next().unwrap();
            assert_eq!(object.params.get("object_count"), Some("2"));
        }
    }
}
