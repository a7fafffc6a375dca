//! Build a one-region database in memory and print the project document.
//!
//! Run with `cargo run --example cube_scene`.

use std::sync::Arc;

use glint::{assemble, RenderSettings};
use glint_db::{Combination, Database, DbObject, Member, Primitive};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut db = Database::new("example cube");
    db.insert(
        "cube.s",
        DbObject::Solid {
            shape: Primitive::Rpp {
                min: [0.0, 0.0, 0.0],
                max: [10.0, 10.0, 10.0],
            },
        },
    )?;
    db.insert(
        "cube.r",
        DbObject::Combination(Combination::region(
            vec![Member::reference("cube.s")],
            [255, 0, 0],
        )),
    )?;

    let objects = vec!["cube.r".to_string()];
    let (project, view) = assemble(Arc::new(db), &objects, &RenderSettings::default())?;

    eprintln!(
        "view size {:.6}, eye at ({:.6}, {:.6}, {:.6})",
        view.view_size, view.eye_point.x, view.eye_point.y, view.eye_point.z
    );
    println!("{}", project.to_json()?);
    Ok(())
}
