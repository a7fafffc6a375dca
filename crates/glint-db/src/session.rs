//! Read-only query session over an open database.

use log::debug;

use glint_math::BoundingBox;

use crate::error::Result;
use crate::{Database, Tally};

/// A read-only view of a [`Database`] used while building a scene.
///
/// The session borrows the database for its lifetime, so the geometry
/// cannot change underneath a build in progress.
pub struct GeometrySession<'db> {
    db: &'db Database,
}

impl<'db> GeometrySession<'db> {
    /// Open a session on a loaded database.
    pub fn open(db: &'db Database) -> Self {
        debug!("session opened on \"{}\"", db.title);
        Self { db }
    }

    /// The underlying database.
    pub fn database(&self) -> &'db Database {
        self.db
    }

    /// Model-space bounds of one object, member transforms applied.
    pub fn object_bounds(&self, name: &str) -> Result<BoundingBox> {
        let bb = self.db.object_bounds(name)?;
        debug!(
            "bounds of {name}: ({:.6}, {:.6}, {:.6}) .. ({:.6}, {:.6}, {:.6})",
            bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z
        );
        Ok(bb)
    }

    /// Union of the bounds of several top-level objects.
    pub fn model_bounds(&self, objects: &[String]) -> Result<BoundingBox> {
        self.db.model_bounds(objects)
    }

    /// Count primitives and regions reachable from the given objects.
    pub fn tally(&self, objects: &[String]) -> Result<Tally> {
        self.db.tally(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Combination, DbObject, Member, Primitive};

    fn sample_db() -> Database {
        let mut db = Database::new("session");
        db.insert(
            "cube.s",
            DbObject::Solid {
                shape: Primitive::Rpp {
                    min: [-1.0, -1.0, -1.0],
                    max: [1.0, 1.0, 1.0],
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

    #[test]
    fn session_queries_pass_through() {
        let db = sample_db();
        let session = GeometrySession::open(&db);
        assert_eq!(session.database().title, "session");

        let bb = session.object_bounds("cube.r").unwrap();
        assert_eq!(bb.min.x, -1.0);
        assert_eq!(bb.max.z, 1.0);

        let tally = session.tally(&["cube.r".to_string()]).unwrap();
        assert_eq!(tally.solids, 1);
        assert_eq!(tally.regions, 1);
    }

    #[test]
    fn session_bounds_of_missing_object_fail() {
        let db = sample_db();
        let session = GeometrySession::open(&db);
        assert!(session.object_bounds("ghost").is_err());
    }
}
