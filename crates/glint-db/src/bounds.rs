//! Axis-aligned bounding boxes for database objects.
//!
//! Bounds are conservative: subtracted and intersected members still
//! contribute their full extent, matching the CAD side's convention of
//! boxing the union of everything referenced.

use glint_math::{BoundingBox, Point3, Transform, Vec3};
use log::warn;

use crate::error::{DbError, Result};
use crate::{Database, DbObject, Primitive};

impl Primitive {
    /// Exact axis-aligned bounds of the primitive.
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Primitive::Rpp { min, max } => {
                BoundingBox::new(Point3::from(*min), Point3::from(*max))
            }
            Primitive::Sphere { center, radius } => {
                let c = Point3::from(*center);
                let r = Vec3::new(*radius, *radius, *radius);
                BoundingBox::new(c - r, c + r)
            }
            Primitive::Cylinder { base, axis, radius } => {
                let base = Point3::from(*base);
                let axis = Vec3::from(*axis);
                let top = base + axis;
                let len2 = axis.norm_squared();
                let mut bb = BoundingBox::empty();
                for i in 0..3 {
                    // Extent of the cap disks perpendicular to the axis.
                    let e = if len2 > 0.0 {
                        radius * (1.0 - axis[i] * axis[i] / len2).max(0.0).sqrt()
                    } else {
                        *radius
                    };
                    bb.min[i] = base[i].min(top[i]) - e;
                    bb.max[i] = base[i].max(top[i]) + e;
                }
                bb
            }
        }
    }
}

impl Database {
    /// Transitive axis-aligned bounds of one named object.
    ///
    /// Fails with [`DbError::NotFound`] if the name does not resolve and
    /// with [`DbError::EmptyBounds`] if nothing reachable from it carries
    /// geometry. Missing member references are skipped with a warning;
    /// reference cycles are fatal.
    pub fn object_bounds(&self, name: &str) -> Result<BoundingBox> {
        let mut stack = Vec::new();
        let bb = self.bounds_rec(name, &mut stack)?;
        if bb.is_empty() {
            return Err(DbError::EmptyBounds(name.to_string()));
        }
        Ok(bb)
    }

    /// Union of the bounds of the requested top-level objects — the
    /// aggregate model box handed to view framing.
    ///
    /// The result may be empty when nothing reachable carries geometry;
    /// the caller decides whether that is fatal.
    pub fn model_bounds(&self, objects: &[String]) -> Result<BoundingBox> {
        let mut acc = BoundingBox::empty();
        for name in objects {
            let mut stack = Vec::new();
            acc = acc.union(&self.bounds_rec(name, &mut stack)?);
        }
        Ok(acc)
    }

    fn bounds_rec(&self, name: &str, stack: &mut Vec<String>) -> Result<BoundingBox> {
        let object = self
            .get(name)
            .ok_or_else(|| DbError::NotFound(name.to_string()))?;
        if stack.iter().any(|n| n == name) {
            return Err(DbError::Cycle(name.to_string()));
        }
        stack.push(name.to_string());
        let result = match object {
            DbObject::Solid { shape } => Ok(shape.bounds()),
            DbObject::Combination(comb) => {
                let mut acc = BoundingBox::empty();
                for member in &comb.members {
                    match self.bounds_rec(&member.name, stack) {
                        Ok(bb) => {
                            let bb = match &member.matrix {
                                Some(rows) => bb.transformed(&Transform::from_rows(rows)),
                                None => bb,
                            };
                            acc = acc.union(&bb);
                        }
                        Err(DbError::NotFound(missing)) => {
                            warn!("combination {name}: member {missing} not found, skipping");
                        }
                        Err(e) => {
                            stack.pop();
                            return Err(e);
                        }
                    }
                }
                Ok(acc)
            }
        };
        stack.pop();
        result
    }
}
