#![warn(missing_docs)]

//! In-memory CAD geometry database for the glint scene bridge.
//!
//! A database is a flat, ordered collection of named objects: leaf solid
//! primitives and boolean combinations of other objects. A combination
//! flagged as a *region* is a renderable leaf of the hierarchy and carries
//! the material color the renderer side binds a shader to.
//!
//! The crate provides the JSON file format, transitive bounding-box
//! queries ([`Database::object_bounds`]), the deterministic region
//! tree-walk ([`walk_tree`]) with its [`RegionVisitor`] callback trait, and
//! the transient [`GeometrySession`] query handle.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod bounds;
pub mod error;
pub mod session;
pub mod walk;

pub use error::{DbError, Result};
pub use session::GeometrySession;
pub use walk::{walk_tree, RegionError, RegionPath, RegionVisitor};

/// A leaf solid primitive.
///
/// Primitives are the only objects that contribute geometry; everything
/// else in the database references them through combinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    /// Axis-aligned rectangular parallelepiped given its two corners.
    Rpp {
        /// Minimum corner.
        min: [f64; 3],
        /// Maximum corner.
        max: [f64; 3],
    },
    /// Sphere given center and radius.
    Sphere {
        /// Center point.
        center: [f64; 3],
        /// Radius.
        radius: f64,
    },
    /// Right circular cylinder given base point, axis vector, and radius.
    Cylinder {
        /// Center of the base cap.
        base: [f64; 3],
        /// Vector from the base cap to the top cap.
        axis: [f64; 3],
        /// Radius.
        radius: f64,
    },
}

/// Boolean operation applied when a member joins a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoolOp {
    /// Add the member's volume.
    #[default]
    Union,
    /// Remove the member's volume.
    Subtract,
    /// Keep only volume shared with the member.
    Intersect,
}

/// One child reference inside a combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Name of the referenced object.
    pub name: String,
    /// Boolean operation combining this member (union by default).
    #[serde(default)]
    pub op: BoolOp,
    /// Optional row-major transform applied to the member's geometry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<[[f64; 4]; 4]>,
}

impl Member {
    /// Union member with no transform.
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op: BoolOp::Union,
            matrix: None,
        }
    }
}

/// A boolean combination of other objects.
///
/// Combinations flagged `region` are the renderable leaves the tree-walk
/// reports; their `color` attribute drives shader construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// Child references, in declaration order.
    pub members: Vec<Member>,
    /// True if this combination is a region.
    #[serde(default)]
    pub region: bool,
    /// Region color, 0-255 per channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
}

impl Combination {
    /// Non-region combination of the given members.
    pub fn group(members: Vec<Member>) -> Self {
        Self {
            members,
            region: false,
            color: None,
        }
    }

    /// Region combining the given members with a color attribute.
    pub fn region(members: Vec<Member>, color: [u8; 3]) -> Self {
        Self {
            members,
            region: true,
            color: Some(color),
        }
    }
}

/// A named object in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DbObject {
    /// A leaf solid.
    Solid {
        /// The primitive shape.
        shape: Primitive,
    },
    /// A boolean combination of other objects.
    Combination(Combination),
}

/// Counts of distinct solids and regions reachable from a set of
/// top-level objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    /// Distinct solid primitives reachable.
    pub solids: usize,
    /// Distinct regions reachable.
    pub regions: usize,
}

/// On-disk JSON shape of a database.
#[derive(Deserialize)]
struct DatabaseFile {
    #[serde(default)]
    title: String,
    objects: Vec<DbEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DbEntry {
    name: String,
    #[serde(flatten)]
    object: DbObject,
}

/// A hierarchical geometry database.
///
/// Objects keep their declaration order, which fixes the traversal order
/// of [`walk_tree`] and therefore the order scene nodes are produced in.
#[derive(Debug, Clone, Serialize)]
pub struct Database {
    /// Human-readable database title.
    pub title: String,
    objects: Vec<DbEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Database {
    /// Create an empty database.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            objects: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a named object, rejecting duplicate names.
    pub fn insert(&mut self, name: impl Into<String>, object: DbObject) -> Result<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(DbError::DuplicateObject(name));
        }
        self.index.insert(name.clone(), self.objects.len());
        self.objects.push(DbEntry { name, object });
        Ok(())
    }

    /// Look up an object by name.
    pub fn get(&self, name: &str) -> Option<&DbObject> {
        self.index.get(name).map(|&i| &self.objects[i].object)
    }

    /// True if an object with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the database holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Object names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|e| e.name.as_str())
    }

    /// Named objects in declaration order.
    pub fn objects(&self) -> impl Iterator<Item = (&str, &DbObject)> {
        self.objects.iter().map(|e| (e.name.as_str(), &e.object))
    }

    /// Parse a database from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DatabaseFile = serde_json::from_str(json)?;
        let mut db = Database::new(file.title);
        for entry in file.objects {
            db.insert(entry.name, entry.object)?;
        }
        Ok(db)
    }

    /// Load a database from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Count the distinct solids and regions reachable from the given
    /// top-level objects.
    ///
    /// Shared subtrees are counted once. A missing top-level name is an
    /// error; missing member references are skipped with a warning, the
    /// same policy the tree-walk applies.
    pub fn tally(&self, objects: &[String]) -> Result<Tally> {
        let mut seen = HashSet::new();
        let mut tally = Tally::default();
        for name in objects {
            if !self.contains(name) {
                return Err(DbError::NotFound(name.clone()));
            }
            self.tally_rec(name, &mut seen, &mut tally);
        }
        Ok(tally)
    }

    fn tally_rec(&self, name: &str, seen: &mut HashSet<String>, tally: &mut Tally) {
        if !seen.insert(name.to_string()) {
            return;
        }
        match self.get(name) {
            Some(DbObject::Solid { .. }) => tally.solids += 1,
            Some(DbObject::Combination(comb)) => {
                if comb.region {
                    tally.regions += 1;
                }
                for member in &comb.members {
                    if self.contains(&member.name) {
                        self.tally_rec(&member.name, seen, tally);
                    } else {
                        log::warn!(
                            "combination {}: member {} not found, skipping",
                            name,
                            member.name
                        );
                    }
                }
            }
            None => {}
        }
    }
}
