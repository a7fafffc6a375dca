//! Region tree-walk.
//!
//! [`walk_tree`] drives a depth-first traversal over the requested
//! top-level objects and hands each region to a [`RegionVisitor`] exactly
//! once, in declaration order. The walker owns control flow; visitors own
//! only per-region work. A visitor error is regional: the walker logs it,
//! skips that region's contribution, and continues with siblings.

use std::collections::HashSet;
use std::fmt;

use log::{debug, warn};
use thiserror::Error;

use crate::error::{DbError, Result};
use crate::{Combination, Database, DbObject};

/// Error a visitor reports for one region.
///
/// Regional by contract: the walker absorbs it and keeps traversing.
#[derive(Error, Debug)]
pub enum RegionError {
    /// The region's geometry bounds could not be resolved.
    #[error("bounds query failed: {0}")]
    Bounds(#[from] DbError),
    /// Building the region's scene contribution failed.
    #[error("{0}")]
    Failed(String),
}

/// Slash-separated path from a traversal root down to a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionPath {
    segments: Vec<String>,
}

impl RegionPath {
    /// Path from its segments, root first.
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// The region's short name: the last path segment.
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// All segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for RegionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// Receives one callback per region encountered by [`walk_tree`].
pub trait RegionVisitor {
    /// Called once per region, with the full path to it and the
    /// combination record carrying its attributes.
    fn visit_region(&mut self, path: &RegionPath, comb: &Combination) -> std::result::Result<(), RegionError>;
}

/// Walk the combination tree under the given top-level objects,
/// visiting each region once.
///
/// Traversal is depth-first in declaration order: the order of `objects`,
/// then member order within each combination. The walk does not descend
/// below regions. Regions reachable along more than one path are visited
/// on first encounter only, so derived scene names stay unique.
///
/// Returns the number of regions successfully visited. A missing
/// top-level object or a reference cycle is fatal; a missing member
/// reference or a visitor error only costs that subtree.
pub fn walk_tree(
    db: &Database,
    objects: &[String],
    visitor: &mut dyn RegionVisitor,
) -> Result<usize> {
    let mut visited = HashSet::new();
    let mut stack = Vec::new();
    let mut count = 0;
    for name in objects {
        if !db.contains(name) {
            return Err(DbError::NotFound(name.clone()));
        }
        walk_rec(db, name, &mut stack, &mut visited, visitor, &mut count)?;
    }
    Ok(count)
}

fn walk_rec(
    db: &Database,
    name: &str,
    stack: &mut Vec<String>,
    visited: &mut HashSet<String>,
    visitor: &mut dyn RegionVisitor,
    count: &mut usize,
) -> Result<()> {
    if stack.iter().any(|n| n == name) {
        return Err(DbError::Cycle(name.to_string()));
    }
    let comb = match db.get(name) {
        Some(DbObject::Combination(comb)) => comb,
        // Solids carry no region attributes; nothing to visit.
        Some(DbObject::Solid { .. }) => return Ok(()),
        None => return Err(DbError::NotFound(name.to_string())),
    };
    stack.push(name.to_string());
    let result = if comb.region {
        if visited.insert(name.to_string()) {
            let path = RegionPath::new(stack.clone());
            match visitor.visit_region(&path, comb) {
                Ok(()) => *count += 1,
                Err(e) => warn!("skipping region {path}: {e}"),
            }
        } else {
            debug!("region {name} already visited, skipping");
        }
        Ok(())
    } else {
        walk_members(db, name, comb, stack, visited, visitor, count)
    };
    stack.pop();
    result
}

fn walk_members(
    db: &Database,
    name: &str,
    comb: &Combination,
    stack: &mut Vec<String>,
    visited: &mut HashSet<String>,
    visitor: &mut dyn RegionVisitor,
    count: &mut usize,
) -> Result<()> {
    for member in &comb.members {
        if !db.contains(&member.name) {
            warn!(
                "combination {}: member {} not found, skipping",
                name, member.name
            );
            continue;
        }
        walk_rec(db, &member.name, stack, visited, visitor, count)?;
    }
    Ok(())
}
