//! Shared raytracing context threaded through scene construction.

use std::sync::Arc;

use glint_db::Database;

/// Per-thread raytracing state.
///
/// The renderer plugin resolves geometry against one of these per worker.
/// Only the slot index matters on the bridge side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    /// Worker index this slot belongs to.
    pub cpu: usize,
}

/// A fixed pool of per-thread resource slots, allocated before traversal.
#[derive(Debug, Clone)]
pub struct ResourcePool {
    slots: Vec<Resource>,
}

impl ResourcePool {
    /// A pool with one slot per worker.
    pub fn new(workers: usize) -> Self {
        Self {
            slots: (0..workers).map(|cpu| Resource { cpu }).collect(),
        }
    }

    /// Slot for a worker index.
    pub fn get(&self, cpu: usize) -> Option<&Resource> {
        self.slots.get(cpu)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the pool has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Application-wide state shared by every region translation.
///
/// Replaces what would otherwise be process globals: the open database,
/// the requested top-level objects, the resource pool, and the first-hit
/// ray policy.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// The open geometry database.
    pub database: Arc<Database>,
    /// Top-level objects requested for this render.
    pub objects: Vec<String>,
    /// Per-thread resource slots.
    pub resources: ResourcePool,
    /// Stop each ray at its first hit.
    pub one_hit: bool,
}

impl RenderContext {
    /// A single-threaded context over a database and object selection.
    pub fn new(database: Arc<Database>, objects: Vec<String>) -> Self {
        Self {
            database,
            objects,
            resources: ResourcePool::new(1),
            one_hit: true,
        }
    }
}
