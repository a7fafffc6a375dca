//! Named entity containers.

use serde::ser::{Serialize, Serializer};

use crate::error::{Result, SceneError};

/// Anything stored in an [`EntitySet`]: it has a stable name and a kind
/// label used in duplicate-name errors.
pub trait Named {
    /// Kind label, for example `"assembly"`.
    const KIND: &'static str;

    /// The entity's unique name within its container.
    fn name(&self) -> &str;
}

/// An insertion-ordered set of named entities.
///
/// Two regions deriving the same entity name would silently alias each
/// other if insertion overwrote, so `insert` rejects duplicates instead.
/// Iteration and serialization follow insertion order.
#[derive(Debug, Clone)]
pub struct EntitySet<T> {
    items: Vec<T>,
}

impl<T> Default for EntitySet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Named> EntitySet<T> {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, failing if its name is already taken.
    pub fn insert(&mut self, item: T) -> Result<()> {
        if self.contains(item.name()) {
            return Err(SceneError::DuplicateName {
                kind: T::KIND,
                name: item.name().to_string(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Look up an entity by name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Look up an entity by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.name() == name)
    }

    /// Whether an entity with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name() == name)
    }

    /// Iterate entities in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set holds no entities.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Serialize> Serialize for EntitySet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}
