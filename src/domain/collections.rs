use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, Index};
use std::slice::Iter;
use std::vec::IntoIter;

use super::entity::Entity;

/// Outcome of [`EntitySet::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new id was appended at the given position
    Inserted(usize),
    /// An existing id was overwritten in place at the given position
    Updated(usize),
}

/// An ordered set of entities with automatic deduplication by id
///
/// New ids keep their insertion order. Inserting an entity whose id is
/// already present overwrites the existing slot without moving it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySet<E: Entity> {
    entities: Vec<E>,
    positions: HashMap<E::Id, usize>,
}

impl<E: Entity> EntitySet<E> {
    /// Creates a new empty set
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Inserts an entity, or overwrites the entity with the same id in place
    pub fn upsert(&mut self, entity: E) -> Upsert {
        let id = entity.id();
        match self.positions.get(&id) {
            Some(&index) => {
                self.entities[index] = entity;
                Upsert::Updated(index)
            }
            None => {
                let index = self.entities.len();
                self.positions.insert(id, index);
                self.entities.push(entity);
                Upsert::Inserted(index)
            }
        }
    }

    /// Upserts every entity in order
    /// Returns: number of entities that were newly inserted
    pub fn merge<I>(&mut self, entities: I) -> usize
    where
        I: IntoIterator<Item = E>,
    {
        let mut inserted = 0;
        for entity in entities {
            if let Upsert::Inserted(_) = self.upsert(entity) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Overwrites an existing entity with the same id
    /// Returns: true if the id was present, false if the call was a no-op
    pub fn replace(&mut self, entity: E) -> bool {
        match self.positions.get(&entity.id()) {
            Some(&index) => {
                self.entities[index] = entity;
                true
            }
            None => false,
        }
    }

    /// Checks if an id is contained in the set
    pub fn contains(&self, id: &E::Id) -> bool {
        self.positions.contains_key(id)
    }

    /// Gets an entity by id
    pub fn get_by_id(&self, id: &E::Id) -> Option<&E> {
        self.positions.get(id).map(|&index| &self.entities[index])
    }

    /// Position of an id in insertion order
    pub fn position(&self, id: &E::Id) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Returns a reference to the internal Vec (read-only)
    pub fn as_slice(&self) -> &[E] {
        &self.entities
    }

    /// Clears all entities
    pub fn clear(&mut self) {
        self.entities.clear();
        self.positions.clear();
    }
}

impl<E: Entity> Default for EntitySet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Deref for EntitySet<E> {
    type Target = [E];

    fn deref(&self) -> &Self::Target {
        &self.entities
    }
}

impl<E: Entity> Index<usize> for EntitySet<E> {
    type Output = E;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entities[index]
    }
}

impl<E: Entity> AsRef<[E]> for EntitySet<E> {
    fn as_ref(&self) -> &[E] {
        &self.entities
    }
}

impl<E: Entity> IntoIterator for EntitySet<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a, E: Entity> IntoIterator for &'a EntitySet<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl<E: Entity> FromIterator<E> for EntitySet<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        let mut entities = Self::new();
        entities.extend(iter);
        entities
    }
}

impl<E: Entity> Extend<E> for EntitySet<E> {
    fn extend<T: IntoIterator<Item = E>>(&mut self, iter: T) {
        for entity in iter {
            self.upsert(entity);
        }
    }
}

impl<E: Entity> fmt::Display for EntitySet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntitySet[{} entities]", self.len())
    }
}
