//! Growable, depth-sortable store of active entities.
//!
//! Capacity doubles explicitly with checked arithmetic so a hostile level
//! file cannot drive growth into an overflow or an aborting allocation.
//! Entities flagged `removed` stay in place until [`EntityCollection::sweep`]
//! runs their destroy hook and compacts the survivors.

use std::mem::size_of;

use crate::entity::Entity;
use crate::error::CollectionError;

pub const INITIAL_CAPACITY: usize = 32;

#[derive(Debug)]
pub struct EntityCollection {
    entities: Vec<Entity>,
}

impl EntityCollection {
    pub fn new() -> Result<Self, CollectionError> {
        let mut entities = Vec::new();
        entities
            .try_reserve_exact(INITIAL_CAPACITY)
            .map_err(|_| CollectionError::Allocation {
                requested: INITIAL_CAPACITY,
            })?;
        Ok(Self { entities })
    }

    /// Push one entity, doubling capacity when full.
    pub fn append(&mut self, entity: Entity) -> Result<(), CollectionError> {
        if self.entities.len() == self.entities.capacity() {
            self.grow()?;
        }
        self.entities.push(entity);
        Ok(())
    }

    fn grow(&mut self) -> Result<(), CollectionError> {
        let capacity = self.entities.capacity().max(1);
        let doubled = capacity
            .checked_mul(2)
            .ok_or(CollectionError::CapacityOverflow { capacity })?;
        let bytes = doubled
            .checked_mul(size_of::<Entity>())
            .ok_or(CollectionError::CapacityOverflow { capacity })?;
        if bytes > isize::MAX as usize {
            return Err(CollectionError::CapacityOverflow { capacity });
        }

        let additional = doubled - self.entities.len();
        self.entities
            .try_reserve_exact(additional)
            .map_err(|_| CollectionError::Allocation { requested: doubled })?;
        log::trace!("entity collection grew from {capacity} to {doubled}");
        Ok(())
    }

    /// Destroy and drop every removed entity, keeping survivors in order.
    pub fn sweep(&mut self) {
        let before = self.entities.len();
        self.entities.retain_mut(|entity| {
            if !entity.removed {
                return true;
            }
            let behavior = entity.behavior;
            behavior.destroy(entity);
            false
        });
        let swept = before - self.entities.len();
        if swept > 0 {
            log::trace!("swept {swept} removed entities");
        }
    }

    /// Order by descending archetype id.
    pub fn sort_by_depth(&mut self) {
        self.entities.sort_by(|a, b| b.archetype.cmp(&a.archetype));
    }

    /// Two distinct entities borrowed mutably at once.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Entity, &mut Entity) {
        assert_ne!(a, b, "pair_mut needs two distinct indices");
        if a < b {
            let (head, tail) = self.entities.split_at_mut(b);
            (&mut head[a], &mut tail[0])
        } else {
            let (head, tail) = self.entities.split_at_mut(a);
            (&mut tail[0], &mut head[b])
        }
    }

    pub fn position(&self, predicate: impl Fn(&Entity) -> bool) -> Option<usize> {
        self.entities.iter().position(predicate)
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entities.capacity()
    }
}

impl Drop for EntityCollection {
    fn drop(&mut self) {
        for entity in &mut self.entities {
            entity.removed = true;
        }
        self.sweep();
    }
}
