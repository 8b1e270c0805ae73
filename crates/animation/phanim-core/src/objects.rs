//! Object registry: dense, append-only store of drawable primitives.

use crate::arena::Arena;
use crate::error::{EngineError, Result};
use crate::ids::ObjectId;
use crate::object::{Field, FieldMut, Object, Shape};

#[derive(Debug)]
pub struct ObjectRegistry {
    live: Arena<Object>,
    /// State of each object at creation; replay restores from here.
    initial: Arena<Object>,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new(crate::arena::DEFAULT_INIT_CAP)
    }
}

impl ObjectRegistry {
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            live: Arena::with_initial_capacity("objects", initial_capacity),
            initial: Arena::with_initial_capacity("objects.initial", initial_capacity),
        }
    }

    /// Append an object; it starts hidden.
    pub fn create_object(&mut self, shape: Shape) -> ObjectId {
        let id = ObjectId::from_index(self.live.len());
        let kind = shape.kind();
        let object = Object::new(id, shape);
        self.initial.push(object.clone());
        self.live.push(object);
        log::trace!("objects: created {kind} {id}");
        id
    }

    fn out_of_bounds(&self, id: ObjectId) -> EngineError {
        EngineError::ObjectOutOfBounds {
            id: id.index(),
            count: self.live.len(),
        }
    }

    pub fn get(&self, id: ObjectId) -> Result<&Object> {
        self.live.get(id.index()).ok_or_else(|| self.out_of_bounds(id))
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Result<&mut Object> {
        let err = self.out_of_bounds(id);
        self.live.get_mut(id.index()).ok_or(err)
    }

    /// Resolve a logical field of an object to its storage.
    pub fn get_mutable_field(
        &mut self,
        operation: &'static str,
        id: ObjectId,
        field: Field,
    ) -> Result<FieldMut<'_>> {
        self.get_mut(id)?.field_mut(operation, field)
    }

    /// Apply `edit` to the live object and to its creation snapshot, so the
    /// change survives `restore_initial`.
    pub fn edit_with_initial<F>(&mut self, id: ObjectId, mut edit: F) -> Result<()>
    where
        F: FnMut(&mut Object) -> Result<()>,
    {
        edit(self.get_mut(id)?)?;
        if let Some(initial) = self.initial.get_mut(id.index()) {
            edit(initial)?;
        }
        Ok(())
    }

    /// Returns true when the object was hidden before this call.
    pub fn mark_renderable(&mut self, id: ObjectId) -> Result<bool> {
        let flipped = self.get_mut(id)?.mark_renderable();
        if flipped {
            log::debug!("objects: {id} is now renderable");
        }
        Ok(flipped)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.live.capacity()
    }

    /// All objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.live.iter()
    }

    /// Objects whose first animation has been processed, in insertion order.
    pub fn renderables(&self) -> impl Iterator<Item = &Object> {
        self.live.iter().filter(|o| o.should_render())
    }

    /// Put every object back to its creation state, hidden again.
    pub fn restore_initial(&mut self) {
        for (live, initial) in self.live.iter_mut().zip(self.initial.iter()) {
            live.clone_from(initial);
        }
    }

    /// Drop every object at once.
    pub fn free_all(&mut self) {
        self.live.free_all();
        self.initial.free_all();
    }
}
