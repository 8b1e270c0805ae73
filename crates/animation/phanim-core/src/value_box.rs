//! Arena-owned interpolation endpoints.
//!
//! A tween never reads its endpoints from the live object: start and target
//! are copied into a [`ValueStore`] when the record is created and addressed
//! through typed [`BoxHandle`]s. The store is separate from the object and
//! animation arenas and may be torn down on its own (scene-local lifetime);
//! handles minted before a `free_all` are rejected afterwards.

use std::fmt;
use std::marker::PhantomData;

use crate::arena::Arena;
use crate::error::{EngineError, Result};
use crate::ids::narrow_index;
use crate::value::{Boxable, Color, Value, Vec2};

/// Typed reference to a boxed value.
pub struct BoxHandle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> BoxHandle<T> {
    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl<T> Clone for BoxHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BoxHandle<T> {}

impl<T> PartialEq for BoxHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for BoxHandle<T> {}

impl<T> fmt::Debug for BoxHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoxHandle({}@{})", self.index, self.generation)
    }
}

#[derive(Debug)]
pub struct ValueStore {
    arena: Arena<Value>,
}

impl Default for ValueStore {
    fn default() -> Self {
        Self::new(crate::arena::DEFAULT_INIT_CAP)
    }
}

impl ValueStore {
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            arena: Arena::with_initial_capacity("values", initial_capacity),
        }
    }

    pub fn alloc<T: Boxable>(&mut self, value: T) -> BoxHandle<T> {
        let index = self.arena.push(value.into_value());
        BoxHandle {
            index: narrow_index("values", index),
            generation: self.arena.generation(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn box_byte(&mut self, value: u8) -> BoxHandle<u8> {
        self.alloc(value)
    }

    #[inline]
    pub fn box_scalar(&mut self, value: f32) -> BoxHandle<f32> {
        self.alloc(value)
    }

    #[inline]
    pub fn box_vector(&mut self, value: Vec2) -> BoxHandle<Vec2> {
        self.alloc(value)
    }

    #[inline]
    pub fn box_color(&mut self, value: Color) -> BoxHandle<Color> {
        self.alloc(value)
    }

    /// Read a boxed value back.
    pub fn get<T: Boxable>(&self, handle: BoxHandle<T>) -> Result<T> {
        let stale = || EngineError::StaleValueBox {
            index: handle.index(),
            handle_generation: handle.generation,
            current_generation: self.arena.generation(),
        };
        if handle.generation != self.arena.generation() {
            return Err(stale());
        }
        // A handle of the current generation always points at a value of its own type.
        self.arena
            .get(handle.index())
            .and_then(T::from_value)
            .ok_or_else(stale)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.arena.generation()
    }

    /// Release every boxed value. Records still holding handles become unplayable.
    pub fn free_all(&mut self) {
        self.arena.free_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxes_round_trip_by_type() {
        let mut store = ValueStore::default();
        let b = store.box_byte(200);
        let s = store.box_scalar(1.25);
        let v = store.box_vector(Vec2::new(3.0, 4.0));
        let c = store.box_color(Color::rgba(1, 2, 3, 4));

        assert_eq!(store.len(), 4);
        assert_eq!(store.get(b), Ok(200));
        assert_eq!(store.get(s), Ok(1.25));
        assert_eq!(store.get(v), Ok(Vec2::new(3.0, 4.0)));
        assert_eq!(store.get(c), Ok(Color::rgba(1, 2, 3, 4)));
    }

    #[test]
    fn boxed_copy_is_independent_of_source() {
        let mut store = ValueStore::default();
        let mut live = Vec2::new(1.0, 1.0);
        let h = store.box_vector(live);
        live.x = 99.0;
        assert_eq!(store.get(h).unwrap(), Vec2::new(1.0, 1.0));
        assert_eq!(live.x, 99.0);
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut store = ValueStore::default();
        let h = store.box_scalar(2.0);
        store.free_all();
        let fresh = store.box_scalar(5.0);

        assert_eq!(fresh.index(), h.index());
        assert_eq!(
            store.get(h),
            Err(EngineError::StaleValueBox {
                index: 0,
                handle_generation: 0,
                current_generation: 1,
            })
        );
        assert_eq!(store.get(fresh), Ok(5.0));
    }
}
