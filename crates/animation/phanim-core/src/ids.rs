//! Identifiers for objects and animation records.
//!
//! Both are dense: the id is the insertion index into the owning registry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{fatal, EngineError};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct AnimId(pub u32);

impl ObjectId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(narrow_index("objects", index))
    }
}

impl AnimId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(narrow_index("animations", index))
    }
}

/// Ids and box handles are 32-bit; an arena growing past that is fatal.
#[track_caller]
pub(crate) fn narrow_index(label: &'static str, index: usize) -> u32 {
    match u32::try_from(index) {
        Ok(narrow) => narrow,
        Err(_) => fatal("narrow_index", EngineError::CapacityExceeded { label, index }),
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj#{}", self.0)
    }
}

impl fmt::Display for AnimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anim#{}", self.0)
    }
}
