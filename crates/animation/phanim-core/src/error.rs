//! Error types for the phanim core.
//!
//! Every variant is a precondition violation: a scene built with an
//! out-of-range id, a field that the object kind does not have, a degenerate
//! duration, and so on. The authoring surface on [`crate::Engine`] treats them
//! as fatal through [`fatal`]; the `try_*` forms hand them back instead.

use crate::object::ObjectKind;

/// Precondition violations raised by the registries and the scheduler.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    /// Object id past the end of the object registry
    #[error("OBJ: ID({id}) is out of bounds (ID >= {count})")]
    ObjectOutOfBounds { id: usize, count: usize },

    /// Animation id past the end of the animation registry
    #[error("ANIM: ID({id}) is out of bounds (ID >= {count})")]
    AnimationOutOfBounds { id: usize, count: usize },

    /// Field selector that does not exist on the object's kind
    #[error("{operation}: field `{field}` does not exist on a {kind}")]
    FieldNotOnKind {
        operation: &'static str,
        field: &'static str,
        kind: ObjectKind,
    },

    /// Duration rejected when a record is created
    #[error("{operation}: invalid duration {duration}")]
    InvalidDuration {
        operation: &'static str,
        duration: f32,
    },

    /// Zero or negative duration reached the easing computation
    #[error("easing: degenerate duration {duration}")]
    DegenerateDuration { duration: f32 },

    /// Negative or non-finite frame delta
    #[error("advance: invalid delta time {dt}")]
    InvalidDelta { dt: f32 },

    /// Value box handle from a generation that has been freed
    #[error("value box {index} belongs to freed generation {handle_generation} (current {current_generation})")]
    StaleValueBox {
        index: usize,
        handle_generation: u32,
        current_generation: u32,
    },

    /// Arena index past the 32-bit id space
    #[error("arena `{label}`: index {index} does not fit a 32-bit id")]
    CapacityExceeded { label: &'static str, index: usize },

    /// Configuration document could not be parsed
    #[error("config: {reason}")]
    Config { reason: String },
}

impl EngineError {
    /// Error category for log lines.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::ObjectOutOfBounds { .. } | Self::AnimationOutOfBounds { .. } => "bounds",
            Self::FieldNotOnKind { .. } => "field",
            Self::InvalidDuration { .. }
            | Self::DegenerateDuration { .. }
            | Self::InvalidDelta { .. } => "numeric",
            Self::StaleValueBox { .. } | Self::CapacityExceeded { .. } => "arena",
            Self::Config { .. } => "config",
        }
    }

    /// Only configuration errors can be handled at runtime; everything else
    /// is a scene-construction bug.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            reason: err.to_string(),
        }
    }
}

/// Core result type.
pub type Result<T> = core::result::Result<T, EngineError>;

/// Log the diagnostic for a violated precondition and halt.
#[cold]
#[track_caller]
pub fn fatal(operation: &str, err: EngineError) -> ! {
    log::error!("[{}] {operation}: {err}", err.category());
    panic!("{operation}: {err}");
}

/// Unwrap a core result, treating the error as fatal.
#[inline]
#[track_caller]
pub fn or_fatal<T>(operation: &str, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => fatal(operation, err),
    }
}
