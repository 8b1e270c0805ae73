//! phanim core: declarative 2D animation scheduling (renderer-agnostic)
//!
//! A scene is a set of drawable objects plus an ordered list of animation
//! records. Records play one after another; each `advance(dt)` steps the
//! active record, interpolates the field it targets and leaves the result in
//! the object for a [`RenderWalker`] to draw.
//!
//! Layout:
//! - `arena`, `value`, `value_box`: storage and interpolation endpoints
//! - `object`, `objects`: drawable primitives and their registry
//! - `animation`, `timeline`: records and their registry
//! - `interp`: lerp per value kind, easing
//! - `scheduler`: the playback state machine
//! - `engine`: context owning all of the above

pub mod animation;
pub mod arena;
pub mod config;
pub mod engine;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod object;
pub mod objects;
pub mod outputs;
pub mod scheduler;
pub mod timeline;
pub mod value;
pub mod value_box;

// Re-exports for drivers and renderers
pub use animation::{Action, AnimKind, AnimationRecord, Tween};
pub use config::Config;
pub use engine::{Engine, RenderWalker};
pub use error::{EngineError, Result};
pub use ids::{AnimId, ObjectId};
pub use inputs::PlaybackCommand;
pub use interp::Easing;
pub use object::{
    ByteField, CircleData, ColorField, Field, FloatField, LineData, Object, ObjectKind, RectData,
    Shape, TextData, VectorField,
};
pub use objects::ObjectRegistry;
pub use outputs::{CoreEvent, Outputs};
pub use scheduler::PlaybackState;
pub use timeline::AnimationRegistry;
pub use value::{Color, Value, ValueKind, Vec2};
pub use value_box::{BoxHandle, ValueStore};
