//! Animation records: one timed mutation of one object field.
//!
//! The value type and the field it writes are bound together in [`Tween`],
//! so a record can only ever write a float into a float slot, a color into a
//! color slot, and so on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::ids::{AnimId, ObjectId};
use crate::interp::functions::{lerp_color, lerp_f32, lerp_u8, lerp_vec2};
use crate::interp::Easing;
use crate::object::{ByteField, ColorField, Field, FloatField, Object, VectorField};
use crate::value::{Color, ValueKind, Vec2};
use crate::value_box::{BoxHandle, ValueStore};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimKind {
    Create,
    PositionTransform,
    ColorFade,
    Scale,
    Pause,
    Immediate,
}

impl fmt::Display for AnimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnimKind::Create => "create",
            AnimKind::PositionTransform => "position_transform",
            AnimKind::ColorFade => "color_fade",
            AnimKind::Scale => "scale",
            AnimKind::Pause => "pause",
            AnimKind::Immediate => "immediate",
        };
        f.write_str(name)
    }
}

/// Field binding plus boxed endpoints.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tween {
    Byte {
        field: ByteField,
        start: BoxHandle<u8>,
        target: BoxHandle<u8>,
    },
    Float {
        field: FloatField,
        start: BoxHandle<f32>,
        target: BoxHandle<f32>,
    },
    Vector {
        field: VectorField,
        start: BoxHandle<Vec2>,
        target: BoxHandle<Vec2>,
    },
    Color {
        field: ColorField,
        start: BoxHandle<Color>,
        target: BoxHandle<Color>,
    },
}

impl Tween {
    pub fn field(&self) -> Field {
        match *self {
            Tween::Byte { field, .. } => Field::Byte(field),
            Tween::Float { field, .. } => Field::Float(field),
            Tween::Vector { field, .. } => Field::Vector(field),
            Tween::Color { field, .. } => Field::Color(field),
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        match self {
            Tween::Byte { .. } => ValueKind::Byte,
            Tween::Float { .. } => ValueKind::Float,
            Tween::Vector { .. } => ValueKind::Vec2,
            Tween::Color { .. } => ValueKind::Color,
        }
    }

    /// Write `lerp(start, target, t)` into the bound field of `object`.
    pub fn apply(&self, object: &mut Object, values: &ValueStore, t: f32) -> Result<()> {
        const OP: &str = "advance";
        match *self {
            Tween::Byte {
                field,
                start,
                target,
            } => {
                let (a, b) = (values.get(start)?, values.get(target)?);
                *object.byte_mut(OP, field)? = lerp_u8(a, b, t);
            }
            Tween::Float {
                field,
                start,
                target,
            } => {
                let (a, b) = (values.get(start)?, values.get(target)?);
                *object.float_mut(OP, field)? = lerp_f32(a, b, t);
            }
            Tween::Vector {
                field,
                start,
                target,
            } => {
                let (a, b) = (values.get(start)?, values.get(target)?);
                *object.vector_mut(OP, field)? = lerp_vec2(a, b, t);
            }
            Tween::Color {
                field,
                start,
                target,
            } => {
                let (a, b) = (values.get(start)?, values.get(target)?);
                *object.color_mut(OP, field)? = lerp_color(a, b, t);
            }
        }
        Ok(())
    }

    /// Start and target rendered for diagnostics.
    pub fn describe_endpoints(&self, values: &ValueStore) -> Result<(String, String)> {
        Ok(match *self {
            Tween::Byte { start, target, .. } => {
                (values.get(start)?.to_string(), values.get(target)?.to_string())
            }
            Tween::Float { start, target, .. } => (
                format!("{:.2}", values.get(start)?),
                format!("{:.2}", values.get(target)?),
            ),
            Tween::Vector { start, target, .. } => {
                (values.get(start)?.to_string(), values.get(target)?.to_string())
            }
            Tween::Color { start, target, .. } => {
                (values.get(start)?.to_string(), values.get(target)?.to_string())
            }
        })
    }
}

/// What a record does when it is the active one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    /// Interpolate a field of `object`.
    Tween { object: ObjectId, tween: Tween },
    /// Hold the timeline; touches no object.
    Pause,
    /// Make `object` renderable without animating anything.
    Immediate { object: ObjectId },
}

impl Action {
    #[inline]
    pub fn target(&self) -> Option<ObjectId> {
        match *self {
            Action::Tween { object, .. } | Action::Immediate { object } => Some(object),
            Action::Pause => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationRecord {
    id: AnimId,
    kind: AnimKind,
    action: Action,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl AnimationRecord {
    pub(crate) fn new(
        id: AnimId,
        kind: AnimKind,
        action: Action,
        duration: f32,
        easing: Easing,
    ) -> Self {
        Self {
            id,
            kind,
            action,
            elapsed: 0.0,
            duration,
            easing,
        }
    }

    #[inline]
    pub fn id(&self) -> AnimId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> AnimKind {
        self.kind
    }

    #[inline]
    pub fn action(&self) -> &Action {
        &self.action
    }

    #[inline]
    pub fn target(&self) -> Option<ObjectId> {
        self.action.target()
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    #[inline]
    pub(crate) fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Elapsed time after adding `dt`, never past the duration.
    #[inline]
    pub fn elapsed_after(&self, dt: f32) -> f32 {
        (self.elapsed + dt).min(self.duration)
    }

    #[inline]
    pub(crate) fn advance_elapsed(&mut self, dt: f32) {
        self.elapsed = self.elapsed_after(dt);
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[inline]
    pub(crate) fn rewind(&mut self) {
        self.elapsed = 0.0;
    }

    /// Eased interpolation factor for the current elapsed time.
    #[inline]
    pub fn factor(&self) -> Result<f32> {
        self.factor_at(self.elapsed)
    }

    #[inline]
    pub fn factor_at(&self, elapsed: f32) -> Result<f32> {
        self.easing.rate(elapsed, self.duration)
    }

    /// Multi-line dump including the boxed endpoints.
    pub fn dump(&self, values: &ValueStore) -> Result<String> {
        let mut out = format!("Anim {{\n    id: {}\n    kind: {}\n", self.id, self.kind);
        match self.action {
            Action::Tween { object, tween } => {
                let (start, target) = tween.describe_endpoints(values)?;
                out.push_str(&format!("    obj: {object}\n"));
                out.push_str(&format!("    field: {}\n", tween.field().name()));
                out.push_str(&format!("    start: {start}\n"));
                out.push_str(&format!("    target: {target}\n"));
                out.push_str(&format!("    value type: {}\n", tween.value_kind()));
            }
            Action::Immediate { object } => out.push_str(&format!("    obj: {object}\n")),
            Action::Pause => {}
        }
        out.push_str(&format!(
            "    easing: {}\n    time: {:.2}\n    duration: {:.2}\n}}",
            self.easing, self.elapsed, self.duration
        ));
        Ok(out)
    }
}

impl fmt::Display for AnimationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.kind)?;
        match self.action {
            Action::Tween { object, tween } => write!(f, " {object}.{}", tween.field().name())?,
            Action::Immediate { object } => write!(f, " {object}")?,
            Action::Pause => {}
        }
        write!(f, " [{:.2}/{:.2}s, {}]", self.elapsed, self.duration, self.easing)
    }
}

/// Durations are checked when a record is created so the scheduler never
/// feeds a degenerate one to the easing computation.
pub(crate) fn validate_duration(
    operation: &'static str,
    action: &Action,
    duration: f32,
) -> Result<()> {
    let ok = duration.is_finite()
        && match action {
            Action::Tween { .. } => duration > 0.0,
            Action::Pause => duration >= 0.0,
            Action::Immediate { .. } => duration == 0.0,
        };
    duration_check(operation, ok, duration)
}

/// Tween rule alone, for callers that validate before boxing endpoints.
pub(crate) fn validate_tween_duration(operation: &'static str, duration: f32) -> Result<()> {
    duration_check(operation, duration.is_finite() && duration > 0.0, duration)
}

fn duration_check(operation: &'static str, ok: bool, duration: f32) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(EngineError::InvalidDuration {
            operation,
            duration,
        })
    }
}
