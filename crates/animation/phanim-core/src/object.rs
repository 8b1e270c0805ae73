//! Drawable primitives and the logical fields a tween can target.
//!
//! A field selector names a slot ("position", "radius", ...) independently of
//! the object kind; [`Object`] resolves it to the concrete storage by matching
//! on the kind, and rejects selectors the kind does not have.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::ids::ObjectId;
use crate::value::{Color, Value, Vec2};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Line,
    Rect,
    Circle,
    Text,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Line => "Line",
            ObjectKind::Rect => "Rect",
            ObjectKind::Circle => "Circle",
            ObjectKind::Text => "Text",
        };
        f.write_str(name)
    }
}

/// Segment from `position` to `position + size`.
#[derive(Clone, Debug, PartialEq)]
pub struct LineData {
    pub position: Vec2,
    pub size: Vec2,
    pub thickness: f32,
    pub color: Color,
}

impl LineData {
    #[inline]
    pub fn end(&self) -> Vec2 {
        self.position + self.size
    }
}

/// Rectangle centered on `position`.
#[derive(Clone, Debug, PartialEq)]
pub struct RectData {
    pub position: Vec2,
    pub size: Vec2,
    pub color: Color,
}

impl RectData {
    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.position - self.size * 0.5
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleData {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    pub stroke_width: f32,
    pub stroke_color: Color,
}

/// Text payload anchored at its top-left corner. Rasterization is up to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct TextData {
    pub text: String,
    pub position: Vec2,
    pub font_size: f32,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line(LineData),
    Rect(RectData),
    Circle(CircleData),
    Text(TextData),
}

impl Shape {
    #[inline]
    pub fn kind(&self) -> ObjectKind {
        match self {
            Shape::Line(_) => ObjectKind::Line,
            Shape::Rect(_) => ObjectKind::Rect,
            Shape::Circle(_) => ObjectKind::Circle,
            Shape::Text(_) => ObjectKind::Text,
        }
    }

    /// Main color; every kind has one.
    #[inline]
    pub fn color(&self) -> Color {
        match self {
            Shape::Line(l) => l.color,
            Shape::Rect(r) => r.color,
            Shape::Circle(c) => c.color,
            Shape::Text(t) => t.color,
        }
    }

    #[inline]
    fn color_slot(&mut self) -> &mut Color {
        match self {
            Shape::Line(l) => &mut l.color,
            Shape::Rect(r) => &mut r.color,
            Shape::Circle(c) => &mut c.color,
            Shape::Text(t) => &mut t.color,
        }
    }

    /// Line start, rectangle/circle center or text anchor; every kind has one.
    #[inline]
    pub fn position(&self) -> Vec2 {
        match self {
            Shape::Line(l) => l.position,
            Shape::Rect(r) => r.position,
            Shape::Circle(c) => c.center,
            Shape::Text(t) => t.position,
        }
    }

    #[inline]
    fn position_slot(&mut self) -> &mut Vec2 {
        match self {
            Shape::Line(l) => &mut l.position,
            Shape::Rect(r) => &mut r.position,
            Shape::Circle(c) => &mut c.center,
            Shape::Text(t) => &mut t.position,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteField {
    /// Alpha channel of the main color.
    Alpha,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloatField {
    /// Circle radius.
    Radius,
    /// Line thickness or circle stroke width.
    StrokeWidth,
    /// Text font size.
    FontSize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VectorField {
    /// Line start, rectangle/circle center, text anchor.
    Position,
    /// Line extent or rectangle size.
    Size,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorField {
    Fill,
    /// Circle outline.
    Stroke,
}

/// Any logical field, tagged with its value type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Byte(ByteField),
    Float(FloatField),
    Vector(VectorField),
    Color(ColorField),
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Byte(ByteField::Alpha) => "alpha",
            Field::Float(FloatField::Radius) => "radius",
            Field::Float(FloatField::StrokeWidth) => "stroke_width",
            Field::Float(FloatField::FontSize) => "font_size",
            Field::Vector(VectorField::Position) => "position",
            Field::Vector(VectorField::Size) => "size",
            Field::Color(ColorField::Fill) => "color",
            Field::Color(ColorField::Stroke) => "stroke_color",
        }
    }
}

/// Mutable view of one resolved field.
#[derive(Debug)]
pub enum FieldMut<'a> {
    Byte(&'a mut u8),
    Float(&'a mut f32),
    Vector(&'a mut Vec2),
    Color(&'a mut Color),
}

impl FieldMut<'_> {
    pub fn get(&self) -> Value {
        match self {
            FieldMut::Byte(v) => Value::Byte(**v),
            FieldMut::Float(v) => Value::Float(**v),
            FieldMut::Vector(v) => Value::Vec2(**v),
            FieldMut::Color(v) => Value::Color(**v),
        }
    }
}

/// A drawable primitive owned by the object registry.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    id: ObjectId,
    should_render: bool,
    shape: Shape,
}

impl Object {
    pub(crate) fn new(id: ObjectId, shape: Shape) -> Self {
        Self {
            id,
            should_render: false,
            shape,
        }
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.shape.kind()
    }

    #[inline]
    pub fn should_render(&self) -> bool {
        self.should_render
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns true when this call flipped the flag.
    #[inline]
    pub(crate) fn mark_renderable(&mut self) -> bool {
        !std::mem::replace(&mut self.should_render, true)
    }

    fn missing(&self, operation: &'static str, field: Field) -> EngineError {
        EngineError::FieldNotOnKind {
            operation,
            field: field.name(),
            kind: self.kind(),
        }
    }

    pub fn byte_mut(&mut self, _operation: &'static str, field: ByteField) -> Result<&mut u8> {
        match field {
            ByteField::Alpha => Ok(&mut self.shape.color_slot().a),
        }
    }

    pub fn float_mut(&mut self, operation: &'static str, field: FloatField) -> Result<&mut f32> {
        let err = self.missing(operation, Field::Float(field));
        match (&mut self.shape, field) {
            (Shape::Circle(c), FloatField::Radius) => Ok(&mut c.radius),
            (Shape::Circle(c), FloatField::StrokeWidth) => Ok(&mut c.stroke_width),
            (Shape::Line(l), FloatField::StrokeWidth) => Ok(&mut l.thickness),
            (Shape::Text(t), FloatField::FontSize) => Ok(&mut t.font_size),
            _ => Err(err),
        }
    }

    pub fn vector_mut(&mut self, operation: &'static str, field: VectorField) -> Result<&mut Vec2> {
        let err = self.missing(operation, Field::Vector(field));
        match (&mut self.shape, field) {
            (shape, VectorField::Position) => Ok(shape.position_slot()),
            (Shape::Line(l), VectorField::Size) => Ok(&mut l.size),
            (Shape::Rect(r), VectorField::Size) => Ok(&mut r.size),
            _ => Err(err),
        }
    }

    pub fn color_mut(&mut self, operation: &'static str, field: ColorField) -> Result<&mut Color> {
        let err = self.missing(operation, Field::Color(field));
        match (&mut self.shape, field) {
            (shape, ColorField::Fill) => Ok(shape.color_slot()),
            (Shape::Circle(c), ColorField::Stroke) => Ok(&mut c.stroke_color),
            _ => Err(err),
        }
    }

    /// Resolve any logical field to its storage.
    pub fn field_mut(&mut self, operation: &'static str, field: Field) -> Result<FieldMut<'_>> {
        Ok(match field {
            Field::Byte(f) => FieldMut::Byte(self.byte_mut(operation, f)?),
            Field::Float(f) => FieldMut::Float(self.float_mut(operation, f)?),
            Field::Vector(f) => FieldMut::Vector(self.vector_mut(operation, f)?),
            Field::Color(f) => FieldMut::Color(self.color_mut(operation, f)?),
        })
    }

    /// Fails with `FieldNotOnKind` naming `operation` when the kind lacks `field`.
    pub fn ensure_field(&self, operation: &'static str, field: Field) -> Result<()> {
        self.read(field)
            .map(|_| ())
            .map_err(|_| self.missing(operation, field))
    }

    /// Current value of a logical field.
    pub fn read(&self, field: Field) -> Result<Value> {
        let value = match (&self.shape, field) {
            (shape, Field::Byte(ByteField::Alpha)) => Some(Value::Byte(shape.color().a)),
            (shape, Field::Color(ColorField::Fill)) => Some(Value::Color(shape.color())),
            (shape, Field::Vector(VectorField::Position)) => Some(Value::Vec2(shape.position())),
            (Shape::Circle(c), Field::Color(ColorField::Stroke)) => {
                Some(Value::Color(c.stroke_color))
            }
            (Shape::Circle(c), Field::Float(FloatField::Radius)) => Some(Value::Float(c.radius)),
            (Shape::Circle(c), Field::Float(FloatField::StrokeWidth)) => {
                Some(Value::Float(c.stroke_width))
            }
            (Shape::Line(l), Field::Float(FloatField::StrokeWidth)) => {
                Some(Value::Float(l.thickness))
            }
            (Shape::Text(t), Field::Float(FloatField::FontSize)) => Some(Value::Float(t.font_size)),
            (Shape::Line(l), Field::Vector(VectorField::Size)) => Some(Value::Vec2(l.size)),
            (Shape::Rect(r), Field::Vector(VectorField::Size)) => Some(Value::Vec2(r.size)),
            _ => None,
        };
        value.ok_or_else(|| self.missing("read", field))
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id)?;
        if !self.should_render {
            f.write_str(" (hidden)")?;
        }
        Ok(())
    }
}
