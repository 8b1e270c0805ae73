//! Engine: owns the registries and exposes the authoring, driver and render
//! surfaces.
//!
//! Authoring and driver methods treat precondition violations as fatal (the
//! diagnostic is logged, then the call panics). Each has a `try_*` twin that
//! returns the [`crate::EngineError`] instead.

use crate::animation::{validate_tween_duration, Action, AnimKind, Tween};
use crate::config::Config;
use crate::error::{fatal, or_fatal, Result};
use crate::ids::{AnimId, ObjectId};
use crate::inputs::PlaybackCommand;
use crate::interp::Easing;
use crate::object::{
    ByteField, CircleData, ColorField, Field, FloatField, LineData, Object, RectData, Shape,
    TextData, VectorField,
};
use crate::objects::ObjectRegistry;
use crate::outputs::Outputs;
use crate::scheduler::{PlaybackState, Scheduler};
use crate::timeline::AnimationRegistry;
use crate::value::{Color, Value, Vec2};
use crate::value_box::ValueStore;

/// Receives renderable objects from [`Engine::render`], in insertion order.
pub trait RenderWalker {
    /// Called once per render pass before any object.
    fn clear(&mut self, _background: Color) {}

    fn draw(&mut self, object: &Object);
}

impl<F: FnMut(&Object)> RenderWalker for F {
    fn draw(&mut self, object: &Object) {
        self(object)
    }
}

#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    objects: ObjectRegistry,
    animations: AnimationRegistry,
    values: ValueStore,
    scheduler: Scheduler,
    background: Color,

    // Per-frame outputs
    outputs: Outputs,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Engine {
    pub fn new(cfg: Config) -> Self {
        let cap = cfg.initial_capacity;
        Self {
            objects: ObjectRegistry::new(cap),
            animations: AnimationRegistry::new(cap, cfg.default_easing),
            values: ValueStore::new(cap),
            scheduler: Scheduler::new(),
            background: cfg.background,
            outputs: Outputs::default(),
            cfg,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    // ---- objects ----

    /// Segment from `start` to `end`, with the configured thickness.
    pub fn line(&mut self, start: Vec2, end: Vec2, color: Color) -> ObjectId {
        self.objects.create_object(Shape::Line(LineData {
            position: start,
            size: end - start,
            thickness: self.cfg.line_thickness,
            color,
        }))
    }

    pub fn rect(&mut self, center: Vec2, size: Vec2, color: Color) -> ObjectId {
        self.objects.create_object(Shape::Rect(RectData {
            position: center,
            size,
            color,
        }))
    }

    /// Circle without a stroke.
    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) -> ObjectId {
        self.objects.create_object(Shape::Circle(CircleData {
            center,
            radius,
            color,
            stroke_width: 0.0,
            stroke_color: Color::BLANK,
        }))
    }

    /// Text anchored at `position`, with the configured font size and color.
    pub fn text(&mut self, text: impl Into<String>, position: Vec2) -> ObjectId {
        self.objects.create_object(Shape::Text(TextData {
            text: text.into(),
            position,
            font_size: self.cfg.font_size,
            color: self.cfg.text_color,
        }))
    }

    /// Read access to every object, hidden ones included.
    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        or_fatal("object", self.try_object(id))
    }

    pub fn try_object(&self, id: ObjectId) -> Result<&Object> {
        self.objects.get(id)
    }

    pub fn animations(&self) -> &AnimationRegistry {
        &self.animations
    }

    /// Boxed tween endpoints.
    pub fn values(&self) -> &ValueStore {
        &self.values
    }

    // ---- animations ----

    /// Check the target, its field and the duration before any endpoint is
    /// boxed, so a rejected tween leaves the value store untouched.
    fn check_tween(
        &self,
        operation: &'static str,
        object: ObjectId,
        field: Field,
        duration: f32,
    ) -> Result<()> {
        self.objects.get(object)?.ensure_field(operation, field)?;
        validate_tween_duration(operation, duration)
    }

    fn push_tween(
        &mut self,
        operation: &'static str,
        kind: AnimKind,
        object: ObjectId,
        tween: Tween,
        duration: f32,
    ) -> Result<AnimId> {
        self.animations
            .push(operation, kind, Action::Tween { object, tween }, duration)
    }

    pub fn try_transform_position(
        &mut self,
        object: ObjectId,
        start: Vec2,
        target: Vec2,
        duration: f32,
    ) -> Result<AnimId> {
        self.check_tween(
            "transform_position",
            object,
            Field::Vector(VectorField::Position),
            duration,
        )?;
        let tween = Tween::Vector {
            field: VectorField::Position,
            start: self.values.box_vector(start),
            target: self.values.box_vector(target),
        };
        self.push_tween(
            "transform_position",
            AnimKind::PositionTransform,
            object,
            tween,
            duration,
        )
    }

    /// Move an object's position from `start` to `target`.
    pub fn transform_position(
        &mut self,
        object: ObjectId,
        start: Vec2,
        target: Vec2,
        duration: f32,
    ) -> AnimId {
        or_fatal(
            "transform_position",
            self.try_transform_position(object, start, target, duration),
        )
    }

    pub fn try_fade_color(
        &mut self,
        object: ObjectId,
        start: Color,
        target: Color,
        duration: f32,
    ) -> Result<AnimId> {
        self.check_tween("fade_color", object, Field::Color(ColorField::Fill), duration)?;
        let tween = Tween::Color {
            field: ColorField::Fill,
            start: self.values.box_color(start),
            target: self.values.box_color(target),
        };
        self.push_tween("fade_color", AnimKind::ColorFade, object, tween, duration)
    }

    /// Fade the main color, all four channels.
    pub fn fade_color(
        &mut self,
        object: ObjectId,
        start: Color,
        target: Color,
        duration: f32,
    ) -> AnimId {
        or_fatal(
            "fade_color",
            self.try_fade_color(object, start, target, duration),
        )
    }

    pub fn try_fade_alpha(
        &mut self,
        object: ObjectId,
        start: u8,
        target: u8,
        duration: f32,
    ) -> Result<AnimId> {
        self.check_tween("fade_alpha", object, Field::Byte(ByteField::Alpha), duration)?;
        let tween = Tween::Byte {
            field: ByteField::Alpha,
            start: self.values.box_byte(start),
            target: self.values.box_byte(target),
        };
        self.push_tween("fade_alpha", AnimKind::ColorFade, object, tween, duration)
    }

    /// Fade only the alpha channel of the main color.
    pub fn fade_alpha(&mut self, object: ObjectId, start: u8, target: u8, duration: f32) -> AnimId {
        or_fatal(
            "fade_alpha",
            self.try_fade_alpha(object, start, target, duration),
        )
    }

    pub fn try_fade_stroke(
        &mut self,
        object: ObjectId,
        start: Color,
        target: Color,
        duration: f32,
    ) -> Result<AnimId> {
        self.check_tween("fade_stroke", object, Field::Color(ColorField::Stroke), duration)?;
        let tween = Tween::Color {
            field: ColorField::Stroke,
            start: self.values.box_color(start),
            target: self.values.box_color(target),
        };
        self.push_tween("fade_stroke", AnimKind::ColorFade, object, tween, duration)
    }

    /// Circles only.
    pub fn fade_stroke(
        &mut self,
        object: ObjectId,
        start: Color,
        target: Color,
        duration: f32,
    ) -> AnimId {
        or_fatal(
            "fade_stroke",
            self.try_fade_stroke(object, start, target, duration),
        )
    }

    fn try_scale_float(
        &mut self,
        operation: &'static str,
        field: FloatField,
        object: ObjectId,
        start: f32,
        target: f32,
        duration: f32,
    ) -> Result<AnimId> {
        self.check_tween(operation, object, Field::Float(field), duration)?;
        let tween = Tween::Float {
            field,
            start: self.values.box_scalar(start),
            target: self.values.box_scalar(target),
        };
        self.push_tween(operation, AnimKind::Scale, object, tween, duration)
    }

    pub fn try_scale_radius(
        &mut self,
        object: ObjectId,
        start: f32,
        target: f32,
        duration: f32,
    ) -> Result<AnimId> {
        self.try_scale_float(
            "scale_radius",
            FloatField::Radius,
            object,
            start,
            target,
            duration,
        )
    }

    /// Circles only.
    pub fn scale_radius(&mut self, object: ObjectId, start: f32, target: f32, duration: f32) -> AnimId {
        or_fatal(
            "scale_radius",
            self.try_scale_radius(object, start, target, duration),
        )
    }

    pub fn try_scale_stroke_width(
        &mut self,
        object: ObjectId,
        start: f32,
        target: f32,
        duration: f32,
    ) -> Result<AnimId> {
        self.try_scale_float(
            "scale_stroke_width",
            FloatField::StrokeWidth,
            object,
            start,
            target,
            duration,
        )
    }

    /// Circle stroke width or line thickness.
    pub fn scale_stroke_width(
        &mut self,
        object: ObjectId,
        start: f32,
        target: f32,
        duration: f32,
    ) -> AnimId {
        or_fatal(
            "scale_stroke_width",
            self.try_scale_stroke_width(object, start, target, duration),
        )
    }

    pub fn try_scale_font(
        &mut self,
        object: ObjectId,
        start: f32,
        target: f32,
        duration: f32,
    ) -> Result<AnimId> {
        self.try_scale_float(
            "scale_font",
            FloatField::FontSize,
            object,
            start,
            target,
            duration,
        )
    }

    /// Text only.
    pub fn scale_font(&mut self, object: ObjectId, start: f32, target: f32, duration: f32) -> AnimId {
        or_fatal(
            "scale_font",
            self.try_scale_font(object, start, target, duration),
        )
    }

    pub fn try_scale_size(
        &mut self,
        object: ObjectId,
        start: Vec2,
        target: Vec2,
        duration: f32,
    ) -> Result<AnimId> {
        self.check_tween("scale_size", object, Field::Vector(VectorField::Size), duration)?;
        let tween = Tween::Vector {
            field: VectorField::Size,
            start: self.values.box_vector(start),
            target: self.values.box_vector(target),
        };
        self.push_tween("scale_size", AnimKind::Scale, object, tween, duration)
    }

    /// Lines and rectangles only.
    pub fn scale_size(&mut self, object: ObjectId, start: Vec2, target: Vec2, duration: f32) -> AnimId {
        or_fatal(
            "scale_size",
            self.try_scale_size(object, start, target, duration),
        )
    }

    pub fn try_pause_for(&mut self, duration: f32) -> Result<AnimId> {
        self.animations
            .push("pause_for", AnimKind::Pause, Action::Pause, duration)
    }

    /// Hold the timeline for `duration` seconds.
    pub fn pause_for(&mut self, duration: f32) -> AnimId {
        or_fatal("pause_for", self.try_pause_for(duration))
    }

    pub fn try_add_object(&mut self, object: ObjectId) -> Result<AnimId> {
        self.objects.get(object)?;
        self.animations.push(
            "add_object",
            AnimKind::Immediate,
            Action::Immediate { object },
            0.0,
        )
    }

    /// Show `object` when playback reaches this point, without animating it.
    pub fn add_object(&mut self, object: ObjectId) -> AnimId {
        or_fatal("add_object", self.try_add_object(object))
    }

    pub fn try_create(&mut self, object: ObjectId, duration: f32) -> Result<AnimId> {
        self.check_tween("create", object, Field::Byte(ByteField::Alpha), duration)?;
        let alpha = self.objects.get(object)?.shape().color().a;
        let tween = Tween::Byte {
            field: ByteField::Alpha,
            start: self.values.box_byte(0),
            target: self.values.box_byte(alpha),
        };
        let anim = self.push_tween("create", AnimKind::Create, object, tween, duration)?;
        // Transparent from the start, so the activation frame draws nothing.
        self.objects.edit_with_initial(object, |o| {
            *o.byte_mut("create", ByteField::Alpha)? = 0;
            Ok(())
        })?;
        Ok(anim)
    }

    /// Fade `object` in from transparent to its current alpha. The object's
    /// alpha is zeroed at once and comes back as the record plays.
    pub fn create(&mut self, object: ObjectId, duration: f32) -> AnimId {
        or_fatal("create", self.try_create(object, duration))
    }

    pub fn try_override_easing(&mut self, anim: AnimId, easing: Easing) -> Result<()> {
        self.animations.override_easing(anim, easing)
    }

    pub fn override_easing(&mut self, anim: AnimId, easing: Easing) {
        or_fatal("override_easing", self.try_override_easing(anim, easing))
    }

    // ---- driver ----

    pub fn try_advance(&mut self, dt: f32) -> Result<&Outputs> {
        self.outputs.clear();
        self.scheduler.advance(
            dt,
            &mut self.objects,
            &mut self.animations,
            &self.values,
            &mut self.outputs,
        )?;
        Ok(&self.outputs)
    }

    /// Step playback by `dt` seconds and return the events raised.
    pub fn advance(&mut self, dt: f32) -> &Outputs {
        if let Err(err) = self.try_advance(dt) {
            fatal("advance", err);
        }
        &self.outputs
    }

    /// Rewind to the start and restore every object to its creation state.
    pub fn reset(&mut self) {
        self.scheduler.reset();
        self.animations.rewind_all();
        self.objects.restore_initial();
        self.outputs.clear();
        log::info!(
            "engine: reset ({} objects, {} records)",
            self.objects.len(),
            self.animations.len()
        );
    }

    pub fn state(&self) -> PlaybackState {
        self.scheduler.state()
    }

    pub fn current_time(&self) -> f32 {
        self.scheduler.current_time()
    }

    pub fn total_duration(&self) -> f32 {
        self.animations.total_duration()
    }

    /// Active record index, or `record_count()` once playback completed.
    pub fn current_record_index(&self) -> usize {
        self.scheduler.current_record_index(self.animations.len())
    }

    pub fn record_count(&self) -> usize {
        self.animations.len()
    }

    pub fn is_completed(&self) -> bool {
        self.state() == PlaybackState::Completed
    }

    /// Clock over total duration, in [0, 1].
    pub fn progress(&self) -> f32 {
        let total = self.total_duration();
        if total > 0.0 {
            (self.current_time() / total).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn pause(&mut self) {
        self.scheduler.set_paused(true);
    }

    pub fn resume(&mut self) {
        self.scheduler.set_paused(false);
    }

    pub fn toggle_pause(&mut self) {
        let paused = self.scheduler.is_paused();
        self.scheduler.set_paused(!paused);
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Apply one driver command between frames.
    pub fn apply(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::Pause => self.pause(),
            PlaybackCommand::Resume => self.resume(),
            PlaybackCommand::TogglePause => self.toggle_pause(),
            PlaybackCommand::Reset => self.reset(),
            PlaybackCommand::SetBackground { color } => self.set_background(color),
        }
    }

    // ---- render / diagnostics ----

    /// Hand every renderable object to `walker`, in insertion order.
    pub fn render<W: RenderWalker + ?Sized>(&self, walker: &mut W) {
        walker.clear(self.background);
        for object in self.objects.renderables() {
            walker.draw(object);
        }
    }

    pub fn try_log_record(&self, anim: AnimId) -> Result<()> {
        let dump = self.animations.get(anim)?.dump(&self.values)?;
        log::debug!("{dump}");
        Ok(())
    }

    /// Write a multi-line dump of one record at `debug` level.
    pub fn log_record(&self, anim: AnimId) {
        or_fatal("log_record", self.try_log_record(anim))
    }

    /// Current value of an object field.
    pub fn try_field(&self, object: ObjectId, field: Field) -> Result<Value> {
        self.objects.get(object)?.read(field)
    }

    /// Drop every object, record and value box; playback returns to `Idle`.
    pub fn free_all(&mut self) {
        self.animations.free_all();
        self.objects.free_all();
        self.values.free_all();
        self.scheduler.reset();
        self.outputs.clear();
        log::info!("engine: freed all arenas");
    }
}
