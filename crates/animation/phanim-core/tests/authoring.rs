use phanim_core::{
    AnimId, AnimKind, Color, Config, Easing, Engine, EngineError, Object, ObjectId, ObjectKind,
    PlaybackCommand, RenderWalker, Shape, Vec2,
};

#[derive(Default)]
struct Recorder {
    background: Option<Color>,
    drawn: Vec<(ObjectId, ObjectKind)>,
}

impl RenderWalker for Recorder {
    fn clear(&mut self, background: Color) {
        self.background = Some(background);
    }

    fn draw(&mut self, object: &Object) {
        self.drawn.push((object.id(), object.kind()));
    }
}

#[test]
fn render_walks_visible_objects_in_insertion_order() {
    let mut engine = Engine::default();
    let a = engine.circle(Vec2::ZERO, 1.0, Color::WHITE);
    let b = engine.rect(Vec2::ZERO, Vec2::new(1.0, 1.0), Color::WHITE);
    let c = engine.text("t", Vec2::ZERO);
    engine.add_object(c);
    engine.add_object(a);
    engine.fade_alpha(b, 0, 255, 1.0);

    let mut rec = Recorder::default();
    engine.render(&mut rec);
    assert!(rec.drawn.is_empty());
    assert_eq!(rec.background, Some(Color::BLACK));

    // Immediate records activate and finish on the same frame.
    engine.advance(0.0);
    engine.advance(0.0);
    assert_eq!(engine.current_record_index(), 2);

    let mut rec = Recorder::default();
    engine.render(&mut rec);
    assert_eq!(rec.drawn, vec![(a, ObjectKind::Circle), (c, ObjectKind::Text)]);

    engine.advance(0.0);
    let mut ids = Vec::new();
    engine.render(&mut |o: &Object| ids.push(o.id()));
    assert_eq!(ids, vec![a, b, c]);
}

#[test]
fn ids_are_dense_and_objects_start_hidden() {
    let mut engine = Engine::default();
    let ids: Vec<ObjectId> = (0..25)
        .map(|i| engine.circle(Vec2::new(i as f32, 0.0), 1.0, Color::WHITE))
        .collect();
    assert_eq!(ids, (0..25).map(ObjectId).collect::<Vec<_>>());
    assert_eq!(engine.objects().len(), 25);
    assert_eq!(engine.objects().capacity(), 40);
    assert!(engine.objects().iter().all(|o| !o.should_render()));
}

#[test]
fn unknown_ids_are_rejected() {
    let mut engine = Engine::default();
    let c = engine.circle(Vec2::ZERO, 1.0, Color::WHITE);
    let ghost = ObjectId(7);
    assert_eq!(
        engine.try_transform_position(ghost, Vec2::ZERO, Vec2::ZERO, 1.0),
        Err(EngineError::ObjectOutOfBounds { id: 7, count: 1 })
    );
    assert!(engine.try_add_object(ghost).is_err());
    assert!(engine.try_create(ghost, 1.0).is_err());
    assert!(engine.try_object(ghost).is_err());

    engine.fade_alpha(c, 0, 255, 1.0);
    assert_eq!(
        engine.try_override_easing(AnimId(1), Easing::Linear),
        Err(EngineError::AnimationOutOfBounds { id: 1, count: 1 })
    );
    assert!(engine.try_log_record(AnimId(3)).is_err());
    engine.log_record(AnimId(0));
}

#[test]
#[should_panic(expected = "override_easing")]
fn override_easing_out_of_range_is_fatal() {
    let mut engine = Engine::default();
    engine.override_easing(AnimId(0), Easing::Sine);
}

#[test]
fn durations_are_validated_per_operation() {
    let mut engine = Engine::default();
    let c = engine.circle(Vec2::ZERO, 1.0, Color::WHITE);
    assert_eq!(
        engine.try_scale_radius(c, 1.0, 2.0, 0.0),
        Err(EngineError::InvalidDuration {
            operation: "scale_radius",
            duration: 0.0
        })
    );
    assert!(engine.try_fade_color(c, Color::BLACK, Color::WHITE, f32::NAN).is_err());
    assert!(engine.try_pause_for(-0.1).is_err());
    assert!(engine.try_pause_for(0.0).is_ok());
    assert_eq!(engine.record_count(), 1);
}

#[test]
fn kind_specific_fields_are_checked() {
    let mut engine = Engine::default();
    let circle = engine.circle(Vec2::ZERO, 1.0, Color::WHITE);
    let text = engine.text("x", Vec2::ZERO);
    let rect = engine.rect(Vec2::ZERO, Vec2::new(1.0, 1.0), Color::WHITE);

    let err = engine
        .try_scale_size(circle, Vec2::ZERO, Vec2::new(1.0, 1.0), 1.0)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::FieldNotOnKind {
            operation: "scale_size",
            kind: ObjectKind::Circle,
            ..
        }
    ));
    assert!(engine.try_scale_font(circle, 1.0, 2.0, 1.0).is_err());
    assert!(engine.try_fade_stroke(rect, Color::BLANK, Color::WHITE, 1.0).is_err());
    assert!(engine.try_scale_stroke_width(text, 1.0, 2.0, 1.0).is_err());

    assert!(engine.try_scale_font(text, 25.0, 40.0, 1.0).is_ok());
    assert!(engine.try_scale_size(rect, Vec2::ZERO, Vec2::new(2.0, 2.0), 1.0).is_ok());
    assert!(engine.try_fade_color(text, Color::BLACK, Color::WHITE, 1.0).is_ok());
    assert_eq!(engine.record_count(), 3);
}

#[test]
fn rejected_tweens_box_no_endpoints() {
    let mut engine = Engine::default();
    let circle = engine.circle(Vec2::ZERO, 1.0, Color::WHITE);
    let rect = engine.rect(Vec2::ZERO, Vec2::new(1.0, 1.0), Color::WHITE);
    engine.fade_alpha(circle, 0, 255, 1.0);
    let boxed = engine.values().len();

    assert!(engine.try_scale_radius(rect, 1.0, 2.0, 1.0).is_err());
    assert!(engine.try_scale_size(circle, Vec2::ZERO, Vec2::ZERO, 1.0).is_err());
    assert!(engine.try_fade_color(circle, Color::BLACK, Color::WHITE, -1.0).is_err());
    assert!(engine.try_transform_position(ObjectId(9), Vec2::ZERO, Vec2::ZERO, 1.0).is_err());
    assert!(engine.try_create(rect, 0.0).is_err());
    assert_eq!(engine.values().len(), boxed);
    assert_eq!(engine.record_count(), 1);
    assert_eq!(engine.object(rect).shape().color().a, 255);

    engine.scale_size(rect, Vec2::ZERO, Vec2::new(2.0, 2.0), 1.0);
    assert_eq!(engine.values().len(), boxed + 2);
}

#[test]
fn config_drives_defaults() {
    let cfg = Config::from_json(
        r#"{
            "initial_capacity": 2,
            "default_easing": "linear",
            "line_thickness": 1.5,
            "font_size": 12.0,
            "text_color": { "r": 1, "g": 2, "b": 3, "a": 4 },
            "background": { "r": 9, "g": 9, "b": 9, "a": 255 }
        }"#,
    )
    .unwrap();
    let mut engine = Engine::new(cfg);
    let line = engine.line(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0), Color::WHITE);
    let text = engine.text("cfg", Vec2::ZERO);
    let rect = engine.rect(Vec2::ZERO, Vec2::new(1.0, 1.0), Color::WHITE);
    assert_eq!(engine.objects().capacity(), 4);
    assert_eq!(engine.background(), Color::rgba(9, 9, 9, 255));

    match engine.object(line).shape() {
        Shape::Line(l) => {
            assert_eq!(l.thickness, 1.5);
            assert_eq!(l.size, Vec2::new(3.0, 4.0));
        }
        other => panic!("unexpected shape {other:?}"),
    }
    match engine.object(text).shape() {
        Shape::Text(t) => {
            assert_eq!(t.font_size, 12.0);
            assert_eq!(t.color, Color::rgba(1, 2, 3, 4));
        }
        other => panic!("unexpected shape {other:?}"),
    }

    // Linear easing: halfway in time is halfway in space.
    engine.transform_position(rect, Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0);
    assert_eq!(engine.animations().get(AnimId(0)).unwrap().easing(), Easing::Linear);
    engine.advance(0.0);
    engine.advance(0.5);
    assert_eq!(engine.object(rect).shape().position(), Vec2::new(5.0, 0.0));
}

#[test]
fn background_follows_commands() {
    let mut engine = Engine::default();
    engine.apply(PlaybackCommand::SetBackground {
        color: Color::WHITE,
    });
    assert_eq!(engine.background(), Color::WHITE);
    engine.set_background(Color::BLANK);
    assert_eq!(engine.background(), Color::BLANK);
    engine.apply(PlaybackCommand::Pause);
    assert!(engine.is_paused());
    engine.apply(PlaybackCommand::Resume);
    assert!(!engine.is_paused());
}

#[test]
fn record_kinds_follow_operations() {
    let mut engine = Engine::default();
    let c = engine.circle(Vec2::ZERO, 1.0, Color::WHITE);
    engine.create(c, 1.0);
    engine.scale_radius(c, 1.0, 2.0, 1.0);
    engine.fade_color(c, Color::WHITE, Color::BLACK, 1.0);
    engine.pause_for(1.0);
    engine.add_object(c);
    let kinds: Vec<AnimKind> = engine.animations().iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            AnimKind::Create,
            AnimKind::Scale,
            AnimKind::ColorFade,
            AnimKind::Pause,
            AnimKind::Immediate
        ]
    );
    assert_eq!(engine.total_duration(), 4.0);
}

#[test]
fn free_all_tears_down_the_scene() {
    let mut engine = Engine::default();
    let c = engine.circle(Vec2::ZERO, 1.0, Color::WHITE);
    engine.fade_alpha(c, 0, 255, 1.0);
    engine.advance(0.0);
    engine.free_all();
    assert!(engine.objects().is_empty());
    assert_eq!(engine.record_count(), 0);
    assert_eq!(engine.state(), phanim_core::PlaybackState::Idle);

    // A fresh scene after teardown reuses id 0.
    let again = engine.rect(Vec2::ZERO, Vec2::new(1.0, 1.0), Color::WHITE);
    assert_eq!(again, ObjectId(0));
    engine.fade_alpha(again, 0, 255, 1.0);
    engine.advance(0.0);
    engine.advance(1.0);
    assert!(engine.is_completed());
}
