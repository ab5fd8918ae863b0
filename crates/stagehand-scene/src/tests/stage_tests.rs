use stagehand_scene::Sprite;
use stagehand_scene::Stage;
use stagehand_graphics::{Point, Size};
use stagehand_input::{
    InputDriver, InputError, InteractiveNode, PointerEventKind, RawMouse,
};
use stagehand_testing::{EventRecorder, StageRobot};

fn stage() -> Stage {
    Stage::new(Size::new(200.0, 200.0))
}

fn clickable(name: &str, size: f32, x: f32, y: f32, depth: f32) -> Sprite {
    let sprite = Sprite::with_size(name, Size::new(size, size));
    sprite.set_position(x, y);
    sprite.set_depth(depth);
    sprite.set_mouse_enabled(true);
    sprite
}

/// Stage with A centered at (0, 0) and B at (50, 0), both 10x10, recorder on
/// both plus the root.
fn rig() -> (StageRobot, EventRecorder, Sprite, Sprite) {
    let stage = stage();
    let a = clickable("a", 10.0, 0.0, 0.0, 1.0);
    let b = clickable("b", 10.0, 50.0, 0.0, 1.0);
    stage.root().add_child(&a);
    stage.root().add_child(&b);

    let recorder = EventRecorder::new();
    recorder.attach(&stage.root());
    recorder.attach(&a);
    recorder.attach(&b);

    let mut robot = StageRobot::new(stage);
    // Settle on empty space so the rest of the script starts from a known
    // hover target.
    robot.move_to(-90.0, -90.0).step();
    recorder.clear();
    (robot, recorder, a, b)
}

fn kinds(recorder: &EventRecorder) -> Vec<(PointerEventKind, String)> {
    recorder.kinds()
}

#[test]
fn hover_press_release_pipeline() {
    let (mut robot, recorder, ..) = rig();

    robot.move_to(0.0, 0.0).step();
    robot.press().step();
    robot.release().step();

    assert_eq!(
        kinds(&recorder),
        vec![
            (PointerEventKind::MouseOut, "root".to_string()),
            (PointerEventKind::MouseOver, "a".to_string()),
            (PointerEventKind::MouseDown, "a".to_string()),
            (PointerEventKind::MouseDown, "root".to_string()),
            (PointerEventKind::MouseUp, "a".to_string()),
            (PointerEventKind::MouseUp, "root".to_string()),
        ]
    );

    let rows = recorder.rows();
    assert!(rows.iter().all(|row| row.target == "a" || row.kind == PointerEventKind::MouseOut));
}

#[test]
fn idle_frames_emit_nothing() {
    let (mut robot, recorder, ..) = rig();
    robot.idle_frames(5);
    assert!(recorder.is_empty());
}

#[test]
fn release_over_other_sprite_emits_release_outside_at_press_target() {
    let (mut robot, recorder, ..) = rig();

    robot.move_to(0.0, 0.0).step();
    robot.press().step();
    recorder.clear();
    robot.move_to(50.0, 0.0).release().step();

    assert_eq!(
        kinds(&recorder),
        vec![
            (PointerEventKind::MouseOut, "a".to_string()),
            (PointerEventKind::MouseOver, "b".to_string()),
            (PointerEventKind::MouseUp, "b".to_string()),
            (PointerEventKind::MouseUp, "root".to_string()),
            (PointerEventKind::ReleaseOutside, "a".to_string()),
            (PointerEventKind::ReleaseOutside, "root".to_string()),
        ]
    );
}

#[test]
fn touch_sequence_bubbles_to_root() {
    let (mut robot, recorder, ..) = rig();

    robot.touch_begin(1, 0.0, 0.0).step();
    robot.touch_move(1, 1.0, 0.0).step();
    robot.touch_end(1, 1.0, 0.0).step();

    assert_eq!(
        kinds(&recorder),
        vec![
            (PointerEventKind::TouchDown, "a".to_string()),
            (PointerEventKind::TouchDown, "root".to_string()),
            (PointerEventKind::TouchMove, "a".to_string()),
            (PointerEventKind::TouchMove, "root".to_string()),
            (PointerEventKind::TouchUp, "a".to_string()),
            (PointerEventKind::TouchUp, "root".to_string()),
        ]
    );
}

#[test]
fn touch_over_empty_space_is_silent() {
    let (mut robot, recorder, ..) = rig();
    robot.touch_begin(1, -90.0, -90.0).step();
    robot.touch_move(1, -89.0, -90.0).step();
    assert!(recorder.is_empty());
}

#[test]
fn mouse_events_precede_touch_events() {
    let (mut robot, recorder, ..) = rig();

    robot.move_to(0.0, 0.0).touch_begin(9, 50.0, 0.0).step();

    assert_eq!(
        kinds(&recorder),
        vec![
            (PointerEventKind::MouseOut, "root".to_string()),
            (PointerEventKind::MouseOver, "a".to_string()),
            (PointerEventKind::TouchDown, "b".to_string()),
            (PointerEventKind::TouchDown, "root".to_string()),
        ]
    );
}

#[test]
fn depth_change_flips_hit_priority() {
    let stage = stage();
    let back = clickable("back", 20.0, 0.0, 0.0, 5.0);
    let front = clickable("front", 20.0, 0.0, 0.0, 2.0);
    stage.root().add_child(&back);
    stage.root().add_child(&front);

    let recorder = EventRecorder::new();
    recorder.attach(&back);
    recorder.attach(&front);

    let mut robot = StageRobot::new(stage);
    robot.move_to(-90.0, -90.0).step();
    robot.move_to(0.0, 0.0).step();
    assert_eq!(
        kinds(&recorder),
        vec![(PointerEventKind::MouseOver, "front".to_string())]
    );
    recorder.clear();

    back.set_depth(1.0);
    robot.move_to(1.0, 0.0).step();
    assert_eq!(
        kinds(&recorder),
        vec![
            (PointerEventKind::MouseOut, "front".to_string()),
            (PointerEventKind::MouseOver, "back".to_string()),
        ]
    );
}

#[test]
fn non_clickable_sprite_falls_through_to_root() {
    let (mut robot, recorder, a, _) = rig();
    a.set_clickable(false);

    // The hover target stays the root: no enter/exit pair, just a move on
    // the fallback target.
    robot.move_to(0.0, 0.0).step();
    assert_eq!(
        kinds(&recorder),
        vec![(PointerEventKind::MouseMove, "root".to_string())]
    );
}

#[test]
fn listener_removing_its_own_sprite_mid_bubble() {
    let (mut robot, recorder, a, _) = rig();
    let stage_root = robot.stage().root();
    let doomed = a.clone();
    a.on(PointerEventKind::MouseDown, move |_| {
        stage_root.remove_child(&doomed);
    });

    robot.move_to(0.0, 0.0).step();
    recorder.clear();
    robot.press().step();

    // Delivered to A once, and the bubble still reaches the root.
    assert_eq!(
        kinds(&recorder),
        vec![
            (PointerEventKind::MouseDown, "a".to_string()),
            (PointerEventKind::MouseDown, "root".to_string()),
        ]
    );
    assert!(!a.attached());
    assert_eq!(robot.stage().interactive_count(), 1);
}

#[test]
fn second_driver_on_stage_registry_fails_fast() {
    let stage = stage();
    let second = InputDriver::new(stage.registry(), stage.root());
    assert!(matches!(second, Err(InputError::DriverAlreadyAttached)));
}

#[test]
fn disable_and_enable_resume_without_spurious_edges() {
    let (mut robot, recorder, ..) = rig();
    robot.move_to(0.0, 0.0).step();
    robot.press().step();
    recorder.clear();

    let stage = robot.stage().clone();
    stage.disable();
    robot.move_to(50.0, 0.0).step();
    assert!(recorder.is_empty());

    stage.enable(RawMouse {
        position: Point::new(50.0, 0.0),
        pressed: true,
    });
    robot.move_to(50.0, 0.0).release().step();
    // Press target was forgotten on disable: no ReleaseOutside at A.
    assert_eq!(
        kinds(&recorder),
        vec![
            (PointerEventKind::MouseUp, "b".to_string()),
            (PointerEventKind::MouseUp, "root".to_string()),
        ]
    );
}

#[test]
fn registration_passthroughs_reach_the_registry() {
    let stage = stage();
    let sprite = clickable("s", 10.0, 0.0, 0.0, 1.0);

    stage.register_interactive(sprite.clone());
    assert_eq!(stage.interactive_count(), 1);
    stage.register_interactive(sprite.clone());
    assert_eq!(stage.interactive_count(), 1, "duplicate register is a no-op");
    stage.unregister_interactive(sprite.node_id());
    assert_eq!(stage.interactive_count(), 0);
    stage.unregister_interactive(sprite.node_id());
    assert_eq!(stage.interactive_count(), 0);
}
