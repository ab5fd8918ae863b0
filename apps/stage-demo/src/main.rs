use stagehand_graphics::{Point, Size};
use stagehand_input::PointerEventKind;
use stagehand_scene::{HitArea, Sprite, Stage};
use stagehand_testing::{EventRecorder, StageRobot};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Stagehand Demo ===");
    println!("Headless run: a scripted mouse path and a touch sequence over");
    println!("a background, two overlapping buttons, and a draggable chip.");
    println!();

    let stage = Stage::new(Size::new(200.0, 200.0));

    // Background catches everything the buttons don't.
    let background = Sprite::with_size("background", Size::new(200.0, 200.0));
    background.set_depth(100.0);
    background.set_mouse_enabled(true);
    stage.root().add_child(&background);

    // Two overlapping buttons; the round one is in front.
    let button = Sprite::with_size("button", Size::new(40.0, 40.0));
    button.set_position(-20.0, 0.0);
    button.set_depth(2.0);
    button.set_mouse_enabled(true);
    stage.root().add_child(&button);

    let round_button = Sprite::with_size("round-button", Size::new(40.0, 40.0));
    round_button.set_position(0.0, 0.0);
    round_button.set_depth(1.0);
    round_button.set_mouse_enabled(true);
    round_button.set_hit_area(Some(HitArea::Circle {
        center: Point::ZERO,
        radius: 20.0,
    }));
    stage.root().add_child(&round_button);

    // A chip that drags while pressed.
    let chip = Sprite::with_size("chip", Size::new(16.0, 16.0));
    chip.set_position(60.0, -60.0);
    chip.set_depth(0.5);
    chip.set_mouse_enabled(true);
    stage.root().add_child(&chip);

    let grab = chip.clone();
    chip.on(PointerEventKind::MouseDown, move |_| {
        if grab.start_drag(false).is_ok() {
            log::info!("chip grabbed");
        }
    });
    let drop_chip = chip.clone();
    chip.on(PointerEventKind::MouseUp, move |_| {
        drop_chip.stop_drag();
        log::info!("chip dropped at {:?}", drop_chip.position());
    });
    let lost_chip = chip.clone();
    chip.on(PointerEventKind::ReleaseOutside, move |_| {
        lost_chip.stop_drag();
        log::info!("chip released outside at {:?}", lost_chip.position());
    });

    for sprite in [&button, &round_button] {
        let name = sprite.name();
        sprite.on(PointerEventKind::MouseOver, {
            let name = name.clone();
            move |_| log::info!("{name}: over")
        });
        sprite.on(PointerEventKind::MouseDown, {
            let name = name.clone();
            move |event| log::info!("{name}: down at local {:?}", event.local_position)
        });
        sprite.on(PointerEventKind::MouseUp, {
            let name = name.clone();
            move |_| log::info!("{name}: up")
        });
    }

    let recorder = EventRecorder::new();
    recorder.attach(&background);
    recorder.attach(&button);
    recorder.attach(&round_button);
    recorder.attach(&chip);

    let mut robot = StageRobot::new(stage);

    // Mouse: wander in, click the round button's edge (where the square
    // button sits underneath), then drag the chip around.
    robot.move_to(-90.0, 90.0).step();
    robot.move_to(-30.0, 5.0).step();
    robot.click(-18.0, 15.0);
    robot.click(-5.0, 0.0);
    robot.move_to(60.0, -60.0).step();
    robot.press().step();
    robot.move_to(0.0, -40.0).step();
    robot.move_to(-30.0, 20.0).step();
    robot.release().step();

    // Touch: tap the square button, then slide one finger across the scene
    // while a second taps the chip.
    robot.touch_begin(1, -30.0, 5.0).step();
    robot.touch_move(1, -20.0, 5.0).touch_begin(2, -30.0, 20.0).step();
    robot.touch_end(1, -10.0, 5.0).touch_end(2, -30.0, 20.0).step();

    println!("recorded {} deliveries:", recorder.len());
    for row in recorder.rows() {
        println!(
            "  {:?} -> {} (target {}, local {:?}, stage {:?})",
            row.kind, row.current_target, row.target, row.local, row.stage
        );
    }
}
