use crate::events::PointerEventKind;
use crate::node::InteractiveNode;
use crate::pointer::PointerState;
use crate::tests::mock::{new_log, EventLog, MockNode};
use stagehand_graphics::{Point, Rect};
use std::cell::Cell;

struct Rig {
    log: EventLog,
    root: MockNode,
    a: MockNode,
    b: MockNode,
    hit_calls: Cell<u32>,
}

impl Rig {
    /// A at x 0..10, B at x 20..30, both depth 1, root everywhere else.
    fn new() -> Self {
        let log = new_log();
        let root = MockNode::root(&log);
        let a = MockNode::new(1, 1.0, Rect::new(0.0, 0.0, 10.0, 10.0), &log);
        let b = MockNode::new(2, 1.0, Rect::new(20.0, 0.0, 10.0, 10.0), &log);
        Self {
            log,
            root,
            a,
            b,
            hit_calls: Cell::new(0),
        }
    }

    fn advance(
        &self,
        state: &mut PointerState<MockNode>,
        x: f32,
        pressed: bool,
    ) -> Vec<(PointerEventKind, u64)> {
        let position = Point::new(x, 5.0);
        let events = state.advance_mouse(position, pressed, &self.root, |point| {
            self.hit_calls.set(self.hit_calls.get() + 1);
            [&self.a, &self.b]
                .into_iter()
                .find(|node| node.hit_bounds(point))
                .cloned()
        });
        events
            .iter()
            .map(|event| (event.kind, event.target.node_id()))
            .collect()
    }
}

#[test]
fn stationary_pointer_costs_nothing() {
    let rig = Rig::new();
    let mut state = PointerState::new();

    assert!(rig.advance(&mut state, 50.0, false).is_empty());
    let seeded = rig.hit_calls.get();
    assert_eq!(seeded, 1, "first frame seeds the hover target");

    assert!(rig.advance(&mut state, 50.0, false).is_empty());
    assert!(rig.advance(&mut state, 50.0, false).is_empty());
    assert_eq!(rig.hit_calls.get(), seeded, "no hit-test recomputation");
}

#[test]
fn entering_a_node_emits_out_then_over_and_no_move() {
    let rig = Rig::new();
    let mut state = PointerState::new();

    rig.advance(&mut state, 50.0, false);
    let events = rig.advance(&mut state, 5.0, false);

    assert_eq!(
        events,
        vec![
            (PointerEventKind::MouseOut, rig.root.node_id()),
            (PointerEventKind::MouseOver, rig.a.node_id()),
        ]
    );
}

#[test]
fn moving_within_a_node_emits_move() {
    let rig = Rig::new();
    let mut state = PointerState::new();

    rig.advance(&mut state, 4.0, false);
    let events = rig.advance(&mut state, 6.0, false);
    assert_eq!(events, vec![(PointerEventKind::MouseMove, rig.a.node_id())]);
}

#[test]
fn press_and_release_on_same_node() {
    let rig = Rig::new();
    let mut state = PointerState::new();

    rig.advance(&mut state, 5.0, false);
    assert_eq!(
        rig.advance(&mut state, 5.0, true),
        vec![(PointerEventKind::MouseDown, rig.a.node_id())]
    );
    assert_eq!(
        rig.advance(&mut state, 5.0, false),
        vec![(PointerEventKind::MouseUp, rig.a.node_id())]
    );
    assert!(state.press_target().is_none());
}

#[test]
fn release_on_other_node_emits_up_then_release_outside() {
    let rig = Rig::new();
    let mut state = PointerState::new();

    rig.advance(&mut state, 5.0, false);
    rig.advance(&mut state, 5.0, true);
    let events = rig.advance(&mut state, 25.0, false);

    assert_eq!(
        events,
        vec![
            (PointerEventKind::MouseOut, rig.a.node_id()),
            (PointerEventKind::MouseOver, rig.b.node_id()),
            (PointerEventKind::MouseUp, rig.b.node_id()),
            (PointerEventKind::ReleaseOutside, rig.a.node_id()),
        ]
    );
}

#[test]
fn press_during_target_change_addresses_the_new_target() {
    let rig = Rig::new();
    let mut state = PointerState::new();

    rig.advance(&mut state, 5.0, false);
    let events = rig.advance(&mut state, 25.0, true);

    assert_eq!(
        events,
        vec![
            (PointerEventKind::MouseOut, rig.a.node_id()),
            (PointerEventKind::MouseOver, rig.b.node_id()),
            (PointerEventKind::MouseDown, rig.b.node_id()),
        ]
    );
    assert_eq!(state.press_target().unwrap().node_id(), rig.b.node_id());
}

#[test]
fn release_outside_carries_press_target_local_coordinates() {
    let rig = Rig::new();
    let mut state = PointerState::new();

    rig.advance(&mut state, 5.0, false);
    rig.advance(&mut state, 5.0, true);

    let position = Point::new(25.0, 5.0);
    let events = state.advance_mouse(position, false, &rig.root, |point| {
        [&rig.a, &rig.b]
            .into_iter()
            .find(|node| node.hit_bounds(point))
            .cloned()
    });

    let outside = events
        .iter()
        .find(|event| event.kind == PointerEventKind::ReleaseOutside)
        .unwrap();
    // A's origin is (0, 0), so its local frame is the stage frame here; B's
    // origin is (20, 0). The event addresses A, so A's frame governs.
    assert_eq!(outside.local_position, Point::new(25.0, 5.0));
    let up = events
        .iter()
        .find(|event| event.kind == PointerEventKind::MouseUp)
        .unwrap();
    assert_eq!(up.local_position, Point::new(5.0, 5.0));
}

#[test]
fn state_machine_derives_but_never_delivers() {
    let rig = Rig::new();
    let mut state = PointerState::new();

    rig.advance(&mut state, 5.0, false);
    rig.advance(&mut state, 25.0, true);
    assert!(rig.log.borrow().is_empty(), "delivery is the dispatcher's job");
}

#[test]
fn reseed_produces_no_edges() {
    let rig = Rig::new();
    let mut state = PointerState::new();

    state.reseed(Point::new(5.0, 5.0), true, rig.a.clone());
    assert!(rig.advance(&mut state, 5.0, true).is_empty());

    // The press that was in flight before the reseed is forgotten.
    let events = rig.advance(&mut state, 5.0, false);
    assert_eq!(events, vec![(PointerEventKind::MouseUp, rig.a.node_id())]);
}

#[test]
fn released_press_target_clears_even_when_release_is_outside() {
    let rig = Rig::new();
    let mut state = PointerState::new();

    rig.advance(&mut state, 5.0, false);
    rig.advance(&mut state, 5.0, true);
    rig.advance(&mut state, 25.0, false);
    assert!(state.press_target().is_none());
    assert!(!state.pressed());
}
