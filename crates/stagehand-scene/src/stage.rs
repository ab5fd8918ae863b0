//! The stage: owns the root sprite, the registry and the one input driver.

use crate::sprite::Sprite;
use stagehand_graphics::{Point, Size};
use stagehand_input::{
    InputDriver, InteractiveRegistry, NodeId, RawMouse, RawTouch, SharedRegistry,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub(crate) struct StageInner {
    root: Sprite,
    registry: SharedRegistry<Sprite>,
    driver: RefCell<InputDriver<Sprite>>,
    pub(crate) mouse_position: Cell<Point>,
    viewport: Cell<Size>,
}

/// The owning context of one running scene. Constructing a stage constructs
/// its input driver; the registry latch makes a second driver over the same
/// node set impossible, so event streams can never duplicate.
///
/// The root sprite is the mouse's implicit catch-all target. It is not in
/// the registry; it wins only when no registered sprite is under the
/// pointer.
#[derive(Clone)]
pub struct Stage {
    inner: Rc<StageInner>,
}

impl Stage {
    pub fn new(viewport: Size) -> Self {
        let registry = InteractiveRegistry::new_shared();
        let root = Sprite::with_size("root", viewport);
        let driver = InputDriver::new(registry.clone(), root.clone())
            .expect("freshly created registry cannot have a driver bound");

        let inner = Rc::new(StageInner {
            root: root.clone(),
            registry: registry.clone(),
            driver: RefCell::new(driver),
            mouse_position: Cell::new(Point::ZERO),
            viewport: Cell::new(viewport),
        });
        root.attach_subtree(&Rc::downgrade(&inner), &registry);
        Self { inner }
    }

    pub fn root(&self) -> Sprite {
        self.inner.root.clone()
    }

    pub fn viewport(&self) -> Size {
        self.inner.viewport.get()
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.inner.viewport.set(viewport);
        self.inner.root.set_size(viewport);
    }

    /// Stage-space mouse position as of the last frame.
    pub fn mouse_position(&self) -> Point {
        self.inner.mouse_position.get()
    }

    /// Advance one frame: dispatch all pointer events (mouse first, then
    /// touches in first-observed order), then move any dragging sprites to
    /// the new mouse position.
    pub fn advance_frame(&self, mouse: RawMouse, touches: &[RawTouch]) {
        self.inner.mouse_position.set(mouse.position);
        self.inner.driver.borrow_mut().advance_frame(mouse, touches);

        // Snapshot, then move: a drag listener may restructure the tree.
        let mut dragging = Vec::new();
        self.inner.root.collect_dragging(&mut dragging);
        for sprite in dragging {
            sprite.apply_drag(mouse.position);
        }
    }

    pub fn register_interactive(&self, sprite: Sprite) {
        self.inner.registry.borrow_mut().register(sprite);
    }

    pub fn unregister_interactive(&self, id: NodeId) {
        self.inner.registry.borrow_mut().unregister(id);
    }

    /// Suspend input processing and forget in-flight presses.
    pub fn disable(&self) {
        self.inner.driver.borrow_mut().disable();
    }

    /// Resume input processing, re-seeded from `mouse` so the next frame
    /// emits no spurious edges.
    pub fn enable(&self, mouse: RawMouse) {
        self.inner.mouse_position.set(mouse.position);
        self.inner.driver.borrow_mut().enable(mouse);
    }

    pub fn input_enabled(&self) -> bool {
        self.inner.driver.borrow().is_enabled()
    }

    pub fn registry(&self) -> SharedRegistry<Sprite> {
        self.inner.registry.clone()
    }

    /// Diagnostic: number of registered interactive sprites.
    pub fn interactive_count(&self) -> usize {
        self.inner.registry.borrow().len()
    }
}
