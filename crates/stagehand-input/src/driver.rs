//! The once-per-frame driver: raw samples in, dispatched events out.

use crate::dispatch::dispatch;
use crate::hit::hit_test;
use crate::node::{InteractiveNode, NodeId};
use crate::pointer::{advance_touch, EventBatch, PointerState, TouchRecord};
use crate::registry::SharedRegistry;
use indexmap::IndexMap;
use smallvec::SmallVec;
use stagehand_graphics::Point;
use std::fmt;

/// Raw mouse sample for one frame, already in stage space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawMouse {
    pub position: Point,
    pub pressed: bool,
}

/// Host-assigned identifier for one touch contact, stable for its lifetime.
pub type TouchId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Cancelled,
}

/// Raw touch sample for one frame, already in stage space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawTouch {
    pub id: TouchId,
    pub phase: TouchPhase,
    pub position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputError {
    /// A driver is already bound to this registry. Two drivers over one node
    /// set would produce duplicate, conflicting event streams, so the second
    /// construction fails fast.
    DriverAlreadyAttached,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::DriverAlreadyAttached => {
                write!(f, "an input driver is already attached to this registry")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Owns the mouse pointer state, the live-touch table and the root fallback
/// node; advances everything one frame at a time.
///
/// Explicitly constructed and explicitly owned — there is no global accessor.
/// The registry latch guarantees at most one driver per registry; the owning
/// context (typically the stage) holds it.
pub struct InputDriver<N: InteractiveNode> {
    registry: SharedRegistry<N>,
    root: N,
    mouse: PointerState<N>,
    /// Insertion order is first-observed order, which is the processing order.
    touches: IndexMap<TouchId, TouchRecord<N>>,
    enabled: bool,
}

impl<N: InteractiveNode> InputDriver<N> {
    /// Bind a driver to `registry`, with `root` as the mouse's implicit
    /// catch-all target. Fails if the registry already has a driver.
    pub fn new(registry: SharedRegistry<N>, root: N) -> Result<Self, InputError> {
        registry.borrow_mut().bind_driver()?;
        Ok(Self {
            registry,
            root,
            mouse: PointerState::new(),
            touches: IndexMap::new(),
            enabled: true,
        })
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn registry(&self) -> &SharedRegistry<N> {
        &self.registry
    }

    pub fn register_interactive(&self, node: N) {
        self.registry.borrow_mut().register(node);
    }

    pub fn unregister_interactive(&self, id: NodeId) {
        self.registry.borrow_mut().unregister(id);
    }

    /// Suspend frame processing and forget any in-flight press, so a release
    /// sampled after a later enable never fires at a stale target.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.mouse.clear_press();
        for record in self.touches.values_mut() {
            record.state.clear_press();
        }
    }

    /// Resume processing, re-seeding the mouse from `sample` without
    /// emitting events: the first frame after an enable produces no edges.
    pub fn enable(&mut self, sample: RawMouse) {
        let candidate = self.candidate_at(sample.position);
        self.mouse
            .reseed(sample.position, sample.pressed, candidate);
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Diagnostic only.
    pub fn live_touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Advance one frame. The mouse is fully processed — every derived event
    /// dispatched — before any touch; touches run in first-observed order.
    ///
    /// Per pointer, the work is split in two phases: events are derived with
    /// the registry borrowed (the hit-test scan completes before any listener
    /// runs), then dispatched with no outstanding borrows, so listeners may
    /// freely register and unregister nodes mid-dispatch.
    pub fn advance_frame(&mut self, mouse: RawMouse, touches: &[RawTouch]) {
        if !self.enabled {
            return;
        }

        let mouse_events = {
            let registry = self.registry.borrow();
            self.mouse
                .advance_mouse(mouse.position, mouse.pressed, &self.root, |point| {
                    hit_test(&registry, point)
                })
        };
        dispatch_batch(mouse_events);

        for record in self.touches.values_mut() {
            record.updated = false;
        }
        // Known contacts go first, in first-observed order (the table's
        // insertion order); contacts new this frame follow in raw-list order.
        let mut ordered: SmallVec<[RawTouch; 8]> = SmallVec::new();
        for id in self.touches.keys() {
            if let Some(raw) = touches.iter().find(|raw| raw.id == *id) {
                ordered.push(*raw);
            }
        }
        for raw in touches {
            if !self.touches.contains_key(&raw.id) {
                ordered.push(*raw);
            }
        }
        for touch in &ordered {
            let event = {
                let registry = self.registry.borrow();
                advance_touch(&mut self.touches, touch, |point| {
                    hit_test(&registry, point)
                })
            };
            if let Some(event) = event {
                dispatch(&event);
            }
        }
        // Identifiers that vanished from the raw list without an end phase.
        self.touches.retain(|id, record| {
            if !record.updated {
                log::debug!("touch {id} vanished without an end phase, dropping");
            }
            record.updated
        });
    }

    /// Hit-test with the explicit fallback to the root node resolved here,
    /// at the one call site that wants it.
    fn candidate_at(&self, position: Point) -> N {
        hit_test(&self.registry.borrow(), position).unwrap_or_else(|| self.root.clone())
    }
}

impl<N: InteractiveNode> Drop for InputDriver<N> {
    fn drop(&mut self) {
        self.registry.borrow_mut().release_driver();
    }
}

fn dispatch_batch<N: InteractiveNode>(events: EventBatch<N>) {
    for event in &events {
        dispatch(event);
    }
}
