//! Depth-ordered registry of interactive nodes.

use crate::driver::InputError;
use crate::node::{InteractiveNode, NodeId};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

/// Single-threaded shared handle; the scene graph and the frame driver hold
/// clones of the same registry.
pub type SharedRegistry<N> = Rc<RefCell<InteractiveRegistry<N>>>;

struct Entry<N> {
    node: N,
    /// Registration serial, breaks equal-depth ties so iteration order stays
    /// deterministic across resorts.
    serial: u64,
}

/// The global set of pointer-interactive nodes, kept in ascending depth
/// order (lower depth = in front = hit-tested first).
pub struct InteractiveRegistry<N: InteractiveNode> {
    entries: IndexMap<NodeId, Entry<N>>,
    next_serial: u64,
    driver_bound: bool,
}

impl<N: InteractiveNode> InteractiveRegistry<N> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            next_serial: 0,
            driver_bound: false,
        }
    }

    pub fn new_shared() -> SharedRegistry<N> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Insert `node` and re-sort. Idempotent: re-registering an already
    /// known id keeps its original serial and position.
    pub fn register(&mut self, node: N) {
        let id = node.node_id();
        if self.entries.contains_key(&id) {
            return;
        }
        let serial = self.next_serial;
        self.next_serial += 1;
        log::debug!("registry: register node {id} (serial {serial})");
        self.entries.insert(id, Entry { node, serial });
        self.resort();
    }

    /// Remove by id; unknown ids are a silent no-op.
    pub fn unregister(&mut self, id: NodeId) {
        if self.entries.shift_remove(&id).is_some() {
            log::debug!("registry: unregister node {id}");
        }
    }

    /// Re-establish ascending depth order. Must run after any node's depth
    /// changes, since hit order reads the current sort.
    pub fn resort(&mut self) {
        self.entries.sort_by(|_, a, _, b| {
            a.node
                .depth()
                .partial_cmp(&b.node.depth())
                .unwrap_or(Ordering::Equal)
                .then(a.serial.cmp(&b.serial))
        });
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Diagnostic only.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nodes in hit-test order: ascending depth, registration order on ties.
    pub fn iter(&self) -> impl Iterator<Item = &N> {
        self.entries.values().map(|entry| &entry.node)
    }

    /// Latch for the one-driver-per-registry precondition. The driver binds
    /// at construction and releases on drop.
    pub(crate) fn bind_driver(&mut self) -> Result<(), InputError> {
        if self.driver_bound {
            return Err(InputError::DriverAlreadyAttached);
        }
        self.driver_bound = true;
        Ok(())
    }

    pub(crate) fn release_driver(&mut self) {
        self.driver_bound = false;
    }
}

impl<N: InteractiveNode> Default for InteractiveRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}
