//! Frame-stepped pointer input dispatch for a retained display list.
//!
//! There are no native pointer callbacks in this model: the host hands the
//! driver one raw mouse sample and one raw touch list per frame, and the
//! driver reconciles them against what was hovered/pressed last frame to
//! derive over/out/move/down/up events, delivered with bubbling and
//! per-target local coordinates.
//!
//! The crate only depends on the [`InteractiveNode`] capability trait;
//! concrete scene-graph node types live elsewhere and implement it.

pub mod dispatch;
pub mod driver;
pub mod events;
pub mod hit;
pub mod node;
pub mod pointer;
pub mod registry;

#[cfg(test)]
mod tests;

pub use dispatch::dispatch;
pub use driver::{InputDriver, InputError, RawMouse, RawTouch, TouchId, TouchPhase};
pub use events::{PointerEvent, PointerEventKind};
pub use hit::hit_test;
pub use node::{InteractiveNode, NodeId};
pub use pointer::PointerState;
pub use registry::{InteractiveRegistry, SharedRegistry};
