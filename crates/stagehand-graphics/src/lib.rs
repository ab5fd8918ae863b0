//! Pure math primitives for the Stagehand display list.
//!
//! Stage space is y-up: larger `y` is "up" on screen, matching the
//! world-space convention of the engine this library targets.

mod affine;
mod geometry;

pub use affine::Affine;
pub use geometry::{Point, Rect, Size};
