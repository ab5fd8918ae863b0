//! Retained display list for Stagehand: sprites, hit areas, listeners,
//! dragging, and the stage that owns the input driver.
//!
//! Sprites are cheap-clone `Rc` handles; the whole crate is single-threaded
//! and frame-stepped, driven by [`Stage::advance_frame`].

mod hit_area;
mod registration;
mod sprite;
mod stage;

#[cfg(test)]
mod tests;

pub use hit_area::HitArea;
pub use registration::RegistrationPoint;
pub use sprite::{ListenerId, Sprite};
pub use stage::Stage;

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The operation needs the sprite to be on the stage (e.g. a drag cannot
    /// start before `add_child` has attached it).
    NotOnStage,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::NotOnStage => {
                write!(f, "cannot start a drag until the sprite is added to the stage")
            }
        }
    }
}

impl std::error::Error for SceneError {}
