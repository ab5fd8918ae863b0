//! Test tooling for Stagehand: an event recorder and a robot that drives a
//! stage with synthetic frames.

mod recorder;
mod robot;

pub use recorder::{EventRecorder, RecordedEvent};
pub use robot::StageRobot;
