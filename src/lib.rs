#![warn(clippy::all)]

pub mod codec;
mod engine;
mod grid;
mod history;
pub mod presets;
mod render;
pub mod rules;
mod scheduler;
mod topology;

pub use engine::{Engine, LifecycleState, StepOutcome, StopReason};
pub use grid::{Coord, Diff, Grid};
pub use history::History;
pub use render::{NullRenderer, Renderer};
pub use scheduler::run_until_stopped;
pub use topology::Torus;

pub const VERSION: &str = "0.1.0";
