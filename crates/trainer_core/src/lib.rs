//! `trainer_core`: device model, fault injection, and scoring.
//!
//! No IO, no threads. All randomness via the passed-in Rng.

mod config;
mod device;
pub mod devices;
mod error;
mod malfunction;
mod parameter;
mod registry;
mod scoring;
mod tasks;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use config::GameConfig;
pub use device::{Device, DeviceSnapshot, ParameterSnapshot};
pub use error::TrainerError;
pub use malfunction::{Grade, Malfunction, Solution, SOLUTIONS_PER_MALFUNCTION};
pub use parameter::{ParamValue, Parameter, Range};
pub use registry::{DeviceFactory, DeviceRegistry};
pub use scoring::{Mood, Qualification, ScoreBoard, MAX_POINTS_PER_TASK};
pub use tasks::{generate_tasks, Task};
