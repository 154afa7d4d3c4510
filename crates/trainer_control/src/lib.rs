//! `trainer_control`: the game state machine and its seams.
//!
//! `Game` owns progression and scoring, reaches devices through
//! `SharedDevices`, pulls player input from a `CommandSource`, and reports
//! everything the screen needs through a `SubscriberHub`.

mod game;
mod source;
mod subscribers;

pub use game::{Game, LevelOutcome, Mode, Progress};
pub use source::CommandSource;
pub use subscribers::{Subscriber, SubscriberHub};

use std::sync::Arc;

use parking_lot::Mutex;
use trainer_core::{Device, DeviceSnapshot};

/// The device collection, shared between the tick loop and the game.
pub type SharedDevices = Arc<Mutex<Vec<Device>>>;

pub fn shared_devices(devices: Vec<Device>) -> SharedDevices {
    Arc::new(Mutex::new(devices))
}

/// Copies every device out under the lock; the lock is released before returning.
pub fn snapshot_devices(devices: &SharedDevices) -> Vec<DeviceSnapshot> {
    devices.lock().iter().map(Device::snapshot).collect()
}
