//! Status board: device parameters, the level line, and the solution menu.

use std::sync::Arc;

use tracing::warn;
use trainer_control::{snapshot_devices, Progress, SharedDevices, Subscriber};
use trainer_core::Mood;

use crate::console::Console;
use crate::screen;

pub struct StatusBoard {
    console: Arc<Console>,
    devices: SharedDevices,
}

impl StatusBoard {
    pub fn new(console: Arc<Console>, devices: SharedDevices) -> Self {
        Self { console, devices }
    }
}

impl Subscriber for StatusBoard {
    fn on_message(&self, _text: &str) {}

    fn on_mood(&self, _mood: Mood) {}

    /// Copies the devices out first so the device lock is never held while
    /// waiting on the console.
    fn on_redraw(&self) {
        let snapshots = snapshot_devices(&self.devices);
        if let Err(err) = self.console.draw_board(&screen::board_lines(&snapshots)) {
            warn!(%err, "board draw failed");
        }
    }

    fn on_progress(&self, progress: Option<Progress>) {
        if let Err(err) = self.console.draw_progress(&screen::progress_line(progress)) {
            warn!(%err, "progress draw failed");
        }
    }

    fn on_choices(&self, choices: &[String]) {
        if let Err(err) = self.console.draw_choices(choices) {
            warn!(%err, "menu draw failed");
        }
    }
}
