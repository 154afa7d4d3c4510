//! The mascot: a face for the current mood and the latest message.

use std::sync::Arc;

use tracing::warn;
use trainer_control::Subscriber;
use trainer_core::Mood;

use crate::console::Console;
use crate::screen;

pub struct Mascot {
    console: Arc<Console>,
}

impl Mascot {
    pub fn new(console: Arc<Console>) -> Self {
        Self { console }
    }
}

impl Subscriber for Mascot {
    fn on_message(&self, text: &str) {
        if let Err(err) = self.console.draw_message(text) {
            warn!(%err, "message draw failed");
        }
    }

    fn on_mood(&self, mood: Mood) {
        if let Err(err) = self.console.draw_mascot(&screen::mascot_face(mood)) {
            warn!(%err, "mascot draw failed");
        }
    }

    fn on_redraw(&self) {}
}
