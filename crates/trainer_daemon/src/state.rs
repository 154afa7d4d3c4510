//! State shared by the three loops: the running and redraw flags, the start
//! gate, and the command mailbox.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// Holds every loop back until the terminal is ready.
#[derive(Default)]
pub struct StartGate {
    open: Mutex<bool>,
    opened: Condvar,
}

impl StartGate {
    pub fn open(&self) {
        *self.open.lock() = true;
        self.opened.notify_all();
    }

    /// Blocks until [`StartGate::open`] has been called.
    pub fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.opened.wait(&mut open);
        }
    }
}

/// Single-slot command channel. A new line overwrites one not yet taken.
#[derive(Default)]
pub struct Mailbox {
    slot: Mutex<Option<String>>,
}

impl Mailbox {
    pub fn post(&self, command: String) {
        *self.slot.lock() = Some(command);
    }

    pub fn take(&self) -> Option<String> {
        self.slot.lock().take()
    }
}

pub struct Runtime {
    running: AtomicBool,
    redraw: AtomicBool,
    pub gate: StartGate,
    pub mailbox: Mailbox,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            redraw: AtomicBool::new(false),
            gate: StartGate::default(),
            mailbox: Mailbox::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stops every loop. Also opens the gate so a loop still waiting on it
    /// can see the flag and return.
    pub fn shutdown(&self) {
        self.running.store(false, Ordering::Release);
        self.gate.open();
    }

    pub fn request_redraw(&self) {
        self.redraw.store(true, Ordering::Release);
    }

    /// Reads and clears the redraw flag.
    pub fn take_redraw(&self) -> bool {
        self.redraw.swap(false, Ordering::AcqRel)
    }

    /// Sleeps for `total` in `step`-sized slices, returning early on shutdown.
    /// Returns whether the runtime is still running.
    pub fn sleep_while_running(&self, total: Duration, step: Duration) -> bool {
        let deadline = Instant::now() + total;
        loop {
            if !self.is_running() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep(step.min(deadline - now));
        }
    }
}
