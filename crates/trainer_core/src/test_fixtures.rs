//! Shared test fixtures for trainer_core and downstream crates.
//!
//! `graded_device()` is a one-fault device whose solution descriptions name
//! their grade, so tests can find a specific answer in a shuffled menu.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{Device, GameConfig, Malfunction, Parameter, Solution};

pub const GAUGE: &str = "Gauge";

pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Config with every pause and interval at its minimum so scripted games run instantly.
pub fn fast_config() -> GameConfig {
    GameConfig {
        tick_interval_ms: 1,
        poll_interval_ms: 1,
        intro_pause_ms: 0,
        feedback_pause_ms: 0,
        batch_pause_ms: 0,
        level_complete_pause_ms: 0,
        ..GameConfig::default()
    }
}

/// Single-fault device. Solutions are described as "optimal" (100),
/// "acceptable" (80), "minimal" (20), and "wrong" (0).
pub fn graded_device() -> Device {
    Device::new(
        GAUGE,
        [
            Parameter::continuous("Level", (0.0, 100.0), (40.0, 60.0), 50.0),
            Parameter::discrete("Count", (0, 20), (0, 10), 5),
        ],
        vec![Malfunction::new(
            "Flood",
            "Level above 60",
            [("Level", (60.1, 100.0))],
            [
                Solution::optimal("optimal"),
                Solution::acceptable("acceptable", 80),
                Solution::minimal("minimal", 20),
                Solution::wrong("wrong"),
            ],
        )],
    )
}

/// A device with no fault catalog; never chosen for a task.
pub fn inert_device(name: &str) -> Device {
    Device::new(
        name,
        [Parameter::continuous("Level", (0.0, 100.0), (40.0, 60.0), 50.0)],
        Vec::new(),
    )
}
