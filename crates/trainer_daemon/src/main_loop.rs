use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::info;
use trainer_control::{CommandSource, Game};

use crate::state::Runtime;

/// Feeds the game from the mailbox and the runtime flags.
pub struct Host {
    runtime: Arc<Runtime>,
}

impl Host {
    pub fn new(runtime: Arc<Runtime>) -> Self {
        Self { runtime }
    }
}

impl CommandSource for Host {
    fn poll_command(&mut self) -> Option<String> {
        self.runtime.mailbox.take()
    }

    fn is_running(&self) -> bool {
        self.runtime.is_running()
    }

    fn request_exit(&mut self) {
        self.runtime.shutdown();
    }

    fn take_redraw(&mut self) -> bool {
        self.runtime.take_redraw()
    }
}

/// Waits for the start gate, greets the player and paints the board, then
/// steps the game every `poll` until the runtime stops.
pub fn run_main_loop<R: Rng>(game: &mut Game<R>, runtime: &Arc<Runtime>, poll: Duration) {
    runtime.gate.wait();
    info!("main loop started");
    let mut host = Host::new(runtime.clone());
    game.greet();
    game.subscribers().notify_redraw();
    while host.is_running() {
        game.step(&mut host);
        host.sleep(poll);
    }
    info!("main loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use trainer_control::{shared_devices, Mode};
    use trainer_core::test_fixtures::{fast_config, graded_device, inert_device, make_rng};

    #[test]
    fn host_reads_the_mailbox_once() {
        let runtime = Arc::new(Runtime::new());
        let mut host = Host::new(runtime.clone());
        runtime.mailbox.post("start".to_string());
        assert_eq!(host.poll_command().as_deref(), Some("start"));
        assert_eq!(host.poll_command(), None);
    }

    #[test]
    fn host_exit_stops_the_runtime() {
        let runtime = Arc::new(Runtime::new());
        let mut host = Host::new(runtime.clone());
        host.request_exit();
        assert!(!runtime.is_running());
        assert!(!host.is_running());
    }

    #[test]
    fn exit_command_ends_the_loop() {
        let runtime = Arc::new(Runtime::new());
        let devices = shared_devices(vec![inert_device("Alpha"), graded_device()]);
        let worker = {
            let runtime = runtime.clone();
            let devices = devices.clone();
            thread::spawn(move || {
                let mut game = Game::new(devices, fast_config(), make_rng());
                run_main_loop(&mut game, &runtime, Duration::from_millis(1));
                game.mode()
            })
        };

        runtime.gate.open();
        runtime.mailbox.post("start".to_string());
        // Wait until the round has injected its fault, then leave.
        for _ in 0..1000 {
            if devices.lock().iter().any(trainer_core::Device::has_fault) {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        runtime.mailbox.post("exit".to_string());

        let mode = worker.join().unwrap();
        assert_eq!(mode, Mode::Menu);
        assert!(!runtime.is_running());
        assert!(devices.lock().iter().all(|d| !d.has_fault()));
    }
}
