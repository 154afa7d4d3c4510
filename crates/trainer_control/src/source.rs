use std::time::Duration;

/// Where the game gets player commands and pacing from.
///
/// The game never blocks on input: it polls, and sleeps through the source
/// between polls so the host controls how waiting is done.
pub trait CommandSource {
    /// Takes the latest unread command line, if any.
    fn poll_command(&mut self) -> Option<String>;

    /// False once shutdown has been requested.
    fn is_running(&self) -> bool;

    /// Asks the host to shut the process down.
    fn request_exit(&mut self);

    /// Consumes a pending "device state changed" signal.
    fn take_redraw(&mut self) -> bool {
        false
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
