// pacer.rs — Post-step delay primitive.

use std::time::Duration;

/// Holds the orchestrator between steps.
///
/// Called once per attempted step, zero delays included, so a fake pacer can
/// observe that the delay point was reached.
pub trait Pacer {
    fn pause(&self, delay: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}
