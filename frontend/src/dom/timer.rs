use gloo_timers::callback::Timeout;

use crate::viewport::reveal::Scheduler;

/// `setTimeout` backed scheduler. Dropping the `Timeout` clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule<F>(&self, delay_ms: u32, action: F) -> Timeout
    where
        F: FnOnce() + 'static,
    {
        Timeout::new(delay_ms, action)
    }
}
