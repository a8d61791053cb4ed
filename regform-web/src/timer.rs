//! Browser timer scheduler backing the live-validation debouncer.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use shared::debounce::Scheduler;

/// Schedules tasks with `setTimeout` through `gloo-timers`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Timeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task)
    }

    fn cancel(&self, handle: Timeout) {
        handle.cancel();
    }
}
