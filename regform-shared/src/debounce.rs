//! Debounced dispatcher.
//!
//! [`Debouncer`] delays a handler until its trigger has been quiet for a
//! fixed period. Every trigger cancels the pending invocation, if any, and
//! schedules a fresh one carrying the latest arguments, so the handler only
//! ever sees the newest argument set.
//!
//! Time is supplied by a [`Scheduler`]. The browser front end plugs in a
//! timer-backed scheduler; tests and the CLI replay use [`VirtualScheduler`].

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    fmt,
    rc::Rc,
    time::Duration,
};

use tracing::trace;

/// Default quiet period before a debounced handler runs.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Schedules a task to run once after a delay.
///
/// `schedule` must never run the task before returning; the task runs later
/// from the scheduler's own event loop.
pub trait Scheduler {
    /// Handle to a scheduled task, used to cancel it.
    type Handle;

    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Cancel a task that has not run yet. Cancelling a task that already ran
    /// is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Dispatcher state. `Pending` owns the only live timer handle.
#[derive(Debug)]
enum DebounceState<H> {
    Idle,
    Pending(H),
}

/// Delays calls to a handler until input pauses for `delay`.
pub struct Debouncer<A, S: Scheduler> {
    scheduler: S,
    delay: Duration,
    handler: Rc<dyn Fn(A)>,
    state: Rc<RefCell<DebounceState<S::Handle>>>,
    // Bumped on every trigger and cancel so a task that escaped cancellation
    // can tell it has been superseded.
    generation: Rc<Cell<u64>>,
}

impl<A: 'static, S> Debouncer<A, S>
where
    S: Scheduler,
    S::Handle: 'static,
{
    /// Wrap `handler` so it runs `delay` after the most recent trigger.
    #[must_use]
    pub fn new(scheduler: S, delay: Duration, handler: impl Fn(A) + 'static) -> Self {
        Self {
            scheduler,
            delay,
            handler: Rc::new(handler),
            state: Rc::new(RefCell::new(DebounceState::Idle)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Wrap `handler` with the default 500 ms quiet period.
    #[must_use]
    pub fn with_default_delay(scheduler: S, handler: impl Fn(A) + 'static) -> Self {
        Self::new(scheduler, DEFAULT_DELAY, handler)
    }

    /// Record a new event. Any pending invocation is discarded together with
    /// its arguments and a new one is scheduled with `args`.
    pub fn trigger(&self, args: A) {
        self.cancel_pending();
        let generation = self.generation.get();

        let handler = Rc::clone(&self.handler);
        let state = Rc::downgrade(&self.state);
        let current = Rc::downgrade(&self.generation);
        let task = Box::new(move || {
            let Some(current) = current.upgrade() else {
                return;
            };
            if current.get() != generation {
                trace!(generation, "dropping superseded debounce task");
                return;
            }
            if let Some(state) = state.upgrade() {
                *state.borrow_mut() = DebounceState::Idle;
            }
            trace!(generation, "debounce quiet period elapsed");
            handler(args);
        });

        let handle = self.scheduler.schedule(self.delay, task);
        *self.state.borrow_mut() = DebounceState::Pending(handle);
        trace!(generation, delay_ms = ?self.delay.as_millis(), "debounce pending");
    }

    /// Drop the pending invocation, if any, and return to idle.
    pub fn cancel(&self) {
        self.cancel_pending();
    }

    /// Whether an invocation is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(*self.state.borrow(), DebounceState::Pending(_))
    }

    /// Quiet period applied to each trigger.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn cancel_pending(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), DebounceState::Idle);
        if let DebounceState::Pending(handle) = previous {
            trace!("cancelling pending debounce task");
            self.scheduler.cancel(handle);
        }
    }
}

impl<A, S: Scheduler> Drop for Debouncer<A, S> {
    fn drop(&mut self) {
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), DebounceState::Idle);
        if let DebounceState::Pending(handle) = previous {
            self.scheduler.cancel(handle);
        }
    }
}

impl<A, S: Scheduler> fmt::Debug for Debouncer<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field(
                "pending",
                &matches!(*self.state.borrow(), DebounceState::Pending(_)),
            )
            .finish_non_exhaustive()
    }
}

/// Handle to a task queued on a [`VirtualScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualTask {
    due: Duration,
    id: u64,
}

type QueuedTask = Box<dyn FnOnce()>;

#[derive(Default)]
struct VirtualClock {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, u64), QueuedTask>,
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Nothing runs until the clock is advanced. Clones share the same clock and
/// task queue.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<VirtualClock>>,
}

impl VirtualScheduler {
    /// Create a scheduler with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// Move the clock forward to `target`, running every task due at or
    /// before it in due order. Moving backwards is a no-op.
    pub fn advance_to(&self, target: Duration) {
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock.queue.first_key_value().map(|(&(due, _), _)| due);
                match due {
                    Some(due) if due <= target => {
                        clock.now = clock.now.max(due);
                        clock.queue.pop_first().map(|(_, task)| task)
                    }
                    _ => None,
                }
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }

        let mut clock = self.clock.borrow_mut();
        clock.now = clock.now.max(target);
    }

    /// Move the clock forward by `step`.
    pub fn advance_by(&self, step: Duration) {
        let target = self.now() + step;
        self.advance_to(target);
    }

    /// Run every queued task, advancing the clock as far as needed.
    pub fn run_until_idle(&self) {
        loop {
            let next_due = self
                .clock
                .borrow()
                .queue
                .first_key_value()
                .map(|(&(due, _), _)| due);
            match next_due {
                Some(due) => self.advance_to(due),
                None => break,
            }
        }
    }
}

impl Scheduler for VirtualScheduler {
    type Handle = VirtualTask;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> VirtualTask {
        let mut clock = self.clock.borrow_mut();
        let handle = VirtualTask {
            due: clock.now + delay,
            id: clock.next_id,
        };
        clock.next_id += 1;
        clock.queue.insert((handle.due, handle.id), task);
        handle
    }

    fn cancel(&self, handle: VirtualTask) {
        self.clock
            .borrow_mut()
            .queue
            .remove(&(handle.due, handle.id));
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.clock.borrow();
        f.debug_struct("VirtualScheduler")
            .field("now", &clock.now)
            .field("pending_tasks", &clock.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Calls = Rc<RefCell<Vec<(u128, &'static str)>>>;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn recording_debouncer(
        scheduler: &VirtualScheduler,
        delay: Duration,
    ) -> (Debouncer<&'static str, VirtualScheduler>, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let clock = scheduler.clone();
        let debouncer = Debouncer::new(scheduler.clone(), delay, move |arg: &'static str| {
            sink.borrow_mut().push((clock.now().as_millis(), arg));
        });
        (debouncer, calls)
    }

    #[test]
    fn test_burst_fires_once_with_latest_arguments() {
        let scheduler = VirtualScheduler::new();
        let (debouncer, calls) = recording_debouncer(&scheduler, ms(500));

        debouncer.trigger("t0");
        scheduler.advance_to(ms(100));
        debouncer.trigger("t100");
        scheduler.advance_to(ms(200));
        debouncer.trigger("t200");

        scheduler.advance_to(ms(699));
        assert!(calls.borrow().is_empty());
        assert!(debouncer.is_pending());

        scheduler.advance_to(ms(700));
        assert_eq!(*calls.borrow(), vec![(700, "t200")]);
        assert!(!debouncer.is_pending());

        scheduler.advance_to(ms(5_000));
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_late_trigger_supersedes_earlier_burst() {
        let scheduler = VirtualScheduler::new();
        let (debouncer, calls) = recording_debouncer(&scheduler, ms(500));

        for (at, arg) in [(0, "t0"), (100, "t100"), (200, "t200"), (250, "t250")] {
            scheduler.advance_to(ms(at));
            debouncer.trigger(arg);
        }

        scheduler.advance_to(ms(700));
        assert!(calls.borrow().is_empty());

        scheduler.advance_to(ms(750));
        assert_eq!(*calls.borrow(), vec![(750, "t250")]);
        assert_eq!(scheduler.pending_tasks(), 0);
    }

    #[test]
    fn test_separate_quiet_periods_fire_separately() {
        let scheduler = VirtualScheduler::new();
        let (debouncer, calls) = recording_debouncer(&scheduler, ms(500));

        debouncer.trigger("first");
        scheduler.advance_to(ms(600));
        scheduler.advance_to(ms(1_000));
        debouncer.trigger("second");
        scheduler.run_until_idle();

        assert_eq!(*calls.borrow(), vec![(500, "first"), (1_500, "second")]);
    }

    #[test]
    fn test_at_most_one_pending_task() {
        let scheduler = VirtualScheduler::new();
        let (debouncer, _calls) = recording_debouncer(&scheduler, ms(500));

        for _ in 0..10 {
            debouncer.trigger("again");
            assert_eq!(scheduler.pending_tasks(), 1);
        }
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let scheduler = VirtualScheduler::new();
        let (debouncer, calls) = recording_debouncer(&scheduler, ms(500));

        debouncer.trigger("dropped");
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        scheduler.run_until_idle();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_drop_cancels_pending_task() {
        let scheduler = VirtualScheduler::new();
        let (debouncer, calls) = recording_debouncer(&scheduler, ms(500));

        debouncer.trigger("dropped");
        drop(debouncer);

        assert_eq!(scheduler.pending_tasks(), 0);
        scheduler.run_until_idle();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_default_delay() {
        let scheduler = VirtualScheduler::new();
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let debouncer = Debouncer::with_default_delay(scheduler.clone(), move |arg: &'static str| {
            sink.borrow_mut().push((0, arg));
        });
        assert_eq!(debouncer.delay(), DEFAULT_DELAY);

        debouncer.trigger("x");
        scheduler.advance_to(ms(499));
        assert!(calls.borrow().is_empty());
        scheduler.advance_to(ms(500));
        assert_eq!(calls.borrow().len(), 1);
    }

    /// A scheduler whose `cancel` does nothing, like a timer API that cannot
    /// revoke callbacks.
    struct LeakyScheduler(VirtualScheduler);

    impl Scheduler for LeakyScheduler {
        type Handle = VirtualTask;

        fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> VirtualTask {
            self.0.schedule(delay, task)
        }

        fn cancel(&self, _handle: VirtualTask) {}
    }

    #[test]
    fn test_superseded_task_never_fires_even_if_not_cancelled() {
        let clock = VirtualScheduler::new();
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let now = clock.clone();
        let debouncer = Debouncer::new(LeakyScheduler(clock.clone()), ms(500), move |arg: &'static str| {
            sink.borrow_mut().push((now.now().as_millis(), arg));
        });

        debouncer.trigger("stale");
        clock.advance_to(ms(300));
        debouncer.trigger("fresh");
        clock.run_until_idle();

        assert_eq!(*calls.borrow(), vec![(800, "fresh")]);
    }

    #[test]
    fn test_virtual_scheduler_runs_tasks_in_due_order() {
        let scheduler = VirtualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(300, "c"), (100, "a"), (200, "b")] {
            let order = Rc::clone(&order);
            scheduler.schedule(ms(delay), Box::new(move || order.borrow_mut().push(label)));
        }

        scheduler.advance_by(ms(250));
        assert_eq!(*order.borrow(), vec!["a", "b"]);
        assert_eq!(scheduler.now(), ms(250));

        scheduler.advance_to(ms(100));
        assert_eq!(scheduler.now(), ms(250));

        scheduler.run_until_idle();
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.now(), ms(300));
    }
}
