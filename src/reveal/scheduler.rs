use gloo_timers::callback::Timeout;

/// Something that can run a task after a delay.
///
/// Dropping the returned handle must cancel the task if it has not run yet.
/// The reveal controller relies on that to guarantee no signal outlives it.
pub trait Scheduler {
    type Handle: 'static;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser timers via `setTimeout`. A dropped [`Timeout`] clears itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

#[cfg(test)]
pub mod manual {
    use super::Scheduler;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Queued {
        due: u64,
        seq: u64,
        cancelled: Rc<Cell<bool>>,
        task: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct Clock {
        now: u64,
        seq: u64,
        queue: Vec<Queued>,
    }

    /// Virtual clock. Time only moves when a test calls [`ManualScheduler::advance`].
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        clock: Rc<RefCell<Clock>>,
    }

    pub struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl ManualScheduler {
        pub fn now(&self) -> u64 {
            self.clock.borrow().now
        }

        /// Timers that are neither fired nor cancelled.
        pub fn live_timers(&self) -> usize {
            self.clock
                .borrow()
                .queue
                .iter()
                .filter(|q| !q.cancelled.get())
                .count()
        }

        /// Moves the clock forward, running due tasks in (due time, schedule order).
        pub fn advance(&self, ms: u64) {
            let target = self.clock.borrow().now + ms;
            loop {
                let next = {
                    let mut clock = self.clock.borrow_mut();
                    let earliest = clock
                        .queue
                        .iter()
                        .enumerate()
                        .filter(|(_, q)| q.due <= target)
                        .min_by_key(|(_, q)| (q.due, q.seq))
                        .map(|(i, _)| i);
                    earliest.map(|i| {
                        let queued = clock.queue.remove(i);
                        clock.now = queued.due;
                        queued
                    })
                };
                match next {
                    Some(queued) if !queued.cancelled.get() => (queued.task)(),
                    Some(_) => {}
                    None => break,
                }
            }
            self.clock.borrow_mut().now = target;
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
            let cancelled = Rc::new(Cell::new(false));
            let mut clock = self.clock.borrow_mut();
            let queued = Queued {
                due: clock.now + u64::from(delay_ms),
                seq: clock.seq,
                cancelled: cancelled.clone(),
                task,
            };
            clock.seq += 1;
            clock.queue.push(queued);
            ManualHandle { cancelled }
        }
    }

    mod tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn runs_tasks_in_due_order_and_skips_cancelled() {
            let scheduler = ManualScheduler::default();
            let log = Rc::new(RefCell::new(Vec::new()));

            let record = |label: &'static str| {
                let log = log.clone();
                Box::new(move || log.borrow_mut().push(label)) as Box<dyn FnOnce()>
            };
            let _late = scheduler.schedule(300, record("late"));
            let _early = scheduler.schedule(100, record("early"));
            let dropped = scheduler.schedule(200, record("dropped"));
            drop(dropped);

            assert_eq!(scheduler.live_timers(), 2);
            scheduler.advance(250);
            assert_eq!(*log.borrow(), vec!["early"]);
            assert_eq!(scheduler.now(), 250);

            scheduler.advance(50);
            assert_eq!(*log.borrow(), vec!["early", "late"]);
            assert_eq!(scheduler.live_timers(), 0);
        }
    }
}
