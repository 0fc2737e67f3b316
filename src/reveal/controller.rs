//! Reveal-on-scroll state machine.
//!
//! Cards register in display order. The host feeds every visibility report it
//! receives through [`RevealController::observe_batch`]; the controller claims
//! the cards that just became visible, arms one staggered timer per claimed
//! card and emits a single reveal signal per card when its timer fires.
//! Nothing here touches the DOM, so the whole lifecycle runs under a virtual
//! clock in tests.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;
use yew::Callback;

use super::scheduler::Scheduler;
use crate::config::RevealConfig;

/// Registration index of a reveal target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

/// One visibility report for a target, as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub target: TargetId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    /// Registered and under observation.
    Pending,
    /// Seen by a batch; its stagger timer is armed and it is no longer observed.
    Scheduled,
    /// Signal fired. Terminal.
    Revealed,
}

struct Target<H> {
    state: RevealState,
    timer: Option<H>,
}

struct Shared<H> {
    targets: Vec<Target<H>>,
    disposed: bool,
}

pub struct RevealController<S: Scheduler> {
    shared: Rc<RefCell<Shared<S::Handle>>>,
    scheduler: S,
    config: RevealConfig,
    on_reveal: Callback<TargetId>,
}

impl<S: Scheduler + Clone> Clone for RevealController<S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            scheduler: self.scheduler.clone(),
            config: self.config,
            on_reveal: self.on_reveal.clone(),
        }
    }
}

impl<S: Scheduler> RevealController<S> {
    pub fn new(config: RevealConfig, scheduler: S, on_reveal: Callback<TargetId>) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                targets: Vec::new(),
                disposed: false,
            })),
            scheduler,
            config,
            on_reveal,
        }
    }

    pub fn register(&self) -> TargetId {
        let mut shared = self.shared.borrow_mut();
        shared.targets.push(Target {
            state: RevealState::Pending,
            timer: None,
        });
        TargetId(shared.targets.len() - 1)
    }

    /// Handles one detection callback.
    ///
    /// Returns the targets claimed by this batch, in report order. The caller
    /// stops observing them; they will never be claimed again. Reports that do
    /// not qualify, name an unknown target, or repeat an already claimed one
    /// are skipped without taking a stagger slot.
    pub fn observe_batch<I>(&self, entries: I) -> Vec<TargetId>
    where
        I: IntoIterator<Item = Intersection>,
    {
        let mut shared = self.shared.borrow_mut();
        if shared.disposed {
            return Vec::new();
        }

        let mut claimed = Vec::new();
        for entry in entries {
            if !self.qualifies(&entry) {
                continue;
            }
            let target = match shared.targets.get_mut(entry.target.0) {
                Some(target) if target.state == RevealState::Pending => target,
                _ => continue,
            };
            let delay = self.config.delay_for(claimed.len());
            target.timer = Some(self.scheduler.schedule(delay, self.reveal_task(entry.target)));
            target.state = RevealState::Scheduled;
            debug!("reveal target {} scheduled in {}ms", entry.target.0, delay);
            claimed.push(entry.target);
        }
        claimed
    }

    pub fn state(&self, id: TargetId) -> Option<RevealState> {
        self.shared.borrow().targets.get(id.0).map(|t| t.state)
    }

    pub fn is_revealed(&self, id: TargetId) -> bool {
        self.state(id) == Some(RevealState::Revealed)
    }

    /// Targets that have not fired yet, armed or not.
    pub fn pending_count(&self) -> usize {
        self.count_where(|state| state != RevealState::Revealed)
    }

    pub fn revealed_count(&self) -> usize {
        self.count_where(|state| state == RevealState::Revealed)
    }

    /// Stops everything. Armed timers are cancelled and later batches are
    /// ignored, so no signal can fire after this returns. Safe to call twice.
    pub fn dispose(&self) {
        let timers: Vec<S::Handle> = {
            let mut shared = self.shared.borrow_mut();
            if shared.disposed {
                return;
            }
            shared.disposed = true;
            shared
                .targets
                .iter_mut()
                .filter_map(|t| t.timer.take())
                .collect()
        };
        debug!("reveal controller disposed, dropping {} timers", timers.len());
        drop(timers);
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.borrow().disposed
    }

    fn qualifies(&self, entry: &Intersection) -> bool {
        entry.is_intersecting && entry.ratio >= self.config.threshold
    }

    fn count_where(&self, pred: impl Fn(RevealState) -> bool) -> usize {
        self.shared
            .borrow()
            .targets
            .iter()
            .filter(|t| pred(t.state))
            .count()
    }

    fn reveal_task(&self, id: TargetId) -> Box<dyn FnOnce()> {
        let shared = Rc::downgrade(&self.shared);
        let on_reveal = self.on_reveal.clone();
        Box::new(move || {
            if mark_revealed(&shared, id) {
                debug!("reveal target {} fired", id.0);
                on_reveal.emit(id);
            }
        })
    }
}

// The fired timer handle stays on the target until dispose; the task that is
// running right now belongs to it.
fn mark_revealed<H>(shared: &Weak<RefCell<Shared<H>>>, id: TargetId) -> bool {
    let Some(shared) = shared.upgrade() else {
        return false;
    };
    let mut shared = shared.borrow_mut();
    if shared.disposed {
        return false;
    }
    match shared.targets.get_mut(id.0) {
        Some(target) if target.state == RevealState::Scheduled => {
            target.state = RevealState::Revealed;
            true
        }
        _ => false,
    }
}
