use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Callback invoked once per display refresh with a monotonic timestamp in seconds.
pub type TickCallback = Box<dyn FnMut(f64)>;

/// Source of per-refresh timestamps.
///
/// Implementations fire every live subscription once per display refresh, on
/// the thread that owns the main loop.
pub trait ClockSource {
    /// Registers `callback`. The returned handle keeps the registration alive.
    fn subscribe(&self, callback: TickCallback) -> SubscriptionHandle;

    /// Unregisters the subscription behind `handle`.
    fn unsubscribe(&self, handle: SubscriptionHandle) {
        handle.cancel();
    }
}

/// Scoped clock subscription.
///
/// Dropping the handle (or calling [`cancel`](Self::cancel)) unregisters the
/// callback; it will not be invoked again afterwards.
#[must_use = "dropping the handle immediately unsubscribes the callback"]
pub struct SubscriptionHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl SubscriptionHandle {
    /// Wraps the unregistration action of a clock source.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Unsubscribes now.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

type SharedCallback = Rc<RefCell<TickCallback>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, SharedCallback)>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(e, _)| *e == id)
    }
}

/// Clock source driven by the host's render loop.
///
/// The runtime calls [`fire`](Self::fire) once per presented frame. Callbacks
/// may subscribe or cancel (including themselves) while being fired; a
/// callback cancelled during a fire is not invoked for the rest of it.
#[derive(Default)]
pub struct DisplayLink {
    registry: Rc<RefCell<Registry>>,
    last_timestamp: RefCell<Option<f64>>,
}

impl DisplayLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    /// Timestamp of the most recent [`fire`](Self::fire), if any.
    pub fn last_timestamp(&self) -> Option<f64> {
        *self.last_timestamp.borrow()
    }

    /// Invokes every live callback with `timestamp`, in subscription order.
    ///
    /// Non-finite timestamps are dropped.
    pub fn fire(&self, timestamp: f64) {
        if !timestamp.is_finite() {
            log::warn!("display link: dropping non-finite timestamp {timestamp}");
            return;
        }
        *self.last_timestamp.borrow_mut() = Some(timestamp);

        // Snapshot so callbacks can touch the registry while we iterate.
        let snapshot: Vec<(u64, SharedCallback)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|(id, cb)| (*id, Rc::clone(cb)))
            .collect();

        for (id, cb) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            match cb.try_borrow_mut() {
                Ok(mut f) => (*f)(timestamp),
                Err(_) => log::warn!("display link: re-entrant fire skipped subscriber {id}"),
            }
        }
    }
}

impl ClockSource for DisplayLink {
    fn subscribe(&self, callback: TickCallback) -> SubscriptionHandle {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.entries.push((id, Rc::new(RefCell::new(callback))));
            id
        };
        log::debug!("display link: subscriber {id} added");

        let registry: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        SubscriptionHandle::new(move || {
            // The link may already be gone; nothing to unregister then.
            let Some(registry) = registry.upgrade() else {
                return;
            };
            // Take the entry out first so its callback drops after the borrow ends.
            let removed = {
                let mut reg = registry.borrow_mut();
                reg.entries
                    .iter()
                    .position(|(e, _)| *e == id)
                    .map(|pos| reg.entries.remove(pos))
            };
            if removed.is_some() {
                log::debug!("display link: subscriber {id} removed");
            }
            drop(removed);
        })
    }
}

impl fmt::Debug for DisplayLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayLink")
            .field("subscribers", &self.subscriber_count())
            .field("last_timestamp", &self.last_timestamp())
            .finish()
    }
}
