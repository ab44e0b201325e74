use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Slots<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// Single-threaded listener registry.
///
/// Cloning yields another handle to the same registry.
pub struct Listeners<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.entries.push((id, Rc::new(listener)));
            id
        };

        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    slots.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
                }
            })),
        }
    }

    /// Calls every listener in subscription order.
    ///
    /// Works on a snapshot, so a listener disposed mid-emit still sees this value.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .slots
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in snapshot {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

/// Handle returned by every `subscribe`. The listener is removed on
/// [`Subscription::dispose`] or when the handle is dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn dispose(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}
