use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use super::listeners::{Listeners, Subscription};
use super::REVEAL_STAGGER_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

impl ElementId {
    pub fn next() -> Self {
        ElementId(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl From<u64> for ElementId {
    fn from(raw: u64) -> Self {
        ElementId(raw)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deferred execution. Dropping the returned handle must cancel the action
/// if it has not run yet.
pub trait Scheduler {
    type Handle;

    fn schedule<F>(&self, delay_ms: u32, action: F) -> Self::Handle
    where
        F: FnOnce() + 'static;
}

/// Delay before an element of the given order reveals, counted from its
/// visibility signal.
pub fn reveal_delay(order: u32) -> u32 {
    order.saturating_mul(REVEAL_STAGGER_MS)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealEvent {
    pub id: ElementId,
}

enum Phase<H, O> {
    Observing(O),
    Scheduled(H),
    Revealed,
}

struct Record<H, O> {
    order: u32,
    generation: u64,
    phase: Phase<H, O>,
}

struct Registry<H, O> {
    next_generation: u64,
    records: HashMap<ElementId, Record<H, O>>,
}

/// One-shot, staggered reveal scheduling for registered elements.
///
/// `O` is whatever keeps the element's visibility observation alive; it is
/// dropped as soon as the element is first seen, or on unregister.
pub struct RevealController<S: Scheduler, O = ()> {
    registry: Rc<RefCell<Registry<S::Handle, O>>>,
    scheduler: Rc<S>,
    listeners: Listeners<RevealEvent>,
}

impl<S: Scheduler, O> Clone for RevealController<S, O> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            scheduler: self.scheduler.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<S, O> RevealController<S, O>
where
    S: Scheduler + 'static,
    S::Handle: 'static,
    O: 'static,
{
    pub fn new(scheduler: S) -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_generation: 0,
                records: HashMap::new(),
            })),
            scheduler: Rc::new(scheduler),
            listeners: Listeners::new(),
        }
    }

    /// Starts tracking `id`. The returned [`Registration`] unregisters on drop.
    pub fn register(&self, id: ElementId, order: u32, observation: O) -> Registration {
        let (generation, replaced) = {
            let mut registry = self.registry.borrow_mut();
            let generation = registry.next_generation;
            registry.next_generation += 1;
            let replaced = registry.records.insert(
                id,
                Record {
                    order,
                    generation,
                    phase: Phase::Observing(observation),
                },
            );
            (generation, replaced)
        };
        if replaced.is_some() {
            debug!("element {} registered again, previous record released", id);
        }
        drop(replaced);

        let weak: Weak<RefCell<Registry<S::Handle, O>>> = Rc::downgrade(&self.registry);
        Registration {
            id,
            release: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    remove_generation(&registry, id, generation);
                }
            })),
        }
    }

    /// Drops the record for `id` along with its observation and pending timer.
    pub fn unregister(&self, id: ElementId) {
        let removed = self.registry.borrow_mut().records.remove(&id);
        if removed.is_none() {
            debug!("unregister for unknown element {}", id);
        }
    }

    /// Schedules the element's reveal the first time it is seen.
    ///
    /// Unknown, already scheduled and already revealed elements are ignored.
    pub fn on_visibility_enter(&self, id: ElementId) {
        let mut registry = self.registry.borrow_mut();
        let Some(record) = registry.records.get_mut(&id) else {
            debug!("visibility signal for unregistered element {}, ignored", id);
            return;
        };
        if !matches!(record.phase, Phase::Observing(_)) {
            return;
        }

        let generation = record.generation;
        let delay = reveal_delay(record.order);
        let weak = Rc::downgrade(&self.registry);
        let listeners = self.listeners.clone();
        let handle = self.scheduler.schedule(delay, move || {
            fire::<S::Handle, O>(&weak, &listeners, id, generation);
        });

        // Replacing the phase drops the observation guard: observe once only.
        let observation = std::mem::replace(&mut record.phase, Phase::Scheduled(handle));
        drop(registry);
        drop(observation);
        debug!("element {} reveals in {}ms", id, delay);
    }

    pub fn is_revealed(&self, id: ElementId) -> bool {
        matches!(
            self.registry.borrow().records.get(&id).map(|record| &record.phase),
            Some(Phase::Revealed)
        )
    }

    pub fn is_registered(&self, id: ElementId) -> bool {
        self.registry.borrow().records.contains_key(&id)
    }

    pub fn subscribe(&self, listener: impl Fn(&RevealEvent) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }
}

fn remove_generation<H, O>(registry: &RefCell<Registry<H, O>>, id: ElementId, generation: u64) {
    let removed = {
        let mut registry = registry.borrow_mut();
        let current = registry.records.get(&id).map(|record| record.generation);
        if current == Some(generation) {
            registry.records.remove(&id)
        } else {
            None
        }
    };
    drop(removed);
}

fn fire<H, O>(
    registry: &Weak<RefCell<Registry<H, O>>>,
    listeners: &Listeners<RevealEvent>,
    id: ElementId,
    generation: u64,
) {
    let Some(registry) = registry.upgrade() else {
        return;
    };

    let spent = {
        let mut registry = registry.borrow_mut();
        match registry.records.get_mut(&id) {
            Some(record)
                if record.generation == generation
                    && matches!(record.phase, Phase::Scheduled(_)) =>
            {
                Some(std::mem::replace(&mut record.phase, Phase::Revealed))
            }
            _ => None,
        }
    };

    match spent {
        Some(spent) => {
            drop(spent);
            debug!("element {} revealed", id);
            listeners.emit(&RevealEvent { id });
        }
        None => debug!("stale reveal timer for element {}, ignored", id),
    }
}

/// Keeps an element registered. Dropping it, or calling
/// [`Registration::dispose`], releases the observation and any pending timer.
#[must_use = "dropping a Registration unregisters the element immediately"]
pub struct Registration {
    id: ElementId,
    release: Option<Box<dyn FnOnce()>>,
}

impl Registration {
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn dispose(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    type Action = Box<dyn FnOnce()>;

    struct Pending {
        due: u32,
        seq: u64,
        cancelled: Rc<Cell<bool>>,
        action: Action,
    }

    #[derive(Default)]
    struct Clock {
        now: Cell<u32>,
        ignore_cancel: Cell<bool>,
        seq: Cell<u64>,
        queue: RefCell<Vec<Pending>>,
    }

    /// Virtual-time scheduler; time only moves through `advance`.
    #[derive(Clone, Default)]
    struct ManualScheduler {
        clock: Rc<Clock>,
    }

    struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule<F>(&self, delay_ms: u32, action: F) -> ManualHandle
        where
            F: FnOnce() + 'static,
        {
            let cancelled = Rc::new(Cell::new(false));
            let seq = self.clock.seq.get();
            self.clock.seq.set(seq + 1);
            self.clock.queue.borrow_mut().push(Pending {
                due: self.clock.now.get() + delay_ms,
                seq,
                cancelled: cancelled.clone(),
                action: Box::new(action),
            });
            ManualHandle { cancelled }
        }
    }

    impl ManualScheduler {
        fn advance(&self, by: u32) {
            let target = self.clock.now.get() + by;
            loop {
                let next = {
                    let mut queue = self.clock.queue.borrow_mut();
                    let position = queue
                        .iter()
                        .enumerate()
                        .filter(|(_, pending)| pending.due <= target)
                        .min_by_key(|(_, pending)| (pending.due, pending.seq))
                        .map(|(index, _)| index);
                    position.map(|index| queue.remove(index))
                };
                let Some(pending) = next else { break };
                self.clock.now.set(pending.due);
                if !pending.cancelled.get() || self.clock.ignore_cancel.get() {
                    (pending.action)();
                }
            }
            self.clock.now.set(target);
        }

        /// Lets dropped handles keep firing, like a timer the host failed to clear.
        fn leak_cancelled_timers(&self) {
            self.clock.ignore_cancel.set(true);
        }

        fn now(&self) -> u32 {
            self.clock.now.get()
        }

        fn live_timers(&self) -> usize {
            self.clock
                .queue
                .borrow()
                .iter()
                .filter(|pending| !pending.cancelled.get())
                .count()
        }
    }

    /// Observation guard that records when it is released.
    struct Watch(Rc<Cell<bool>>);

    impl Drop for Watch {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    fn watch() -> (Watch, Rc<Cell<bool>>) {
        let released = Rc::new(Cell::new(false));
        (Watch(released.clone()), released)
    }

    fn controller() -> (RevealController<ManualScheduler, Watch>, ManualScheduler) {
        let scheduler = ManualScheduler::default();
        (RevealController::new(scheduler.clone()), scheduler)
    }

    fn record_reveals(
        controller: &RevealController<ManualScheduler, Watch>,
        scheduler: &ManualScheduler,
    ) -> (Rc<RefCell<Vec<(ElementId, u32)>>>, Subscription) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let log = log.clone();
            let scheduler = scheduler.clone();
            controller.subscribe(move |event| log.borrow_mut().push((event.id, scheduler.now())))
        };
        (log, subscription)
    }

    #[test]
    fn reveals_after_staggered_delay() {
        let (controller, scheduler) = controller();
        let id = ElementId::next();
        let (observation, released) = watch();
        let _registration = controller.register(id, 2, observation);

        controller.on_visibility_enter(id);
        assert!(released.get(), "observation stops once the element is seen");
        assert!(!controller.is_revealed(id));

        scheduler.advance(299);
        assert!(!controller.is_revealed(id));
        scheduler.advance(1);
        assert!(controller.is_revealed(id));
    }

    #[test]
    fn repeated_enter_schedules_one_timer_and_one_reveal() {
        let (controller, scheduler) = controller();
        let (reveals, _subscription) = record_reveals(&controller, &scheduler);
        let id = ElementId::next();
        let _registration = controller.register(id, 1, watch().0);

        controller.on_visibility_enter(id);
        controller.on_visibility_enter(id);
        assert_eq!(scheduler.live_timers(), 1);

        scheduler.advance(1_000);
        controller.on_visibility_enter(id);
        scheduler.advance(1_000);

        assert_eq!(*reveals.borrow(), vec![(id, 150)]);
        assert_eq!(scheduler.live_timers(), 0);
    }

    #[test]
    fn simultaneous_entries_fire_in_order() {
        let (controller, scheduler) = controller();
        let (reveals, _subscription) = record_reveals(&controller, &scheduler);
        let ids: Vec<ElementId> = (0..3).map(|_| ElementId::next()).collect();
        let _registrations: Vec<Registration> = ids
            .iter()
            .enumerate()
            .map(|(order, id)| controller.register(*id, order as u32, watch().0))
            .collect();

        // Signal batch arrives in reverse; order, not arrival, decides timing.
        for id in ids.iter().rev() {
            controller.on_visibility_enter(*id);
        }
        scheduler.advance(1_000);

        assert_eq!(
            *reveals.borrow(),
            vec![(ids[0], 0), (ids[1], 150), (ids[2], 300)]
        );
    }

    #[test]
    fn unregister_before_delay_cancels_reveal() {
        let (controller, scheduler) = controller();
        let (reveals, _subscription) = record_reveals(&controller, &scheduler);
        let id = ElementId::next();
        let registration = controller.register(id, 3, watch().0);

        controller.on_visibility_enter(id);
        scheduler.advance(200);
        registration.dispose();
        assert_eq!(scheduler.live_timers(), 0);

        scheduler.advance(10_000);
        controller.on_visibility_enter(id);
        scheduler.advance(10_000);

        assert!(!controller.is_revealed(id));
        assert!(!controller.is_registered(id));
        assert!(reveals.borrow().is_empty());
    }

    #[test]
    fn unregister_releases_unobserved_element() {
        let (controller, _scheduler) = controller();
        let id = ElementId::next();
        let (observation, released) = watch();
        let registration = controller.register(id, 0, observation);

        assert!(!released.get());
        drop(registration);
        assert!(released.get());
    }

    #[test]
    fn explicit_unregister_cancels_timer() {
        let (controller, scheduler) = controller();
        let id = ElementId::next();
        let _registration = controller.register(id, 1, watch().0);

        controller.on_visibility_enter(id);
        controller.unregister(id);
        scheduler.advance(500);

        assert!(!controller.is_revealed(id));
    }

    #[test]
    fn stale_timer_does_not_reveal_reregistered_element() {
        let scheduler = ManualScheduler::default();
        scheduler.leak_cancelled_timers();
        let controller: RevealController<ManualScheduler, ()> =
            RevealController::new(scheduler.clone());
        let id = ElementId::next();

        let first = controller.register(id, 1, ());
        controller.on_visibility_enter(id);
        let _second = controller.register(id, 5, ());

        scheduler.advance(150);
        assert!(!controller.is_revealed(id));

        drop(first);
        assert!(controller.is_registered(id));
    }

    #[test]
    fn old_registration_does_not_remove_new_record() {
        let (controller, _scheduler) = controller();
        let id = ElementId::next();

        let first = controller.register(id, 0, watch().0);
        let _second = controller.register(id, 0, watch().0);
        drop(first);

        assert!(controller.is_registered(id));
    }

    #[test]
    fn timer_after_controller_dropped_is_ignored() {
        let scheduler = ManualScheduler::default();
        scheduler.leak_cancelled_timers();
        let id = ElementId::next();
        let registration = {
            let controller: RevealController<ManualScheduler, ()> =
                RevealController::new(scheduler.clone());
            let registration = controller.register(id, 1, ());
            controller.on_visibility_enter(id);
            registration
        };
        scheduler.advance(1_000);
        drop(registration);
    }

    #[test]
    fn never_seen_element_never_reveals() {
        let (controller, scheduler) = controller();
        let (reveals, _subscription) = record_reveals(&controller, &scheduler);
        let id = ElementId::next();
        let registration = controller.register(id, 0, watch().0);

        scheduler.advance(5_000);
        drop(registration);

        assert!(reveals.borrow().is_empty());
    }

    #[test]
    fn enter_for_unknown_element_is_noop() {
        let (controller, scheduler) = controller();
        controller.on_visibility_enter(ElementId::from(u64::MAX));
        assert_eq!(scheduler.live_timers(), 0);
    }

    #[test]
    fn delay_grows_with_order() {
        assert_eq!(reveal_delay(0), 0);
        assert_eq!(reveal_delay(4), 600);
        assert_eq!(reveal_delay(u32::MAX), u32::MAX);
    }
}
