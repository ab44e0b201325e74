use log::debug;

use super::listeners::{Listeners, Subscription};
use super::COMPACT_THRESHOLD;

/// `true` once the offset is strictly past [`COMPACT_THRESHOLD`].
pub fn is_compact_offset(scroll_y: f64) -> bool {
    scroll_y > COMPACT_THRESHOLD
}

/// Tracks the vertical scroll offset and the derived compact-header flag.
///
/// Listeners only hear about flips of the flag, never about plain offset changes.
pub struct ScrollMonitor {
    scroll_y: f64,
    is_compact: bool,
    listeners: Listeners<bool>,
}

impl ScrollMonitor {
    pub fn new() -> Self {
        Self {
            scroll_y: 0.0,
            is_compact: false,
            listeners: Listeners::new(),
        }
    }

    pub fn update(&mut self, scroll_y: f64) -> bool {
        self.scroll_y = scroll_y;
        let is_compact = is_compact_offset(scroll_y);
        if is_compact != self.is_compact {
            debug!("header compact mode {} at offset {}", is_compact, scroll_y);
            self.is_compact = is_compact;
            self.listeners.emit(&is_compact);
        }
        is_compact
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn is_compact(&self) -> bool {
        self.is_compact
    }

    pub fn subscribe(&self, listener: impl Fn(&bool) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }
}

impl Default for ScrollMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(monitor: &ScrollMonitor) -> (Rc<RefCell<Vec<bool>>>, Subscription) {
        let flips = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let flips = flips.clone();
            monitor.subscribe(move |compact| flips.borrow_mut().push(*compact))
        };
        (flips, subscription)
    }

    #[test]
    fn exactly_fifty_is_not_compact() {
        let mut monitor = ScrollMonitor::new();
        assert!(!monitor.update(50.0));
        assert!(monitor.update(50.5));
        assert!(!monitor.update(49.0));
    }

    #[test]
    fn odd_offsets_are_not_compact() {
        let mut monitor = ScrollMonitor::new();
        assert!(!monitor.update(-30.0));
        assert!(!monitor.update(f64::NAN));
    }

    #[test]
    fn notifies_only_on_flips() {
        let mut monitor = ScrollMonitor::new();
        let (flips, _subscription) = recorded(&monitor);

        monitor.update(10.0);
        monitor.update(120.0);
        monitor.update(120.0);
        monitor.update(300.0);
        monitor.update(50.0);
        monitor.update(0.0);

        assert_eq!(*flips.borrow(), vec![true, false]);
        assert_eq!(monitor.scroll_y(), 0.0);
    }

    #[test]
    fn repeated_value_gives_same_result_without_notification() {
        let mut monitor = ScrollMonitor::new();
        let (flips, _subscription) = recorded(&monitor);

        let first = monitor.update(80.0);
        let second = monitor.update(80.0);

        assert_eq!(first, second);
        assert_eq!(flips.borrow().len(), 1);
    }

    proptest! {
        #[test]
        fn compact_iff_past_threshold(offset in -1_000.0f64..10_000.0) {
            let mut monitor = ScrollMonitor::new();
            prop_assert_eq!(monitor.update(offset), offset > 50.0);
            prop_assert_eq!(monitor.is_compact(), offset > 50.0);
        }
    }
}
