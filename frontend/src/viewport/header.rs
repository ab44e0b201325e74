use super::listeners::{Listeners, Subscription};
use super::scroll::ScrollMonitor;
use super::sections::{self, Section, SectionId};
use super::REFERENCE_LINE;

/// What the header renders from: background mode and highlighted nav entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderState {
    pub is_compact: bool,
    pub active_section: Option<SectionId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportState {
    pub scroll_y: f64,
    pub is_compact: bool,
    pub active_section: Option<SectionId>,
}

impl From<&ViewportState> for HeaderState {
    fn from(state: &ViewportState) -> Self {
        HeaderState {
            is_compact: state.is_compact,
            active_section: state.active_section,
        }
    }
}

/// Runs the scroll monitor and section resolver for each scroll event and
/// publishes one combined [`HeaderState`] whenever either output moved.
pub struct ViewportController {
    monitor: ScrollMonitor,
    active_section: Option<SectionId>,
    listeners: Listeners<HeaderState>,
}

impl ViewportController {
    pub fn new() -> Self {
        Self {
            monitor: ScrollMonitor::new(),
            active_section: None,
            listeners: Listeners::new(),
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f64, sections: &[Section]) -> HeaderState {
        let before = self.header();

        self.monitor.update(scroll_y);
        self.active_section = sections::resolve(sections, REFERENCE_LINE, self.active_section);

        let after = self.header();
        if after != before {
            self.listeners.emit(&after);
        }
        after
    }

    pub fn state(&self) -> ViewportState {
        ViewportState {
            scroll_y: self.monitor.scroll_y(),
            is_compact: self.monitor.is_compact(),
            active_section: self.active_section,
        }
    }

    pub fn header(&self) -> HeaderState {
        HeaderState::from(&self.state())
    }

    pub fn subscribe(&self, listener: impl Fn(&HeaderState) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Four stacked 800px sections seen from `scroll_y`.
    fn page_at(scroll_y: f64) -> Vec<Section> {
        SectionId::ALL
            .iter()
            .map(|&id| {
                let top = id.order() as f64 * 800.0 - scroll_y;
                Section::new(id, top, top + 800.0)
            })
            .collect()
    }

    fn recorded(controller: &ViewportController) -> (Rc<RefCell<Vec<HeaderState>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let seen = seen.clone();
            controller.subscribe(move |state| seen.borrow_mut().push(*state))
        };
        (seen, subscription)
    }

    #[test]
    fn starts_without_active_section() {
        let controller = ViewportController::new();
        assert_eq!(controller.header(), HeaderState::default());
    }

    #[test]
    fn publishes_one_snapshot_per_change() {
        let mut controller = ViewportController::new();
        let (seen, _subscription) = recorded(&controller);

        controller.on_scroll(0.0, &page_at(0.0));
        controller.on_scroll(20.0, &page_at(20.0));
        controller.on_scroll(700.0, &page_at(700.0));

        assert_eq!(
            *seen.borrow(),
            vec![
                HeaderState {
                    is_compact: false,
                    active_section: Some(SectionId::Home),
                },
                HeaderState {
                    is_compact: true,
                    active_section: Some(SectionId::Courses),
                },
            ]
        );
        assert_eq!(controller.state().scroll_y, 700.0);
    }

    #[test]
    fn compact_and_section_change_together() {
        let mut controller = ViewportController::new();
        controller.on_scroll(0.0, &page_at(0.0));
        let (seen, _subscription) = recorded(&controller);

        let header = controller.on_scroll(2_000.0, &page_at(2_000.0));

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0], header);
        assert!(header.is_compact);
        assert_eq!(header.active_section, Some(SectionId::About));
    }

    #[test]
    fn active_section_survives_missing_geometry() {
        let mut controller = ViewportController::new();
        controller.on_scroll(900.0, &page_at(900.0));
        let header = controller.on_scroll(950.0, &[]);
        assert_eq!(header.active_section, Some(SectionId::Courses));
    }

    #[test]
    fn active_section_never_reverts_to_none() {
        let mut controller = ViewportController::new();
        controller.on_scroll(0.0, &page_at(0.0));
        for offset in [100.0, 5_000.0, -300.0, 10_000.0] {
            controller.on_scroll(offset, &page_at(offset));
            assert!(controller.state().active_section.is_some());
        }
    }
}
