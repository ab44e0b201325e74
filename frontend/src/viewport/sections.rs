use log::trace;

/// Navigable sections, declared in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    Courses,
    About,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 4] = [
        SectionId::Home,
        SectionId::Courses,
        SectionId::About,
        SectionId::Contact,
    ];

    /// DOM id of the section's anchor element.
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::Courses => "courses",
            SectionId::About => "about",
            SectionId::Contact => "contact",
        }
    }

    pub fn order(self) -> u32 {
        match self {
            SectionId::Home => 0,
            SectionId::Courses => 1,
            SectionId::About => 2,
            SectionId::Contact => 3,
        }
    }

    /// Translation key of the navigation label.
    pub fn nav_key(self) -> &'static str {
        match self {
            SectionId::Home => "header.nav.home",
            SectionId::Courses => "header.nav.courses",
            SectionId::About => "header.nav.about",
            SectionId::Contact => "header.nav.contact",
        }
    }
}

/// Viewport-relative geometry of one section at the moment of resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub order: u32,
    pub top: f64,
    pub bottom: f64,
}

impl Section {
    pub fn new(id: SectionId, top: f64, bottom: f64) -> Self {
        Self {
            id,
            order: id.order(),
            top,
            bottom,
        }
    }

    fn contains(&self, line: f64) -> bool {
        self.top <= line && line <= self.bottom
    }
}

/// Source of section geometry. `None` means the anchor is not in the document.
pub trait SectionLayout {
    fn bounds(&self, id: SectionId) -> Option<(f64, f64)>;
}

/// Measures every known section, skipping the ones without an anchor.
pub fn measure(layout: &impl SectionLayout) -> Vec<Section> {
    SectionId::ALL
        .iter()
        .filter_map(|&id| match layout.bounds(id) {
            Some((top, bottom)) => Some(Section::new(id, top, bottom)),
            None => {
                trace!("section anchor #{} missing, skipped", id.anchor());
                None
            }
        })
        .collect()
}

/// Picks the section crossing `reference_line`.
///
/// Overlaps go to the earliest section in document order. When nothing
/// matches, `previous` is kept so the highlight does not flicker off in gaps.
pub fn resolve(
    sections: &[Section],
    reference_line: f64,
    previous: Option<SectionId>,
) -> Option<SectionId> {
    sections
        .iter()
        .filter(|section| section.contains(reference_line))
        .min_by_key(|section| section.order)
        .map(|section| section.id)
        .or(previous)
}
