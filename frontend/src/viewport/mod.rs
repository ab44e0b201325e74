//! Scroll and visibility driven presentation state.
//!
//! Everything in here is plain Rust with no browser types so it runs under a
//! native `cargo test`. The `dom` module feeds it real window events.

pub mod header;
pub mod listeners;
pub mod reveal;
pub mod scroll;
pub mod sections;

/// Header switches to compact mode once the page is scrolled strictly past this offset.
pub const COMPACT_THRESHOLD: f64 = 50.0;

/// Distance from the viewport top used to pick the active section.
pub const REFERENCE_LINE: f64 = 150.0;

/// Delay between consecutive reveals, multiplied by the element's order.
pub const REVEAL_STAGGER_MS: u32 = 150;

/// Fraction of an element that has to be on screen before it counts as visible.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;
