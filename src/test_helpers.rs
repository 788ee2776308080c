//! Shared test utilities for the vitrine test suite.
//!
//! Builds numbered fixture slides and gallery items, wires controllers to a
//! [`ManualClock`] and an event channel, and drains notifications.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let (mut carousel, clock, rx) = carousel_with_events(4);
//! clock.advance_ms(4000);
//! carousel.poll().unwrap();
//! assert_eq!(index_changes(&drain(&rx)), vec![(1, 4000)]);
//! ```

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crate::carousel::{CarouselEvent, CarouselOptions, TimedCarousel};
use crate::clock::ManualClock;
use crate::strip::{ScrollStrip, StripEvent, StripOptions};
use crate::types::{GalleryItem, ResponsiveImage, Slide};

// =========================================================================
// Fixtures
// =========================================================================

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// `n` slides with ids `1..=n`.
pub fn sample_slides(n: usize) -> Vec<Slide> {
    (1..=n as u32)
        .map(|id| Slide {
            id,
            title: format!("Slide {id}"),
            subtitle: format!("Subtitle {id}"),
            image: ResponsiveImage::uniform(format!("slide-{id}.jpg")),
        })
        .collect()
}

/// `n` gallery items with ids `1..=n`.
pub fn sample_items(n: usize) -> Vec<GalleryItem> {
    (1..=n as u32)
        .map(|id| GalleryItem {
            id,
            image: format!("story-{id}.jpg"),
            caption: format!("Story {id}"),
        })
        .collect()
}

// =========================================================================
// Controllers
// =========================================================================

/// Carousel of `n` slides with stock timing on a manual clock at t=0.
pub fn carousel_with_events(
    n: usize,
) -> (
    TimedCarousel<ManualClock>,
    ManualClock,
    Receiver<CarouselEvent>,
) {
    let clock = ManualClock::new();
    let (tx, rx) = mpsc::channel();
    let carousel = TimedCarousel::new(sample_slides(n), CarouselOptions::default(), clock.clone())
        .unwrap()
        .with_events(tx);
    (carousel, clock, rx)
}

/// Strip of `n` items with the stock epsilon.
pub fn strip_with_events(n: usize) -> (ScrollStrip, Receiver<StripEvent>) {
    let (tx, rx) = mpsc::channel();
    let strip = ScrollStrip::new(sample_items(n), StripOptions::default())
        .unwrap()
        .with_events(tx);
    (strip, rx)
}

// =========================================================================
// Event helpers
// =========================================================================

/// Take every notification delivered so far.
pub fn drain(rx: &Receiver<CarouselEvent>) -> Vec<CarouselEvent> {
    rx.try_iter().collect()
}

/// `(index, at_ms)` of each index change, ignoring auto-advance toggles.
pub fn index_changes(events: &[CarouselEvent]) -> Vec<(usize, u64)> {
    events
        .iter()
        .filter_map(|event| match event {
            CarouselEvent::IndexChanged { index, at_ms } => Some((*index, *at_ms)),
            CarouselEvent::AutoAdvance { .. } => None,
        })
        .collect()
}
