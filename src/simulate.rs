//! Deterministic replays of the controllers on virtual time.
//!
//! [`simulate`] drives a [`TimedCarousel`] on a [`ManualClock`] through an
//! interaction script and records everything that happened as a flat
//! timeline. [`probe_strip`] feeds a list of scroll offsets to a
//! [`ScrollStrip`] and records the boundary flags after each one. Both back
//! the CLI, and both are handy for checking timing changes before they ship.
//!
//! Rejected steps (an out-of-range index, anything after teardown) are
//! recorded in the timeline instead of aborting the replay.

use serde::Serialize;
use std::sync::mpsc::{self, Receiver};
use thiserror::Error;
use tracing::debug;

use crate::carousel::{CarouselEvent, CarouselOptions, CarouselState, TimedCarousel};
use crate::clock::{ManualClock, as_millis};
use crate::error::ControllerError;
use crate::script::{Action, Step};
use crate::strip::{ScrollBoundaryState, ScrollStrip, StripOptions};
use crate::types::{GalleryItem, Slide};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Controller setup failed: {0}")]
    Controller(#[from] ControllerError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    /// Notification emitted by the carousel.
    Event { event: CarouselEvent },
    /// Scripted step the carousel accepted.
    Applied { at_ms: u64, action: Action },
    /// Scripted step the carousel refused.
    Rejected {
        at_ms: u64,
        action: Action,
        error: String,
    },
}

impl Entry {
    pub fn at_ms(&self) -> u64 {
        match self {
            Entry::Event { event } => event.at_ms(),
            Entry::Applied { at_ms, .. } | Entry::Rejected { at_ms, .. } => *at_ms,
        }
    }
}

/// Outcome of a carousel replay.
#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    pub slides: Vec<Slide>,
    pub interval_ms: u64,
    pub cooldown_ms: u64,
    /// Virtual time the replay ran to.
    pub duration_ms: u64,
    pub entries: Vec<Entry>,
    /// Number of timer-driven advances.
    pub auto_advances: usize,
    pub final_state: CarouselState,
    pub torn_down: bool,
}

impl Simulation {
    /// Indices the carousel showed, in order, starting with the initial slide.
    pub fn index_trail(&self) -> Vec<usize> {
        let mut trail = vec![0];
        trail.extend(self.entries.iter().filter_map(|entry| match entry {
            Entry::Event {
                event: CarouselEvent::IndexChanged { index, .. },
            } => Some(*index),
            _ => None,
        }));
        trail
    }
}

/// Replay `steps` against a fresh carousel and run the clock to `duration_ms`.
///
/// Steps later than `duration_ms` still run; the replay then ends at the last
/// step instead.
pub fn simulate(
    slides: Vec<Slide>,
    options: CarouselOptions,
    steps: &[Step],
    duration_ms: u64,
) -> Result<Simulation, SimulationError> {
    let clock = ManualClock::new();
    let (tx, rx) = mpsc::channel();
    let mut carousel = TimedCarousel::new(slides, options, clock.clone())?.with_events(tx);

    let mut entries = Vec::new();
    let mut auto_advances = 0;

    for step in steps {
        clock.set(std::time::Duration::from_millis(step.at_ms));
        // Fire timers up to this instant first so the step sees settled state
        if let Ok(fired) = carousel.poll() {
            auto_advances += fired;
        }
        drain_into(&rx, &mut entries);

        match apply(&mut carousel, step.action) {
            Ok(()) => entries.push(Entry::Applied {
                at_ms: step.at_ms,
                action: step.action,
            }),
            Err(err) => {
                debug!(at_ms = step.at_ms, action = %step.action, %err, "step rejected");
                entries.push(Entry::Rejected {
                    at_ms: step.at_ms,
                    action: step.action,
                    error: err.to_string(),
                });
            }
        }
        drain_into(&rx, &mut entries);
    }

    let end = steps
        .last()
        .map_or(duration_ms, |step| step.at_ms.max(duration_ms));
    clock.set(std::time::Duration::from_millis(end));
    if let Ok(fired) = carousel.poll() {
        auto_advances += fired;
    }
    drain_into(&rx, &mut entries);

    Ok(Simulation {
        slides: carousel.slides().to_vec(),
        interval_ms: as_millis(options.interval),
        cooldown_ms: as_millis(options.cooldown),
        duration_ms: end,
        entries,
        auto_advances,
        final_state: carousel.state(),
        torn_down: carousel.is_torn_down(),
    })
}

fn apply(carousel: &mut TimedCarousel<ManualClock>, action: Action) -> Result<(), ControllerError> {
    match action {
        Action::Next => carousel.next().map(drop),
        Action::Previous => carousel.previous().map(drop),
        Action::GoTo(index) => carousel.go_to(index),
        Action::Select(index) => carousel.select(index),
        Action::Hover => carousel.set_hovered(true),
        Action::Unhover => carousel.set_hovered(false),
        Action::Teardown => {
            carousel.teardown();
            Ok(())
        }
    }
}

fn drain_into(rx: &Receiver<CarouselEvent>, entries: &mut Vec<Entry>) {
    entries.extend(rx.try_iter().map(|event| Entry::Event { event }));
}

/// One observation of the gallery strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StripRow {
    pub offset: f64,
    pub state: ScrollBoundaryState,
    /// Whether this observation flipped a flag.
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StripProbe {
    pub item_count: usize,
    pub content_extent: f64,
    pub viewport_extent: f64,
    pub rows: Vec<StripRow>,
}

/// Observe each offset in turn on a strip of the given extents.
pub fn probe_strip(
    items: Vec<GalleryItem>,
    options: StripOptions,
    content_extent: f64,
    viewport_extent: f64,
    offsets: &[f64],
) -> Result<StripProbe, SimulationError> {
    let mut strip = ScrollStrip::new(items, options)?;
    let mut rows = Vec::with_capacity(offsets.len());
    for &offset in offsets {
        let before = strip.state();
        let state = strip.observe(offset, content_extent, viewport_extent)?;
        rows.push(StripRow {
            offset,
            state,
            changed: state != before,
        });
    }
    Ok(StripProbe {
        item_count: strip.items().len(),
        content_extent,
        viewport_extent,
        rows,
    })
}
