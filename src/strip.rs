//! Bounded horizontal scroll strip behind the storefront gallery.
//!
//! The scroll surface belongs to the host. The strip only sees the offsets the
//! host reports through [`ScrollStrip::observe`] and answers whether the
//! gallery can scroll further in each direction. Arrow clicks go through
//! [`ScrollStrip::scroll_by`], which hands back a [`ScrollRequest`] for the
//! host to apply as a smooth scroll relative to its live offset. The visitor
//! may also scroll by hand between observations, so the strip never assumes
//! its last observation is current.
//!
//! Boundary rules, with `max = content − viewport`:
//!
//! ```text
//! can_scroll_left  = offset > 0
//! can_scroll_right = offset < max − epsilon
//! ```
//!
//! The epsilon absorbs sub-pixel rounding at the right edge.

use serde::Serialize;
use std::sync::mpsc::Sender;
use tracing::{debug, info};

use crate::config::{BreakpointsConfig, StripConfig};
use crate::error::ControllerError;
use crate::types::{Breakpoint, GalleryItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Left,
    Right,
}

impl ScrollDirection {
    fn sign(self) -> f64 {
        match self {
            ScrollDirection::Left => -1.0,
            ScrollDirection::Right => 1.0,
        }
    }
}

/// Which arrows the host should enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollBoundaryState {
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
}

impl ScrollBoundaryState {
    /// Derive the flags from one measurement of the scroll surface.
    pub fn measure(offset: f64, content_extent: f64, viewport_extent: f64, epsilon: f64) -> Self {
        Self {
            can_scroll_left: offset > 0.0,
            can_scroll_right: offset < content_extent - viewport_extent - epsilon,
        }
    }

    pub fn allows(self, direction: ScrollDirection) -> bool {
        match direction {
            ScrollDirection::Left => self.can_scroll_left,
            ScrollDirection::Right => self.can_scroll_right,
        }
    }
}

/// Before the first observation the strip sits at its left edge and assumes
/// the content overflows.
impl Default for ScrollBoundaryState {
    fn default() -> Self {
        Self {
            can_scroll_left: false,
            can_scroll_right: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripOptions {
    pub boundary_epsilon: f64,
}

impl StripOptions {
    pub fn from_config(config: &StripConfig) -> Self {
        Self {
            boundary_epsilon: config.boundary_epsilon,
        }
    }
}

impl Default for StripOptions {
    fn default() -> Self {
        Self::from_config(&StripConfig::default())
    }
}

/// Two-tier scroll-by amount: compact viewports scroll by less.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollIncrement {
    pub compact: f64,
    pub wide: f64,
}

impl ScrollIncrement {
    pub fn from_config(config: &StripConfig) -> Self {
        Self {
            compact: config.compact_increment,
            wide: config.wide_increment,
        }
    }

    pub fn for_breakpoint(&self, breakpoint: Breakpoint) -> f64 {
        if breakpoint.is_compact() {
            self.compact
        } else {
            self.wide
        }
    }

    pub fn for_width(&self, width: u32, breakpoints: &BreakpointsConfig) -> f64 {
        self.for_breakpoint(Breakpoint::from_width(width, breakpoints))
    }
}

impl Default for ScrollIncrement {
    fn default() -> Self {
        Self::from_config(&StripConfig::default())
    }
}

/// Smooth scroll the host should perform, relative to its live offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub direction: ScrollDirection,
    /// Signed distance: negative scrolls left.
    pub delta: f64,
}

impl ScrollRequest {
    /// Target offset given the surface's current offset. The host clamps it
    /// to its scrollable range, as browsers do.
    pub fn target_from(&self, current_offset: f64) -> f64 {
        current_offset + self.delta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StripEvent {
    BoundaryChanged(ScrollBoundaryState),
}

#[derive(Debug)]
pub struct ScrollStrip {
    items: Vec<GalleryItem>,
    options: StripOptions,
    state: ScrollBoundaryState,
    torn_down: bool,
    events: Option<Sender<StripEvent>>,
}

impl ScrollStrip {
    pub fn new(items: Vec<GalleryItem>, options: StripOptions) -> Result<Self, ControllerError> {
        if items.is_empty() {
            return Err(ControllerError::Configuration(
                "gallery strip needs at least one item".into(),
            ));
        }
        let epsilon = options.boundary_epsilon;
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ControllerError::Configuration(format!(
                "boundary epsilon must be finite and >= 0, got {epsilon}"
            )));
        }
        info!(items = items.len(), epsilon, "gallery strip initialized");
        Ok(Self {
            items,
            options,
            state: ScrollBoundaryState::default(),
            torn_down: false,
            events: None,
        })
    }

    /// Deliver notifications to `tx`.
    pub fn with_events(mut self, tx: Sender<StripEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Recompute the boundary flags from a reported scroll position.
    ///
    /// Notifies only when a flag flipped. Non-finite measurements are
    /// rejected and leave the flags untouched.
    pub fn observe(
        &mut self,
        offset: f64,
        content_extent: f64,
        viewport_extent: f64,
    ) -> Result<ScrollBoundaryState, ControllerError> {
        self.ensure_live()?;
        for (name, value) in [
            ("offset", offset),
            ("content extent", content_extent),
            ("viewport extent", viewport_extent),
        ] {
            if !value.is_finite() {
                return Err(ControllerError::Configuration(format!(
                    "scroll {name} must be finite, got {value}"
                )));
            }
        }
        let next = ScrollBoundaryState::measure(
            offset,
            content_extent,
            viewport_extent,
            self.options.boundary_epsilon,
        );
        if next != self.state {
            debug!(
                offset,
                left = next.can_scroll_left,
                right = next.can_scroll_right,
                "scroll boundary changed"
            );
            self.state = next;
            if let Some(tx) = &self.events {
                tx.send(StripEvent::BoundaryChanged(next)).ok();
            }
        }
        Ok(self.state)
    }

    /// Ask the host to scroll `amount` in `direction`.
    ///
    /// Returns `None` when that direction is already at its boundary.
    pub fn scroll_by(
        &self,
        direction: ScrollDirection,
        amount: f64,
    ) -> Result<Option<ScrollRequest>, ControllerError> {
        self.ensure_live()?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ControllerError::Configuration(format!(
                "scroll amount must be finite and > 0, got {amount}"
            )));
        }
        if !self.state.allows(direction) {
            debug!(?direction, "scroll request at boundary ignored");
            return Ok(None);
        }
        Ok(Some(ScrollRequest {
            direction,
            delta: direction.sign() * amount,
        }))
    }

    /// Stop reporting and close the notification channel. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.events = None;
        info!("gallery strip torn down");
    }

    pub fn state(&self) -> ScrollBoundaryState {
        self.state
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn ensure_live(&self) -> Result<(), ControllerError> {
        if self.torn_down {
            Err(ControllerError::Lifecycle)
        } else {
            Ok(())
        }
    }
}

impl Drop for ScrollStrip {
    fn drop(&mut self) {
        self.teardown();
    }
}
