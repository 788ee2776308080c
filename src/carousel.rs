//! Timed carousel controller behind the storefront image slider.
//!
//! The controller owns a cursor over a fixed, non-empty slide list and
//! advances it on a fixed interval. Two things suspend auto-advance:
//!
//! - **Hover**: while the pointer is over the slider.
//! - **Cooldown**: for a fixed window after any manual navigation
//!   ([`TimedCarousel::next`], [`TimedCarousel::previous`],
//!   [`TimedCarousel::select`]). Navigating again inside the window restarts it.
//!
//! Auto-advance runs only when neither applies.
//!
//! ## Timers
//!
//! There are no threads and no callbacks. The controller keeps two optional
//! deadlines on its [`Clock`]: the next auto-advance and the end of the
//! cooldown. The host calls [`TimedCarousel::poll`] from its event loop (at
//! [`TimedCarousel::next_wakeup`] or on every frame) and every due deadline
//! fires in chronological order. Every other operation first catches up on
//! deadlines that are already due, so notifications always come out in
//! dispatch order even if the host polls late.
//!
//! ```text
//!  t=0      next()        t=3000 cooldown ends       t=7000
//!  ├──────── paused ────────┤────── interval ──────────┤ advance
//! ```
//!
//! ## Lifecycle
//!
//! [`TimedCarousel::teardown`] cancels both deadlines and closes the
//! notification channel. It is idempotent and also runs on drop. Any other
//! call after teardown fails with [`ControllerError::Lifecycle`].

use serde::Serialize;
use std::sync::mpsc::Sender;
use std::time::Duration;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock, as_millis};
use crate::config::CarouselConfig;
use crate::error::ControllerError;
use crate::types::Slide;

/// Timing of a carousel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselOptions {
    /// Time between automatic advances. Must be non-zero.
    pub interval: Duration,
    /// Pause after manual navigation.
    pub cooldown: Duration,
}

impl CarouselOptions {
    pub fn from_config(config: &CarouselConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.interval_ms),
            cooldown: Duration::from_millis(config.cooldown_ms),
        }
    }
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self::from_config(&CarouselConfig::default())
    }
}

/// Snapshot of the carousel for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselState {
    pub current_index: usize,
    /// False while a manual-navigation cooldown is pending.
    pub auto_advance_enabled: bool,
}

/// State-change notification, stamped with the clock time it happened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CarouselEvent {
    /// The visible slide changed (or was re-applied).
    IndexChanged { index: usize, at_ms: u64 },
    /// The auto-advance timer started or stopped.
    AutoAdvance { running: bool, at_ms: u64 },
}

impl CarouselEvent {
    pub fn at_ms(&self) -> u64 {
        match self {
            CarouselEvent::IndexChanged { at_ms, .. } | CarouselEvent::AutoAdvance { at_ms, .. } => {
                *at_ms
            }
        }
    }
}

#[derive(Debug)]
pub struct TimedCarousel<C: Clock = SystemClock> {
    slides: Vec<Slide>,
    options: CarouselOptions,
    state: CarouselState,
    hovered: bool,
    /// Next auto-advance. Present iff auto-advance is enabled, not hovered and live.
    advance_at: Option<Duration>,
    /// End of the manual-navigation cooldown.
    cooldown_until: Option<Duration>,
    torn_down: bool,
    clock: C,
    events: Option<Sender<CarouselEvent>>,
}

impl<C: Clock> TimedCarousel<C> {
    /// Configure the carousel and arm the first auto-advance one interval from now.
    pub fn new(
        slides: Vec<Slide>,
        options: CarouselOptions,
        clock: C,
    ) -> Result<Self, ControllerError> {
        if slides.is_empty() {
            return Err(ControllerError::Configuration(
                "carousel needs at least one slide".into(),
            ));
        }
        if options.interval.is_zero() {
            return Err(ControllerError::Configuration(
                "carousel interval must be greater than 0".into(),
            ));
        }

        let now = clock.now();
        info!(
            slides = slides.len(),
            interval_ms = as_millis(options.interval),
            cooldown_ms = as_millis(options.cooldown),
            "carousel initialized"
        );
        Ok(Self {
            slides,
            options,
            state: CarouselState {
                current_index: 0,
                auto_advance_enabled: true,
            },
            hovered: false,
            advance_at: Some(now + options.interval),
            cooldown_until: None,
            torn_down: false,
            clock,
            events: None,
        })
    }

    /// Deliver notifications to `tx`.
    pub fn with_events(mut self, tx: Sender<CarouselEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Move to the next slide, wrapping to the first. Does not touch timers.
    pub fn advance(&mut self) -> Result<usize, ControllerError> {
        self.ensure_live()?;
        let now = self.catch_up();
        self.step_forward(now);
        Ok(self.state.current_index)
    }

    /// Move to the previous slide, wrapping to the last. Does not touch timers.
    pub fn retreat(&mut self) -> Result<usize, ControllerError> {
        self.ensure_live()?;
        let now = self.catch_up();
        self.step_back(now);
        Ok(self.state.current_index)
    }

    /// Jump to `index`. Out-of-range requests leave the carousel untouched.
    pub fn go_to(&mut self, index: usize) -> Result<(), ControllerError> {
        self.ensure_live()?;
        self.check_index(index)?;
        let now = self.catch_up();
        self.set_index(index, now);
        Ok(())
    }

    /// Arrow click: advance and start (or restart) the cooldown.
    pub fn next(&mut self) -> Result<usize, ControllerError> {
        self.ensure_live()?;
        let now = self.catch_up();
        self.step_forward(now);
        self.start_cooldown(now);
        Ok(self.state.current_index)
    }

    /// Arrow click: retreat and start (or restart) the cooldown.
    pub fn previous(&mut self) -> Result<usize, ControllerError> {
        self.ensure_live()?;
        let now = self.catch_up();
        self.step_back(now);
        self.start_cooldown(now);
        Ok(self.state.current_index)
    }

    /// Indicator click: jump to `index` and start (or restart) the cooldown.
    pub fn select(&mut self, index: usize) -> Result<(), ControllerError> {
        self.ensure_live()?;
        self.check_index(index)?;
        let now = self.catch_up();
        self.set_index(index, now);
        self.start_cooldown(now);
        Ok(())
    }

    /// Pointer entered (`true`) or left (`false`) the slider.
    ///
    /// Leaving re-arms the timer a full interval out, unless a cooldown is
    /// still pending, in which case the cooldown's expiry re-arms it.
    pub fn set_hovered(&mut self, hovered: bool) -> Result<(), ControllerError> {
        self.ensure_live()?;
        let now = self.catch_up();
        if self.hovered != hovered {
            self.hovered = hovered;
            debug!(hovered, at_ms = as_millis(now), "hover changed");
            self.sync_timer(now);
        }
        Ok(())
    }

    /// The slide list is fixed at construction.
    pub fn replace_slides(&mut self, _slides: Vec<Slide>) -> Result<(), ControllerError> {
        self.ensure_live()?;
        Err(ControllerError::Configuration(
            "slide list cannot change after initialization".into(),
        ))
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Fire every deadline that is due on the clock. Returns the number of
    /// auto-advances that fired.
    pub fn poll(&mut self) -> Result<usize, ControllerError> {
        self.ensure_live()?;
        let now = self.clock.now();
        Ok(self.fire_due(now))
    }

    /// Earliest pending deadline, if any.
    pub fn next_wakeup(&self) -> Option<Duration> {
        match (self.advance_at, self.cooldown_until) {
            (Some(a), Some(c)) => Some(a.min(c)),
            (a, c) => a.or(c),
        }
    }

    /// Cancel all pending deadlines and close the notification channel.
    /// Safe to call any number of times.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.advance_at = None;
        self.cooldown_until = None;
        self.events = None;
        info!(index = self.state.current_index, "carousel torn down");
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.state.current_index]
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn options(&self) -> CarouselOptions {
        self.options
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the auto-advance timer is currently armed.
    pub fn is_auto_advancing(&self) -> bool {
        self.advance_at.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ensure_live(&self) -> Result<(), ControllerError> {
        if self.torn_down {
            Err(ControllerError::Lifecycle)
        } else {
            Ok(())
        }
    }

    fn check_index(&self, index: usize) -> Result<(), ControllerError> {
        if index < self.slides.len() {
            Ok(())
        } else {
            Err(ControllerError::OutOfRange {
                index,
                len: self.slides.len(),
            })
        }
    }

    fn catch_up(&mut self) -> Duration {
        let now = self.clock.now();
        self.fire_due(now);
        now
    }

    fn fire_due(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        loop {
            if let Some(until) = self.cooldown_until.filter(|until| *until <= now) {
                self.cooldown_until = None;
                self.state.auto_advance_enabled = true;
                debug!(at_ms = as_millis(until), "cooldown elapsed");
                self.sync_timer(until);
                continue;
            }
            if let Some(at) = self.advance_at.filter(|at| *at <= now) {
                self.advance_at = Some(at + self.options.interval);
                self.step_forward(at);
                fired += 1;
                continue;
            }
            return fired;
        }
    }

    /// Arm or cancel the advance timer to match hover/cooldown state.
    /// An armed timer is never re-armed in place.
    fn sync_timer(&mut self, from: Duration) {
        let wanted = self.state.auto_advance_enabled && !self.hovered && !self.torn_down;
        if wanted == self.advance_at.is_some() {
            return;
        }
        self.advance_at = wanted.then(|| from + self.options.interval);
        debug!(running = wanted, at_ms = as_millis(from), "auto-advance toggled");
        self.notify(CarouselEvent::AutoAdvance {
            running: wanted,
            at_ms: as_millis(from),
        });
    }

    fn start_cooldown(&mut self, now: Duration) {
        if self.options.cooldown.is_zero() {
            // Nothing to wait out: restart the interval from this click
            self.cooldown_until = None;
            self.state.auto_advance_enabled = true;
            if self.advance_at.is_some() {
                self.advance_at = Some(now + self.options.interval);
            }
            return;
        }
        let until = now + self.options.cooldown;
        if self.cooldown_until.is_some() {
            debug!(until_ms = as_millis(until), "cooldown restarted");
        }
        self.cooldown_until = Some(until);
        self.state.auto_advance_enabled = false;
        self.sync_timer(now);
    }

    fn step_forward(&mut self, at: Duration) {
        let len = self.slides.len();
        self.set_index((self.state.current_index + 1) % len, at);
    }

    fn step_back(&mut self, at: Duration) {
        let len = self.slides.len();
        self.set_index((self.state.current_index + len - 1) % len, at);
    }

    fn set_index(&mut self, index: usize, at: Duration) {
        self.state.current_index = index;
        debug!(index, at_ms = as_millis(at), "slide changed");
        self.notify(CarouselEvent::IndexChanged {
            index,
            at_ms: as_millis(at),
        });
    }

    fn notify(&self, event: CarouselEvent) {
        if let Some(tx) = &self.events {
            tx.send(event).ok();
        }
    }
}

impl<C: Clock> Drop for TimedCarousel<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
