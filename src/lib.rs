//! # Vitrine
//!
//! Interaction controllers for a storefront's two image widgets: an
//! auto-advancing slider and a horizontally scrolling gallery strip. The
//! controllers own state and timing only. Layout, rendering, and scroll
//! physics belong to whatever hosts them.
//!
//! # Architecture: State In, Notifications Out
//!
//! Each controller is configured once with an immutable list of content, then
//! driven by discrete operations. Every change is published as an event on an
//! optional [`std::sync::mpsc`] channel, stamped with the virtual time it
//! happened at:
//!
//! ```text
//! host input (click, hover, scroll)  →  controller  →  Sender<Event>  →  host view
//!                         clock time  →  poll()     ↗
//! ```
//!
//! The slider runs on a [`clock::Clock`] rather than wall-clock timers. Pending
//! work is held as deadlines and fired by [`carousel::TimedCarousel::poll`],
//! which every operation also calls first. Hosts sleep until
//! [`carousel::TimedCarousel::next_wakeup`]; tests and the `simulate` command
//! drive a [`clock::ManualClock`] and get exact, repeatable timelines.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`carousel`] | Auto-advancing slider: cyclic index, interval timer, post-interaction cooldown, hover pause |
//! | [`strip`] | Gallery strip: scroll boundary flags, directional scroll requests, per-breakpoint increments |
//! | [`clock`] | `Clock` trait with a monotonic system clock and a hand-driven manual clock |
//! | [`config`] | `config.toml` loading, validation, and merging over stock defaults |
//! | [`showcase`] | `showcase.toml` slides and gallery items, with the stock storefront content |
//! | [`script`] | `AT:ACTION` interaction scripts for replays |
//! | [`simulate`] | Deterministic replays of both controllers |
//! | [`types`] | Shared value types: `Slide`, `GalleryItem`, `ResponsiveImage`, `Breakpoint` |
//! | [`error`] | `ControllerError`, shared by both controllers |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## Deadlines Over Spawned Timers
//!
//! A controller never spawns a thread or schedules a callback. The interval and
//! cooldown are two optional deadlines on the controller itself, so teardown
//! only has to clear them, and there is no window in which a stale timer can
//! fire into a dropped view. When several deadlines have passed by the time a
//! controller is polled, they fire in chronological order.
//!
//! ## Immutable Content
//!
//! Slides and gallery items are fixed at construction. A controller that accepted
//! a new slide list would have to decide what the current index means afterwards;
//! rebuilding the controller makes that decision explicit in the host.
//!
//! ## Teardown Is Terminal
//!
//! [`carousel::TimedCarousel::teardown`] and [`strip::ScrollStrip::teardown`]
//! clear pending deadlines and close the event channel. Both run on drop. Any
//! operation afterwards returns [`error::ControllerError::Lifecycle`].

pub mod carousel;
pub mod clock;
pub mod config;
pub mod error;
pub mod output;
pub mod script;
pub mod showcase;
pub mod simulate;
pub mod strip;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
