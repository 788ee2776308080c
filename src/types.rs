//! Shared value types handed to the controllers at configuration time.
//!
//! Slides and gallery items are created once, read from `showcase.toml` or
//! the stock content, and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::config::BreakpointsConfig;

/// Viewport size class used to pick image sources and scroll increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    /// Classify a viewport width (CSS pixels) against the configured breakpoints.
    ///
    /// Boundaries are inclusive on the lower edge, like `min-width` media queries:
    /// `768` is already `Tablet` with the stock breakpoints.
    pub fn from_width(width: u32, breakpoints: &BreakpointsConfig) -> Self {
        if width >= breakpoints.desktop {
            Breakpoint::Desktop
        } else if width >= breakpoints.tablet {
            Breakpoint::Tablet
        } else {
            Breakpoint::Mobile
        }
    }

    /// Whether this breakpoint uses the compact tier of breakpoint-dependent constants.
    pub fn is_compact(self) -> bool {
        self == Breakpoint::Mobile
    }
}

/// Image references for one slide, keyed by breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponsiveImage {
    pub desktop: String,
    pub tablet: String,
    pub mobile: String,
}

impl ResponsiveImage {
    /// Same reference for every breakpoint.
    pub fn uniform(src: impl Into<String>) -> Self {
        let src = src.into();
        Self {
            desktop: src.clone(),
            tablet: src.clone(),
            mobile: src,
        }
    }

    pub fn for_breakpoint(&self, breakpoint: Breakpoint) -> &str {
        match breakpoint {
            Breakpoint::Desktop => &self.desktop,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Mobile => &self.mobile,
        }
    }

    /// The reference a `<picture>` element would load at this viewport width.
    pub fn source_for(&self, width: u32, breakpoints: &BreakpointsConfig) -> &str {
        self.for_breakpoint(Breakpoint::from_width(width, breakpoints))
    }
}

/// One carousel slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slide {
    pub id: u32,
    pub title: String,
    pub subtitle: String,
    pub image: ResponsiveImage,
}

/// One item of the horizontally scrolling gallery strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryItem {
    pub id: u32,
    pub image: String,
    pub caption: String,
}
