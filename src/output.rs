//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Slides and gallery items are shown by positional index and title, with
//! image sources as indented `Source:` context lines. Timelines lead with the
//! virtual time of each line so a replay reads top to bottom like a log.
//!
//! # Output Format
//!
//! ## Simulate
//!
//! ```text
//! Carousel (4 slides, interval 4000ms, cooldown 3000ms)
//!    1.000s  > next
//!    1.000s  → 002 Premium Materials
//!    1.000s  auto-advance paused
//!    4.000s  auto-advance resumed
//!    8.000s  → 003 Timeless Design
//!    9.000s  ! goto=7 rejected: Index 7 out of range for 4 slides
//!   12.000s  → 004 Luxury Collection
//!   16.000s  → 001 Artisan Craftsmanship
//!
//! Ran 16.000s: 3 auto-advances, ending on 001 Artisan Craftsmanship
//! ```
//!
//! ## Strip
//!
//! ```text
//! Gallery strip (6 items, content 1000px, viewport 300px)
//!     offset 0px: ← off, → on
//!     offset 700px: ← on, → off (changed)
//! Scroll increment at 1024px: 320px
//! ```
//!
//! ## Check
//!
//! ```text
//! Slides
//! 001 Artisan Craftsmanship
//!     Handcrafted with precision and passion
//!     Source: mood-2.jpeg
//!
//! Gallery
//! 001 Moodboard
//!     Source: story-5.jpg
//!
//! Config
//!     config.toml
//!     interval 4000ms, cooldown 3000ms
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure and do no I/O.

use crate::carousel::CarouselEvent;
use crate::config::WidgetConfig;
use crate::showcase::Showcase;
use crate::simulate::{Entry, Simulation, StripProbe};
use crate::strip::ScrollBoundaryState;
use crate::types::{ResponsiveImage, Slide};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Virtual time as seconds with millisecond precision, right-aligned.
fn format_time(ms: u64) -> String {
    format!("{:>8}", format!("{}.{:03}s", ms / 1000, ms % 1000))
}

/// Slide header: 1-based index + title. Unknown indices fall back to the index alone.
fn slide_line(index: usize, slides: &[Slide]) -> String {
    match slides.get(index) {
        Some(slide) => format!("{} {}", format_index(index + 1), slide.title),
        None => format_index(index + 1),
    }
}

/// One `Source:` line when all breakpoints share an image, one per breakpoint otherwise.
fn source_lines(image: &ResponsiveImage, depth: usize) -> Vec<String> {
    let pad = indent(depth);
    if image.desktop == image.tablet && image.tablet == image.mobile {
        vec![format!("{}Source: {}", pad, image.desktop)]
    } else {
        vec![
            format!("{}Source (desktop): {}", pad, image.desktop),
            format!("{}Source (tablet): {}", pad, image.tablet),
            format!("{}Source (mobile): {}", pad, image.mobile),
        ]
    }
}

fn flag(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn boundary_line(state: ScrollBoundaryState) -> String {
    format!(
        "← {}, → {}",
        flag(state.can_scroll_left),
        flag(state.can_scroll_right)
    )
}

/// Trim trailing zeros from pixel values: `320.0` → `320`, `12.5` → `12.5`.
fn format_px(value: f64) -> String {
    format!("{}px", value)
}

// ============================================================================
// Simulate
// ============================================================================

/// Format a single timeline entry.
pub fn format_entry(entry: &Entry, slides: &[Slide]) -> String {
    let time = format_time(entry.at_ms());
    match entry {
        Entry::Event {
            event: CarouselEvent::IndexChanged { index, .. },
        } => format!("{}  → {}", time, slide_line(*index, slides)),
        Entry::Event {
            event: CarouselEvent::AutoAdvance { running, .. },
        } => {
            let verb = if *running { "resumed" } else { "paused" };
            format!("{}  auto-advance {}", time, verb)
        }
        Entry::Applied { action, .. } => format!("{}  > {}", time, action),
        Entry::Rejected { action, error, .. } => {
            format!("{}  ! {} rejected: {}", time, action, error)
        }
    }
}

/// Format a carousel replay: header, one line per timeline entry, summary.
pub fn format_simulation(sim: &Simulation) -> Vec<String> {
    let mut lines = vec![format!(
        "Carousel ({} slides, interval {}ms, cooldown {}ms)",
        sim.slides.len(),
        sim.interval_ms,
        sim.cooldown_ms
    )];
    lines.extend(sim.entries.iter().map(|e| format_entry(e, &sim.slides)));
    lines.push(String::new());

    let advances = match sim.auto_advances {
        1 => "1 auto-advance".to_string(),
        n => format!("{} auto-advances", n),
    };
    let mut summary = format!(
        "Ran {}: {}, ending on {}",
        format_time(sim.duration_ms).trim_start(),
        advances,
        slide_line(sim.final_state.current_index, &sim.slides)
    );
    if sim.torn_down {
        summary.push_str(" (torn down)");
    }
    lines.push(summary);
    lines
}

/// Print a carousel replay to stdout.
pub fn print_simulation(sim: &Simulation) {
    for line in format_simulation(sim) {
        println!("{}", line);
    }
}

// ============================================================================
// Strip
// ============================================================================

/// Format a strip probe, optionally with the scroll increment for a viewport width.
pub fn format_strip_probe(probe: &StripProbe, increment: Option<(u32, f64)>) -> Vec<String> {
    let mut lines = vec![format!(
        "Gallery strip ({} items, content {}, viewport {})",
        probe.item_count,
        format_px(probe.content_extent),
        format_px(probe.viewport_extent)
    )];
    for row in &probe.rows {
        let changed = if row.changed { " (changed)" } else { "" };
        lines.push(format!(
            "{}offset {}: {}{}",
            indent(1),
            format_px(row.offset),
            boundary_line(row.state),
            changed
        ));
    }
    if let Some((width, amount)) = increment {
        lines.push(format!(
            "Scroll increment at {}px: {}",
            width,
            format_px(amount)
        ));
    }
    lines
}

/// Print a strip probe to stdout.
pub fn print_strip_probe(probe: &StripProbe, increment: Option<(u32, f64)>) {
    for line in format_strip_probe(probe, increment) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the resolved content and configuration.
///
/// `has_config_file` / `has_showcase_file` say whether the values came from the
/// source directory or from stock defaults.
pub fn format_check_output(
    showcase: &Showcase,
    config: &WidgetConfig,
    has_config_file: bool,
    has_showcase_file: bool,
) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Slides".to_string());
    for (i, slide) in showcase.slides.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), slide.title));
        if !slide.subtitle.is_empty() {
            lines.push(format!("{}{}", indent(1), slide.subtitle));
        }
        lines.extend(source_lines(&slide.image, 1));
    }

    lines.push(String::new());
    lines.push("Gallery".to_string());
    for (i, item) in showcase.gallery.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), item.caption));
        lines.push(format!("{}Source: {}", indent(1), item.image));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if has_config_file {
        lines.push(format!("{}config.toml", indent(1)));
    }
    if has_showcase_file {
        lines.push(format!("{}showcase.toml", indent(1)));
    }
    if !has_config_file && !has_showcase_file {
        lines.push(format!("{}stock defaults", indent(1)));
    }
    lines.push(format!(
        "{}interval {}ms, cooldown {}ms",
        indent(1),
        config.carousel.interval_ms,
        config.carousel.cooldown_ms
    ));
    lines.push(format!(
        "{}scroll {} / {} (breakpoint {}px), epsilon {}",
        indent(1),
        format_px(config.strip.compact_increment),
        format_px(config.strip.wide_increment),
        config.breakpoints.tablet,
        format_px(config.strip.boundary_epsilon)
    ));

    lines
}

/// Print check output to stdout.
pub fn print_check_output(
    showcase: &Showcase,
    config: &WidgetConfig,
    has_config_file: bool,
    has_showcase_file: bool,
) {
    for line in format_check_output(showcase, config, has_config_file, has_showcase_file) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::CarouselState;
    use crate::script::Action;
    use crate::showcase::stock_showcase;
    use crate::simulate::StripRow;
    use crate::test_helpers::*;

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn format_time_seconds_and_millis() {
        assert_eq!(format_time(0), "  0.000s");
        assert_eq!(format_time(4000), "  4.000s");
        assert_eq!(format_time(12345), " 12.345s");
    }

    #[test]
    fn format_px_drops_trailing_zero() {
        assert_eq!(format_px(320.0), "320px");
        assert_eq!(format_px(12.5), "12.5px");
    }

    #[test]
    fn slide_line_out_of_range_falls_back_to_index() {
        let slides = sample_slides(2);
        assert_eq!(slide_line(1, &slides), "002 Slide 2");
        assert_eq!(slide_line(5, &slides), "006");
    }

    #[test]
    fn source_lines_collapse_uniform_images() {
        let lines = source_lines(&ResponsiveImage::uniform("a.jpg"), 1);
        assert_eq!(lines, vec!["    Source: a.jpg"]);

        let image = ResponsiveImage {
            desktop: "d.jpg".into(),
            tablet: "t.jpg".into(),
            mobile: "m.jpg".into(),
        };
        let lines = source_lines(&image, 0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "Source (mobile): m.jpg");
    }

    // =========================================================================
    // Simulate output
    // =========================================================================

    fn simulation(entries: Vec<Entry>, index: usize, torn_down: bool) -> Simulation {
        Simulation {
            slides: sample_slides(4),
            interval_ms: 4000,
            cooldown_ms: 3000,
            duration_ms: 16000,
            entries,
            auto_advances: 1,
            final_state: CarouselState {
                current_index: index,
                auto_advance_enabled: true,
            },
            torn_down,
        }
    }

    #[test]
    fn format_entry_variants() {
        let slides = sample_slides(4);
        let changed = Entry::Event {
            event: CarouselEvent::IndexChanged {
                index: 1,
                at_ms: 4000,
            },
        };
        assert_eq!(format_entry(&changed, &slides), "  4.000s  → 002 Slide 2");

        let paused = Entry::Event {
            event: CarouselEvent::AutoAdvance {
                running: false,
                at_ms: 1000,
            },
        };
        assert_eq!(format_entry(&paused, &slides), "  1.000s  auto-advance paused");

        let applied = Entry::Applied {
            at_ms: 1000,
            action: Action::Select(2),
        };
        assert_eq!(format_entry(&applied, &slides), "  1.000s  > select=2");

        let rejected = Entry::Rejected {
            at_ms: 500,
            action: Action::GoTo(9),
            error: "Index 9 out of range for 4 slides".into(),
        };
        assert_eq!(
            format_entry(&rejected, &slides),
            "  0.500s  ! goto=9 rejected: Index 9 out of range for 4 slides"
        );
    }

    #[test]
    fn format_simulation_header_and_summary() {
        let sim = simulation(vec![], 1, false);
        let lines = format_simulation(&sim);
        assert_eq!(
            lines[0],
            "Carousel (4 slides, interval 4000ms, cooldown 3000ms)"
        );
        assert_eq!(
            lines.last().unwrap(),
            "Ran 16.000s: 1 auto-advance, ending on 002 Slide 2"
        );
    }

    #[test]
    fn format_simulation_marks_teardown() {
        let mut sim = simulation(vec![], 0, true);
        sim.auto_advances = 3;
        let summary = format_simulation(&sim).pop().unwrap();
        assert!(summary.contains("3 auto-advances"));
        assert!(summary.ends_with("(torn down)"));
    }

    #[test]
    fn format_simulation_full_replay() {
        use crate::carousel::CarouselOptions;
        use crate::script::parse_script;
        use crate::simulate::simulate;

        let steps = parse_script(&["1000:next", "9000:goto=7"]).unwrap();
        let sim = simulate(
            stock_showcase().slides,
            CarouselOptions::default(),
            &steps,
            16000,
        )
        .unwrap();
        assert_eq!(
            format_simulation(&sim),
            vec![
                "Carousel (4 slides, interval 4000ms, cooldown 3000ms)",
                "  1.000s  > next",
                "  1.000s  → 002 Premium Materials",
                "  1.000s  auto-advance paused",
                "  4.000s  auto-advance resumed",
                "  8.000s  → 003 Timeless Design",
                "  9.000s  ! goto=7 rejected: Index 7 out of range for 4 slides",
                " 12.000s  → 004 Luxury Collection",
                " 16.000s  → 001 Artisan Craftsmanship",
                "",
                "Ran 16.000s: 3 auto-advances, ending on 001 Artisan Craftsmanship",
            ]
        );
    }

    // =========================================================================
    // Strip output
    // =========================================================================

    #[test]
    fn format_strip_probe_lines() {
        let probe = StripProbe {
            item_count: 6,
            content_extent: 1000.0,
            viewport_extent: 300.0,
            rows: vec![
                StripRow {
                    offset: 0.0,
                    state: ScrollBoundaryState::default(),
                    changed: false,
                },
                StripRow {
                    offset: 700.0,
                    state: ScrollBoundaryState {
                        can_scroll_left: true,
                        can_scroll_right: false,
                    },
                    changed: true,
                },
            ],
        };
        let lines = format_strip_probe(&probe, Some((1024, 320.0)));
        assert_eq!(
            lines,
            vec![
                "Gallery strip (6 items, content 1000px, viewport 300px)",
                "    offset 0px: ← off, → on",
                "    offset 700px: ← on, → off (changed)",
                "Scroll increment at 1024px: 320px",
            ]
        );
    }

    // =========================================================================
    // Check output
    // =========================================================================

    #[test]
    fn format_check_output_lists_content() {
        let showcase = stock_showcase();
        let lines = format_check_output(&showcase, &WidgetConfig::default(), false, false);
        assert_eq!(lines[0], "Slides");
        assert_eq!(lines[1], "001 Artisan Craftsmanship");
        assert_eq!(lines[2], "    Handcrafted with precision and passion");
        assert_eq!(lines[3], "    Source: mood-2.jpeg");
        assert!(lines.contains(&"006 Craftsmanship".to_string()));
        assert!(lines.contains(&"    stock defaults".to_string()));
        assert!(lines.contains(&"    interval 4000ms, cooldown 3000ms".to_string()));
    }

    #[test]
    fn format_check_output_names_config_files() {
        let showcase = stock_showcase();
        let lines = format_check_output(&showcase, &WidgetConfig::default(), true, false);
        assert!(lines.contains(&"    config.toml".to_string()));
        assert!(!lines.contains(&"    stock defaults".to_string()));
    }
}
