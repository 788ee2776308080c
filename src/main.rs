use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine::carousel::CarouselOptions;
use vitrine::strip::{ScrollIncrement, StripOptions};
use vitrine::{config, output, script, showcase, simulate};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Storefront image slider and gallery strip controllers")]
#[command(long_about = "\
Storefront image slider and gallery strip controllers

Replays visitor interactions against the auto-advancing slider on virtual
time, probes the gallery strip's scroll boundaries, and validates the
content and timing configuration a storefront ships with.

Source structure:

  content/
  ├── config.toml                  # Timing, scroll and breakpoint settings (optional)
  └── showcase.toml                # Slides and gallery items (optional)

Both files are optional. Missing files fall back to the stock storefront
content and defaults.

Script steps (for 'vitrine simulate --step'):
  AT:next | AT:prev | AT:goto=N | AT:select=N | AT:hover | AT:unhover | AT:teardown
  AT is milliseconds of virtual time, e.g. --step 1500:next --step 2000:hover

Run 'vitrine gen-config' to generate a documented config.toml.
Set RUST_LOG=vitrine=debug to trace timer activity.")]
#[command(version = version_string())]
struct Cli {
    /// Directory holding config.toml and showcase.toml
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay an interaction script against the slider on virtual time
    Simulate {
        /// Virtual time to run to, in milliseconds
        #[arg(long, default_value_t = 16000)]
        duration_ms: u64,
        /// Interaction step as AT:ACTION (repeatable)
        #[arg(long = "step")]
        steps: Vec<String>,
        /// Emit the timeline as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report the gallery strip's scroll boundaries at given offsets
    Strip {
        /// Total scrollable width of the strip, in pixels
        #[arg(long)]
        content: f64,
        /// Visible width of the strip, in pixels
        #[arg(long)]
        viewport: f64,
        /// Scroll offset to observe (repeatable, defaults to 0)
        #[arg(long = "offset")]
        offsets: Vec<f64>,
        /// Viewport width used to report the scroll increment
        #[arg(long)]
        width: Option<u32>,
        /// Emit the probe as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate config.toml and showcase.toml without running anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the stock showcase.toml
    GenShowcase,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            duration_ms,
            steps,
            json,
        } => {
            let config = config::load_config(&cli.source)?;
            let content = showcase::load_showcase(&cli.source)?;
            let steps = script::parse_script(&steps)?;
            debug!(steps = steps.len(), duration_ms, "starting replay");
            let sim = simulate::simulate(
                content.slides,
                CarouselOptions::from_config(&config.carousel),
                &steps,
                duration_ms,
            )?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sim)?);
            } else {
                output::print_simulation(&sim);
            }
        }
        Command::Strip {
            content,
            viewport,
            offsets,
            width,
            json,
        } => {
            let config = config::load_config(&cli.source)?;
            let showcase = showcase::load_showcase(&cli.source)?;
            let offsets = if offsets.is_empty() { vec![0.0] } else { offsets };
            let probe = simulate::probe_strip(
                showcase.gallery,
                StripOptions::from_config(&config.strip),
                content,
                viewport,
                &offsets,
            )?;
            let increment = width.map(|w| {
                let amount = ScrollIncrement::from_config(&config.strip)
                    .for_width(w, &config.breakpoints);
                (w, amount)
            });
            if json {
                println!("{}", serde_json::to_string_pretty(&probe)?);
            } else {
                output::print_strip_probe(&probe, increment);
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let config = config::load_config(&cli.source)?;
            let showcase = showcase::load_showcase(&cli.source)?;
            let has_config = cli.source.join("config.toml").exists();
            let has_showcase = cli.source.join("showcase.toml").exists();
            info!(has_config, has_showcase, "resolved sources");
            output::print_check_output(&showcase, &config, has_config, has_showcase);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenShowcase => {
            print!("{}", showcase::stock_showcase_toml()?);
        }
    }

    Ok(())
}
