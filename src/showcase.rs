//! Slide and gallery content for the storefront widgets.
//!
//! Content lives in `showcase.toml` next to `config.toml`. When the file is
//! absent the stock storefront content is used: four hero slides and six
//! gallery stories.
//!
//! ```toml
//! [[slides]]
//! id = 1
//! title = "Artisan Craftsmanship"
//! subtitle = "Handcrafted with precision and passion"
//! [slides.image]
//! desktop = "mood-2.jpeg"
//! tablet = "mood-2.jpeg"
//! mobile = "mood-2.jpeg"
//!
//! [[gallery]]
//! id = 1
//! image = "story-5.jpg"
//! caption = "Moodboard"
//! ```
//!
//! Unlike `config.toml`, the file is not merged over the stock content: a
//! present file replaces it entirely. Both lists must be non-empty and ids
//! must be unique within a list.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::config::ConfigError;
use crate::types::{GalleryItem, ResponsiveImage, Slide};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Showcase {
    pub slides: Vec<Slide>,
    pub gallery: Vec<GalleryItem>,
}

impl Showcase {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slides.is_empty() {
            return Err(ConfigError::Validation(
                "showcase must define at least one slide".into(),
            ));
        }
        if self.gallery.is_empty() {
            return Err(ConfigError::Validation(
                "showcase must define at least one gallery item".into(),
            ));
        }
        check_unique_ids("slides", self.slides.iter().map(|s| s.id))?;
        check_unique_ids("gallery", self.gallery.iter().map(|g| g.id))?;
        Ok(())
    }
}

fn check_unique_ids(list: &str, ids: impl Iterator<Item = u32>) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::Validation(format!(
                "duplicate id {id} in {list}"
            )));
        }
    }
    Ok(())
}

/// Load `showcase.toml` from `root`, falling back to the stock content.
pub fn load_showcase(root: &Path) -> Result<Showcase, ConfigError> {
    let path = root.join("showcase.toml");
    if !path.exists() {
        return Ok(stock_showcase());
    }
    let content = fs::read_to_string(&path)?;
    let showcase: Showcase = toml::from_str(&content)?;
    showcase.validate()?;
    Ok(showcase)
}

fn slide(id: u32, image: &str, title: &str, subtitle: &str) -> Slide {
    Slide {
        id,
        image: ResponsiveImage::uniform(image),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
    }
}

fn story(id: u32, image: &str, caption: &str) -> GalleryItem {
    GalleryItem {
        id,
        image: image.to_string(),
        caption: caption.to_string(),
    }
}

/// The storefront's own slides and gallery.
pub fn stock_showcase() -> Showcase {
    Showcase {
        slides: vec![
            slide(
                1,
                "mood-2.jpeg",
                "Artisan Craftsmanship",
                "Handcrafted with precision and passion",
            ),
            slide(
                2,
                "mood-3.jpeg",
                "Premium Materials",
                "Only the finest materials make the cut",
            ),
            slide(
                3,
                "mood-4.jpeg",
                "Timeless Design",
                "Elegance that transcends trends",
            ),
            slide(
                4,
                "mood-1.jpeg",
                "Luxury Collection",
                "Discover our signature pieces",
            ),
        ],
        gallery: vec![
            story(1, "story-5.jpg", "Moodboard"),
            story(2, "story-3.jpg", "Behind the Brand"),
            story(3, "story-4.jpg", "Inspo"),
            story(4, "story-6.jpg", "Lookbook"),
            story(5, "story-1.jpg", "Textures"),
            story(6, "story-2.jpg", "Craftsmanship"),
        ],
    }
}

/// The stock content rendered as `showcase.toml`, for the `gen-showcase` command.
pub fn stock_showcase_toml() -> Result<String, toml::ser::Error> {
    let body = toml::to_string_pretty(&stock_showcase())?;
    Ok(format!(
        "# Vitrine showcase content\n\
         # Slides feed the image slider, gallery items feed the scroll strip.\n\
         # A present showcase.toml replaces the stock content entirely.\n\n{body}"
    ))
}
