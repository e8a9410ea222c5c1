//! Shared test utilities for the section-press test suite.
//!
//! Builders for fully-populated content that individual tests then strip
//! down, and an asset URL builder with predictable output.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut section = banner(Layout::LeftImage);
//! section.image_url = None;
//! section.features = features(6);
//! ```

use crate::content::{Layout, ProductContent, SectionContent, Slug, Theme};
use crate::locale::LocalizedText;
use crate::media::{AssetUrlBuilder, AssetUrlError};

// =========================================================================
// Assets
// =========================================================================

/// Resolves `image-*` references to `https://assets.test/<ref>`; anything
/// else is malformed.
pub struct DirectAssets;

impl AssetUrlBuilder for DirectAssets {
    fn asset_url(&self, reference: &str) -> Result<String, AssetUrlError> {
        if reference.starts_with("image-") {
            Ok(format!("https://assets.test/{reference}"))
        } else {
            Err(AssetUrlError::MalformedReference(reference.to_string()))
        }
    }
}

// =========================================================================
// Content builders
// =========================================================================

/// A banner with eyebrow, title, description and a direct image URL.
pub fn banner(layout: Layout) -> SectionContent {
    SectionContent {
        key: Some("banner-1".to_string()),
        eyebrow: Some("Our Story".into()),
        title: Some("Rooted in Quality".into()),
        description: Some("Hand-sorted dry fruits from orchard to table.".into()),
        layout,
        theme: Theme::Light,
        image_url: Some("https://img.test/orchard.jpg".to_string()),
        ..SectionContent::default()
    }
}

/// `count` distinct feature strings.
pub fn features(count: usize) -> Vec<LocalizedText> {
    (1..=count)
        .map(|i| LocalizedText::Plain(format!("Feature {i}")))
        .collect()
}

/// A product with a plain title and a slug derived from it.
pub fn product(id: &str, title: &str, category: &str) -> ProductContent {
    ProductContent {
        id: id.to_string(),
        title: Some(title.into()),
        category: category.to_string(),
        slug: Some(Slug {
            current: Some(title.to_lowercase().replace(' ', "-")),
        }),
        description: Some(LocalizedText::Plain(format!("{title}, graded and packed fresh."))),
        hero_image: Some(serde_json::json!({ "asset": { "_ref": format!("image-{id}-800x600-jpg") } })),
        ..ProductContent::default()
    }
}
