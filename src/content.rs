//! Typed snapshots of CMS section documents.
//!
//! Every field is decoded leniently: a value of the wrong type becomes the
//! field's default (absent, empty list, default tag) instead of failing the
//! whole document. Shape problems are the validator's job to report; this
//! module only guarantees that whatever arrives can be rendered.
//!
//! Lists drop individual bad items and keep the rest, so one malformed
//! feature does not hide the other five.

use crate::locale::{LocalizedText, Locales};
use crate::media::MediaReference;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode a field, falling back to its default on any type error.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

/// Decode a list, keeping only the items that decode.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

// =============================================================================
// Tags
// =============================================================================

/// Visual arrangement of a content banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    BottomImage,
    RightImage,
    LeftImage,
    BackgroundImage,
    TextOnly,
}

impl Layout {
    pub const ALL: [Layout; 5] = [
        Layout::BottomImage,
        Layout::RightImage,
        Layout::LeftImage,
        Layout::BackgroundImage,
        Layout::TextOnly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::BottomImage => "bottom-image",
            Layout::RightImage => "right-image",
            Layout::LeftImage => "left-image",
            Layout::BackgroundImage => "background-image",
            Layout::TextOnly => "text-only",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Wash drawn over a background image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overlay {
    None,
    #[serde(alias = "black-10")]
    Low,
    #[default]
    #[serde(alias = "black-20")]
    Medium,
    #[serde(alias = "black-40")]
    High,
    #[serde(alias = "white-10")]
    LightWash,
}

impl Overlay {
    pub fn as_str(self) -> &'static str {
        match self {
            Overlay::None => "none",
            Overlay::Low => "low",
            Overlay::Medium => "medium",
            Overlay::High => "high",
            Overlay::LightWash => "light-wash",
        }
    }
}

// =============================================================================
// Content banner
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Stat {
    #[serde(deserialize_with = "lenient")]
    pub value: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient")]
    pub label: Option<LocalizedText>,
}

/// A content banner section as authored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionContent {
    #[serde(rename = "_key", deserialize_with = "lenient")]
    pub key: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub eyebrow: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient")]
    pub highlight: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient_vec")]
    pub paragraphs: Vec<LocalizedText>,
    #[serde(deserialize_with = "lenient_vec")]
    pub features: Vec<LocalizedText>,
    #[serde(deserialize_with = "lenient_vec")]
    pub stats: Vec<Stat>,
    #[serde(deserialize_with = "lenient")]
    pub layout: Layout,
    #[serde(deserialize_with = "lenient")]
    pub theme: Theme,
    #[serde(deserialize_with = "lenient")]
    pub bg_overlay: Overlay,
    #[serde(deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<Value>,
}

impl SectionContent {
    /// The section's image. A direct URL wins over an uploaded image.
    pub fn media(&self) -> Option<MediaReference> {
        MediaReference::from_parts(self.image_url.as_deref(), self.image.as_ref())
    }

    /// Resolve every text slot for one locale.
    pub fn localize(&self, locales: &Locales) -> LocalizedSection {
        let texts = |items: &[LocalizedText]| -> Vec<String> {
            items
                .iter()
                .filter_map(|t| locales.text(Some(t)))
                .collect()
        };
        LocalizedSection {
            eyebrow: locales.text(self.eyebrow.as_ref()),
            title: locales.text(self.title.as_ref()),
            highlight: locales.text(self.highlight.as_ref()),
            description: locales.text(self.description.as_ref()),
            paragraphs: texts(&self.paragraphs),
            features: texts(&self.features),
            stats: self
                .stats
                .iter()
                .filter_map(|s| {
                    let value = locales.text(s.value.as_ref())?;
                    let label = locales.text(s.label.as_ref()).unwrap_or_default();
                    Some((value, label))
                })
                .collect(),
        }
    }
}

/// Text of a section after locale resolution. Empty slots are `None` or empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalizedSection {
    pub eyebrow: Option<String>,
    pub title: Option<String>,
    pub highlight: Option<String>,
    pub description: Option<String>,
    pub paragraphs: Vec<String>,
    pub features: Vec<String>,
    /// `(value, label)` pairs.
    pub stats: Vec<(String, String)>,
}

// =============================================================================
// Poster banner
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PosterBanner {
    #[serde(deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub alt: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Slug {
    #[serde(deserialize_with = "lenient")]
    pub current: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListSection {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient_vec")]
    pub items: Vec<LocalizedText>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductContent {
    #[serde(rename = "_id", deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient")]
    pub category: String,
    #[serde(deserialize_with = "lenient")]
    pub slug: Option<Slug>,
    #[serde(deserialize_with = "lenient")]
    pub hero_heading: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient_vec")]
    pub intro_paragraphs: Vec<LocalizedText>,
    #[serde(deserialize_with = "lenient_vec")]
    pub list_sections: Vec<ListSection>,
    #[serde(deserialize_with = "lenient")]
    pub cta_line: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient")]
    pub hero_image: Option<Value>,
}

impl ProductContent {
    pub fn slug(&self) -> Option<&str> {
        self.slug
            .as_ref()
            .and_then(|s| s.current.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn media(&self) -> Option<MediaReference> {
        self.hero_image.as_ref().and_then(MediaReference::from_image_json)
    }
}

/// Product showcase section header.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeaderData {
    #[serde(deserialize_with = "lenient")]
    pub eyebrow: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<LocalizedText>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<LocalizedText>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductShowcase {
    #[serde(deserialize_with = "lenient")]
    pub header_data: Option<HeaderData>,
    #[serde(deserialize_with = "lenient_vec")]
    pub products: Vec<ProductContent>,
}

// =============================================================================
// Testimonials
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Video {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub video_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub thumbnail: Option<Value>,
}

/// A group of videos: the drone tour or the client testimonials.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoGroup {
    #[serde(deserialize_with = "lenient")]
    pub eyebrow: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub placeholder_text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub video_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<Value>,
    #[serde(deserialize_with = "lenient_vec")]
    pub videos: Vec<Video>,
    #[serde(deserialize_with = "lenient_vec")]
    pub highlights: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialsSection {
    #[serde(deserialize_with = "lenient")]
    pub eyebrow: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub drone_section: Option<VideoGroup>,
    #[serde(deserialize_with = "lenient")]
    pub video_testimonials_section: Option<VideoGroup>,
}

// =============================================================================
// Sections
// =============================================================================

/// CMS `_type` values that decode to a [`Section`].
pub const SECTION_TYPES: [&str; 4] = [
    "contentBanner",
    "posterBanner",
    "productShowcase",
    "testimonialsSection",
];

/// One renderable page section, tagged by its CMS document type.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    ContentBanner(SectionContent),
    PosterBanner(PosterBanner),
    ProductShowcase(ProductShowcase),
    Testimonials(TestimonialsSection),
}

impl Section {
    /// CMS `_type` for this section, also the name of its schema.
    pub fn type_name(&self) -> &'static str {
        match self {
            Section::ContentBanner(_) => "contentBanner",
            Section::PosterBanner(_) => "posterBanner",
            Section::ProductShowcase(_) => "productShowcase",
            Section::Testimonials(_) => "testimonialsSection",
        }
    }

    /// Decode a section from its CMS `_type` and payload.
    ///
    /// Returns `None` for unknown types. Known types always decode, with
    /// malformed fields left at their defaults.
    pub fn from_json(type_name: &str, payload: Value) -> Option<Self> {
        let decode = |payload: Value| -> Option<Self> {
            Some(match type_name {
                "contentBanner" => Section::ContentBanner(serde_json::from_value(payload).ok()?),
                "posterBanner" => Section::PosterBanner(serde_json::from_value(payload).ok()?),
                "productShowcase" => {
                    Section::ProductShowcase(serde_json::from_value(payload).ok()?)
                }
                "testimonialsSection" => {
                    Section::Testimonials(serde_json::from_value(payload).ok()?)
                }
                _ => return None,
            })
        };
        // Non-object payloads still name a known section; render its defaults.
        let payload = if payload.is_object() {
            payload
        } else {
            Value::Object(Default::default())
        };
        decode(payload)
    }
}

/// Alt text stored on a CMS image object.
pub fn image_alt(image: Option<&Value>) -> Option<&str> {
    image?
        .get("alt")?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Return `Some` for non-blank strings.
pub fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_decodes_to_defaults() {
        let section: SectionContent = serde_json::from_value(json!({})).unwrap();
        assert_eq!(section.layout, Layout::BottomImage);
        assert_eq!(section.theme, Theme::Light);
        assert_eq!(section.bg_overlay, Overlay::Medium);
        assert!(section.features.is_empty());
        assert_eq!(section.media(), None);
    }

    #[test]
    fn wrong_types_degrade_per_field() {
        let section: SectionContent = serde_json::from_value(json!({
            "title": 42,
            "eyebrow": "Our Story",
            "layout": "diagonal",
            "features": ["Sorted", 7, "Graded"],
            "stats": "lots",
        }))
        .unwrap();
        assert_eq!(section.title, None);
        assert_eq!(section.eyebrow, Some(LocalizedText::from("Our Story")));
        assert_eq!(section.layout, Layout::BottomImage);
        assert_eq!(section.features.len(), 2);
        assert!(section.stats.is_empty());
    }

    #[test]
    fn cms_overlay_spellings_are_aliases() {
        for (raw, expected) in [
            ("black-10", Overlay::Low),
            ("black-20", Overlay::Medium),
            ("black-40", Overlay::High),
            ("white-10", Overlay::LightWash),
            ("none", Overlay::None),
            ("light-wash", Overlay::LightWash),
        ] {
            let section: SectionContent =
                serde_json::from_value(json!({ "bgOverlay": raw })).unwrap();
            assert_eq!(section.bg_overlay, expected, "{raw}");
        }
    }

    #[test]
    fn layout_tags_parse() {
        for layout in Layout::ALL {
            let section: SectionContent =
                serde_json::from_value(json!({ "layout": layout.as_str() })).unwrap();
            assert_eq!(section.layout, layout);
        }
    }

    #[test]
    fn localize_resolves_every_slot() {
        let section: SectionContent = serde_json::from_value(json!({
            "title": { "en": "Harvest", "hi": "फसल" },
            "features": [{ "en": "Fresh" }, { "fr": "only french" }],
            "stats": [
                { "value": "25+", "label": { "en": "Years" } },
                { "label": "no value" },
            ],
        }))
        .unwrap();
        let view = section.localize(&Locales::new("hi", "en"));
        assert_eq!(view.title.as_deref(), Some("फसल"));
        assert_eq!(view.features, vec!["Fresh"]);
        assert_eq!(view.stats, vec![("25+".to_string(), "Years".to_string())]);
    }

    #[test]
    fn product_slug_and_media() {
        let product: ProductContent = serde_json::from_value(json!({
            "_id": "p1",
            "title": "Almonds",
            "category": "nuts",
            "slug": { "current": "almonds" },
            "heroImage": { "asset": { "_ref": "image-a-1x1-png" } },
        }))
        .unwrap();
        assert_eq!(product.slug(), Some("almonds"));
        assert_eq!(
            product.media(),
            Some(MediaReference::ManagedAsset("image-a-1x1-png".to_string()))
        );
    }

    #[test]
    fn showcase_drops_non_object_products() {
        let showcase: ProductShowcase = serde_json::from_value(json!({
            "products": [{ "_id": "a", "category": "nuts" }, "junk"],
        }))
        .unwrap();
        assert_eq!(showcase.products.len(), 1);
        assert_eq!(showcase.header_data, None);
    }

    #[test]
    fn section_dispatch_by_type() {
        let s = Section::from_json("posterBanner", json!({ "imageUrl": "https://a.test/p.jpg" }))
            .unwrap();
        assert_eq!(s.type_name(), "posterBanner");
        assert!(Section::from_json("heroSection", json!({})).is_none());
        for name in SECTION_TYPES {
            assert_eq!(Section::from_json(name, json!({})).unwrap().type_name(), name);
        }
        let s = Section::from_json("contentBanner", json!("not an object")).unwrap();
        assert_eq!(s, Section::ContentBanner(SectionContent::default()));
    }

    #[test]
    fn image_alt_reads_trimmed_alt() {
        assert_eq!(image_alt(Some(&json!({ "alt": " Orchard " }))), Some("Orchard"));
        assert_eq!(image_alt(Some(&json!({ "alt": "" }))), None);
        assert_eq!(image_alt(None), None);
    }
}
