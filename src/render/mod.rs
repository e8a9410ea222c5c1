//! HTML rendering of page sections.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating, as
//! the rest of the site output does. Every renderer takes already-decoded
//! content plus a [`RenderContext`] and returns [`Markup`]. A renderer that
//! has nothing worth showing returns empty markup, never an empty shell.
//!
//! | Module | Section |
//! |--------|---------|
//! | [`banner`] | Content banner with five layouts |
//! | [`poster`] | Full-width promotional poster |
//! | [`showcase`] | Product grid, details dialog, enquiry hook |
//! | [`testimonials`] | Drone tour and client video testimonials |

pub mod banner;
pub mod poster;
pub mod showcase;
pub mod testimonials;

use crate::config::SiteConfig;
use crate::content::Section;
use crate::locale::Locales;
use crate::media::{self, AssetUrlBuilder, MediaReference};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Base stylesheet, embedded at compile time. Palette variables come from config.
pub const CSS_STATIC: &str = include_str!("../../static/style.css");

/// Everything a renderer needs besides the content itself.
pub struct RenderContext<'a> {
    pub locales: Locales,
    pub assets: &'a dyn AssetUrlBuilder,
    pub config: &'a SiteConfig,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a SiteConfig, assets: &'a dyn AssetUrlBuilder) -> Self {
        Self {
            locales: Locales::new(&config.locale.active, &config.locale.default),
            assets,
            config,
        }
    }

    /// Render with a different active locale.
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locales.active = locale.to_string();
        self
    }

    /// Normalize a media reference into a displayable URL.
    pub fn image_url(&self, reference: Option<&MediaReference>) -> Option<String> {
        media::normalize(reference, self.assets)
    }

    /// Normalize a CMS image object into a displayable URL.
    pub fn image_json_url(&self, image: Option<&serde_json::Value>) -> Option<String> {
        let reference = image.and_then(MediaReference::from_image_json);
        self.image_url(reference.as_ref())
    }
}

/// Render any section.
pub fn render_section(section: &Section, ctx: &RenderContext) -> Markup {
    match section {
        Section::ContentBanner(s) => banner::render_banner(s, ctx),
        Section::PosterBanner(p) => poster::render_poster(p, ctx),
        Section::ProductShowcase(s) => showcase::ShowcaseComponent::mount(s, ctx).render(),
        Section::Testimonials(t) => testimonials::render_testimonials(t, ctx),
    }
}

/// Join the non-empty class names with spaces.
pub fn classes<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the base HTML document structure
pub fn base_document(title: &str, lang: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                main {
                    (content)
                }
            }
        }
    }
}

/// Eyebrow line: short uppercase label with a rule before (and optionally after) it.
pub(crate) fn eyebrow(text: &str, class: &str, rule_after: bool) -> Markup {
    html! {
        div class=(classes(["eyebrow", class])) {
            span.eyebrow-rule {}
            span.eyebrow-text { (text) }
            @if rule_after {
                span.eyebrow-rule {}
            }
        }
    }
}
