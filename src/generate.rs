//! Static page generation.
//!
//! Reads a site document exported from the CMS, checks every section against
//! its schema, decodes and renders it, and writes one HTML file per page.
//!
//! ## Input
//!
//! ```json
//! {
//!   "pages": [
//!     { "slug": "index", "title": "Home", "sections": [ { "_type": "contentBanner", ... } ] }
//!   ],
//!   "products": [ { "_id": "p1", "title": "Almonds", "category": "nuts" } ]
//! }
//! ```
//!
//! A `productShowcase` section that lists no products of its own shows the
//! top-level `products` catalogue.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html          # slug "index"
//! ├── about.html          # slug "about"
//! └── products/
//!     └── almonds.html    # slug "products/almonds"
//! ```
//!
//! Styles are embedded in every page: palette variables generated from config
//! followed by `static/style.css`.
//!
//! ## Failure model
//!
//! Content problems never stop generation. Schema diagnostics are logged as
//! warnings, sections of unknown type are skipped with a warning, and
//! sections with nothing to show render as nothing. Page envelopes decode
//! leniently too: a mistyped slug, title or section list falls back to its
//! default and a page that is not an object is dropped. Only I/O and a site
//! document that is not JSON at all are errors.
//!
//! Slugs that map to the same file (`""`, `"/"` and `"index"` all become
//! `index.html`) are written in order, so the last page wins; each collision
//! is logged as a warning.

use crate::config::{self, SiteConfig, ValidationMode};
use crate::content::{SECTION_TYPES, Section, lenient, lenient_vec};
use crate::render::{self, CSS_STATIC, RenderContext};
use crate::schema;
use crate::validate::{self, ValidationResult};
use maud::{Markup, html};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Site document as exported from the CMS.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteDocument {
    #[serde(deserialize_with = "lenient_vec")]
    pub pages: Vec<PageDocument>,
    /// Product catalogue shared by showcases that list no products.
    #[serde(deserialize_with = "lenient_vec")]
    pub products: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageDocument {
    #[serde(deserialize_with = "lenient")]
    pub slug: String,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    /// Raw section payloads, each tagged with `_type`.
    #[serde(deserialize_with = "lenient_vec")]
    pub sections: Vec<Value>,
}

impl PageDocument {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.slug)
    }
}

/// What happened to one section during a check or a render.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionReport {
    /// 1-based position on the page.
    pub position: usize,
    /// `_type`, or `None` when the payload has none.
    pub type_name: Option<String>,
    /// Schema check; `None` when validation is off or the type is unknown.
    pub validation: Option<ValidationResult>,
    pub outcome: SectionOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOutcome {
    Rendered,
    /// Known type, but nothing worth showing.
    Empty,
    /// Known type, validated by `check` without rendering.
    Checked,
    /// Unknown or missing `_type`.
    Skipped,
}

impl SectionReport {
    pub fn diagnostic_count(&self) -> usize {
        self.validation.as_ref().map_or(0, |v| v.diagnostics.len())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub slug: String,
    pub title: String,
    /// Output path relative to the output directory.
    pub file: PathBuf,
    pub sections: Vec<SectionReport>,
}

impl PageReport {
    pub fn count(&self, outcome: SectionOutcome) -> usize {
        self.sections.iter().filter(|s| s.outcome == outcome).count()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.sections.iter().map(SectionReport::diagnostic_count).sum()
    }
}

/// Read and parse a site document.
pub fn load_site(path: &Path) -> Result<SiteDocument, GenerateError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Output file for a page slug: `index` → `index.html`, `a/b` → `a/b.html`.
///
/// Empty and parent-directory segments are dropped so a slug can never
/// escape the output directory.
pub fn page_file(slug: &str) -> PathBuf {
    let segments: Vec<&str> = slug
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect();
    match segments.split_last() {
        None => PathBuf::from("index.html"),
        Some((last, dirs)) => {
            let mut path: PathBuf = dirs.iter().collect();
            path.push(format!("{last}.html"));
            path
        }
    }
}

/// Section type tag of a raw payload.
fn section_type(payload: &Value) -> Option<&str> {
    payload.get("_type")?.as_str()
}

/// Fill an empty product showcase from the site catalogue.
fn with_catalogue(mut payload: Value, catalogue: &[Value]) -> Value {
    if section_type(&payload) != Some("productShowcase") || catalogue.is_empty() {
        return payload;
    }
    if let Some(obj) = payload.as_object_mut() {
        let has_own = obj
            .get("products")
            .and_then(Value::as_array)
            .is_some_and(|p| !p.is_empty());
        if !has_own {
            obj.insert("products".to_string(), Value::Array(catalogue.to_vec()));
        }
    }
    payload
}

/// Check one payload against its schema, if validation is on and the type is known.
fn check_section(payload: &Value, mode: ValidationMode) -> Option<ValidationResult> {
    if mode == ValidationMode::Off {
        return None;
    }
    let name = section_type(payload).filter(|t| SECTION_TYPES.contains(t))?;
    let shape = schema::by_name(name)?;
    Some(validate::validate(payload, &shape))
}

/// Validate every section of every page without rendering anything.
pub fn check_site(site: &SiteDocument, config: &SiteConfig) -> Vec<PageReport> {
    site.pages
        .iter()
        .map(|page| {
            let sections = page
                .sections
                .iter()
                .enumerate()
                .map(|(i, raw)| {
                    let payload = with_catalogue(raw.clone(), &site.products);
                    let type_name = section_type(&payload).map(str::to_string);
                    let known = type_name
                        .as_deref()
                        .is_some_and(|t| SECTION_TYPES.contains(&t));
                    SectionReport {
                        position: i + 1,
                        validation: check_section(&payload, config.validation.mode),
                        type_name,
                        outcome: if known {
                            SectionOutcome::Checked
                        } else {
                            SectionOutcome::Skipped
                        },
                    }
                })
                .collect();
            PageReport {
                slug: page.slug.clone(),
                title: page.display_title().to_string(),
                file: page_file(&page.slug),
                sections,
            }
        })
        .collect()
}

/// Render the sections of one page, in order.
pub fn render_page_content(
    page: &PageDocument,
    catalogue: &[Value],
    ctx: &RenderContext,
) -> (Markup, Vec<SectionReport>) {
    let mut reports = Vec::with_capacity(page.sections.len());
    let mut rendered = Vec::with_capacity(page.sections.len());

    for (i, raw) in page.sections.iter().enumerate() {
        let position = i + 1;
        let payload = with_catalogue(raw.clone(), catalogue);
        let type_name = section_type(&payload).map(str::to_string);
        let context = format!("{}#{position}", page.slug);

        let validation = check_section(&payload, ctx.config.validation.mode);
        if let Some(result) = &validation {
            result.log(&context);
        }

        let section = type_name
            .as_deref()
            .and_then(|t| Section::from_json(t, payload));
        let outcome = match section {
            None => {
                log::warn!(
                    "[{context}] skipping section of unknown type {}",
                    type_name.as_deref().unwrap_or("(none)")
                );
                SectionOutcome::Skipped
            }
            Some(section) => {
                let markup = render::render_section(&section, ctx);
                if markup.0.is_empty() {
                    SectionOutcome::Empty
                } else {
                    rendered.push(markup);
                    SectionOutcome::Rendered
                }
            }
        };

        reports.push(SectionReport {
            position,
            type_name,
            validation,
            outcome,
        });
    }

    let content = html! {
        @for markup in rendered {
            (markup)
        }
    };
    (content, reports)
}

/// Generate every page of `site` into `output_dir`.
pub fn generate_site(
    site: &SiteDocument,
    output_dir: &Path,
    ctx: &RenderContext,
) -> Result<Vec<PageReport>, GenerateError> {
    let color_css = config::generate_color_css(&ctx.config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    fs::create_dir_all(output_dir)?;

    let mut written: HashMap<PathBuf, String> = HashMap::new();
    let mut reports = Vec::with_capacity(site.pages.len());
    for page in &site.pages {
        let (content, sections) = render_page_content(page, &site.products, ctx);
        let title = page.display_title().to_string();
        let document = render::base_document(&title, &ctx.locales.active, &css, content);

        let file = page_file(&page.slug);
        if let Some(previous) = written.insert(file.clone(), page.slug.clone()) {
            log::warn!(
                "page '{}' overwrites page '{}' at {}",
                page.slug,
                previous,
                file.display()
            );
        }
        let path = output_dir.join(&file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, document.into_string())?;
        log::info!("generated {}", file.display());

        reports.push(PageReport {
            slug: page.slug.clone(),
            title,
            file,
            sections,
        });
    }
    Ok(reports)
}

/// Load `input` and generate the site into `output_dir`.
pub fn generate(
    input: &Path,
    output_dir: &Path,
    ctx: &RenderContext,
) -> Result<Vec<PageReport>, GenerateError> {
    let site = load_site(input)?;
    generate_site(&site, output_dir, ctx)
}
