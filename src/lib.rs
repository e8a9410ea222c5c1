//! # Section Press
//!
//! Renders marketing page sections (content banners, posters, product
//! showcases, testimonials) from headless-CMS documents into static HTML.
//! The content store is the data source: editors compose pages out of typed
//! sections, and this crate binds each section to its presentation.
//!
//! # Architecture: Binding Pipeline
//!
//! Every section goes through the same four steps on its way to markup:
//!
//! ```text
//! 1. Validate   raw JSON  →  diagnostics        (schema walk, never fails)
//! 2. Decode     raw JSON  →  typed section      (per-field graceful fallback)
//! 3. Localize   section   →  display strings    (active locale, then default)
//! 4. Render     section   →  HTML               (media URLs normalized, layout planned)
//! ```
//!
//! Remote content is loosely typed and edited by people, so nothing in this
//! pipeline is fatal. A wrong-typed field falls back to its default, a missing
//! translation falls back to the default locale and then to nothing, an
//! unresolvable image drops its image block, and a section with nothing worth
//! showing renders as nothing. Problems are reported as diagnostics and
//! logged; the page still builds.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`locale`] | `LocalizedText` and active/default locale resolution |
//! | [`media`] | Image references, managed-asset URLs, share-link normalization |
//! | [`schema`] | Declarative shape descriptors for each document type |
//! | [`validate`] | Structural validation producing field-level diagnostics |
//! | [`content`] | Typed, leniently decoded section documents |
//! | [`layout`] | Pure layout planning for content banners |
//! | [`render`] | Maud renderers for every section type |
//! | [`enquiry`] | Named publish/subscribe channel for "add to enquiry" |
//! | [`generate`] | Site document → HTML files |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting for `check` and `generate` |
//!
//! # Design Decisions
//!
//! ## Layout as Data
//!
//! A banner's layout is a closed enum. [`layout::plan`] turns layout, theme,
//! overlay and content shape into a [`layout::LayoutPlan`] with an exhaustive
//! match, so every rule (divider, feature grid, forced light text on
//! background images) is testable without rendering HTML.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. All interpolation is auto-escaped, which matters here: every
//! string on the page comes from a content editor.
//!
//! ## Share Links Are Rewritten Once
//!
//! Editors paste file-host share links (`drive.google.com/file/d/<ID>/view`).
//! [`media::normalize_url`] rewrites them to the direct-serving host, which
//! never matches the share patterns again, so normalization is idempotent.

pub mod config;
pub mod content;
pub mod enquiry;
pub mod generate;
pub mod layout;
pub mod locale;
pub mod media;
pub mod output;
pub mod render;
pub mod schema;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
