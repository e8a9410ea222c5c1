//! Content banner rendering.
//!
//! The banner is the workhorse section: an eyebrow, a title with an optional
//! highlighted second line, body copy, a features list, a stats row and an
//! image, arranged by one of five layouts. Arrangement decisions come from
//! [`crate::layout::plan`]; this module only turns the plan into markup.

use super::{RenderContext, classes, eyebrow};
use crate::content::{LocalizedSection, SectionContent};
use crate::layout::{self, Arrangement, ContentShape, FeatureArrangement, LayoutPlan, TextTone};
use maud::{Markup, html};

/// Render a content banner.
///
/// Renders nothing when the banner has neither a resolvable image nor a title.
pub fn render_banner(section: &SectionContent, ctx: &RenderContext) -> Markup {
    let image = ctx.image_url(section.media().as_ref());
    let text = section.localize(&ctx.locales);

    if image.is_none() && text.title.is_none() {
        log::debug!(
            "skipping banner {}: no title and no image",
            section.key.as_deref().unwrap_or("(unkeyed)")
        );
        return html! {};
    }

    let plan = layout::plan(
        section.layout,
        section.theme,
        section.bg_overlay,
        ContentShape {
            has_image: image.is_some(),
            feature_count: text.features.len(),
            stat_count: text.stats.len(),
        },
    );
    render_planned(&text, image.as_deref(), &plan, section.key.as_deref())
}

/// Render localized banner content according to a layout plan.
pub fn render_planned(
    text: &LocalizedSection,
    image: Option<&str>,
    plan: &LayoutPlan,
    key: Option<&str>,
) -> Markup {
    let tone = match plan.tone {
        TextTone::Light => "tone-light",
        TextTone::Dark => "tone-dark",
    };
    let section_class = classes([
        "banner",
        format!("banner--{}", plan.layout.as_str()).as_str(),
        tone,
    ]);
    let content = content_block(text, plan);
    let image_slot = || image_block(image, text.title.as_deref(), plan);

    html! {
        section class=(section_class) data-layout=(plan.layout.as_str()) data-key=[key] {
            @match plan.arrangement {
                Arrangement::Stacked { image_below } => {
                    div.container.banner-stack {
                        div.banner-stack-content { (content) }
                        @if image_below {
                            (image_slot())
                        }
                    }
                }
                Arrangement::Split { image_first } => {
                    div.container.banner-split {
                        @if image_first {
                            div.banner-col { (image_slot()) }
                            div.banner-col { (content) }
                        } @else {
                            div.banner-col { (content) }
                            div.banner-col { (image_slot()) }
                        }
                    }
                }
                Arrangement::SingleColumn => {
                    div.container.banner-single { (content) }
                }
                Arrangement::Backdrop { image: has_image, .. } => {
                    @if has_image {
                        (image_slot())
                    }
                    div.container.banner-over { (content) }
                }
            }
        }
    }
}

fn content_block(text: &LocalizedSection, plan: &LayoutPlan) -> Markup {
    html! {
        div.banner-content.is-centered[plan.centered] {
            @if let Some(e) = &text.eyebrow {
                (eyebrow(e, "banner-eyebrow", false))
            }
            @if let Some(title) = &text.title {
                h2.banner-title {
                    (title)
                    @if let Some(highlight) = &text.highlight {
                        span.banner-highlight { (highlight) }
                    }
                }
            }
            @if plan.show_divider {
                div.banner-divider {}
            }
            @if !text.paragraphs.is_empty() {
                div.banner-paragraphs {
                    @for p in &text.paragraphs {
                        p { (p) }
                    }
                }
            } @else if let Some(description) = &text.description {
                p.banner-description { (description) }
            }
            @if let Some(arrangement) = plan.features {
                @let list_class = match arrangement {
                    FeatureArrangement::Grid => "banner-features features-grid",
                    FeatureArrangement::Wrap => "banner-features features-wrap",
                };
                ul class=(list_class) {
                    @for feature in &text.features {
                        li.banner-feature {
                            span.feature-check aria-hidden="true" {
                                svg viewBox="0 0 24 24" fill="none" stroke="currentColor" {
                                    path stroke-linecap="round" stroke-linejoin="round" stroke-width="4" d="M5 13l4 4L19 7" {}
                                }
                            }
                            span.feature-text { (feature) }
                        }
                    }
                }
            }
            @if plan.show_stats {
                div.banner-stats {
                    @for (value, label) in &text.stats {
                        div.banner-stat {
                            p.stat-value { (value) }
                            @if !label.is_empty() {
                                p.stat-label { (label) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn image_block(image: Option<&str>, title: Option<&str>, plan: &LayoutPlan) -> Markup {
    let Some(src) = image else {
        return html! {};
    };
    let alt = title.unwrap_or("Banner image");
    let overlay = match plan.arrangement {
        Arrangement::Backdrop { overlay, .. } => Some(overlay),
        _ => None,
    };
    html! {
        div class=(format!("banner-image banner-image--{}", plan.layout.as_str())) {
            img src=(src) alt=(alt) loading="lazy";
            @if let Some(overlay) = overlay {
                div class=(format!("banner-overlay overlay-{}", overlay.as_str())) {}
            }
        }
    }
}
