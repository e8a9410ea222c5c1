//! Poster banner rendering: one full-width promotional image with an
//! optional title strip along its bottom edge.

use super::RenderContext;
use crate::content::{PosterBanner, non_blank};
use crate::media;
use maud::{Markup, html};

/// Render a poster banner. Nothing renders without a usable image URL.
pub fn render_poster(poster: &PosterBanner, ctx: &RenderContext) -> Markup {
    let Some(src) = media::normalize_url(poster.image_url.as_deref()) else {
        return html! {};
    };
    let alt = non_blank(poster.alt.as_deref()).unwrap_or(&ctx.config.poster.default_alt);

    html! {
        section.poster aria-label="Featured poster" {
            div.container {
                figure.poster-frame {
                    img.poster-image src=(src) alt=(alt);
                    @if let Some(title) = non_blank(poster.title.as_deref()) {
                        figcaption.poster-caption {
                            h3.poster-title { (title) }
                        }
                    }
                }
            }
        }
    }
}
