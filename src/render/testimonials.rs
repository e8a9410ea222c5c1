//! Testimonials section: a drone tour of the facility and client video
//! testimonials, each an optional [`VideoGroup`].

use super::{RenderContext, eyebrow};
use crate::content::{TestimonialsSection, Video, VideoGroup, image_alt, non_blank};
use maud::{Markup, html};

pub fn render_testimonials(section: &TestimonialsSection, ctx: &RenderContext) -> Markup {
    let groups: Vec<(&str, &VideoGroup)> = [
        ("drone", section.drone_section.as_ref()),
        ("clients", section.video_testimonials_section.as_ref()),
    ]
    .into_iter()
    .filter_map(|(kind, group)| Some((kind, group?)))
    .filter(|(_, group)| !is_empty_group(group))
    .collect();

    let title = non_blank(section.title.as_deref());
    if title.is_none() && groups.is_empty() {
        log::debug!("skipping testimonials: no title and no video groups");
        return html! {};
    }

    html! {
        section.testimonials {
            div.container {
                div.testimonials-header {
                    @if let Some(text) = non_blank(section.eyebrow.as_deref()) {
                        (eyebrow(text, "centered", true))
                    }
                    @if let Some(title) = title {
                        h2.testimonials-title { (title) }
                    }
                }
                @for (kind, group) in &groups {
                    (render_group(kind, group, ctx))
                }
            }
        }
    }
}

fn is_empty_group(group: &VideoGroup) -> bool {
    non_blank(group.title.as_deref()).is_none()
        && non_blank(group.video_url.as_deref()).is_none()
        && group.image.is_none()
        && group.videos.is_empty()
        && group.highlights.iter().all(|h| h.trim().is_empty())
}

fn render_group(kind: &str, group: &VideoGroup, ctx: &RenderContext) -> Markup {
    let poster = ctx.image_json_url(group.image.as_ref());
    let alt = image_alt(group.image.as_ref())
        .or(non_blank(group.placeholder_text.as_deref()))
        .unwrap_or_default();
    let highlights: Vec<&str> = group
        .highlights
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .collect();

    html! {
        div class=(format!("video-group video-group--{kind}")) {
            @if let Some(text) = non_blank(group.eyebrow.as_deref()) {
                (eyebrow(text, "", false))
            }
            @if let Some(title) = non_blank(group.title.as_deref()) {
                h3.group-title { (title) }
            }
            @if let Some(url) = non_blank(group.video_url.as_deref()) {
                div.group-media {
                    video.group-video src=(url) poster=[poster.as_deref()] controls preload="metadata" {}
                }
            } @else if let Some(src) = &poster {
                div.group-media {
                    img.group-poster src=(src) alt=(alt) loading="lazy";
                }
            } @else if let Some(text) = non_blank(group.placeholder_text.as_deref()) {
                div.group-media.video-placeholder { (text) }
            }
            @if !group.videos.is_empty() {
                ul.video-slider {
                    @for video in &group.videos {
                        (render_video(video, ctx))
                    }
                }
            }
            @if !highlights.is_empty() {
                ul.group-highlights {
                    @for highlight in &highlights {
                        li { (highlight) }
                    }
                }
            }
            @if let Some(note) = non_blank(group.note.as_deref()) {
                p.group-note { (note) }
            }
        }
    }
}

fn render_video(video: &Video, ctx: &RenderContext) -> Markup {
    let title = non_blank(video.title.as_deref());
    let thumbnail = ctx.image_json_url(video.thumbnail.as_ref());
    let alt = image_alt(video.thumbnail.as_ref())
        .or(title)
        .unwrap_or("Video thumbnail");

    html! {
        li.video-slide {
            @if let Some(src) = thumbnail {
                img.video-thumb src=(src) alt=(alt) loading="lazy";
            }
            @if let Some(title) = title {
                h4.video-title { (title) }
            }
            @if let Some(description) = non_blank(video.description.as_deref()) {
                p.video-description { (description) }
            }
            @if let Some(url) = non_blank(video.video_url.as_deref()) {
                a.video-link href=(url) target="_blank" rel="noopener" { "Watch" }
            }
        }
    }
}
