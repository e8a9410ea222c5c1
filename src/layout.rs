//! Layout selection for content banners.
//!
//! A banner's layout tag picks one of five fixed arrangements. Everything
//! that varies between arrangements is decided here, as data, so the HTML
//! templates in [`crate::render`] only read the plan and never branch on raw
//! tags or counts.
//!
//! | Layout             | Image block            | Divider | Content alignment |
//! |--------------------|------------------------|---------|-------------------|
//! | `bottom-image`     | full width, below      | yes     | centered          |
//! | `right-image`      | right column           | no      | left              |
//! | `left-image`       | left column            | no      | left              |
//! | `background-image` | backdrop with overlay  | no      | left              |
//! | `text-only`        | none                   | yes     | centered          |
//!
//! Split layouts without an image collapse to a single content column.

use crate::content::{Layout, Overlay, Theme};

/// Feature lists of exactly this length render as a two-column grid.
pub const FEATURE_GRID_COUNT: usize = 6;

/// How the content and image blocks are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// Content centered, image (if any) below it.
    Stacked { image_below: bool },
    /// Two columns; `image_first` puts the image on the left.
    Split { image_first: bool },
    /// Split layout whose image is missing: content alone.
    SingleColumn,
    /// Image behind content, with a wash.
    Backdrop { image: bool, overlay: Overlay },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureArrangement {
    Grid,
    Wrap,
}

/// Contrast of the text against its background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    /// Dark text on a light background.
    Dark,
    /// Light text on a dark background or an image.
    Light,
}

/// Everything the banner template needs to know about arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPlan {
    pub layout: Layout,
    pub arrangement: Arrangement,
    pub tone: TextTone,
    pub show_divider: bool,
    pub centered: bool,
    /// `None` when there are no features.
    pub features: Option<FeatureArrangement>,
    pub show_stats: bool,
}

impl LayoutPlan {
    pub fn has_image(&self) -> bool {
        match self.arrangement {
            Arrangement::Stacked { image_below } => image_below,
            Arrangement::Split { .. } => true,
            Arrangement::SingleColumn => false,
            Arrangement::Backdrop { image, .. } => image,
        }
    }
}

/// Inputs to [`plan`] that come from the content rather than the tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentShape {
    pub has_image: bool,
    pub feature_count: usize,
    pub stat_count: usize,
}

pub fn feature_arrangement(count: usize) -> Option<FeatureArrangement> {
    match count {
        0 => None,
        FEATURE_GRID_COUNT => Some(FeatureArrangement::Grid),
        _ => Some(FeatureArrangement::Wrap),
    }
}

/// Background images always take light text, whatever the theme says.
pub fn text_tone(layout: Layout, theme: Theme) -> TextTone {
    match (layout, theme) {
        (Layout::BackgroundImage, _) | (_, Theme::Dark) => TextTone::Light,
        (_, Theme::Light) => TextTone::Dark,
    }
}

/// Decide the arrangement for one banner.
pub fn plan(layout: Layout, theme: Theme, overlay: Overlay, shape: ContentShape) -> LayoutPlan {
    let arrangement = match layout {
        Layout::BottomImage => Arrangement::Stacked {
            image_below: shape.has_image,
        },
        Layout::TextOnly => Arrangement::Stacked { image_below: false },
        Layout::RightImage | Layout::LeftImage if !shape.has_image => Arrangement::SingleColumn,
        Layout::RightImage => Arrangement::Split { image_first: false },
        Layout::LeftImage => Arrangement::Split { image_first: true },
        Layout::BackgroundImage => Arrangement::Backdrop {
            image: shape.has_image,
            overlay,
        },
    };
    let stacked = matches!(layout, Layout::BottomImage | Layout::TextOnly);

    LayoutPlan {
        layout,
        arrangement,
        tone: text_tone(layout, theme),
        show_divider: stacked,
        centered: stacked,
        features: feature_arrangement(shape.feature_count),
        show_stats: shape.stat_count > 0,
    }
}
