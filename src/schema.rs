//! Content schema descriptors.
//!
//! A [`SchemaDescriptor`] declares the shape the renderer expects for a
//! document type: field names, their kinds, whether they are required, and
//! string length limits. Descriptors are data, not code, so they can be
//! printed (`section-press schema <name>`), walked by the validator, and kept
//! side by side with the authoring schema in the content store.
//!
//! Field names follow the content store's camelCase keys.

use serde::Serialize;

/// Expected kind of a field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    /// A JSON string.
    String,
    /// A JSON string holding an absolute URL.
    Url,
    /// A plain string or a locale map of strings.
    LocalizedText,
    /// A managed image object (`{"asset": {...}}`) or a reference string.
    Image,
    /// A JSON string drawn from a fixed set of tags.
    OneOf { values: &'static [&'static str] },
    /// Any value; presence is all that is checked.
    Any,
    /// A JSON array whose items have the given kind.
    Array { of: Box<FieldKind> },
    /// A JSON object with the given fields.
    Object { fields: Vec<FieldSpec> },
}

impl FieldKind {
    pub fn array(of: FieldKind) -> Self {
        Self::Array { of: Box::new(of) }
    }

    pub fn object(fields: Vec<FieldSpec>) -> Self {
        Self::Object { fields }
    }

    /// Short name used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Url => "url",
            Self::LocalizedText => "localized text",
            Self::Image => "image",
            Self::OneOf { .. } => "string",
            Self::Any => "any",
            Self::Array { .. } => "array",
            Self::Object { .. } => "object",
        }
    }
}

/// One field in a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
}

impl FieldSpec {
    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            max_len: None,
        }
    }

    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            required: true,
            ..Self::optional(name, kind)
        }
    }

    /// Limit string length (in characters).
    pub fn max(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }
}

/// Expected shape of one document type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// Content banner `layout` tags.
pub const LAYOUT_VALUES: &[&str] = &[
    "bottom-image",
    "right-image",
    "left-image",
    "background-image",
    "text-only",
];

/// Content banner `theme` tags.
pub const THEME_VALUES: &[&str] = &["light", "dark"];

/// Content banner `bgOverlay` tags, including the legacy colour names.
pub const OVERLAY_VALUES: &[&str] = &[
    "none",
    "low",
    "medium",
    "high",
    "light-wash",
    "black-10",
    "black-20",
    "black-40",
    "white-10",
];

/// Names accepted by [`by_name`].
pub const SCHEMA_NAMES: &[&str] = &[
    "contentBanner",
    "posterBanner",
    "product",
    "productShowcase",
    "testimonialsSection",
];

/// Look up a descriptor by document type name.
pub fn by_name(name: &str) -> Option<SchemaDescriptor> {
    match name {
        "contentBanner" => Some(content_banner()),
        "posterBanner" => Some(poster_banner()),
        "product" => Some(product()),
        "productShowcase" => Some(product_showcase()),
        "testimonialsSection" => Some(testimonials_section()),
        _ => None,
    }
}

pub fn content_banner() -> SchemaDescriptor {
    use FieldKind::*;
    SchemaDescriptor {
        name: "contentBanner",
        title: "Content Banner",
        fields: vec![
            FieldSpec::optional("eyebrow", LocalizedText),
            FieldSpec::optional("title", LocalizedText),
            FieldSpec::optional("highlight", LocalizedText),
            FieldSpec::optional("description", LocalizedText),
            FieldSpec::optional("paragraphs", FieldKind::array(LocalizedText)),
            FieldSpec::optional("features", FieldKind::array(LocalizedText)),
            FieldSpec::optional(
                "stats",
                FieldKind::array(FieldKind::object(vec![
                    FieldSpec::required("value", LocalizedText),
                    FieldSpec::required("label", LocalizedText),
                ])),
            ),
            FieldSpec::optional("layout", OneOf { values: LAYOUT_VALUES }),
            FieldSpec::optional("imageUrl", Url),
            FieldSpec::optional("image", Image),
            FieldSpec::optional("bgOverlay", OneOf { values: OVERLAY_VALUES }),
            FieldSpec::optional("theme", OneOf { values: THEME_VALUES }),
        ],
    }
}

pub fn poster_banner() -> SchemaDescriptor {
    use FieldKind::*;
    SchemaDescriptor {
        name: "posterBanner",
        title: "Poster Banner",
        fields: vec![
            FieldSpec::optional("imageUrl", Url),
            FieldSpec::optional("alt", String),
            FieldSpec::optional("title", String),
        ],
    }
}

pub fn product() -> SchemaDescriptor {
    use FieldKind::*;
    SchemaDescriptor {
        name: "product",
        title: "Product",
        fields: vec![
            FieldSpec::required("_id", String),
            FieldSpec::required("title", LocalizedText),
            FieldSpec::required("category", String),
            FieldSpec::optional(
                "slug",
                FieldKind::object(vec![FieldSpec::optional("current", String)]),
            ),
            FieldSpec::optional("heroHeading", LocalizedText),
            FieldSpec::optional("introParagraphs", FieldKind::array(LocalizedText)),
            FieldSpec::optional(
                "listSections",
                FieldKind::array(FieldKind::object(vec![
                    FieldSpec::required("title", LocalizedText),
                    FieldSpec::optional("items", FieldKind::array(LocalizedText)),
                ])),
            ),
            FieldSpec::optional("ctaLine", LocalizedText),
            FieldSpec::optional("description", LocalizedText),
            FieldSpec::optional("heroImage", Image),
        ],
    }
}

/// Props of the product showcase: section header plus the product list.
pub fn product_showcase() -> SchemaDescriptor {
    use FieldKind::*;
    SchemaDescriptor {
        name: "productShowcase",
        title: "Product Showcase",
        fields: vec![
            FieldSpec::optional(
                "headerData",
                FieldKind::object(vec![
                    FieldSpec::optional("eyebrow", LocalizedText),
                    FieldSpec::optional("title", LocalizedText),
                    FieldSpec::optional("description", LocalizedText),
                ]),
            ),
            FieldSpec::optional(
                "products",
                FieldKind::array(FieldKind::object(product().fields)),
            ),
        ],
    }
}

fn video_fields() -> Vec<FieldSpec> {
    use FieldKind::*;
    vec![
        FieldSpec::required("title", String),
        FieldSpec::optional("description", String),
        FieldSpec::optional("videoUrl", Url),
        FieldSpec::optional(
            "thumbnail",
            FieldKind::object(vec![
                FieldSpec::optional("asset", Any),
                FieldSpec::optional("alt", String),
            ]),
        ),
    ]
}

fn video_group_fields(with_main_video: bool) -> Vec<FieldSpec> {
    use FieldKind::*;
    let mut fields = vec![
        FieldSpec::optional("eyebrow", String).max(50),
        FieldSpec::required("title", String).max(100),
        FieldSpec::optional("placeholderText", String),
    ];
    if with_main_video {
        fields.push(FieldSpec::optional("videoUrl", Url));
        fields.push(FieldSpec::optional(
            "image",
            FieldKind::object(vec![
                FieldSpec::optional("asset", Any),
                FieldSpec::optional("alt", String),
            ]),
        ));
    }
    fields.extend([
        FieldSpec::optional("videos", FieldKind::array(FieldKind::object(video_fields()))),
        FieldSpec::optional("highlights", FieldKind::array(String)),
        FieldSpec::optional("note", String),
    ]);
    fields
}

pub fn testimonials_section() -> SchemaDescriptor {
    use FieldKind::*;
    SchemaDescriptor {
        name: "testimonialsSection",
        title: "Testimonials Section",
        fields: vec![
            FieldSpec::optional("eyebrow", String).max(50),
            FieldSpec::required("title", String).max(100),
            FieldSpec::optional("droneSection", FieldKind::object(video_group_fields(true))),
            FieldSpec::optional(
                "videoTestimonialsSection",
                FieldKind::object(video_group_fields(false)),
            ),
        ],
    }
}
