//! Media reference normalization.
//!
//! Images reach the renderer in two forms:
//!
//! - **Direct URLs** typed into a URL field by an editor. Editors routinely
//!   paste Google Drive share links, which point at an HTML viewer rather than
//!   the image bytes, so those are rewritten to Drive's content-serving host.
//! - **Managed assets** uploaded to the content store. These carry an opaque
//!   reference (`image-<id>-<w>x<h>-<ext>`) that only the store's URL builder
//!   can turn into a URL. The builder sits behind [`AssetUrlBuilder`].
//!
//! ## Share-link rewriting
//!
//! ```text
//! https://drive.google.com/file/d/<ID>/view?usp=sharing  ┐
//! https://drive.google.com/open?id=<ID>                  ├→ https://lh3.googleusercontent.com/d/<ID>
//! https://drive.google.com/uc?export=view&id=<ID>        ┘
//! ```
//!
//! The rewritten URL lives on a different host than the share link, so
//! normalizing twice is a no-op. URLs that do not match a share pattern are
//! returned unchanged.

use crate::config::AssetsConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Host that serves Drive file content directly.
pub const DRIVE_CONTENT_BASE: &str = "https://lh3.googleusercontent.com/d/";

const DRIVE_HOSTS: &[&str] = &["drive.google.com", "docs.google.com"];

#[derive(Error, Debug, PartialEq)]
pub enum AssetUrlError {
    #[error("asset store has no project id configured")]
    MissingProject,
    #[error("malformed asset reference: {0}")]
    MalformedReference(String),
}

/// A pointer to an image: an external URL or a managed-asset handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum MediaReference {
    Url(String),
    ManagedAsset(String),
}

impl MediaReference {
    /// Decode a CMS image object.
    ///
    /// Accepts `{"asset": {"_ref": "..."}}`, a dereferenced
    /// `{"asset": {"url": "..."}}`, or a bare reference string.
    pub fn from_image_json(value: &serde_json::Value) -> Option<Self> {
        if let Some(s) = value.as_str() {
            return Some(Self::ManagedAsset(s.to_string()));
        }
        let asset = value.get("asset")?;
        if let Some(url) = asset.get("url").and_then(|v| v.as_str()) {
            return Some(Self::Url(url.to_string()));
        }
        asset
            .get("_ref")
            .and_then(|v| v.as_str())
            .map(|r| Self::ManagedAsset(r.to_string()))
    }

    /// Pick the reference for a section that has both a URL field and an
    /// image field. A non-empty URL wins.
    pub fn from_parts(image_url: Option<&str>, image: Option<&serde_json::Value>) -> Option<Self> {
        match image_url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => Some(Self::Url(url.to_string())),
            None => image.and_then(Self::from_image_json),
        }
    }
}

/// Builds final URLs for managed assets. Supplied by the content store.
pub trait AssetUrlBuilder {
    fn asset_url(&self, reference: &str) -> Result<String, AssetUrlError>;
}

/// Asset URL builder for an image CDN keyed by project and dataset.
///
/// Turns `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg` into
/// `<cdn_base>/images/<project>/<dataset>/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg`.
#[derive(Debug, Clone)]
pub struct CdnAssetUrls {
    cdn_base: String,
    project_id: Option<String>,
    dataset: String,
}

impl CdnAssetUrls {
    pub fn new(config: &AssetsConfig) -> Self {
        Self {
            cdn_base: config.cdn_base.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone().filter(|p| !p.is_empty()),
            dataset: config.dataset.clone(),
        }
    }
}

impl AssetUrlBuilder for CdnAssetUrls {
    fn asset_url(&self, reference: &str) -> Result<String, AssetUrlError> {
        let project = self.project_id.as_ref().ok_or(AssetUrlError::MissingProject)?;
        let malformed = || AssetUrlError::MalformedReference(reference.to_string());

        let rest = reference.strip_prefix("image-").ok_or_else(malformed)?;
        let (rest, ext) = rest.rsplit_once('-').ok_or_else(malformed)?;
        let (id, dims) = rest.rsplit_once('-').ok_or_else(malformed)?;
        let (w, h) = dims.split_once('x').ok_or_else(malformed)?;
        let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if id.is_empty() || ext.is_empty() || !numeric(w) || !numeric(h) {
            return Err(malformed());
        }

        Ok(format!(
            "{}/images/{}/{}/{}-{}.{}",
            self.cdn_base, project, self.dataset, id, dims, ext
        ))
    }
}

/// Normalize a media reference into a displayable URL.
///
/// Returns `None` for a missing reference, an empty URL, or a managed asset
/// the builder cannot resolve.
pub fn normalize(reference: Option<&MediaReference>, assets: &dyn AssetUrlBuilder) -> Option<String> {
    match reference? {
        MediaReference::Url(raw) => normalize_url(Some(raw)),
        MediaReference::ManagedAsset(r) => match assets.asset_url(r) {
            Ok(url) => Some(url),
            Err(e) => {
                log::debug!("unresolvable asset {r}: {e}");
                None
            }
        },
    }
}

/// Normalize a raw URL string.
///
/// Drive share links are rewritten to the direct-content form; any other
/// non-empty URL is returned trimmed but otherwise unchanged.
pub fn normalize_url(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    let Ok(parsed) = Url::parse(raw) else {
        return Some(raw.to_string());
    };
    match drive_file_id(&parsed) {
        Some(id) => Some(format!("{DRIVE_CONTENT_BASE}{id}")),
        None => Some(raw.to_string()),
    }
}

/// Extract the file id from a Drive share link.
fn drive_file_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    if !DRIVE_HOSTS.contains(&host) {
        return None;
    }
    let segments: Vec<&str> = url.path_segments()?.collect();
    let id = match segments.as_slice() {
        ["file", "d", id, ..] => id.to_string(),
        ["open"] | ["uc"] => url
            .query_pairs()
            .find(|(k, _)| k == "id")
            .map(|(_, v)| v.into_owned())?,
        _ => return None,
    };
    let valid = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    valid.then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NoAssets;

    impl AssetUrlBuilder for NoAssets {
        fn asset_url(&self, reference: &str) -> Result<String, AssetUrlError> {
            Err(AssetUrlError::MalformedReference(reference.to_string()))
        }
    }

    fn cdn() -> CdnAssetUrls {
        CdnAssetUrls::new(&AssetsConfig {
            project_id: Some("abc123".to_string()),
            ..AssetsConfig::default()
        })
    }

    #[test]
    fn empty_inputs_are_none() {
        assert_eq!(normalize_url(None), None);
        assert_eq!(normalize_url(Some("")), None);
        assert_eq!(normalize_url(Some("   ")), None);
        assert_eq!(normalize(None, &NoAssets), None);
    }

    #[test]
    fn file_share_link_is_rewritten() {
        let url = normalize_url(Some(
            "https://drive.google.com/file/d/ABC123/view?usp=sharing",
        ));
        assert_eq!(
            url.as_deref(),
            Some("https://lh3.googleusercontent.com/d/ABC123")
        );
    }

    #[test]
    fn open_and_uc_links_are_rewritten() {
        for link in [
            "https://drive.google.com/open?id=1a_B-c",
            "https://drive.google.com/uc?export=view&id=1a_B-c",
        ] {
            assert_eq!(
                normalize_url(Some(link)).as_deref(),
                Some("https://lh3.googleusercontent.com/d/1a_B-c")
            );
        }
    }

    #[test]
    fn non_matching_url_is_unchanged() {
        for url in [
            "https://example.com/almond.png",
            "https://drive.google.com/drive/folders/XYZ",
            "/walnut.png",
        ] {
            assert_eq!(normalize_url(Some(url)).as_deref(), Some(url));
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "https://drive.google.com/file/d/ABC123/view",
            "https://drive.google.com/open?id=XYZ",
            "https://example.com/a.png",
            "relative/path.png",
            "  https://drive.google.com/file/d/Q/view  ",
        ];
        for input in inputs {
            let once = normalize_url(Some(input));
            let twice = normalize_url(once.as_deref());
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }

    #[test]
    fn managed_asset_uses_builder() {
        let r = MediaReference::ManagedAsset("image-Tb9Ew8-2000x3000-jpg".to_string());
        assert_eq!(
            normalize(Some(&r), &cdn()).as_deref(),
            Some("https://cdn.sanity.io/images/abc123/production/Tb9Ew8-2000x3000.jpg")
        );
    }

    #[test]
    fn managed_asset_failure_is_none() {
        let r = MediaReference::ManagedAsset("file-nope".to_string());
        assert_eq!(normalize(Some(&r), &cdn()), None);
        assert_eq!(normalize(Some(&r), &NoAssets), None);
    }

    #[test]
    fn cdn_without_project_is_error() {
        let builder = CdnAssetUrls::new(&AssetsConfig::default());
        assert_eq!(
            builder.asset_url("image-a-1x1-png"),
            Err(AssetUrlError::MissingProject)
        );
    }

    #[test]
    fn cdn_rejects_bad_dimensions() {
        assert!(cdn().asset_url("image-abc-widexhigh-png").is_err());
        assert!(cdn().asset_url("image-abc-png").is_err());
    }

    #[test]
    fn url_field_wins_over_image() {
        let image = json!({"asset": {"_ref": "image-a-1x1-png"}});
        assert_eq!(
            MediaReference::from_parts(Some("https://x.test/a.png"), Some(&image)),
            Some(MediaReference::Url("https://x.test/a.png".to_string()))
        );
        assert_eq!(
            MediaReference::from_parts(Some("  "), Some(&image)),
            Some(MediaReference::ManagedAsset("image-a-1x1-png".to_string()))
        );
        assert_eq!(MediaReference::from_parts(None, None), None);
    }

    #[test]
    fn dereferenced_asset_url_is_direct() {
        let image = json!({"asset": {"url": "https://cdn.test/x.jpg"}});
        assert_eq!(
            MediaReference::from_image_json(&image),
            Some(MediaReference::Url("https://cdn.test/x.jpg".to_string()))
        );
    }

    #[test]
    fn tagged_serialization() {
        let r: MediaReference =
            serde_json::from_value(json!({"kind": "url", "value": "https://a.test"})).unwrap();
        assert_eq!(r, MediaReference::Url("https://a.test".to_string()));
        let r: MediaReference =
            serde_json::from_value(json!({"kind": "managedAsset", "value": "image-x"})).unwrap();
        assert_eq!(r, MediaReference::ManagedAsset("image-x".to_string()));
    }
}
