//! End-to-end tests: the fixture site document rendered through the library
//! API and through the CLI binary.
//!
//! Run with: `cargo test --test render_site`

use section_press::config::{self, SiteConfig};
use section_press::content::Section;
use section_press::enquiry::EnquiryBus;
use section_press::generate::{self, SectionOutcome};
use section_press::media::CdnAssetUrls;
use section_press::render::RenderContext;
use section_press::render::showcase::ShowcaseComponent;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

const CONFIG: &str = r#"
[assets]
project_id = "abc123"

[enquiry]
event_name = "add-to-enquiry"

[routing]
products_section_id = "products"
"#;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/site.json")
}

fn site_config(tmp: &TempDir) -> SiteConfig {
    let _ = env_logger::builder().is_test(true).try_init();
    let path = tmp.path().join("config.toml");
    fs::write(&path, CONFIG).unwrap();
    config::load_config(&path).unwrap()
}

fn generate_into(tmp: &TempDir, locale: Option<&str>) -> Vec<generate::PageReport> {
    let config = site_config(tmp);
    let assets = CdnAssetUrls::new(&config.assets);
    let mut ctx = RenderContext::new(&config, &assets);
    if let Some(locale) = locale {
        ctx = ctx.with_locale(locale);
    }
    generate::generate(&fixture(), &tmp.path().join("dist"), &ctx).unwrap()
}

fn read(tmp: &TempDir, file: &str) -> String {
    fs::read_to_string(tmp.path().join("dist").join(file)).unwrap()
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

#[test]
fn every_page_is_written() {
    let tmp = TempDir::new().unwrap();
    let pages = generate_into(&tmp, None);
    assert_eq!(pages.len(), 2);
    assert!(tmp.path().join("dist/index.html").exists());
    assert!(tmp.path().join("dist/about.html").exists());
}

#[test]
fn home_page_renders_all_known_sections() {
    let tmp = TempDir::new().unwrap();
    let pages = generate_into(&tmp, None);
    let home = &pages[0];
    assert_eq!(home.count(SectionOutcome::Rendered), 5);
    assert_eq!(home.count(SectionOutcome::Skipped), 1);

    let html = read(&tmp, "index.html");
    // Drive share links rewritten
    assert!(html.contains("https://lh3.googleusercontent.com/d/1AbC-dEf_42"));
    assert!(html.contains("https://lh3.googleusercontent.com/d/PoStEr99"));
    // Managed assets resolved through the CDN
    assert!(html.contains(
        "https://cdn.sanity.io/images/abc123/production/orchard01-1920x1080.jpg"
    ));
    // Six features form a grid; the backdrop banner forces light text
    assert!(html.contains(r#"class="banner-features features-grid""#));
    assert!(html.contains("banner banner--background-image tone-light"));
    assert!(html.contains("banner-overlay overlay-high"));
    // Showcase filled from the catalogue, anchored by config
    assert!(html.contains(r#"id="products""#));
    assert!(html.contains("California Almonds"));
    assert!(html.contains("Medjool Dates"));
    assert!(html.contains(r#"data-enquiry-event="add-to-enquiry""#));
    // Testimonials
    assert!(html.contains("Inside Our Facility"));
    assert!(html.contains("Virtual tour coming soon"));
    assert!(!html.contains("heroCarousel"));
}

#[test]
fn validation_warnings_are_reported_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let pages = generate_into(&tmp, None);
    let testimonials = &pages[0].sections[4];
    let result = testimonials.validation.as_ref().unwrap();
    let paths: Vec<&str> = result
        .required_violations()
        .map(|d| d.path.as_str())
        .collect();
    assert_eq!(paths, vec!["videoTestimonialsSection.videos[1].title"]);
    assert_eq!(testimonials.outcome, SectionOutcome::Rendered);
}

#[test]
fn active_locale_with_fallback() {
    let tmp = TempDir::new().unwrap();
    generate_into(&tmp, Some("hi"));
    let html = read(&tmp, "index.html");
    assert!(html.contains(r#"<html lang="hi">"#));
    assert!(html.contains("गुणवत्ता में निहित"));
    assert!(html.contains("कैलिफ़ोर्निया बादाम"));
    // No Hindi translation: falls back to English
    assert!(html.contains("since 1998"));
    assert!(html.contains("Medjool Dates"));
}

#[test]
fn about_page_uses_paragraphs_and_dark_theme() {
    let tmp = TempDir::new().unwrap();
    generate_into(&tmp, None);
    let html = read(&tmp, "about.html");
    assert!(html.contains("<title>About Us</title>"));
    assert!(html.contains("Founded in Amritsar."));
    assert!(html.contains(r#"class="banner banner--text-only tone-light""#));
    assert!(html.contains(r#"<div class="banner-divider">"#));
}

#[test]
fn showcase_publishes_enquiries_from_fixture() {
    let tmp = TempDir::new().unwrap();
    let config = site_config(&tmp);
    let assets = CdnAssetUrls::new(&config.assets);
    let ctx = RenderContext::new(&config, &assets);

    let site = generate::load_site(&fixture()).unwrap();
    let payload = serde_json::json!({ "products": site.products });
    let Some(Section::ProductShowcase(showcase)) = Section::from_json("productShowcase", payload)
    else {
        panic!("expected a product showcase");
    };

    let mut bus = EnquiryBus::new();
    let rx = bus.subscribe("add-to-enquiry");
    let mut component = ShowcaseComponent::mount(&showcase, &ctx);
    assert!(component.select("almonds"));
    assert_eq!(component.modal_add_to_enquiry(&mut bus), Some(1));

    let event = rx.try_recv().unwrap();
    assert_eq!(event.product_id, "almonds");
    assert_eq!(event.category, "Nuts");
    assert_eq!(event.slug.as_deref(), Some("california-almonds"));
}

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_section-press"))
}

#[test]
fn cli_generate_writes_site() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("config.toml");
    fs::write(&config_path, CONFIG).unwrap();
    let out = tmp.path().join("out");

    let output = bin()
        .args(["--config", config_path.to_str().unwrap()])
        .args(["generate", fixture().to_str().unwrap()])
        .args(["--output", out.to_str().unwrap()])
        .output()
        .expect("failed to run section-press");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("001 Home → index.html"));
    assert!(stdout.contains("002 About Us → about.html"));
    assert!(out.join("index.html").exists());
}

#[test]
fn cli_check_lists_diagnostics() {
    let output = bin()
        .args(["--config", "/nonexistent/config.toml"])
        .args(["check", fixture().to_str().unwrap()])
        .output()
        .expect("failed to run section-press");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("videoTestimonialsSection.videos[1].title: required field missing"));
    assert!(stdout.contains("heroCarousel: unknown type, skipped"));
}

#[test]
fn cli_schema_prints_descriptor() {
    let output = bin().args(["schema", "testimonialsSection"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "testimonialsSection");

    let output = bin().args(["schema", "heroCarousel"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_gen_config_round_trips() {
    let output = bin().arg("gen-config").output().unwrap();
    assert!(output.status.success());
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(&path, &output.stdout).unwrap();
    let config = config::load_config(&path).unwrap();
    assert_eq!(config.locale.default, "en");
}
