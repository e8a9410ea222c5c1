//! Product showcase: section header, a grid of product cards and a details
//! dialog for the selected product.
//!
//! The dialog's open/closed state belongs to one mounted component. Mounting
//! again (a new page render) always starts closed with nothing selected.

use super::{RenderContext, eyebrow};
use crate::content::{ProductContent, ProductShowcase, non_blank};
use crate::enquiry::{EnquiryBus, EnquiryEvent};
use maud::{Markup, html};

/// Details dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    pub selected: Option<String>,
    pub open: bool,
}

impl ModalState {
    pub fn open_for(&mut self, product_id: &str) {
        self.selected = Some(product_id.to_string());
        self.open = true;
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.open = false;
    }
}

/// A mounted product showcase.
pub struct ShowcaseComponent<'a> {
    showcase: &'a ProductShowcase,
    ctx: &'a RenderContext<'a>,
    modal: ModalState,
}

impl<'a> ShowcaseComponent<'a> {
    pub fn mount(showcase: &'a ProductShowcase, ctx: &'a RenderContext<'a>) -> Self {
        Self {
            showcase,
            ctx,
            modal: ModalState::default(),
        }
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    fn product(&self, id: &str) -> Option<&'a ProductContent> {
        self.showcase.products.iter().find(|p| p.id == id)
    }

    /// Open the details dialog for `product_id`. Unknown ids leave it untouched.
    pub fn select(&mut self, product_id: &str) -> bool {
        if self.product(product_id).is_none() {
            log::debug!("select: no product '{product_id}' in showcase");
            return false;
        }
        self.modal.open_for(product_id);
        true
    }

    pub fn close(&mut self) {
        self.modal.close();
    }

    /// Publish an enquiry event for `product_id` on the configured channel.
    ///
    /// Returns `None` when no channel is configured or the product is not in
    /// this showcase, otherwise the number of listeners reached.
    pub fn add_to_enquiry(&self, product_id: &str, bus: &mut EnquiryBus) -> Option<usize> {
        let channel = self.ctx.config.enquiry.event_name.as_deref()?;
        let product = self.product(product_id)?;
        let event = EnquiryEvent::for_product(product, &self.ctx.locales);
        Some(bus.publish(channel, &event))
    }

    /// The dialog's enquiry button: publishes the selected product, if any.
    pub fn modal_add_to_enquiry(&self, bus: &mut EnquiryBus) -> Option<usize> {
        let selected = self.modal.selected.as_deref()?;
        self.add_to_enquiry(selected, bus)
    }

    pub fn render(&self) -> Markup {
        if self.showcase.products.is_empty() {
            log::debug!("skipping product showcase: no products");
            return html! {};
        }
        let section_id = self.ctx.config.routing.products_section_id.as_deref();

        html! {
            section.showcase id=[section_id] aria-labelledby="products-heading" {
                div.container {
                    (self.header())
                    div.product-grid {
                        @for product in &self.showcase.products {
                            (self.card(product))
                        }
                    }
                    (self.dialog())
                }
            }
        }
    }

    fn header(&self) -> Markup {
        let Some(header) = &self.showcase.header_data else {
            return html! {};
        };
        let locales = &self.ctx.locales;
        html! {
            div.showcase-header {
                @if let Some(text) = locales.text(header.eyebrow.as_ref()) {
                    (eyebrow(&text, "centered", true))
                }
                @if let Some(title) = locales.text(header.title.as_ref()) {
                    h2.showcase-title id="products-heading" { (title) }
                }
                @if let Some(description) = locales.text(header.description.as_ref()) {
                    p.showcase-description { (description) }
                }
            }
        }
    }

    fn card(&self, product: &ProductContent) -> Markup {
        let locales = &self.ctx.locales;
        let title = locales.text(product.title.as_ref());
        let alt = title.as_deref().unwrap_or(product.category.as_str());
        let image = self.ctx.image_json_url(product.hero_image.as_ref());
        let labels = &self.ctx.config.labels;

        html! {
            article.product-card data-product-id=(product.id) {
                @if let Some(src) = image {
                    div.product-image {
                        img src=(src) alt=(alt) loading="lazy";
                    }
                }
                div.product-body {
                    @if let Some(category) = non_blank(Some(product.category.as_str())) {
                        p.product-category { (category) }
                    }
                    @if let Some(title) = &title {
                        h3.product-title { (title) }
                    }
                    @if let Some(description) = locales.text(product.description.as_ref()) {
                        p.product-description { (description) }
                    }
                    div.product-actions {
                        button.product-details type="button" data-select=(product.id) {
                            (labels.view_details)
                        }
                        (self.enquiry_button(product))
                    }
                }
            }
        }
    }

    fn enquiry_button(&self, product: &ProductContent) -> Markup {
        let channel = self.ctx.config.enquiry.event_name.as_deref();
        let payload = channel.and_then(|_| {
            serde_json::to_string(&EnquiryEvent::for_product(product, &self.ctx.locales)).ok()
        });
        html! {
            button.enquiry-button type="button" data-enquiry-event=[channel] data-enquiry=[payload] {
                (self.ctx.config.labels.add_to_enquiry)
            }
        }
    }

    fn dialog(&self) -> Markup {
        let selected = self.modal.selected.as_deref().and_then(|id| self.product(id));
        let locales = &self.ctx.locales;
        let labels = &self.ctx.config.labels;

        html! {
            dialog.product-dialog open[self.modal.open] aria-modal="true" {
                @if let Some(product) = selected {
                    div.dialog-body {
                        @let heading = locales
                            .text(product.hero_heading.as_ref())
                            .or_else(|| locales.text(product.title.as_ref()));
                        @if let Some(heading) = heading {
                            h3.dialog-heading { (heading) }
                        }
                        @for paragraph in &product.intro_paragraphs {
                            @if let Some(text) = locales.text(Some(paragraph)) {
                                p.dialog-intro { (text) }
                            }
                        }
                        @for list in &product.list_sections {
                            div.dialog-list {
                                @if let Some(title) = locales.text(list.title.as_ref()) {
                                    h4 { (title) }
                                }
                                ul {
                                    @for item in &list.items {
                                        @if let Some(text) = locales.text(Some(item)) {
                                            li { (text) }
                                        }
                                    }
                                }
                            }
                        }
                        @if let Some(cta) = locales.text(product.cta_line.as_ref()) {
                            p.dialog-cta { (cta) }
                        }
                        div.dialog-actions {
                            (self.enquiry_button(product))
                            button.dialog-close type="button" { (labels.close) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{HeaderData, ListSection};
    use crate::test_helpers::{DirectAssets, product};

    fn showcase() -> ProductShowcase {
        ProductShowcase {
            header_data: Some(HeaderData {
                eyebrow: Some("Our Range".into()),
                title: Some("Premium Dry Fruits".into()),
                description: None,
            }),
            products: vec![
                product("p1", "California Almonds", "nuts"),
                product("p2", "Medjool Dates", "dates"),
            ],
        }
    }

    fn dialog_tag(html: &str) -> &str {
        let start = html.find("<dialog").unwrap();
        let end = start + html[start..].find('>').unwrap();
        &html[start..end]
    }

    fn config_with_event() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.enquiry.event_name = Some("add-to-enquiry".to_string());
        config
    }

    #[test]
    fn no_products_renders_nothing() {
        let config = SiteConfig::default();
        let ctx = RenderContext::new(&config, &DirectAssets);
        let empty = ProductShowcase {
            header_data: showcase().header_data,
            products: Vec::new(),
        };
        assert_eq!(ShowcaseComponent::mount(&empty, &ctx).render().into_string(), "");
    }

    #[test]
    fn renders_header_and_cards() {
        let config = SiteConfig::default();
        let ctx = RenderContext::new(&config, &DirectAssets);
        let data = showcase();
        let html = ShowcaseComponent::mount(&data, &ctx).render().into_string();
        assert!(html.contains(r#"aria-labelledby="products-heading""#));
        assert!(html.contains(r#"id="products-heading""#));
        assert_eq!(html.matches("<article").count(), 2);
        assert!(html.contains("https://assets.test/image-p1-800x600-jpg"));
        assert!(html.contains("Add to Enquiry"));
        assert!(!html.contains("showcase-description"));
    }

    #[test]
    fn section_id_comes_from_config() {
        let mut config = SiteConfig::default();
        config.routing.products_section_id = Some("products".to_string());
        let ctx = RenderContext::new(&config, &DirectAssets);
        let data = showcase();
        let html = ShowcaseComponent::mount(&data, &ctx).render().into_string();
        assert!(html.contains(r#"id="products""#));
    }

    #[test]
    fn enquiry_attributes_only_with_event_name() {
        let data = showcase();

        let config = SiteConfig::default();
        let ctx = RenderContext::new(&config, &DirectAssets);
        let html = ShowcaseComponent::mount(&data, &ctx).render().into_string();
        assert!(!html.contains("data-enquiry"));

        let config = config_with_event();
        let ctx = RenderContext::new(&config, &DirectAssets);
        let html = ShowcaseComponent::mount(&data, &ctx).render().into_string();
        assert!(html.contains(r#"data-enquiry-event="add-to-enquiry""#));
        assert!(html.contains("&quot;productId&quot;:&quot;p1&quot;"));
    }

    #[test]
    fn add_to_enquiry_publishes_on_configured_channel() {
        let config = config_with_event();
        let ctx = RenderContext::new(&config, &DirectAssets);
        let data = showcase();
        let component = ShowcaseComponent::mount(&data, &ctx);

        let mut bus = EnquiryBus::new();
        let rx = bus.subscribe("add-to-enquiry");
        assert_eq!(component.add_to_enquiry("p2", &mut bus), Some(1));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.product_id, "p2");
        assert_eq!(event.title, "Medjool Dates");
        assert_eq!(event.category, "dates");

        assert_eq!(component.add_to_enquiry("missing", &mut bus), None);
    }

    #[test]
    fn no_event_name_means_no_publish() {
        let config = SiteConfig::default();
        let ctx = RenderContext::new(&config, &DirectAssets);
        let data = showcase();
        let component = ShowcaseComponent::mount(&data, &ctx);
        let mut bus = EnquiryBus::new();
        let rx = bus.subscribe("add-to-enquiry");
        assert_eq!(component.add_to_enquiry("p1", &mut bus), None);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn modal_state_is_scoped_to_the_mount() {
        let config = config_with_event();
        let ctx = RenderContext::new(&config, &DirectAssets);
        let mut data = showcase();
        data.products[0].hero_heading = Some("Crunchy, Sweet, Wholesome".into());
        data.products[0].list_sections = vec![ListSection {
            title: Some("Grades".into()),
            items: vec!["Gurbandi".into(), "Independence".into()],
        }];

        let mut component = ShowcaseComponent::mount(&data, &ctx);
        assert!(!component.modal().open);
        assert!(!component.select("nope"));
        assert!(component.select("p1"));
        let html = component.render().into_string();
        assert!(dialog_tag(&html).contains(" open"));
        assert!(html.contains("Crunchy, Sweet, Wholesome"));
        assert!(html.contains("<li>Independence</li>"));

        let mut bus = EnquiryBus::new();
        let rx = bus.subscribe("add-to-enquiry");
        assert_eq!(component.modal_add_to_enquiry(&mut bus), Some(1));
        assert_eq!(rx.try_recv().unwrap().product_id, "p1");

        component.close();
        assert_eq!(component.modal_add_to_enquiry(&mut bus), None);

        component.select("p2");
        let remounted = ShowcaseComponent::mount(&data, &ctx);
        assert_eq!(remounted.modal(), &ModalState::default());
        let html = remounted.render().into_string();
        assert!(!dialog_tag(&html).contains(" open"));
        assert!(!html.contains("dialog-body"));
    }

    #[test]
    fn untitled_product_has_no_empty_heading() {
        let config = SiteConfig::default();
        let ctx = RenderContext::new(&config, &DirectAssets);
        let mut data = showcase();
        data.products[1].title = None;
        let html = ShowcaseComponent::mount(&data, &ctx).render().into_string();
        assert_eq!(html.matches(r#"class="product-title""#).count(), 1);
        assert!(!html.contains(r#"alt="""#));
        assert!(html.contains(r#"alt="dates""#));
    }
}
