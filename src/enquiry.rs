//! "Add to enquiry" notifications.
//!
//! When a visitor picks a product for follow-up, the showcase publishes an
//! [`EnquiryEvent`] on a named channel. Any number of listeners subscribe to
//! a channel by name; each receives its own copy of every event published
//! after it subscribed. Publishing to a channel nobody listens on is a no-op.
//!
//! The payload is deliberately small: enough to identify the product and
//! show it in an enquiry form, nothing more.

use crate::content::ProductContent;
use crate::locale::Locales;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

/// Payload of an "add to enquiry" notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryEvent {
    pub product_id: String,
    pub title: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl EnquiryEvent {
    pub fn for_product(product: &ProductContent, locales: &Locales) -> Self {
        Self {
            product_id: product.id.clone(),
            title: locales.text(product.title.as_ref()).unwrap_or_default(),
            category: product.category.clone(),
            slug: product.slug().map(str::to_string),
        }
    }
}

/// Named broadcast channels for enquiry events.
#[derive(Debug, Default)]
pub struct EnquiryBus {
    channels: HashMap<String, Vec<Sender<EnquiryEvent>>>,
}

impl EnquiryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `channel`. The receiver sees events published from now on.
    pub fn subscribe(&mut self, channel: &str) -> Receiver<EnquiryEvent> {
        let (tx, rx) = mpsc::channel();
        self.channels.entry(channel.to_string()).or_default().push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber of `channel`.
    ///
    /// Subscribers whose receiver was dropped are forgotten. Returns how many
    /// subscribers received the event.
    pub fn publish(&mut self, channel: &str, event: &EnquiryEvent) -> usize {
        let Some(senders) = self.channels.get_mut(channel) else {
            log::debug!("no listeners on '{channel}' for {}", event.product_id);
            return 0;
        };
        senders.retain(|tx| tx.send(event.clone()).is_ok());
        senders.len()
    }

    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.channels.get(channel).map_or(0, Vec::len)
    }
}
