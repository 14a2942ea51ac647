//! Header state for one viewed account.

use std::time::Instant;

use anyhow::Result;
use tracing::debug;

use super::classify::{classify, Classification, Role};
use super::copy::CopyState;
use super::format::{format_address, AddressSegments};
use crate::domain::sources::Sources;

/// Destination for copied text
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Classification, display segments and copy state for `address`.
///
/// The host calls [`AccountHeader::refresh`] whenever a provider snapshot
/// changes and [`AccountHeader::set_address`] when the viewed account does.
#[derive(Debug, Default)]
pub struct AccountHeader {
    address: String,
    segments: AddressSegments,
    classification: Classification,
    copy: CopyState,
}

impl AccountHeader {
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        Self {
            segments: format_address(&address),
            address,
            classification: Classification::default(),
            copy: CopyState::new(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_address(&mut self, address: impl Into<String>, sources: &Sources) {
        let address = address.into();
        if address == self.address {
            return;
        }
        self.copy.cancel();
        self.segments = format_address(&address);
        self.address = address;
        self.classification = Classification::default();
        self.refresh(sources);
    }

    /// Reclassify against `sources`. While representatives are reloading
    /// the previous match for this address is kept.
    pub fn refresh(&mut self, sources: &Sources) {
        let previous = self.classification.representative.take();
        self.classification = classify(
            &self.address,
            &sources.representatives,
            sources.min_weight(),
            &sources.known_accounts,
        );
        if sources.representatives.is_loading {
            self.classification.representative = previous;
        }
        debug!(
            address = %self.address,
            role = ?self.classification.role(),
            alias = ?self.classification.alias(),
            "reclassified account"
        );
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn role(&self) -> Role {
        self.classification.role()
    }

    pub fn title(&self) -> Option<&'static str> {
        self.role().title()
    }

    pub fn alias(&self) -> Option<&str> {
        self.classification.alias()
    }

    pub fn segments(&self) -> &AddressSegments {
        &self.segments
    }

    pub fn is_copied(&self) -> bool {
        self.copy.is_copied()
    }

    pub fn copy_label(&self) -> &'static str {
        if self.copy.is_copied() {
            "Copied!"
        } else {
            "Copy"
        }
    }

    /// Write the address to `clipboard`. Returns `Ok(false)` while the
    /// previous copy indicator is still on.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> Result<bool> {
        if self.copy.is_copied() || self.address.is_empty() {
            return Ok(false);
        }
        clipboard.set_text(&self.address)?;
        Ok(self.copy.copy(now))
    }

    pub fn tick(&mut self, now: Instant) {
        self.copy.tick(now);
    }

    /// Text handed to the QR renderer
    pub fn qr_request(&self) -> &str {
        &self.address
    }
}

impl Drop for AccountHeader {
    fn drop(&mut self) {
        self.copy.cancel();
    }
}
