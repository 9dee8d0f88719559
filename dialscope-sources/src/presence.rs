//! Presence and footprint probes
//!
//! None of these have a public API worth shipping credentials for today;
//! each is a named slot that reports `Empty` until a real integration
//! lands. Keeping them registered exercises the full merge and presence
//! classification path, and gives report consumers a stable source list.

use async_trait::async_trait;

use dialscope_core::{CanonicalNumber, SignalResult, SourceCategory};

use crate::SignalSource;

/// A registered probe slot without a live backend
pub struct PlaceholderProbe {
    id: &'static str,
    category: SourceCategory,
    priority: u8,
}

impl PlaceholderProbe {
    /// Messaging-app registration/online lookup (WhatsApp, Telegram, ...)
    pub fn messaging() -> Self {
        Self {
            id: "messaging-apps",
            category: SourceCategory::Presence,
            priority: 10,
        }
    }

    /// VoIP service activity lookup (Skype, Google Voice, ...)
    pub fn voip() -> Self {
        Self {
            id: "voip-services",
            category: SourceCategory::Presence,
            priority: 20,
        }
    }

    /// Public social-media activity lookup
    pub fn social() -> Self {
        Self {
            id: "social-activity",
            category: SourceCategory::Presence,
            priority: 30,
        }
    }

    /// Business-listing activity lookup
    pub fn business() -> Self {
        Self {
            id: "business-listings",
            category: SourceCategory::Presence,
            priority: 40,
        }
    }

    /// Carrier-reported network status (requires carrier partnership)
    pub fn carrier_status() -> Self {
        Self {
            id: "carrier-status",
            category: SourceCategory::Presence,
            priority: 50,
        }
    }

    /// Consented network probe (HLR-style reachability)
    pub fn network_probe() -> Self {
        Self {
            id: "network-probe",
            category: SourceCategory::Presence,
            priority: 60,
        }
    }

    /// Digital-footprint enrichment (emails, websites, social accounts)
    pub fn footprint() -> Self {
        Self {
            id: "digital-footprint",
            category: SourceCategory::Osint,
            priority: 20,
        }
    }
}

#[async_trait]
impl SignalSource for PlaceholderProbe {
    fn id(&self) -> &str {
        self.id
    }

    fn category(&self) -> SourceCategory {
        self.category
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn configured(&self) -> bool {
        false
    }

    async fn fetch(&self, _number: &CanonicalNumber, _raw_input: &str) -> SignalResult {
        SignalResult::empty(self.id, self.category)
    }
}
