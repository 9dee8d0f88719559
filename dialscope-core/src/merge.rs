//! Merge policy - fold independent signal results into one record
//!
//! The merge is a pure reduce over settled [`SignalResult`]s, executed
//! after every source has returned or timed out. Callers hand results in
//! static source-priority order; within a category the first `Ok` value
//! wins each scalar field and `Empty`/`Failed` never overwrite an earlier
//! `Ok`. Collections accumulate across sources with duplicates dropped.

use serde::Serialize;

use crate::{
    BreachRecord, BusinessObservation, CarrierObservation, CarrierStatusObservation, LineType,
    MessagingAppStatus, ProbeObservation, ReputationObservation, SignalPayload, SignalResult,
    SignalStatus, SocialAccount, SocialActivityObservation, SourceCategory, VoipServiceStatus,
};

/// Which sources ran for this request and how each one ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOutcome {
    pub source_id: String,
    pub category: SourceCategory,
    pub status: SignalStatus,
}

/// Security-category view after the merge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityRecord {
    pub spam_risk: Option<bool>,
    pub reputation_score: Option<i64>,
    pub risk_indicators: Vec<String>,
}

/// Osint-category view after the merge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OsintRecord {
    pub breaches: Vec<BreachRecord>,
    pub emails: Vec<String>,
    pub websites: Vec<String>,
    pub social_accounts: Vec<SocialAccount>,
}

/// Presence-category view after the merge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenceRecord {
    pub messaging_apps: Vec<MessagingAppStatus>,
    pub voip_services: Vec<VoipServiceStatus>,
    pub social_activity: Option<SocialActivityObservation>,
    pub business: Option<BusinessObservation>,
    pub carrier_status: Option<CarrierStatusObservation>,
    pub probe: Option<ProbeObservation>,
}

/// Aggregated, conflict-resolved view across all source outputs for one
/// number. Built once per request; immutable after [`MergedIntelligence::merge`]
/// returns.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedIntelligence {
    /// Line type from the number metadata; providers never override it
    pub line_type: LineType,
    pub carrier: CarrierObservation,
    pub security: SecurityRecord,
    pub osint: OsintRecord,
    pub presence: PresenceRecord,
    pub outcomes: Vec<SourceOutcome>,
}

impl MergedIntelligence {
    /// An all-empty record - valid output when every source came back
    /// `Empty` or `Failed`
    pub fn empty(line_type: LineType) -> Self {
        Self {
            line_type,
            carrier: CarrierObservation::default(),
            security: SecurityRecord::default(),
            osint: OsintRecord::default(),
            presence: PresenceRecord::default(),
            outcomes: Vec::new(),
        }
    }

    /// Reduce settled results into one record. `results` must already be
    /// sorted by static source priority - merge precedence is never
    /// completion order.
    pub fn merge(line_type: LineType, results: &[SignalResult]) -> Self {
        let mut merged = Self::empty(line_type);
        for result in results {
            merged.apply(result);
        }
        merged
    }

    /// True if at least one source in `category` was invoked
    pub fn category_enabled(&self, category: SourceCategory) -> bool {
        self.outcomes.iter().any(|o| o.category == category)
    }

    /// True if any source in `category` errored or timed out
    pub fn category_failed(&self, category: SourceCategory) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.category == category && o.status == SignalStatus::Failed)
    }

    fn apply(&mut self, result: &SignalResult) {
        self.outcomes.push(SourceOutcome {
            source_id: result.source_id.clone(),
            category: result.category,
            status: result.status,
        });

        if result.status != SignalStatus::Ok {
            return;
        }
        let Some(payload) = &result.payload else {
            return;
        };

        match payload {
            SignalPayload::Carrier(obs) => {
                merge_option(&mut self.carrier.name, &obs.name);
                merge_option(&mut self.carrier.line_type, &obs.line_type);
                merge_option(&mut self.carrier.location, &obs.location);
                merge_option(&mut self.carrier.mcc, &obs.mcc);
                merge_option(&mut self.carrier.mnc, &obs.mnc);
            }
            SignalPayload::Reputation(obs) => {
                merge_option(&mut self.security.spam_risk, &obs.spam_risk);
                merge_option(&mut self.security.reputation_score, &obs.score);
                extend_unique(&mut self.security.risk_indicators, &obs.indicators);
            }
            SignalPayload::Breaches(records) => {
                extend_unique(&mut self.osint.breaches, records);
            }
            SignalPayload::Footprint(obs) => {
                extend_unique(&mut self.osint.emails, &obs.emails);
                extend_unique(&mut self.osint.websites, &obs.websites);
                extend_unique(&mut self.osint.social_accounts, &obs.social_accounts);
            }
            SignalPayload::Messaging(apps) => {
                for app in apps {
                    if !self.presence.messaging_apps.iter().any(|a| a.app == app.app) {
                        self.presence.messaging_apps.push(app.clone());
                    }
                }
            }
            SignalPayload::Voip(services) => {
                for service in services {
                    if !self
                        .presence
                        .voip_services
                        .iter()
                        .any(|s| s.service == service.service)
                    {
                        self.presence.voip_services.push(service.clone());
                    }
                }
            }
            SignalPayload::SocialActivity(obs) => {
                if self.presence.social_activity.is_none() {
                    self.presence.social_activity = Some(obs.clone());
                }
            }
            SignalPayload::Business(obs) => {
                if self.presence.business.is_none() {
                    self.presence.business = Some(obs.clone());
                }
            }
            SignalPayload::CarrierStatus(obs) => {
                if self.presence.carrier_status.is_none() {
                    self.presence.carrier_status = Some(obs.clone());
                }
            }
            SignalPayload::Probe(obs) => {
                if self.presence.probe.is_none() {
                    self.presence.probe = Some(obs.clone());
                }
            }
        }
    }
}

fn merge_option<T: Clone>(slot: &mut Option<T>, incoming: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(incoming);
    }
}

fn extend_unique<T: Clone + PartialEq>(target: &mut Vec<T>, incoming: &[T]) {
    for item in incoming {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}
