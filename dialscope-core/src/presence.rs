//! Online-Status Engine - presence classification with a fixed tie-break
//!
//! Classifies heterogeneous presence evidence into one state per request.
//! Nothing is retained across calls; "state" is classification output, not
//! session state. The priority ladder is the documented tie-break policy:
//!
//! 1. No presence sources enabled at all        -> Unknown
//! 2. Any presence source errored or timed out  -> Error
//! 3. >= 2 independent online indicators        -> Online
//! 4. Exactly 1 online indicator                -> RecentlyOnline
//! 5. A messaging app reporting `online: true`  -> OnlineViaMessaging
//! 6. Otherwise                                 -> Offline
//!
//! An "online indicator" is service-level activity evidence: an active
//! VoIP service, messaging presence with a recent sighting, recent social
//! activity, or a network probe response. A messaging app's bare `online`
//! flag is weaker evidence and only drives rule 5.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{MergedIntelligence, SourceCategory, UNKNOWN};

/// Presence classification output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PresenceState {
    Online,
    #[serde(rename = "Recently Online")]
    RecentlyOnline,
    #[serde(rename = "Online via messaging")]
    OnlineViaMessaging,
    Offline,
    Unknown,
    Error,
}

impl std::fmt::Display for PresenceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PresenceState::Online => "Online",
            PresenceState::RecentlyOnline => "Recently Online",
            PresenceState::OnlineViaMessaging => "Online via messaging",
            PresenceState::Offline => "Offline",
            PresenceState::Unknown => "Unknown",
            PresenceState::Error => "Error",
        };
        f.write_str(name)
    }
}

/// Classification plus its supporting evidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresenceAssessment {
    pub state: PresenceState,
    pub connection_status: String,
    pub last_seen: Option<DateTime<Utc>>,
    pub online_indicators: Vec<String>,
}

/// Classify presence evidence from a merged record. Pure function of the
/// indicator counts and source outcomes.
pub fn classify(intel: &MergedIntelligence) -> PresenceAssessment {
    let record = &intel.presence;
    let indicators = collect_indicators(intel);
    let messaging_online = record.messaging_apps.iter().any(|a| a.online);

    let state = if !intel.category_enabled(SourceCategory::Presence) {
        PresenceState::Unknown
    } else if intel.category_failed(SourceCategory::Presence) {
        PresenceState::Error
    } else if indicators.len() >= 2 {
        PresenceState::Online
    } else if indicators.len() == 1 {
        PresenceState::RecentlyOnline
    } else if messaging_online {
        PresenceState::OnlineViaMessaging
    } else {
        PresenceState::Offline
    };

    let connection_status = if messaging_online {
        "Online via messaging".to_string()
    } else {
        UNKNOWN.to_string()
    };

    PresenceAssessment {
        state,
        connection_status,
        last_seen: freshest_sighting(intel),
        online_indicators: indicators,
    }
}

fn collect_indicators(intel: &MergedIntelligence) -> Vec<String> {
    let record = &intel.presence;
    let mut indicators = Vec::new();

    if record.voip_services.iter().any(|s| s.active) {
        indicators.push("VoIP service active".to_string());
    }

    for app in &record.messaging_apps {
        if app.registered && app.last_seen.is_some() {
            indicators.push(format!("{} activity", app.app));
        }
    }

    if let Some(social) = &record.social_activity {
        if social.recent_activity {
            indicators.push("Recent social media activity".to_string());
        }
    }

    if let Some(probe) = &record.probe {
        if probe.responded {
            indicators.push("Network probe response".to_string());
        }
    }

    indicators
}

fn freshest_sighting(intel: &MergedIntelligence) -> Option<DateTime<Utc>> {
    let record = &intel.presence;
    let messaging = record.messaging_apps.iter().filter_map(|a| a.last_seen);
    let social = record
        .social_activity
        .as_ref()
        .and_then(|s| s.last_activity);
    messaging.chain(social).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        LineType, MessagingAppStatus, SignalPayload, SignalResult, SocialActivityObservation,
        VoipServiceStatus,
    };

    fn presence_result(payload: SignalPayload) -> SignalResult {
        SignalResult::ok("probe", SourceCategory::Presence, payload)
    }

    fn with_presence(results: Vec<SignalResult>) -> MergedIntelligence {
        MergedIntelligence::merge(LineType::Mobile, &results)
    }

    fn active_voip() -> SignalResult {
        presence_result(SignalPayload::Voip(vec![VoipServiceStatus {
            service: "Skype".to_string(),
            active: true,
        }]))
    }

    fn seen_messaging(online: bool) -> SignalResult {
        presence_result(SignalPayload::Messaging(vec![MessagingAppStatus {
            app: "WhatsApp".to_string(),
            registered: true,
            online,
            last_seen: Some(Utc::now()),
        }]))
    }

    #[test]
    fn test_two_indicators_is_online() {
        let intel = with_presence(vec![active_voip(), seen_messaging(false)]);
        let assessment = classify(&intel);
        assert_eq!(assessment.state, PresenceState::Online);
        assert_eq!(assessment.online_indicators.len(), 2);
    }

    #[test]
    fn test_one_indicator_is_recently_online() {
        let intel = with_presence(vec![active_voip()]);
        let assessment = classify(&intel);
        assert_eq!(assessment.state, PresenceState::RecentlyOnline);
        assert_eq!(assessment.online_indicators, vec!["VoIP service active"]);
    }

    #[test]
    fn test_messaging_online_flag_alone() {
        // No service-level indicators, but one app reports online.
        let intel = with_presence(vec![presence_result(SignalPayload::Messaging(vec![
            MessagingAppStatus {
                app: "Telegram".to_string(),
                registered: true,
                online: true,
                last_seen: None,
            },
        ]))]);
        let assessment = classify(&intel);
        assert_eq!(assessment.state, PresenceState::OnlineViaMessaging);
        assert_eq!(assessment.connection_status, "Online via messaging");
    }

    #[test]
    fn test_no_evidence_is_offline() {
        let intel = with_presence(vec![presence_result(SignalPayload::Voip(vec![
            VoipServiceStatus {
                service: "Skype".to_string(),
                active: false,
            },
        ]))]);
        assert_eq!(classify(&intel).state, PresenceState::Offline);
    }

    #[test]
    fn test_presence_failure_overrides_indicators() {
        let intel = with_presence(vec![
            active_voip(),
            seen_messaging(true),
            SignalResult::failed("carrier-status", SourceCategory::Presence),
        ]);
        assert_eq!(classify(&intel).state, PresenceState::Error);
    }

    #[test]
    fn test_no_presence_sources_is_unknown() {
        let intel = MergedIntelligence::empty(LineType::Mobile);
        let assessment = classify(&intel);
        assert_eq!(assessment.state, PresenceState::Unknown);
        assert!(assessment.online_indicators.is_empty());
        assert_eq!(assessment.connection_status, "Unknown");
    }

    #[test]
    fn test_failure_in_other_category_does_not_error_presence() {
        let intel = with_presence(vec![
            active_voip(),
            SignalResult::failed("numverify", SourceCategory::Carrier),
        ]);
        assert_eq!(classify(&intel).state, PresenceState::RecentlyOnline);
    }

    #[test]
    fn test_last_seen_takes_freshest_evidence() {
        let older = Utc::now() - chrono::Duration::hours(5);
        let newer = Utc::now();
        let intel = with_presence(vec![
            presence_result(SignalPayload::Messaging(vec![MessagingAppStatus {
                app: "WhatsApp".to_string(),
                registered: true,
                online: false,
                last_seen: Some(older),
            }])),
            presence_result(SignalPayload::SocialActivity(SocialActivityObservation {
                recent_activity: true,
                platforms_active: vec!["mastodon".to_string()],
                last_activity: Some(newer),
            })),
        ]);
        assert_eq!(classify(&intel).last_seen, Some(newer));
    }
}
