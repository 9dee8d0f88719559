//! Reputation and spam-risk sources
//!
//! Two independent providers feed the security category: the Twilio
//! Lookup API (live risk data, needs credentials) and an offline
//! spam-pattern table that is always available.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::RegexSet;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use dialscope_core::{
    CanonicalNumber, ReputationObservation, SignalPayload, SignalResult, SourceCategory,
    DEFAULT_SOURCE_TIMEOUT_SECS,
};

use crate::{settle, SignalSource, SourceError};

const TWILIO_LOOKUP_ENDPOINT: &str = "https://lookups.twilio.com/v2/PhoneNumbers";

/// Twilio Lookup reputation provider. Reports `Empty` without credentials.
pub struct TwilioLookupSource {
    account_sid: Option<String>,
    auth_token: Option<String>,
    client: Client,
}

impl TwilioLookupSource {
    pub fn new(account_sid: Option<String>, auth_token: Option<String>) -> Self {
        Self {
            account_sid,
            auth_token,
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(DEFAULT_SOURCE_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    async fn lookup(
        &self,
        number: &CanonicalNumber,
    ) -> Result<Option<SignalPayload>, SourceError> {
        let (Some(sid), Some(token)) = (&self.account_sid, &self.auth_token) else {
            debug!("no Twilio credentials configured");
            return Ok(None);
        };

        let url = format!("{}/{}", TWILIO_LOOKUP_ENDPOINT, number.e164());
        let response = self
            .client
            .get(&url)
            .query(&[("Fields", "sms_pumping_risk")])
            .basic_auth(sid, Some(token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Provider(format!(
                "Twilio Lookup returned status {}",
                response.status()
            )));
        }

        let data: TwilioLookupResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        let Some(risk) = data.sms_pumping_risk else {
            return Ok(None);
        };

        let blocked = risk.number_blocked.unwrap_or(false);
        let high_risk_category = risk
            .carrier_risk_category
            .as_deref()
            .is_some_and(|c| c == "high");

        let mut indicators = Vec::new();
        if blocked {
            indicators.push("Number blocked by carriers".to_string());
        }
        if high_risk_category {
            indicators.push("Carrier risk category: high".to_string());
        }

        // Twilio scores risk 0-100 (higher is riskier); reputation is the
        // inverse scale.
        let reputation = risk
            .sms_pumping_risk_score
            .map(|score| (100 - score).clamp(0, 100));

        Ok(Some(SignalPayload::Reputation(ReputationObservation {
            spam_risk: Some(blocked || high_risk_category),
            score: reputation,
            indicators,
        })))
    }
}

#[async_trait]
impl SignalSource for TwilioLookupSource {
    fn id(&self) -> &str {
        "twilio-lookup"
    }

    fn category(&self) -> SourceCategory {
        SourceCategory::Security
    }

    fn priority(&self) -> u8 {
        10
    }

    fn configured(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some()
    }

    async fn fetch(&self, number: &CanonicalNumber, _raw_input: &str) -> SignalResult {
        settle(self.id(), self.category(), self.lookup(number).await)
    }
}

#[derive(Debug, Deserialize)]
struct TwilioLookupResponse {
    sms_pumping_risk: Option<SmsPumpingRisk>,
}

#[derive(Debug, Deserialize)]
struct SmsPumpingRisk {
    carrier_risk_category: Option<String>,
    number_blocked: Option<bool>,
    sms_pumping_risk_score: Option<i64>,
}

// Prefix patterns with documented spam/premium abuse history, matched
// against the E.164 form.
const SPAM_PATTERNS: &[(&str, &str)] = &[
    (r"^\+1900\d{7}$", "US premium-rate prefix"),
    (r"^\+1976\d{7}$", "NANP premium-rate prefix"),
    (r"^\+449(?:0\d|1\d|8[247])\d{7}$", "UK premium-rate prefix"),
    (r"^\+61190\d{6,8}$", "AU premium-rate prefix"),
];

static SPAM_PATTERN_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(SPAM_PATTERNS.iter().map(|(pattern, _)| *pattern)).unwrap()
});

/// Offline spam-pattern check. Needs no credentials; reports `Empty` when
/// nothing matches so a live provider's verdict is never diluted.
pub struct SpamPatternSource;

impl SpamPatternSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpamPatternSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalSource for SpamPatternSource {
    fn id(&self) -> &str {
        "spam-patterns"
    }

    fn category(&self) -> SourceCategory {
        SourceCategory::Security
    }

    fn priority(&self) -> u8 {
        20
    }

    async fn fetch(&self, number: &CanonicalNumber, _raw_input: &str) -> SignalResult {
        let matches: Vec<usize> = SPAM_PATTERN_SET.matches(number.e164()).iter().collect();
        if matches.is_empty() {
            return SignalResult::empty(self.id(), self.category());
        }

        let indicators = matches
            .into_iter()
            .map(|idx| SPAM_PATTERNS[idx].1.to_string())
            .collect();

        SignalResult::ok(
            self.id(),
            self.category(),
            SignalPayload::Reputation(ReputationObservation {
                spam_risk: Some(true),
                score: None,
                indicators,
            }),
        )
    }
}
