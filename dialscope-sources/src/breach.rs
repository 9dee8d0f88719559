//! Breach exposure via the Have I Been Pwned v3 API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use dialscope_core::{
    BreachRecord, CanonicalNumber, SignalPayload, SignalResult, SourceCategory,
    DEFAULT_SOURCE_TIMEOUT_SECS,
};

use crate::{settle, SignalSource, SourceError};

const HIBP_ENDPOINT: &str = "https://haveibeenpwned.com/api/v3/breachedaccount";
const USER_AGENT: &str = concat!("dialscope/", env!("CARGO_PKG_VERSION"));

/// Have I Been Pwned breach provider. Reports `Empty` without an API key
/// and on 404 (number not found in any breach).
pub struct HibpSource {
    api_key: Option<String>,
    client: Client,
}

impl HibpSource {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
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
        let Some(key) = &self.api_key else {
            debug!("no HIBP API key configured");
            return Ok(None);
        };

        let url = format!("{}/{}", HIBP_ENDPOINT, number.e164());
        let response = self
            .client
            .get(&url)
            .query(&[("truncateResponse", "false")])
            .header("hibp-api-key", key)
            .header("user-agent", USER_AGENT)
            .send()
            .await?;

        // 404 means the account appears in no breach, not an error.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(SourceError::Provider(format!(
                "HIBP returned status {}",
                response.status()
            )));
        }

        let breaches: Vec<HibpBreach> = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        if breaches.is_empty() {
            return Ok(None);
        }

        let records = breaches.into_iter().map(HibpBreach::into_record).collect();
        Ok(Some(SignalPayload::Breaches(records)))
    }
}

#[async_trait]
impl SignalSource for HibpSource {
    fn id(&self) -> &str {
        "hibp"
    }

    fn category(&self) -> SourceCategory {
        SourceCategory::Osint
    }

    fn priority(&self) -> u8 {
        10
    }

    fn configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, number: &CanonicalNumber, _raw_input: &str) -> SignalResult {
        settle(self.id(), self.category(), self.lookup(number).await)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HibpBreach {
    name: String,
    domain: Option<String>,
    breach_date: Option<String>,
    #[serde(default)]
    data_classes: Vec<String>,
}

impl HibpBreach {
    fn into_record(self) -> BreachRecord {
        BreachRecord {
            name: self.name,
            domain: self.domain.filter(|d| !d.is_empty()),
            breach_date: self.breach_date,
            data_classes: self.data_classes,
        }
    }
}
