//! Carrier lookup via the Numverify validation API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use dialscope_core::{
    CanonicalNumber, CarrierObservation, LineType, SignalPayload, SignalResult, SourceCategory,
    DEFAULT_SOURCE_TIMEOUT_SECS,
};

use crate::{settle, SignalSource, SourceError};

const NUMVERIFY_ENDPOINT: &str = "http://apilayer.net/api/validate";

/// Numverify carrier/validity provider. Without an access key it reports
/// `Empty`.
pub struct NumverifySource {
    api_key: Option<String>,
    client: Client,
}

impl NumverifySource {
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
            debug!("no Numverify access key configured");
            return Ok(None);
        };

        let response = self
            .client
            .get(NUMVERIFY_ENDPOINT)
            .query(&[
                ("access_key", key.as_str()),
                ("number", number.e164()),
                ("format", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Provider(format!(
                "Numverify returned status {}",
                response.status()
            )));
        }

        let data: NumverifyResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        if !data.valid {
            return Ok(None);
        }

        Ok(Some(SignalPayload::Carrier(CarrierObservation {
            name: non_empty(data.carrier),
            line_type: data.line_type.as_deref().map(parse_numverify_line_type),
            location: non_empty(data.location),
            mcc: Some(number.country_code().to_string()),
            mnc: None,
        })))
    }
}

#[async_trait]
impl SignalSource for NumverifySource {
    fn id(&self) -> &str {
        "numverify"
    }

    fn category(&self) -> SourceCategory {
        SourceCategory::Carrier
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

fn parse_numverify_line_type(raw: &str) -> LineType {
    match raw {
        "mobile" => LineType::Mobile,
        "landline" => LineType::Landline,
        "toll_free" => LineType::TollFree,
        "premium_rate" => LineType::PremiumRate,
        "voip" => LineType::VoIP,
        "pager" => LineType::Pager,
        _ => LineType::Unknown,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct NumverifyResponse {
    #[serde(default)]
    valid: bool,
    carrier: Option<String>,
    line_type: Option<String>,
    location: Option<String>,
}
