//! Provider configuration
//!
//! An immutable snapshot of credentials and feature flags, built once and
//! passed into the orchestrator. Nothing reads the environment after
//! construction; scoring and merge logic never see this struct.

/// Credentials and feature flags for the provider set
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Numverify access key (carrier lookup)
    pub numverify_api_key: Option<String>,
    /// Twilio Lookup credentials (reputation/risk data)
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    /// Have I Been Pwned API key (breach data)
    pub hibp_api_key: Option<String>,
    /// Enable osint footprint enrichment
    pub enable_osint_enrichment: bool,
    /// Enable breach checking
    pub enable_breach_checking: bool,
    /// Enable social-media lookup (off by default)
    pub enable_social_lookup: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            numverify_api_key: None,
            twilio_account_sid: None,
            twilio_auth_token: None,
            hibp_api_key: None,
            enable_osint_enrichment: true,
            enable_breach_checking: true,
            enable_social_lookup: false,
        }
    }
}

impl ProviderConfig {
    /// Read credentials and flags from the environment
    pub fn from_env() -> Self {
        Self {
            numverify_api_key: std::env::var("NUMVERIFY_API_KEY").ok(),
            twilio_account_sid: std::env::var("TWILIO_ACCOUNT_SID").ok(),
            twilio_auth_token: std::env::var("TWILIO_AUTH_TOKEN").ok(),
            hibp_api_key: std::env::var("HIBP_API_KEY").ok(),
            enable_osint_enrichment: env_flag("ENABLE_OSINT_ENRICHMENT", true),
            enable_breach_checking: env_flag("ENABLE_BREACH_CHECKING", true),
            enable_social_lookup: env_flag("ENABLE_SOCIAL_MEDIA_LOOKUP", false),
        }
    }

    pub fn twilio_configured(&self) -> bool {
        self.twilio_account_sid.is_some() && self.twilio_auth_token.is_some()
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => value.eq_ignore_ascii_case("true") || value == "1",
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_feature_policy() {
        let config = ProviderConfig::default();
        assert!(config.enable_osint_enrichment);
        assert!(config.enable_breach_checking);
        assert!(!config.enable_social_lookup);
        assert!(!config.twilio_configured());
    }

    #[test]
    fn test_twilio_needs_both_credentials() {
        let config = ProviderConfig {
            twilio_account_sid: Some("AC123".to_string()),
            ..Default::default()
        };
        assert!(!config.twilio_configured());
    }
}
