//! Source registry - assembles the provider set from configuration

use std::sync::Arc;

use tracing::info;

use crate::{
    HibpSource, NumverifySource, PlaceholderProbe, ProviderConfig, SignalSource,
    SpamPatternSource, TwilioLookupSource,
};

/// Build the full provider set for one pipeline, honoring feature flags.
///
/// Sources that lack credentials are still registered; they report `Empty`
/// at fetch time so the merged result keeps a complete source ledger.
pub fn build_sources(config: &ProviderConfig) -> Vec<Arc<dyn SignalSource>> {
    let mut sources: Vec<Arc<dyn SignalSource>> = vec![
        Arc::new(NumverifySource::new(config.numverify_api_key.clone())),
        Arc::new(TwilioLookupSource::new(
            config.twilio_account_sid.clone(),
            config.twilio_auth_token.clone(),
        )),
        Arc::new(SpamPatternSource::new()),
        Arc::new(PlaceholderProbe::messaging()),
        Arc::new(PlaceholderProbe::voip()),
        Arc::new(PlaceholderProbe::business()),
        Arc::new(PlaceholderProbe::carrier_status()),
        Arc::new(PlaceholderProbe::network_probe()),
    ];

    if config.enable_breach_checking {
        sources.push(Arc::new(HibpSource::new(config.hibp_api_key.clone())));
    }
    if config.enable_osint_enrichment {
        sources.push(Arc::new(PlaceholderProbe::footprint()));
    }
    if config.enable_social_lookup {
        sources.push(Arc::new(PlaceholderProbe::social()));
    }

    info!(
        "registered {} sources ({} configured)",
        sources.len(),
        sources.iter().filter(|s| s.configured()).count()
    );
    sources
}
