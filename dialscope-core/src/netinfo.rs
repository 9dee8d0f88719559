//! Network-level assessments derived from number metadata
//!
//! Best-effort estimates that need no provider round trip: a security
//! posture score for the line type, the likely network technology, and
//! publicly documented carrier IP allocations.

use serde::Serialize;

use crate::{LineType, UNKNOWN};

/// Security posture of the network a number lives on
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSecurityAssessment {
    /// 0-100, higher is better
    pub security_score: u8,
    pub encryption_support: String,
    pub vulnerability_indicators: Vec<String>,
    pub security_features: Vec<String>,
}

/// Assess network security from the line type alone. Neutral baseline 50;
/// VoIP loses points for spoofing exposure, mobile gains for network
/// encryption.
pub fn assess_network_security(line_type: LineType) -> NetworkSecurityAssessment {
    let mut score: i64 = 50;
    let mut vulnerabilities = Vec::new();
    let mut features = Vec::new();
    let mut encryption = UNKNOWN.to_string();

    match line_type {
        LineType::VoIP => {
            vulnerabilities.push("VoIP - potential for spoofing".to_string());
            score -= 10;
        }
        LineType::Mobile => {
            features.push("Mobile network encryption".to_string());
            encryption = "Standard".to_string();
            score += 10;
        }
        _ => {}
    }

    NetworkSecurityAssessment {
        security_score: score.clamp(0, 100) as u8,
        encryption_support: encryption,
        vulnerability_indicators: vulnerabilities,
        security_features: features,
    }
}

/// Estimated network technology for a line type
pub fn network_technology(line_type: LineType) -> &'static str {
    match line_type {
        LineType::Mobile => "4G/5G (estimated)",
        LineType::VoIP => "Internet/VoIP",
        _ => UNKNOWN,
    }
}

// Publicly documented allocations for major carriers.
const CARRIER_IP_RANGES: &[(&str, &[&str])] = &[
    ("Verizon", &["74.192.0.0/10", "108.160.0.0/11"]),
    ("AT&T", &["12.0.0.0/8", "135.0.0.0/8"]),
    ("T-Mobile", &["208.54.0.0/16", "66.94.0.0/16"]),
    ("Sprint", &["72.52.0.0/15", "173.199.0.0/16"]),
];

/// Known IP ranges for a carrier name, if any
pub fn carrier_ip_ranges(carrier: &str) -> Vec<String> {
    CARRIER_IP_RANGES
        .iter()
        .find(|(name, _)| carrier.contains(name))
        .map(|(_, ranges)| ranges.iter().map(|r| r.to_string()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voip_lowers_security_score() {
        let assessment = assess_network_security(LineType::VoIP);
        assert_eq!(assessment.security_score, 40);
        assert_eq!(
            assessment.vulnerability_indicators,
            vec!["VoIP - potential for spoofing"]
        );
    }

    #[test]
    fn test_mobile_raises_security_score() {
        let assessment = assess_network_security(LineType::Mobile);
        assert_eq!(assessment.security_score, 60);
        assert_eq!(assessment.security_features, vec!["Mobile network encryption"]);
    }

    #[test]
    fn test_landline_stays_neutral() {
        let assessment = assess_network_security(LineType::Landline);
        assert_eq!(assessment.security_score, 50);
        assert!(assessment.vulnerability_indicators.is_empty());
    }

    #[test]
    fn test_network_technology_estimates() {
        assert_eq!(network_technology(LineType::Mobile), "4G/5G (estimated)");
        assert_eq!(network_technology(LineType::VoIP), "Internet/VoIP");
        assert_eq!(network_technology(LineType::TollFree), "Unknown");
    }

    #[test]
    fn test_carrier_ip_ranges_lookup() {
        assert_eq!(
            carrier_ip_ranges("Verizon Wireless"),
            vec!["74.192.0.0/10", "108.160.0.0/11"]
        );
        assert!(carrier_ip_ranges("Acme Telecom").is_empty());
    }
}
