//! Risk Scoring Engine - deterministic additive model
//!
//! `score` maps a merged intelligence record to an integer in [0, 100].
//! Every applied rule appends a `{factor, delta}` entry in evaluation
//! order, so a score can always be audited back to its inputs. Given the
//! same record the output is byte-identical on every call.

use serde::Serialize;

use crate::{LineType, MergedIntelligence};

/// Starting score before any signal is considered
pub const BASE_SCORE: i64 = 20;
/// Added when a reputation provider marks the number as spam risk
pub const SPAM_RISK_DELTA: i64 = 40;
/// Added when the line type is VoIP
pub const VOIP_DELTA: i64 = 20;
/// Added when breach data is non-empty
pub const BREACH_DELTA: i64 = 30;
/// Added when the explicit reputation sub-score is below 30
pub const LOW_REPUTATION_DELTA: i64 = 20;
/// Subtracted when the explicit reputation sub-score is above 70
pub const HIGH_REPUTATION_DELTA: i64 = -10;

/// One weighted adjustment, recorded for auditability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributingFactor {
    pub factor: String,
    pub delta: i64,
}

impl ContributingFactor {
    fn new(factor: &str, delta: i64) -> Self {
        Self {
            factor: factor.to_string(),
            delta,
        }
    }
}

/// Derived risk view; recomputed per request, never cached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Final clamped score in [0, 100]
    pub score: u8,
    /// Applied rules in evaluation order. Deltas are pre-clamp, so their
    /// sum can exceed the clamped score.
    pub contributing_factors: Vec<ContributingFactor>,
}

/// Score a merged record. Rule order is part of the observable contract.
pub fn score(intel: &MergedIntelligence) -> RiskAssessment {
    let mut factors = vec![ContributingFactor::new("base", BASE_SCORE)];

    if intel.security.spam_risk == Some(true) {
        factors.push(ContributingFactor::new("spam_risk", SPAM_RISK_DELTA));
    }

    if intel.line_type == LineType::VoIP {
        factors.push(ContributingFactor::new("voip_line", VOIP_DELTA));
    }

    if !intel.osint.breaches.is_empty() {
        factors.push(ContributingFactor::new("breach_exposure", BREACH_DELTA));
    }

    // Only an explicit provider-supplied sub-score adjusts the total; the
    // neutral default falls between both thresholds.
    if let Some(reputation) = intel.security.reputation_score {
        if reputation < 30 {
            factors.push(ContributingFactor::new("low_reputation", LOW_REPUTATION_DELTA));
        } else if reputation > 70 {
            factors.push(ContributingFactor::new("high_reputation", HIGH_REPUTATION_DELTA));
        }
    }

    let total: i64 = factors.iter().map(|f| f.delta).sum();

    RiskAssessment {
        score: total.clamp(0, 100) as u8,
        contributing_factors: factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BreachRecord, MergedIntelligence};

    fn factor_names(assessment: &RiskAssessment) -> Vec<&str> {
        assessment
            .contributing_factors
            .iter()
            .map(|f| f.factor.as_str())
            .collect()
    }

    #[test]
    fn test_all_empty_record_scores_base() {
        let intel = MergedIntelligence::empty(LineType::Mobile);
        let assessment = score(&intel);
        assert_eq!(assessment.score, 20);
        assert_eq!(factor_names(&assessment), vec!["base"]);
    }

    #[test]
    fn test_full_stack_clamps_to_100() {
        // spam + voip + breach + low reputation = 20+40+20+30+20 = 130
        let mut intel = MergedIntelligence::empty(LineType::VoIP);
        intel.security.spam_risk = Some(true);
        intel.security.reputation_score = Some(20);
        intel.osint.breaches.push(BreachRecord {
            name: "ExampleBreach".to_string(),
            domain: None,
            breach_date: None,
            data_classes: vec![],
        });

        let assessment = score(&intel);
        assert_eq!(assessment.score, 100);
        let deltas: i64 = assessment.contributing_factors.iter().map(|f| f.delta).sum();
        assert_eq!(deltas, 130);
    }

    #[test]
    fn test_factor_order_matches_rule_evaluation() {
        let mut intel = MergedIntelligence::empty(LineType::VoIP);
        intel.security.spam_risk = Some(true);
        intel.security.reputation_score = Some(10);
        intel.osint.breaches.push(BreachRecord {
            name: "ExampleBreach".to_string(),
            domain: None,
            breach_date: None,
            data_classes: vec![],
        });

        let assessment = score(&intel);
        assert_eq!(
            factor_names(&assessment),
            vec!["base", "spam_risk", "voip_line", "breach_exposure", "low_reputation"]
        );
    }

    #[test]
    fn test_high_reputation_subtracts() {
        let mut intel = MergedIntelligence::empty(LineType::Mobile);
        intel.security.reputation_score = Some(85);
        let assessment = score(&intel);
        assert_eq!(assessment.score, 10);
        assert_eq!(factor_names(&assessment), vec!["base", "high_reputation"]);
    }

    #[test]
    fn test_neutral_reputation_adjusts_nothing() {
        let mut intel = MergedIntelligence::empty(LineType::Mobile);
        intel.security.reputation_score = Some(50);
        assert_eq!(score(&intel).score, 20);

        intel.security.reputation_score = None;
        assert_eq!(score(&intel).score, 20);
    }

    #[test]
    fn test_determinism() {
        let mut intel = MergedIntelligence::empty(LineType::VoIP);
        intel.security.spam_risk = Some(true);
        let first = score(&intel);
        let second = score(&intel);
        assert_eq!(first, second);
    }
}
