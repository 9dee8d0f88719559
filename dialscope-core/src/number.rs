//! Number Normalizer - free text in, canonical identity out
//!
//! Parsing tries a fixed, ordered list of region hints and accepts the
//! first candidate that both parses and validates. The order is a
//! documented contract: an input that is ambiguous between two regions
//! resolves to the earlier region in [`REGION_HINTS`].

use phonenumber::{country, Mode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from number normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Input failed to parse or validate against every region hint
    #[error("Invalid phone number format")]
    InvalidFormat,
}

/// Region hints tried in order during parsing. Order is load-bearing.
pub const REGION_HINTS: [Option<country::Id>; 5] = [
    Some(country::Id::US),
    Some(country::Id::GB),
    Some(country::Id::CA),
    Some(country::Id::AU),
    None,
];

/// Line-type classification from the number metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineType {
    Mobile,
    Landline,
    #[serde(rename = "Fixed Line or Mobile")]
    FixedOrMobile,
    #[serde(rename = "Toll Free")]
    TollFree,
    #[serde(rename = "Premium Rate")]
    PremiumRate,
    #[serde(rename = "Shared Cost")]
    SharedCost,
    VoIP,
    #[serde(rename = "Personal Number")]
    PersonalNumber,
    Pager,
    #[serde(rename = "Universal Access Number")]
    UAN,
    Voicemail,
    Unknown,
}

impl LineType {
    fn from_metadata(kind: phonenumber::Type) -> Self {
        use phonenumber::Type;
        match kind {
            Type::Mobile => LineType::Mobile,
            Type::FixedLine => LineType::Landline,
            Type::FixedLineOrMobile => LineType::FixedOrMobile,
            Type::TollFree => LineType::TollFree,
            Type::PremiumRate => LineType::PremiumRate,
            Type::SharedCost => LineType::SharedCost,
            Type::Voip => LineType::VoIP,
            Type::PersonalNumber => LineType::PersonalNumber,
            Type::Pager => LineType::Pager,
            Type::Uan => LineType::UAN,
            Type::Voicemail => LineType::Voicemail,
            _ => LineType::Unknown,
        }
    }
}

impl std::fmt::Display for LineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LineType::Mobile => "Mobile",
            LineType::Landline => "Landline",
            LineType::FixedOrMobile => "Fixed Line or Mobile",
            LineType::TollFree => "Toll Free",
            LineType::PremiumRate => "Premium Rate",
            LineType::SharedCost => "Shared Cost",
            LineType::VoIP => "VoIP",
            LineType::PersonalNumber => "Personal Number",
            LineType::Pager => "Pager",
            LineType::UAN => "Universal Access Number",
            LineType::Voicemail => "Voicemail",
            LineType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Canonical, validated representation of one phone number.
///
/// Exactly one `CanonicalNumber` exists per successfully parsed input;
/// construction via [`normalize`] is the sole mutation point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalNumber {
    country_code: u16,
    national_number: u64,
    region: Option<String>,
    line_type: LineType,
    e164: String,
    international: String,
    national: String,
}

impl CanonicalNumber {
    pub fn country_code(&self) -> u16 {
        self.country_code
    }

    pub fn national_number(&self) -> u64 {
        self.national_number
    }

    /// ISO region code, e.g. "US", when the metadata resolves one
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    pub fn e164(&self) -> &str {
        &self.e164
    }

    pub fn international(&self) -> &str {
        &self.international
    }

    pub fn national(&self) -> &str {
        &self.national
    }

    fn from_parsed(parsed: &phonenumber::PhoneNumber) -> Self {
        Self {
            country_code: parsed.country().code(),
            national_number: parsed.national().value(),
            region: parsed.country().id().map(|id| format!("{:?}", id)),
            line_type: LineType::from_metadata(parsed.number_type(&phonenumber::metadata::DATABASE)),
            e164: parsed.format().mode(Mode::E164).to_string(),
            international: parsed.format().mode(Mode::International).to_string(),
            national: parsed.format().mode(Mode::National).to_string(),
        }
    }
}

/// Parse free-text input into a [`CanonicalNumber`].
///
/// Tries each hint in [`REGION_HINTS`] in order; the first candidate that
/// parses and passes metadata validation wins. Pure function, no I/O.
pub fn normalize(text: &str) -> Result<CanonicalNumber, NormalizeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::InvalidFormat);
    }

    for hint in REGION_HINTS {
        let parsed = match phonenumber::parse(hint, trimmed) {
            Ok(parsed) => parsed,
            Err(_) => continue,
        };
        if phonenumber::is_valid(&parsed) {
            return Ok(CanonicalNumber::from_parsed(&parsed));
        }
    }

    Err(NormalizeError::InvalidFormat)
}

/// Human-readable country name for an ISO region code.
///
/// The number metadata ships no geocoder, so this covers the regions the
/// pipeline most commonly sees and falls back to the code itself.
pub fn region_display_name(region: &str) -> Option<&'static str> {
    let name = match region {
        "US" => "United States",
        "GB" => "United Kingdom",
        "CA" => "Canada",
        "AU" => "Australia",
        "NZ" => "New Zealand",
        "IE" => "Ireland",
        "DE" => "Germany",
        "FR" => "France",
        "ES" => "Spain",
        "IT" => "Italy",
        "NL" => "Netherlands",
        "IN" => "India",
        "JP" => "Japan",
        "BR" => "Brazil",
        "MX" => "Mexico",
        "ZA" => "South Africa",
        "NG" => "Nigeria",
        "KE" => "Kenya",
        _ => return None,
    };
    Some(name)
}

/// Best-effort primary timezone for an ISO region code
pub fn region_timezone(region: &str) -> Option<&'static str> {
    let tz = match region {
        "US" => "America/New_York",
        "GB" => "Europe/London",
        "CA" => "America/Toronto",
        "AU" => "Australia/Sydney",
        "NZ" => "Pacific/Auckland",
        "IE" => "Europe/Dublin",
        "DE" => "Europe/Berlin",
        "FR" => "Europe/Paris",
        "ES" => "Europe/Madrid",
        "IT" => "Europe/Rome",
        "NL" => "Europe/Amsterdam",
        "IN" => "Asia/Kolkata",
        "JP" => "Asia/Tokyo",
        "BR" => "America/Sao_Paulo",
        "MX" => "America/Mexico_City",
        "ZA" => "Africa/Johannesburg",
        "NG" => "Africa/Lagos",
        "KE" => "Africa/Nairobi",
        _ => return None,
    };
    Some(tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_e164_input() {
        let number = normalize("+16502530000").unwrap();
        assert_eq!(number.country_code(), 1);
        assert_eq!(number.national_number(), 6502530000);
        assert_eq!(number.region(), Some("US"));
        assert_eq!(number.e164(), "+16502530000");
    }

    #[test]
    fn test_normalize_accepts_separators() {
        let number = normalize("(650) 253-0000").unwrap();
        assert_eq!(number.e164(), "+16502530000");

        let number = normalize("+44 7911 123456").unwrap();
        assert_eq!(number.e164(), "+447911123456");
    }

    #[test]
    fn test_region_hint_order_is_a_contract() {
        // "07911 123456" does not validate as a US number, so the GB hint
        // (second in the list) must win.
        let number = normalize("07911 123456").unwrap();
        assert_eq!(number.region(), Some("GB"));
        assert_eq!(number.country_code(), 44);

        // "0491 570 156" only validates under the AU hint.
        let number = normalize("0491 570 156").unwrap();
        assert_eq!(number.region(), Some("AU"));
        assert_eq!(number.country_code(), 61);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let first = normalize("+16502530000").unwrap();
        let second = normalize(first.e164()).unwrap();
        assert_eq!(first, second);

        let third = normalize(first.international()).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize(""), Err(NormalizeError::InvalidFormat));
        assert_eq!(normalize("not a number"), Err(NormalizeError::InvalidFormat));
        assert_eq!(normalize("12"), Err(NormalizeError::InvalidFormat));
    }

    #[test]
    fn test_gb_mobile_line_type() {
        let number = normalize("+447911123456").unwrap();
        assert_eq!(number.line_type(), LineType::Mobile);
    }

    #[test]
    fn test_region_metadata_lookup() {
        assert_eq!(region_display_name("US"), Some("United States"));
        assert_eq!(region_timezone("GB"), Some("Europe/London"));
        assert_eq!(region_display_name("ZZ"), None);
    }
}
