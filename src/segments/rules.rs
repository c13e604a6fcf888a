//! Segment → retention option mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Customer tier derived from an RFM segment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    High,
    Medium,
    /// Also covers any label that is not recognized.
    Low,
}

impl Tier {
    /// Classify a segment label. Anything other than "High" or "Medium" is `Low`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "High" => Tier::High,
            "Medium" => Tier::Medium,
            _ => Tier::Low,
        }
    }

    /// Options offered to this tier, in display order.
    pub fn options(self) -> &'static [RetentionOption] {
        match self {
            Tier::High => &[
                RetentionOption::Cashback,
                RetentionOption::Gift,
                RetentionOption::LuckyDraw,
                RetentionOption::SavePoints,
            ],
            Tier::Medium => &[
                RetentionOption::LuckyDraw,
                RetentionOption::Gift,
                RetentionOption::SavePoints,
            ],
            Tier::Low => &[RetentionOption::SavePoints, RetentionOption::LuckyDraw],
        }
    }
}

/// A retention incentive a customer may pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetentionOption {
    Cashback,
    Gift,
    #[serde(rename = "Lucky Draw")]
    LuckyDraw,
    #[serde(rename = "Save Points")]
    SavePoints,
}

impl RetentionOption {
    /// Label used on the wire and in the choice log.
    pub fn as_str(self) -> &'static str {
        match self {
            RetentionOption::Cashback => "Cashback",
            RetentionOption::Gift => "Gift",
            RetentionOption::LuckyDraw => "Lucky Draw",
            RetentionOption::SavePoints => "Save Points",
        }
    }
}

impl fmt::Display for RetentionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is not one of the known options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption(pub String);

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown retention option: {}", self.0)
    }
}

impl std::error::Error for UnknownOption {}

impl FromStr for RetentionOption {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cashback" => Ok(RetentionOption::Cashback),
            "Gift" => Ok(RetentionOption::Gift),
            "Lucky Draw" => Ok(RetentionOption::LuckyDraw),
            "Save Points" => Ok(RetentionOption::SavePoints),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// Allowed options for a segment label, in the order clients should display them.
pub fn allowed_options(segment: &str) -> &'static [RetentionOption] {
    Tier::from_label(segment).options()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(segment: &str) -> Vec<&'static str> {
        allowed_options(segment).iter().map(|o| o.as_str()).collect()
    }

    #[test]
    fn test_high_tier_order() {
        assert_eq!(labels("High"), vec!["Cashback", "Gift", "Lucky Draw", "Save Points"]);
    }

    #[test]
    fn test_medium_tier_order() {
        assert_eq!(labels("Medium"), vec!["Lucky Draw", "Gift", "Save Points"]);
    }

    #[test]
    fn test_low_and_unknown_fall_through() {
        let low = vec!["Save Points", "Lucky Draw"];
        assert_eq!(labels("Low"), low);
        assert_eq!(labels("Platinum"), low);
        assert_eq!(labels(""), low);
        // Case-sensitive: "high" is not "High"
        assert_eq!(labels("high"), low);
    }

    #[test]
    fn test_option_parse_and_serialize() {
        assert_eq!("Lucky Draw".parse::<RetentionOption>(), Ok(RetentionOption::LuckyDraw));
        assert!("Bingo".parse::<RetentionOption>().is_err());

        let json = serde_json::to_string(Tier::Medium.options()).unwrap();
        assert_eq!(json, r#"["Lucky Draw","Gift","Save Points"]"#);
    }
}
