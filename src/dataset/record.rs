//! A single customer row.

use crate::segments::{allowed_options, RetentionOption};

/// Segment assigned when the dataset row has none.
pub const DEFAULT_SEGMENT: &str = "Low";

/// Predicted repurchase count assigned when the dataset row has none.
pub const DEFAULT_PRED_REPURCHASE_COUNT: f64 = 0.0;

/// Customer segmentation data as loaded from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub id: i64,
    pub segment: String,
    pub pred_repurchase_count: f64,
}

impl CustomerRecord {
    /// Build a record, applying defaults for absent or empty fields.
    pub fn new(id: i64, segment: Option<&str>, pred_repurchase_count: Option<f64>) -> Self {
        let segment = segment
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SEGMENT)
            .to_string();

        Self {
            id,
            segment,
            pred_repurchase_count: pred_repurchase_count.unwrap_or(DEFAULT_PRED_REPURCHASE_COUNT),
        }
    }

    /// Options this customer may choose from.
    pub fn options(&self) -> &'static [RetentionOption] {
        allowed_options(&self.segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let record = CustomerRecord::new(7, None, None);
        assert_eq!(record.segment, "Low");
        assert_eq!(record.pred_repurchase_count, 0.0);

        let record = CustomerRecord::new(7, Some("  "), Some(1.25));
        assert_eq!(record.segment, "Low");
        assert_eq!(record.pred_repurchase_count, 1.25);
    }

    #[test]
    fn test_unknown_segment_kept_verbatim() {
        let record = CustomerRecord::new(1, Some("Gold"), None);
        assert_eq!(record.segment, "Gold");
        assert_eq!(record.options(), allowed_options("Low"));
    }
}
