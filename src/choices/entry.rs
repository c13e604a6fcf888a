//! Choice log row.

use serde::{Deserialize, Serialize};

use crate::dataset::CustomerRecord;
use crate::segments::RetentionOption;

/// A customer's selected option, with a snapshot of their segment data at
/// the time of selection.
///
/// Field names match the CSV header and the JSON returned by
/// `GET /choice/latest/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceEntry {
    #[serde(rename = "Customer_ID")]
    pub customer_id: i64,

    #[serde(rename = "Segment")]
    pub segment: String,

    #[serde(rename = "Selected_Option")]
    pub selected_option: String,

    #[serde(rename = "Pred_Repurchase_Count")]
    pub pred_repurchase_count: f64,
}

impl ChoiceEntry {
    /// Snapshot a customer's current record together with their selection.
    pub fn snapshot(record: &CustomerRecord, option: RetentionOption) -> Self {
        Self {
            customer_id: record.id,
            segment: record.segment.clone(),
            selected_option: option.as_str().to_string(),
            pred_repurchase_count: record.pred_repurchase_count,
        }
    }
}
