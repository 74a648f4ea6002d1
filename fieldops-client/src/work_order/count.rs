//! 工单计数 - how a bucket response becomes a number

use std::fmt;

use shared::{AbpResponse, WorkOrderPage};

/// Dashboard bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountBucket {
    /// 待派工
    PendingAssignment,
    /// 待出发
    PendingDepart,
    /// 进行中
    InProgress,
}

impl CountBucket {
    pub const ALL: [CountBucket; 3] = [
        CountBucket::PendingAssignment,
        CountBucket::PendingDepart,
        CountBucket::InProgress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingAssignment => "pending_assignment",
            Self::PendingDepart => "pending_depart",
            Self::InProgress => "in_progress",
        }
    }
}

impl fmt::Display for CountBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the count of a bucket comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountExtraction {
    /// Length of `result.data`
    DataLength,
    /// Server-side `result.amount`
    Amount,
}

/// Per-bucket extraction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountExtractionTable {
    pub pending_assignment: CountExtraction,
    pub pending_depart: CountExtraction,
    pub in_progress: CountExtraction,
}

impl Default for CountExtractionTable {
    fn default() -> Self {
        Self {
            pending_assignment: CountExtraction::Amount,
            pending_depart: CountExtraction::DataLength,
            in_progress: CountExtraction::DataLength,
        }
    }
}

impl CountExtractionTable {
    /// Same strategy for every bucket
    pub fn uniform(extraction: CountExtraction) -> Self {
        Self {
            pending_assignment: extraction,
            pending_depart: extraction,
            in_progress: extraction,
        }
    }

    pub fn for_bucket(&self, bucket: CountBucket) -> CountExtraction {
        match bucket {
            CountBucket::PendingAssignment => self.pending_assignment,
            CountBucket::PendingDepart => self.pending_depart,
            CountBucket::InProgress => self.in_progress,
        }
    }
}

/// Count carried by a bucket response
///
/// `None` when the response is not usable: `success` unset, `result` or
/// `result.data` missing, or `amount` missing under [`CountExtraction::Amount`].
pub fn extract_count(
    response: &AbpResponse<WorkOrderPage>,
    extraction: CountExtraction,
) -> Option<u64> {
    if !response.success {
        return None;
    }
    let page = response.result.as_ref()?;
    let data = page.data.as_ref()?;
    match extraction {
        CountExtraction::DataLength => Some(data.len() as u64),
        CountExtraction::Amount => page.amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::WorkOrderRecord;

    fn page(records: usize, amount: Option<u64>) -> AbpResponse<WorkOrderPage> {
        AbpResponse::ok(WorkOrderPage {
            data: Some(vec![WorkOrderRecord::default(); records]),
            amount,
        })
    }

    #[test]
    fn test_extract_by_strategy() {
        let resp = page(3, Some(17));
        assert_eq!(extract_count(&resp, CountExtraction::DataLength), Some(3));
        assert_eq!(extract_count(&resp, CountExtraction::Amount), Some(17));
    }

    #[test]
    fn test_invalid_responses() {
        let failed: AbpResponse<WorkOrderPage> = AbpResponse::failure("boom");
        assert_eq!(extract_count(&failed, CountExtraction::DataLength), None);

        let no_data = AbpResponse::ok(WorkOrderPage { data: None, amount: Some(5) });
        assert_eq!(extract_count(&no_data, CountExtraction::Amount), None);

        assert_eq!(extract_count(&page(2, None), CountExtraction::Amount), None);
    }

    #[test]
    fn test_default_table() {
        let table = CountExtractionTable::default();
        assert_eq!(table.for_bucket(CountBucket::PendingAssignment), CountExtraction::Amount);
        assert_eq!(table.for_bucket(CountBucket::PendingDepart), CountExtraction::DataLength);
        assert_eq!(table.for_bucket(CountBucket::InProgress), CountExtraction::DataLength);
    }

    #[test]
    fn test_data_length_survives_type_drift() {
        let resp: AbpResponse<WorkOrderPage> = serde_json::from_value(serde_json::json!({
            "success": true,
            "result": {
                "data": [{ "workOrderNo": 20250911001u64, "workOrderStatus": 3 }, {}, {}],
                "amount": 3
            }
        }))
        .unwrap();
        assert_eq!(extract_count(&resp, CountExtraction::DataLength), Some(3));
        assert_eq!(extract_count(&resp, CountExtraction::Amount), Some(3));
    }
}
