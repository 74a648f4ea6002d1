//! Work-order records
//!
//! [`WorkOrderRecord`] is the raw order as the backend returns it; both query
//! endpoints share the shape but populate different fields. [`WorkOrder`] is
//! the display projection handed to callers.

use serde::{Deserialize, Serialize};

use crate::util::{format_date, string_or_number};

/// Raw work-order record
///
/// Every field accepts a string, a number or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub work_order_no: Option<String>,
    /// Segment number; set by the seg-status endpoint
    #[serde(default, deserialize_with = "string_or_number")]
    pub my_work_order_seg_no: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub work_order_status: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub work_order_status_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub machine_model: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub machine_no: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub report_time: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub construction_location: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub maintenance_dept_name: Option<String>,
}

/// `result` member of both work-order endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderPage {
    /// Records of the requested page; absent when the server has none to report
    #[serde(default)]
    pub data: Option<Vec<WorkOrderRecord>>,
    /// Server-side total for the query
    #[serde(default)]
    pub amount: Option<u64>,
}

impl WorkOrderPage {
    pub fn new(data: Vec<WorkOrderRecord>, amount: u64) -> Self {
        Self {
            data: Some(data),
            amount: Some(amount),
        }
    }

    /// Records on this page (empty when `data` is absent)
    pub fn records(&self) -> &[WorkOrderRecord] {
        self.data.as_deref().unwrap_or_default()
    }
}

/// Display projection of a work order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub code: String,
    pub status: String,
    pub product_model: String,
    pub serial_number: String,
    pub report_time: String,
    pub construction_site: String,
    pub maintenance_dept: String,
}

impl WorkOrder {
    /// Project a record from `GetWorkOrdersByParameters`
    pub fn from_parameters_record(record: &WorkOrderRecord) -> Self {
        Self {
            code: text(&record.work_order_no),
            status: text(&record.work_order_status),
            ..Self::common(record)
        }
    }

    /// Project a record from `GetWorkOrdersBySegStatus`
    ///
    /// The code falls back to the segment number; the status uses its
    /// display name.
    pub fn from_seg_status_record(record: &WorkOrderRecord) -> Self {
        let code = record
            .work_order_no
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(record.my_work_order_seg_no.as_deref())
            .unwrap_or_default()
            .to_string();
        Self {
            code,
            status: text(&record.work_order_status_name),
            ..Self::common(record)
        }
    }

    fn common(record: &WorkOrderRecord) -> Self {
        Self {
            code: String::new(),
            status: String::new(),
            product_model: text(&record.machine_model),
            serial_number: text(&record.machine_no),
            report_time: record.report_time.as_deref().map(format_date).unwrap_or_default(),
            construction_site: text(&record.construction_location),
            maintenance_dept: text(&record.maintenance_dept_name),
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
