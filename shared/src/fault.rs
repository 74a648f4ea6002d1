//! 设备故障 (equipment fault) types

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::util::{null_as_default, string_or_number};

/// Path of the fault list endpoint
pub const FAULT_LIST_BY_SN_PATH: &str = "services/app/FaultService/FaultListBySn";

/// Page size of the infinite-scroll fault list
pub const FAULT_PAGE_SIZE: u32 = 10;

/// Body of `FaultListBySn`
///
/// Optional filters are sent as empty strings, never omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FaultListRequest {
    #[validate(range(min = 1, max = 1000))]
    pub limit: u32,
    pub offset: u32,
    #[validate(length(min = 1))]
    pub serial_numbers: Vec<String>,
    pub sort_by: String,
    pub fault_grade: String,
    pub fault_code: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub start_time: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub end_time: String,
}

impl FaultListRequest {
    /// First page for the given machines, no filters
    pub fn new<I, S>(serial_numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            limit: FAULT_PAGE_SIZE,
            offset: 0,
            serial_numbers: serial_numbers.into_iter().map(Into::into).collect(),
            sort_by: String::new(),
            fault_grade: String::new(),
            fault_code: String::new(),
            start_time: String::new(),
            end_time: String::new(),
        }
    }
}

/// One reported fault
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub serial_number: String,
    #[serde(default, rename = "faultCodeSPNFMI", deserialize_with = "null_as_default")]
    pub fault_code_spn_fmi: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub report_time: String,
    /// 高 / 中 / 低
    #[serde(default, deserialize_with = "null_as_default")]
    pub fault_grade: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fault_grade_sort: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fault_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub report_location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub maintenance_guide: String,
}

/// `result` member of `FaultListBySn`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaultListResult {
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<FaultItem>,
}
