// fieldops-client/src/fault.rs
// 设备故障 - 故障列表查询与分页

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::fault::{FAULT_LIST_BY_SN_PATH, FAULT_PAGE_SIZE, FaultItem, FaultListRequest, FaultListResult};
use shared::AbpResponse;
use validator::Validate;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Sort order of the fault list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultSort {
    /// 时间排序
    #[default]
    Time,
    /// 等级排序
    Severity,
}

impl FaultSort {
    /// Server-side sort field
    pub fn sort_field(&self) -> &'static str {
        match self {
            Self::Time => "reportTime",
            Self::Severity => "faultGradeSort",
        }
    }
}

/// 故障等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Grade label used by the backend
    pub fn grade(&self) -> &'static str {
        match self {
            Self::High => "高",
            Self::Medium => "中",
            Self::Low => "低",
        }
    }

    /// Parse a backend grade label; unknown labels read as low
    pub fn from_grade(grade: &str) -> Self {
        match grade {
            "高" => Self::High,
            "中" => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// User-facing fault filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub sort_by: FaultSort,
    pub severity: Option<Severity>,
    pub fault_code: Option<String>,
}

impl FaultFilter {
    /// Request body for `page` of the given machines
    ///
    /// Missing dates default to `today`, covering the whole day.
    pub fn to_request(&self, serial_numbers: &[String], page: u32, today: NaiveDate) -> FaultListRequest {
        let start = self.start_date.unwrap_or(today);
        let end = self.end_date.unwrap_or(today);
        FaultListRequest {
            limit: FAULT_PAGE_SIZE,
            offset: page.saturating_mul(FAULT_PAGE_SIZE),
            serial_numbers: serial_numbers.to_vec(),
            sort_by: self.sort_by.sort_field().to_string(),
            fault_grade: self.severity.map(|s| s.grade().to_string()).unwrap_or_default(),
            fault_code: self.fault_code.clone().unwrap_or_default(),
            start_time: format!("{} 00:00:00", start.format("%Y-%m-%d")),
            end_time: format!("{} 23:59:59", end.format("%Y-%m-%d")),
        }
    }
}

/// Fault queries over an [`HttpClient`]
#[derive(Debug)]
pub struct FaultService<C> {
    http: Arc<C>,
}

impl<C> Clone for FaultService<C> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
        }
    }
}

impl<C: HttpClient> FaultService<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    /// `POST FaultService/FaultListBySn`
    pub async fn fault_list_by_sn(&self, request: &FaultListRequest) -> ClientResult<FaultListResult> {
        request.validate()?;
        let response: AbpResponse<FaultListResult> = self.http.post(FAULT_LIST_BY_SN_PATH, request).await?;
        let message = response.error_message().map(str::to_string);
        response.into_result().ok_or_else(|| {
            ClientError::Malformed(message.unwrap_or_else(|| "fault list missing".into()))
        })
    }
}

/// 故障列表分页状态 (infinite scroll)
#[derive(Debug, Clone)]
pub struct FaultPager {
    serial_numbers: Vec<String>,
    filter: FaultFilter,
    rows: Vec<FaultItem>,
    page: u32,
    has_more: bool,
}

impl FaultPager {
    pub fn new(serial_number: impl Into<String>, filter: FaultFilter) -> Self {
        Self {
            serial_numbers: vec![serial_number.into()],
            filter,
            rows: Vec::new(),
            page: 0,
            has_more: true,
        }
    }

    pub fn rows(&self) -> &[FaultItem] {
        &self.rows
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn filter(&self) -> &FaultFilter {
        &self.filter
    }

    /// Replace the filter; the next [`refresh`](Self::refresh) applies it
    pub fn set_filter(&mut self, filter: FaultFilter) {
        self.filter = filter;
    }

    /// Reload from the first page
    pub async fn refresh<C: HttpClient>(&mut self, service: &FaultService<C>, today: NaiveDate) -> ClientResult<()> {
        let request = self.filter.to_request(&self.serial_numbers, 0, today);
        let result = service.fault_list_by_sn(&request).await?;
        self.has_more = result.rows.len() == FAULT_PAGE_SIZE as usize;
        self.rows = result.rows;
        self.page = 0;
        Ok(())
    }

    /// Append the next page; no-op once the last page was short
    pub async fn load_more<C: HttpClient>(&mut self, service: &FaultService<C>, today: NaiveDate) -> ClientResult<()> {
        if !self.has_more {
            return Ok(());
        }
        let next = self.page + 1;
        let request = self.filter.to_request(&self.serial_numbers, next, today);
        let result = service.fault_list_by_sn(&request).await?;
        self.has_more = result.rows.len() == FAULT_PAGE_SIZE as usize;
        self.rows.extend(result.rows);
        self.page = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_filter_covers_today() {
        let req = FaultFilter::default().to_request(&["S656D00123".into()], 0, day(2025, 9, 1));
        assert_eq!(req.start_time, "2025-09-01 00:00:00");
        assert_eq!(req.end_time, "2025-09-01 23:59:59");
        assert_eq!(req.sort_by, "reportTime");
        assert_eq!(req.fault_grade, "");
        assert_eq!((req.limit, req.offset), (10, 0));
    }

    #[test]
    fn test_filter_mapping() {
        let filter = FaultFilter {
            start_date: Some(day(2025, 8, 1)),
            end_date: Some(day(2025, 8, 31)),
            sort_by: FaultSort::Severity,
            severity: Some(Severity::High),
            fault_code: Some("520-3".into()),
        };
        let req = filter.to_request(&["S656D00123".into()], 3, day(2025, 9, 1));
        assert_eq!(req.start_time, "2025-08-01 00:00:00");
        assert_eq!(req.end_time, "2025-08-31 23:59:59");
        assert_eq!(req.sort_by, "faultGradeSort");
        assert_eq!(req.fault_grade, "高");
        assert_eq!(req.fault_code, "520-3");
        assert_eq!(req.offset, 30);
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::from_grade(Severity::Medium.grade()), Severity::Medium);
        assert_eq!(Severity::from_grade("?"), Severity::Low);
    }
}
