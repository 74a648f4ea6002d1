// fieldops-client/src/work_order/service.rs
// 工单服务 - 查询、计数与首页汇总

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::permission::{PermissionClass, PermissionSet};
use shared::request::WorkOrderEndpoint;
use shared::{
    AbpResponse, WorkOrder, WorkOrderPage, WorkOrderQuery, WorkOrdersByParametersRequest,
    WorkOrdersBySegStatusRequest,
};
use validator::Validate;

use super::count::{CountBucket, CountExtractionTable, extract_count};
use super::listing::{LISTING_LIMIT, Locale, WorkOrderListing, empty_placeholder};
use super::params::{WorkOrderQueryIntent, build_params};
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCounts {
    pub pending_assignment: u64,
    pub pending_depart: u64,
    pub in_progress: u64,
    pub total: u64,
}

impl AggregateCounts {
    /// Counters with `total` derived from the three buckets
    pub fn new(pending_assignment: u64, pending_depart: u64, in_progress: u64) -> Self {
        Self {
            pending_assignment,
            pending_depart,
            in_progress,
            total: pending_assignment
                .saturating_add(pending_depart)
                .saturating_add(in_progress),
        }
    }

    pub fn get(&self, bucket: CountBucket) -> u64 {
        match bucket {
            CountBucket::PendingAssignment => self.pending_assignment,
            CountBucket::PendingDepart => self.pending_depart,
            CountBucket::InProgress => self.in_progress,
        }
    }
}

/// Everything the home screen shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub counts: AggregateCounts,
    pub latest_order: Option<WorkOrder>,
}

/// Work-order queries over an [`HttpClient`]
#[derive(Debug)]
pub struct WorkOrderService<C> {
    http: Arc<C>,
    extraction: CountExtractionTable,
}

impl<C> Clone for WorkOrderService<C> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            extraction: self.extraction,
        }
    }
}

impl<C: HttpClient> WorkOrderService<C> {
    pub fn new(http: Arc<C>, extraction: CountExtractionTable) -> Self {
        Self { http, extraction }
    }

    pub fn extraction(&self) -> &CountExtractionTable {
        &self.extraction
    }

    /// `POST WorkOrderService/GetWorkOrdersByParameters`
    pub async fn get_work_orders_by_parameters(
        &self,
        request: &WorkOrdersByParametersRequest,
    ) -> ClientResult<AbpResponse<WorkOrderPage>> {
        request.validate()?;
        self.http
            .post(WorkOrderEndpoint::ByParameters.path(), request)
            .await
    }

    /// `POST WorkOrderService/GetWorkOrdersBySegStatus`
    pub async fn get_work_orders_by_seg_status(
        &self,
        request: &WorkOrdersBySegStatusRequest,
    ) -> ClientResult<AbpResponse<WorkOrderPage>> {
        request.validate()?;
        self.http
            .post(WorkOrderEndpoint::BySegStatus.path(), request)
            .await
    }

    /// Send a built query to its endpoint
    pub async fn query(&self, query: &WorkOrderQuery) -> ClientResult<AbpResponse<WorkOrderPage>> {
        match query {
            WorkOrderQuery::ByParameters(req) => self.get_work_orders_by_parameters(req).await,
            WorkOrderQuery::BySegStatus(req) => self.get_work_orders_by_seg_status(req).await,
        }
    }

    /// Count of one dashboard bucket; 0 on any failure
    pub async fn fetch_bucket_count(
        &self,
        bucket: CountBucket,
        permissions: &PermissionSet,
        current_user: &str,
    ) -> u64 {
        let query = build_params(bucket.into(), permissions.class(), current_user);
        let response = match self.query(&query).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(bucket = %bucket, error = %e, "Work order count request failed");
                return 0;
            }
        };

        match extract_count(&response, self.extraction.for_bucket(bucket)) {
            Some(count) => {
                tracing::debug!(bucket = %bucket, count, "Work order count");
                count
            }
            None => {
                tracing::warn!(
                    bucket = %bucket,
                    success = response.success,
                    error = response.error_message().unwrap_or_default(),
                    "Invalid work order count response"
                );
                0
            }
        }
    }

    /// Newest in-progress order, only for accounts that execute orders
    ///
    /// Returns `None` without a request when the class lacks execute rights.
    pub async fn fetch_latest_work_order(
        &self,
        permissions: &PermissionSet,
        current_user: &str,
    ) -> Option<WorkOrder> {
        let class = permissions.class();
        if !class.is_some_and(|c| c.has_execute()) {
            return None;
        }

        let query = build_params(WorkOrderQueryIntent::Latest, class, current_user);
        match self.query(&query).await.and_then(into_page) {
            Ok(page) => page.records().first().map(|r| project(query.endpoint(), r)),
            Err(e) => {
                tracing::warn!(error = %e, "Latest work order request failed");
                None
            }
        }
    }

    /// 首页汇总: three bucket counts and the latest order, fetched concurrently
    ///
    /// Never fails; failed parts degrade to 0 / `None` independently.
    pub async fn fetch_all_pending_counts(
        &self,
        permissions: &PermissionSet,
        current_user: &str,
    ) -> DashboardSummary {
        tracing::debug!(class = permissions.class_name(), "Loading dashboard summary");

        let (pending_assignment, pending_depart, in_progress, latest_order) = tokio::join!(
            self.fetch_bucket_count(CountBucket::PendingAssignment, permissions, current_user),
            self.fetch_bucket_count(CountBucket::PendingDepart, permissions, current_user),
            self.fetch_bucket_count(CountBucket::InProgress, permissions, current_user),
            self.fetch_latest_work_order(permissions, current_user),
        );

        let counts = AggregateCounts::new(pending_assignment, pending_depart, in_progress);
        tracing::info!(
            pending_assignment = counts.pending_assignment,
            pending_depart = counts.pending_depart,
            in_progress = counts.in_progress,
            total = counts.total,
            "Dashboard counts loaded"
        );

        DashboardSummary {
            counts,
            latest_order,
        }
    }

    /// Up to two open orders visible to the account
    ///
    /// Errors surface as the listing message instead of failing the call.
    pub async fn fetch_work_orders_by_permission(
        &self,
        permissions: &PermissionSet,
        current_user: &str,
        locale: Locale,
    ) -> WorkOrderListing {
        let Some(class) = permissions.class() else {
            return WorkOrderListing::empty();
        };

        let query = build_params(WorkOrderQueryIntent::GeneralListing, Some(class), current_user);
        match self.query(&query).await.and_then(into_page) {
            Ok(page) => {
                let work_orders: Vec<WorkOrder> = page
                    .records()
                    .iter()
                    .take(LISTING_LIMIT)
                    .map(|r| project(query.endpoint(), r))
                    .collect();
                if work_orders.is_empty() {
                    WorkOrderListing::with_message(empty_placeholder(Some(class), locale))
                } else {
                    WorkOrderListing {
                        work_orders,
                        message: None,
                    }
                }
            }
            Err(e) => {
                tracing::warn!(class = %class, error = %e, "Work order listing request failed");
                WorkOrderListing::with_message(e.user_message())
            }
        }
    }

    /// Class-aware placeholder, exposed for callers rendering their own lists
    pub fn placeholder(&self, class: Option<PermissionClass>, locale: Locale) -> &'static str {
        empty_placeholder(class, locale)
    }
}

/// Payload of a successful envelope
fn into_page(response: AbpResponse<WorkOrderPage>) -> ClientResult<WorkOrderPage> {
    if !response.success {
        let message = response
            .error_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("success=false")
            .to_string();
        return Err(ClientError::Malformed(message));
    }
    response
        .result
        .ok_or_else(|| ClientError::Malformed("missing result".into()))
}

fn project(endpoint: WorkOrderEndpoint, record: &shared::WorkOrderRecord) -> WorkOrder {
    match endpoint {
        WorkOrderEndpoint::ByParameters => WorkOrder::from_parameters_record(record),
        WorkOrderEndpoint::BySegStatus => WorkOrder::from_seg_status_record(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_total() {
        assert_eq!(AggregateCounts::new(0, 0, 0).total, 0);
        assert_eq!(AggregateCounts::new(3, 2, 7).total, 12);
        assert_eq!(AggregateCounts::new(u64::MAX, 1, 0).total, u64::MAX);
    }

    #[test]
    fn test_into_page() {
        let failed: AbpResponse<WorkOrderPage> = AbpResponse::failure("工单服务不可用");
        match into_page(failed) {
            Err(ClientError::Malformed(m)) => assert_eq!(m, "工单服务不可用"),
            other => panic!("unexpected: {other:?}"),
        }

        let mut missing: AbpResponse<WorkOrderPage> = AbpResponse::ok(WorkOrderPage::default());
        missing.result = None;
        assert!(into_page(missing).is_err());
    }
}
