//! Typed request bodies for the work-order endpoints
//!
//! Two query shapes exist on the backend:
//! - `GetWorkOrdersByParameters`: coarse `status` codes plus user/source filters
//! - `GetWorkOrdersBySegStatus`: fine-grained `segStatusIds`, on-site only
//!
//! Field names serialize to the camelCase body the API expects. Unset filters
//! are sent as explicit `null`.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Path of the coarse query endpoint
pub const WORK_ORDERS_BY_PARAMETERS_PATH: &str =
    "services/app/WorkOrderService/GetWorkOrdersByParameters";
/// Path of the fine-grained query endpoint
pub const WORK_ORDERS_BY_SEG_STATUS_PATH: &str =
    "services/app/WorkOrderService/GetWorkOrdersBySegStatus";

/// Page size for dashboard previews
pub const PREVIEW_LIMIT: u32 = 2;
/// Page size for full-count queries
pub const FULL_COUNT_LIMIT: u32 = 1000;

/// Work-order status code (shared by `status` and `segStatusIds`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(pub u8);

impl OrderStatus {
    /// 待派工
    pub const PENDING_ASSIGNMENT: Self = Self(1);
    /// 待出发
    pub const PENDING_DEPART: Self = Self(3);

    /// 进行中 (departed, on site, servicing, awaiting completion)
    pub const IN_PROGRESS: [Self; 4] = [Self(4), Self(5), Self(6), Self(8)];

    /// Every status that still needs attention
    pub const OPEN: [Self; 6] = [Self(1), Self(3), Self(4), Self(5), Self(6), Self(8)];

    pub fn code(&self) -> u8 {
        self.0
    }
}

/// Origin of a work order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOrderSource {
    /// 代理提报: submitted by the dealer on behalf of the customer
    DelegateSubmitted,
}

/// On-site filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnsiteFlag {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

/// Body of `GetWorkOrdersByParameters`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrdersByParametersRequest {
    #[validate(range(min = 1, max = 1000))]
    pub limit: u32,
    pub offset: u32,
    pub create_by_user: Option<String>,
    pub work_order_no_or_machine_no: Option<String>,
    pub work_order_source: Option<WorkOrderSource>,
    pub onsite_or_not: Option<OnsiteFlag>,
    #[validate(length(min = 1))]
    pub status: Vec<OrderStatus>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub dealer: Option<String>,
    pub order_by_last_updated_time: bool,
    pub department: Option<String>,
}

impl WorkOrdersByParametersRequest {
    /// Unfiltered query for the given statuses
    pub fn new(status: impl Into<Vec<OrderStatus>>, limit: u32) -> Self {
        Self {
            limit,
            offset: 0,
            create_by_user: None,
            work_order_no_or_machine_no: None,
            work_order_source: None,
            onsite_or_not: None,
            status: status.into(),
            order_type: None,
            dealer: None,
            order_by_last_updated_time: false,
            department: None,
        }
    }

    /// Restrict to orders the user submitted on a customer's behalf
    pub fn submitted_by(mut self, user: impl Into<String>) -> Self {
        self.create_by_user = Some(user.into());
        self.work_order_source = Some(WorkOrderSource::DelegateSubmitted);
        self
    }

    /// Ask the server to sort by last update, newest first
    pub fn newest_first(mut self) -> Self {
        self.order_by_last_updated_time = true;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Free-text filter on work-order or machine number
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.work_order_no_or_machine_no = Some(term.into());
        self
    }
}

/// Body of `GetWorkOrdersBySegStatus`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrdersBySegStatusRequest {
    #[validate(range(min = 1, max = 1000))]
    pub limit: u32,
    pub offset: u32,
    #[validate(length(min = 1))]
    pub seg_status_ids: Vec<OrderStatus>,
    pub onsite_or_not: OnsiteFlag,
    pub work_order_no_or_machine_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by_last_updated_time: Option<bool>,
}

impl WorkOrdersBySegStatusRequest {
    /// On-site query for the given segment statuses
    pub fn new(seg_status_ids: impl Into<Vec<OrderStatus>>, limit: u32) -> Self {
        Self {
            limit,
            offset: 0,
            seg_status_ids: seg_status_ids.into(),
            onsite_or_not: OnsiteFlag::Yes,
            work_order_no_or_machine_no: None,
            order_by_last_updated_time: None,
        }
    }

    pub fn newest_first(mut self) -> Self {
        self.order_by_last_updated_time = Some(true);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.work_order_no_or_machine_no = Some(term.into());
        self
    }
}

/// Which work-order endpoint a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderEndpoint {
    ByParameters,
    BySegStatus,
}

impl WorkOrderEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::ByParameters => WORK_ORDERS_BY_PARAMETERS_PATH,
            Self::BySegStatus => WORK_ORDERS_BY_SEG_STATUS_PATH,
        }
    }
}

/// A fully built work-order query: endpoint plus its typed body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkOrderQuery {
    ByParameters(WorkOrdersByParametersRequest),
    BySegStatus(WorkOrdersBySegStatusRequest),
}

impl WorkOrderQuery {
    pub fn endpoint(&self) -> WorkOrderEndpoint {
        match self {
            Self::ByParameters(_) => WorkOrderEndpoint::ByParameters,
            Self::BySegStatus(_) => WorkOrderEndpoint::BySegStatus,
        }
    }

    pub fn path(&self) -> &'static str {
        self.endpoint().path()
    }

    pub fn limit(&self) -> u32 {
        match self {
            Self::ByParameters(r) => r.limit,
            Self::BySegStatus(r) => r.limit,
        }
    }

    /// Status codes the query filters on
    pub fn statuses(&self) -> &[OrderStatus] {
        match self {
            Self::ByParameters(r) => &r.status,
            Self::BySegStatus(r) => &r.seg_status_ids,
        }
    }

    /// Copy of the query starting at `offset`
    pub fn with_offset(self, offset: u32) -> Self {
        match self {
            Self::ByParameters(r) => Self::ByParameters(r.with_offset(offset)),
            Self::BySegStatus(r) => Self::BySegStatus(r.with_offset(offset)),
        }
    }

    pub fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            Self::ByParameters(r) => r.validate(),
            Self::BySegStatus(r) => r.validate(),
        }
    }

    /// JSON body sent to the endpoint
    pub fn body(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::ByParameters(r) => serde_json::to_value(r),
            Self::BySegStatus(r) => serde_json::to_value(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameters_body_shape() {
        let req = WorkOrdersByParametersRequest::new([OrderStatus::PENDING_ASSIGNMENT], 2)
            .submitted_by("F8KM_liyueye")
            .newest_first();
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "limit": 2,
                "offset": 0,
                "createByUser": "F8KM_liyueye",
                "workOrderNoOrMachineNo": null,
                "workOrderSource": "DelegateSubmitted",
                "onsiteOrNot": null,
                "status": [1],
                "type": null,
                "dealer": null,
                "orderByLastUpdatedTime": true,
                "department": null
            })
        );
    }

    #[test]
    fn test_seg_status_body_shape() {
        let req = WorkOrdersBySegStatusRequest::new(OrderStatus::IN_PROGRESS, 2);
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "limit": 2,
                "offset": 0,
                "segStatusIds": [4, 5, 6, 8],
                "onsiteOrNot": "Y",
                "workOrderNoOrMachineNo": null
            })
        );
    }

    #[test]
    fn test_validation_rejects_empty_status_and_bad_limit() {
        let empty = WorkOrdersByParametersRequest::new(Vec::<OrderStatus>::new(), 2);
        assert!(empty.validate().is_err());

        let too_big = WorkOrdersBySegStatusRequest::new([OrderStatus::PENDING_DEPART], 5000);
        assert!(too_big.validate().is_err());

        let ok = WorkOrderQuery::BySegStatus(WorkOrdersBySegStatusRequest::new(
            [OrderStatus::PENDING_DEPART],
            FULL_COUNT_LIMIT,
        ));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_query_paths() {
        let q = WorkOrderQuery::ByParameters(WorkOrdersByParametersRequest::new(
            [OrderStatus::PENDING_DEPART],
            2,
        ));
        assert_eq!(q.path(), WORK_ORDERS_BY_PARAMETERS_PATH);
        assert_eq!(q.statuses(), &[OrderStatus::PENDING_DEPART]);
        assert_eq!(q.with_offset(10).limit(), 2);
    }

    #[test]
    fn test_query_body_matches_request() {
        let req = WorkOrdersBySegStatusRequest::new([OrderStatus::PENDING_DEPART], 2);
        let q = WorkOrderQuery::BySegStatus(req.clone());
        let body = q.body().unwrap();
        assert_eq!(body, serde_json::to_value(&req).unwrap());
        assert_eq!(body["segStatusIds"], json!([3]));
    }
}
