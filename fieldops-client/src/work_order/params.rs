//! 工单查询参数构建
//!
//! Maps (intent, permission class) to the endpoint and body the backend
//! expects. Two families of rules apply:
//!
//! - Pending-depart and in-progress go to the coarse endpoint only for
//!   dispatch-only accounts (assign without create); everyone else reads the
//!   on-site segment statuses.
//! - Accounts that can only create see their own delegate-submitted orders.
//!
//! Without a recognised class the query falls back to a full count
//! (`limit = 1000`).

use shared::permission::PermissionClass;
use shared::request::{FULL_COUNT_LIMIT, OrderStatus, PREVIEW_LIMIT};
use shared::{WorkOrderQuery, WorkOrdersByParametersRequest, WorkOrdersBySegStatusRequest};

use super::count::CountBucket;

/// What the query is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkOrderQueryIntent {
    /// 待派工 count
    PendingAssignment,
    /// 待出发 count
    PendingDepart,
    /// 进行中 count
    InProgress,
    /// Newest in-progress order for the dashboard card
    Latest,
    /// Permission-scoped listing of open orders
    GeneralListing,
}

impl From<CountBucket> for WorkOrderQueryIntent {
    fn from(bucket: CountBucket) -> Self {
        match bucket {
            CountBucket::PendingAssignment => Self::PendingAssignment,
            CountBucket::PendingDepart => Self::PendingDepart,
            CountBucket::InProgress => Self::InProgress,
        }
    }
}

/// Build the query for `intent` under `class`
///
/// Pure: the same inputs always give the same query.
pub fn build_params(
    intent: WorkOrderQueryIntent,
    class: Option<PermissionClass>,
    current_user: &str,
) -> WorkOrderQuery {
    use WorkOrderQueryIntent as I;

    let Some(class) = class else {
        return fallback_params(intent);
    };

    match intent {
        I::PendingAssignment => {
            let req = WorkOrdersByParametersRequest::new([OrderStatus::PENDING_ASSIGNMENT], PREVIEW_LIMIT);
            let req = match class {
                PermissionClass::CreateOnly => req.submitted_by(current_user).newest_first(),
                PermissionClass::CreateExecute => req.submitted_by(current_user),
                _ => req,
            };
            WorkOrderQuery::ByParameters(req)
        }
        I::PendingDepart => {
            if dispatch_only(class) {
                coarse([OrderStatus::PENDING_DEPART], PREVIEW_LIMIT)
            } else {
                fine([OrderStatus::PENDING_DEPART], PREVIEW_LIMIT)
            }
        }
        I::InProgress => {
            if dispatch_only(class) {
                coarse(OrderStatus::IN_PROGRESS, PREVIEW_LIMIT)
            } else if class == PermissionClass::CreateOnly {
                fine(OrderStatus::IN_PROGRESS, FULL_COUNT_LIMIT)
            } else {
                fine(OrderStatus::IN_PROGRESS, PREVIEW_LIMIT)
            }
        }
        I::Latest => fine(OrderStatus::IN_PROGRESS, PREVIEW_LIMIT),
        I::GeneralListing => match class {
            PermissionClass::CreateOnly => WorkOrderQuery::ByParameters(
                WorkOrdersByParametersRequest::new([OrderStatus::PENDING_ASSIGNMENT], PREVIEW_LIMIT)
                    .submitted_by(current_user)
                    .newest_first(),
            ),
            PermissionClass::ExecuteOnly | PermissionClass::CreateExecute => {
                WorkOrderQuery::BySegStatus(
                    WorkOrdersBySegStatusRequest::new(OrderStatus::OPEN, PREVIEW_LIMIT)
                        .newest_first(),
                )
            }
            PermissionClass::AssignOnly
            | PermissionClass::CreateAssign
            | PermissionClass::AssignExecute
            | PermissionClass::All => WorkOrderQuery::ByParameters(
                WorkOrdersByParametersRequest::new(OrderStatus::OPEN, PREVIEW_LIMIT).newest_first(),
            ),
        },
    }
}

/// 无权限分类时的默认查询
fn fallback_params(intent: WorkOrderQueryIntent) -> WorkOrderQuery {
    use WorkOrderQueryIntent as I;
    match intent {
        I::PendingAssignment => coarse([OrderStatus::PENDING_ASSIGNMENT], FULL_COUNT_LIMIT),
        I::PendingDepart => fine([OrderStatus::PENDING_DEPART], FULL_COUNT_LIMIT),
        I::InProgress => fine(OrderStatus::IN_PROGRESS, FULL_COUNT_LIMIT),
        I::Latest => fine(OrderStatus::IN_PROGRESS, PREVIEW_LIMIT),
        I::GeneralListing => coarse(OrderStatus::OPEN, FULL_COUNT_LIMIT),
    }
}

/// Assign rights without create: dispatch desk accounts
fn dispatch_only(class: PermissionClass) -> bool {
    class.has_assign() && !class.has_create()
}

fn coarse(status: impl Into<Vec<OrderStatus>>, limit: u32) -> WorkOrderQuery {
    WorkOrderQuery::ByParameters(WorkOrdersByParametersRequest::new(status, limit))
}

fn fine(seg_status_ids: impl Into<Vec<OrderStatus>>, limit: u32) -> WorkOrderQuery {
    WorkOrderQuery::BySegStatus(WorkOrdersBySegStatusRequest::new(seg_status_ids, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::request::WorkOrderEndpoint;

    const USER: &str = "F8KM_liyueye";

    fn params_body(seg: bool, codes: &[u8], limit: u32) -> serde_json::Value {
        if seg {
            json!({
                "limit": limit,
                "offset": 0,
                "segStatusIds": codes,
                "onsiteOrNot": "Y",
                "workOrderNoOrMachineNo": null
            })
        } else {
            json!({
                "limit": limit,
                "offset": 0,
                "createByUser": null,
                "workOrderNoOrMachineNo": null,
                "workOrderSource": null,
                "onsiteOrNot": null,
                "status": codes,
                "type": null,
                "dealer": null,
                "orderByLastUpdatedTime": false,
                "department": null
            })
        }
    }

    fn build(intent: WorkOrderQueryIntent, class: Option<PermissionClass>) -> WorkOrderQuery {
        build_params(intent, class, USER)
    }

    #[test]
    fn test_pending_assignment_create_only() {
        let q = build(WorkOrderQueryIntent::PendingAssignment, Some(PermissionClass::CreateOnly));
        assert_eq!(q.endpoint(), WorkOrderEndpoint::ByParameters);
        let mut expected = params_body(false, &[1], 2);
        expected["createByUser"] = json!(USER);
        expected["workOrderSource"] = json!("DelegateSubmitted");
        expected["orderByLastUpdatedTime"] = json!(true);
        assert_eq!(q.body().unwrap(), expected);
    }

    #[test]
    fn test_pending_assignment_create_execute() {
        let q = build(WorkOrderQueryIntent::PendingAssignment, Some(PermissionClass::CreateExecute));
        let mut expected = params_body(false, &[1], 2);
        expected["createByUser"] = json!(USER);
        expected["workOrderSource"] = json!("DelegateSubmitted");
        assert_eq!(q.body().unwrap(), expected);
    }

    #[test]
    fn test_pending_assignment_other_classes() {
        for class in [
            PermissionClass::AssignOnly,
            PermissionClass::ExecuteOnly,
            PermissionClass::CreateAssign,
            PermissionClass::AssignExecute,
            PermissionClass::All,
        ] {
            let q = build(WorkOrderQueryIntent::PendingAssignment, Some(class));
            assert_eq!(q.endpoint(), WorkOrderEndpoint::ByParameters, "{class}");
            assert_eq!(q.body().unwrap(), params_body(false, &[1], 2), "{class}");
        }
    }

    #[test]
    fn test_pending_depart_endpoint_by_class() {
        for class in PermissionClass::ALL {
            let q = build(WorkOrderQueryIntent::PendingDepart, Some(class));
            let coarse = matches!(class, PermissionClass::AssignOnly | PermissionClass::AssignExecute);
            assert_eq!(q.body().unwrap(), params_body(!coarse, &[3], 2), "{class}");
        }
    }

    #[test]
    fn test_in_progress_by_class() {
        for class in PermissionClass::ALL {
            let q = build(WorkOrderQueryIntent::InProgress, Some(class));
            let expected = match class {
                PermissionClass::AssignOnly | PermissionClass::AssignExecute => {
                    params_body(false, &[4, 5, 6, 8], 2)
                }
                PermissionClass::CreateOnly => params_body(true, &[4, 5, 6, 8], 1000),
                _ => params_body(true, &[4, 5, 6, 8], 2),
            };
            assert_eq!(q.body().unwrap(), expected, "{class}");
        }
    }

    #[test]
    fn test_latest_ignores_class() {
        let expected = params_body(true, &[4, 5, 6, 8], 2);
        for class in PermissionClass::ALL.map(Some).into_iter().chain([None]) {
            assert_eq!(build(WorkOrderQueryIntent::Latest, class).body().unwrap(), expected);
        }
    }

    #[test]
    fn test_general_listing_by_class() {
        let q = build(WorkOrderQueryIntent::GeneralListing, Some(PermissionClass::CreateOnly));
        let mut expected = params_body(false, &[1], 2);
        expected["createByUser"] = json!(USER);
        expected["workOrderSource"] = json!("DelegateSubmitted");
        expected["orderByLastUpdatedTime"] = json!(true);
        assert_eq!(q.body().unwrap(), expected);

        for class in [
            PermissionClass::AssignOnly,
            PermissionClass::CreateAssign,
            PermissionClass::AssignExecute,
            PermissionClass::All,
        ] {
            let mut expected = params_body(false, &[1, 3, 4, 5, 6, 8], 2);
            expected["orderByLastUpdatedTime"] = json!(true);
            assert_eq!(build(WorkOrderQueryIntent::GeneralListing, Some(class)).body().unwrap(), expected);
        }

        for class in [PermissionClass::ExecuteOnly, PermissionClass::CreateExecute] {
            let mut expected = params_body(true, &[1, 3, 4, 5, 6, 8], 2);
            expected["orderByLastUpdatedTime"] = json!(true);
            assert_eq!(build(WorkOrderQueryIntent::GeneralListing, Some(class)).body().unwrap(), expected);
        }
    }

    #[test]
    fn test_no_class_defaults() {
        use WorkOrderQueryIntent as I;
        assert_eq!(build(I::PendingAssignment, None).body().unwrap(), params_body(false, &[1], 1000));
        assert_eq!(build(I::PendingDepart, None).body().unwrap(), params_body(true, &[3], 1000));
        assert_eq!(build(I::InProgress, None).body().unwrap(), params_body(true, &[4, 5, 6, 8], 1000));
        assert_eq!(
            build(I::GeneralListing, None).body().unwrap(),
            params_body(false, &[1, 3, 4, 5, 6, 8], 1000)
        );
    }

    #[test]
    fn test_deterministic() {
        use WorkOrderQueryIntent as I;
        let classes = PermissionClass::ALL.map(Some).into_iter().chain([None]);
        for class in classes {
            for intent in [I::PendingAssignment, I::PendingDepart, I::InProgress, I::Latest, I::GeneralListing] {
                assert_eq!(build(intent, class), build(intent, class));
                assert!(build(intent, class).validate().is_ok());
            }
        }
    }
}
