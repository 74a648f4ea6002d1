//! Shared types for the field-service work-order client
//!
//! Wire types used by `fieldops-client`: the ABP response envelope,
//! the work-order permission model, typed request bodies and raw records.

pub mod dealer;
pub mod error;
pub mod fault;
pub mod permission;
pub mod request;
pub mod response;
pub mod util;
pub mod work_order;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use permission::{PermissionClass, PermissionSet};
pub use request::{WorkOrderQuery, WorkOrdersByParametersRequest, WorkOrdersBySegStatusRequest};
pub use response::{AbpError, AbpResponse};
pub use work_order::{WorkOrder, WorkOrderPage, WorkOrderRecord};
