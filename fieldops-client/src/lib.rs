//! FieldOps Client - HTTP client for the field-service work-order API
//!
//! Authenticates against the ABP backend, keeps the session in a local
//! credential store and builds the permission-scoped work-order queries
//! behind the home screen counters.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod fault;
pub mod http;
pub mod logger;
pub mod store;
pub mod work_order;

pub use auth::{AuthService, LoginCallback, Session, SessionState};
pub use client::FieldOpsClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use fault::{FaultFilter, FaultPager, FaultService, FaultSort, Severity};
pub use http::{HttpClient, NetworkHttpClient};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use work_order::{
    AggregateCounts, CountBucket, CountExtraction, CountExtractionTable, DashboardSummary, Locale,
    WorkOrderListing, WorkOrderQueryIntent, WorkOrderService, build_params,
};

// Re-export shared types for convenience
pub use shared::{
    AbpResponse, PermissionClass, PermissionSet, WorkOrder, WorkOrderPage, WorkOrderQuery,
    WorkOrderRecord,
};
