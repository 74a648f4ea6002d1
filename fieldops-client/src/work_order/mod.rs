//! 工单模块
//!
//! - [`params`]: (intent, permission class) → endpoint and body
//! - [`count`]: bucket count extraction
//! - [`listing`]: listing result and placeholders
//! - [`service`]: the calls themselves and the dashboard aggregation

pub mod count;
pub mod listing;
pub mod params;
pub mod service;

pub use count::{CountBucket, CountExtraction, CountExtractionTable, extract_count};
pub use listing::{LISTING_LIMIT, Locale, WorkOrderListing, empty_placeholder};
pub use params::{WorkOrderQueryIntent, build_params};
pub use service::{AggregateCounts, DashboardSummary, WorkOrderService};
