//! 工单列表 - permission-scoped listing result and its placeholders

use serde::{Deserialize, Serialize};
use shared::permission::PermissionClass;
use shared::WorkOrder;

/// Number of orders shown by the listing
pub const LISTING_LIMIT: usize = 2;

/// Display language of placeholder messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    /// `zh` and any `zh-*` / `zh_*` tag is Chinese; every other tag is English
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag == "zh" || tag.starts_with("zh-") || tag.starts_with("zh_") {
            Self::Zh
        } else {
            Self::En
        }
    }
}

/// Message shown when a class has no orders to list
pub fn empty_placeholder(class: Option<PermissionClass>, locale: Locale) -> &'static str {
    match (class, locale) {
        (Some(PermissionClass::CreateOnly), Locale::Zh) => "您目前没有在申请中的工单",
        (Some(PermissionClass::CreateOnly), Locale::En) => "You do not have any work order applications",
        (Some(PermissionClass::ExecuteOnly | PermissionClass::CreateExecute), Locale::Zh) => {
            "您目前没有待出发工单"
        }
        (Some(PermissionClass::ExecuteOnly | PermissionClass::CreateExecute), Locale::En) => {
            "you do not have work orders for departure"
        }
        (_, Locale::Zh) => "暂无工单",
        (_, Locale::En) => "No work order to operate",
    }
}

/// Result of the permission-scoped listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderListing {
    /// At most [`LISTING_LIMIT`] orders
    pub work_orders: Vec<WorkOrder>,
    /// Placeholder or error text when there is nothing to show
    pub message: Option<String>,
}

impl WorkOrderListing {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            work_orders: Vec::new(),
            message: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.work_orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("zh-CN"), Locale::Zh);
        assert_eq!(Locale::parse("en-US"), Locale::En);
        assert_eq!(Locale::parse(""), Locale::En);
    }

    #[test]
    fn test_locale_parse_bare_and_regional_zh() {
        assert_eq!(Locale::parse("zh"), Locale::Zh);
        assert_eq!(Locale::parse(" ZH "), Locale::Zh);
        assert_eq!(Locale::parse("zh-TW"), Locale::Zh);
        assert_eq!(Locale::parse("zh_Hans"), Locale::Zh);
        // a tag merely starting with "zh" is not Chinese
        assert_eq!(Locale::parse("zha"), Locale::En);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            empty_placeholder(Some(PermissionClass::CreateOnly), Locale::Zh),
            "您目前没有在申请中的工单"
        );
        assert_eq!(
            empty_placeholder(Some(PermissionClass::CreateExecute), Locale::En),
            "you do not have work orders for departure"
        );
        assert_eq!(empty_placeholder(Some(PermissionClass::All), Locale::Zh), "暂无工单");
        assert_eq!(empty_placeholder(None, Locale::En), "No work order to operate");
    }
}
