//! Dealer (经销商) information of the signed-in user

use serde::{Deserialize, Serialize};

use crate::permission::PermissionSet;
use crate::util::null_as_default;

/// Path of the dealer-info endpoint
pub const USER_DEALER_INFO_PATH: &str = "services/app/UserService/GetUserDealerInfo";

/// Organisational account a user belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub dealer_code: String,
    #[serde(default)]
    pub account_group: Option<String>,
    #[serde(default)]
    pub dealer_name: Option<String>,
    #[serde(default, rename = "dealerName_CN")]
    pub dealer_name_cn: Option<String>,
    #[serde(default, rename = "dealerName_EN")]
    pub dealer_name_en: Option<String>,
    #[serde(default)]
    pub sales_organization: Option<String>,
    #[serde(default)]
    pub price_district: Option<String>,
    #[serde(default)]
    pub distriction_channel: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub machine: Option<String>,
    #[serde(default)]
    pub parts: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub province_manager: Option<String>,
    #[serde(default)]
    pub region_manager: Option<String>,
    #[serde(default)]
    pub dealer_type: Option<String>,
}

/// `result` member of `GetUserDealerInfo`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDealerInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_login_name: String,
    #[serde(default, rename = "userName_EN")]
    pub user_name_en: Option<String>,
    #[serde(default, rename = "userName_CN")]
    pub user_name_cn: Option<String>,
    #[serde(default)]
    pub cwsid: Option<String>,
    #[serde(default)]
    pub main_dealer: Option<DealerInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dealers: Vec<DealerInfo>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub have_logged_app: bool,
    #[serde(default)]
    pub status: Option<String>,
}

impl UserDealerInfo {
    /// Work-order rights contained in the permission list
    pub fn work_order_permissions(&self) -> PermissionSet {
        PermissionSet::from_permissions(&self.permissions)
    }
}
