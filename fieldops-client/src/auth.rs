// fieldops-client/src/auth.rs
// 认证与会话 - 登录回调、经销商信息与会话状态

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::dealer::{USER_DEALER_INFO_PATH, UserDealerInfo};
use shared::permission::PermissionSet;
use shared::util::string_or_number;
use shared::AbpResponse;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::store::{KeyValueStore, SESSION_KEYS, keys};

/// Payload posted back by the web login page (`CallBackInfo`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginCallback {
    pub user_login_name: String,
    pub token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub token_expiration: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub refresh_token_expiration: Option<String>,
    #[serde(default, rename = "CWSID")]
    pub cwsid: Option<String>,
    #[serde(default, rename = "RedirectURL")]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub work_order_create: bool,
    #[serde(default)]
    pub work_order_assign: bool,
    #[serde(default)]
    pub work_order_execute: bool,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default, rename = "IsCNUser")]
    pub is_cn_user: bool,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub have_logged_app: bool,
}

impl LoginCallback {
    /// Work-order rights announced by the login page itself
    pub fn permissions(&self) -> PermissionSet {
        PermissionSet::new(
            self.work_order_create,
            self.work_order_assign,
            self.work_order_execute,
        )
    }
}

/// 会话 - built once after login and passed to every query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub login_name: String,
    pub permissions: PermissionSet,
}

/// Authentication state derived from the credential store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotAuthenticated,
    TokenExpired,
    Authenticated,
}

/// Login, logout and session state
#[derive(Debug)]
pub struct AuthService<C> {
    http: Arc<C>,
    store: Arc<dyn KeyValueStore>,
}

impl<C> Clone for AuthService<C> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            store: self.store.clone(),
        }
    }
}

impl<C: HttpClient> AuthService<C> {
    pub fn new(http: Arc<C>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { http, store }
    }

    /// 登录: store credentials, then load dealer info and permissions
    ///
    /// A failed dealer fetch does not fail the login; the rights announced by
    /// the callback are stored instead.
    pub async fn login(&self, callback: &LoginCallback) -> ClientResult<Session> {
        if callback.token.is_empty() {
            return Err(ClientError::Validation("login callback carries no token".into()));
        }
        tracing::info!(
            user = %callback.user_login_name,
            has_token = true,
            has_refresh_token = !callback.refresh_token.is_empty(),
            "Storing login credentials"
        );

        self.store.set_many(&[
            (keys::AUTH_TOKEN, callback.token.as_str()),
            (keys::REFRESH_TOKEN, callback.refresh_token.as_str()),
            (keys::USER_LOGIN_NAME, callback.user_login_name.as_str()),
            (keys::TOKEN_EXPIRATION, callback.token_expiration.as_deref().unwrap_or_default()),
            (
                keys::REFRESH_TOKEN_EXPIRATION,
                callback.refresh_token_expiration.as_deref().unwrap_or_default(),
            ),
            (keys::IS_LOGGED_IN, "true"),
        ])?;

        match self.fetch_dealer_info().await {
            Ok(info) => self.store_dealer_info(&info)?,
            Err(e) => {
                tracing::warn!(error = %e, "Dealer info unavailable, using login callback rights");
                self.store_permissions(&callback.permissions(), &[])?;
            }
        }

        self.session()
    }

    /// `GET UserService/GetUserDealerInfo`
    pub async fn fetch_dealer_info(&self) -> ClientResult<UserDealerInfo> {
        let response: AbpResponse<UserDealerInfo> = self.http.get(USER_DEALER_INFO_PATH).await?;
        let message = response.error_message().map(str::to_string);
        response.into_result().ok_or_else(|| {
            ClientError::Malformed(message.unwrap_or_else(|| "dealer info missing".into()))
        })
    }

    fn store_dealer_info(&self, info: &UserDealerInfo) -> ClientResult<()> {
        let main = info.main_dealer.clone().unwrap_or_default();
        let dealer_json = serde_json::to_string(info)?;
        self.store.set_many(&[
            (keys::DEALER_NAME_CN, main.dealer_name_cn.as_deref().unwrap_or_default()),
            (keys::DEALER_NAME_EN, main.dealer_name_en.as_deref().unwrap_or_default()),
            (keys::USER_MOBILE, info.mobile.as_deref().unwrap_or_default()),
            (keys::USER_EMAIL, info.email.as_deref().unwrap_or_default()),
            (keys::DEALER_INFO, dealer_json.as_str()),
        ])?;

        let permissions = info.work_order_permissions();
        self.store_permissions(&permissions, &info.permissions)?;
        tracing::info!(
            user = %info.user_login_name,
            class = permissions.class_name(),
            "Dealer info stored"
        );
        Ok(())
    }

    fn store_permissions(&self, permissions: &PermissionSet, raw: &[String]) -> ClientResult<()> {
        let set_json = serde_json::to_string(permissions)?;
        let raw_json = serde_json::to_string(raw)?;
        self.store.set_many(&[
            (keys::WORK_ORDER_PERMISSIONS, set_json.as_str()),
            (keys::USER_PERMISSIONS, raw_json.as_str()),
        ])
    }

    /// 退出登录 - remove every session key
    pub fn logout(&self) -> ClientResult<()> {
        self.store.remove_many(SESSION_KEYS)?;
        tracing::info!("Logged out, session cleared");
        Ok(())
    }

    /// Session of the signed-in user
    pub fn session(&self) -> ClientResult<Session> {
        if self.store.get_non_empty(keys::AUTH_TOKEN)?.is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        let login_name = self.store.get(keys::USER_LOGIN_NAME)?.unwrap_or_default();
        let permissions = match self.store.get_non_empty(keys::WORK_ORDER_PERMISSIONS)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored permissions unreadable, treating as none");
                PermissionSet::default()
            }),
            None => PermissionSet::default(),
        };
        Ok(Session {
            login_name,
            permissions,
        })
    }

    pub fn state(&self) -> ClientResult<SessionState> {
        self.state_at(Utc::now())
    }

    /// Session state as of `now`
    pub fn state_at(&self, now: DateTime<Utc>) -> ClientResult<SessionState> {
        let has_token = self.store.get_non_empty(keys::AUTH_TOKEN)?.is_some();
        let logged_in = self.store.get(keys::IS_LOGGED_IN)?.as_deref() == Some("true");
        if !(has_token && logged_in) {
            return Ok(SessionState::NotAuthenticated);
        }

        let expiration = self.store.get_non_empty(keys::TOKEN_EXPIRATION)?;
        match expiration.as_deref().and_then(parse_expiration) {
            Some(expires_at) if expires_at <= now => Ok(SessionState::TokenExpired),
            _ => Ok(SessionState::Authenticated),
        }
    }

    pub fn is_logged_in(&self) -> ClientResult<bool> {
        Ok(self.state()? == SessionState::Authenticated)
    }
}

/// RFC 3339, or a naive timestamp taken as UTC
fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_callback() {
        let callback: LoginCallback = serde_json::from_str(
            r#"{
                "UserLoginName": "F8KM_liyueye",
                "Token": "tkn",
                "RefreshToken": "rtkn",
                "TokenExpiration": "2030-01-01T00:00:00Z",
                "RefreshTokenExpiration": 1893456000,
                "CWSID": "F8KM",
                "WorkOrderCreate": true,
                "WorkOrderExecute": true,
                "IsCNUser": true
            }"#,
        )
        .unwrap();
        assert_eq!(callback.user_login_name, "F8KM_liyueye");
        assert_eq!(callback.refresh_token_expiration.as_deref(), Some("1893456000"));
        assert_eq!(callback.cwsid.as_deref(), Some("F8KM"));
        assert_eq!(callback.permissions().class_name(), "create_execute");
    }

    #[test]
    fn test_parse_expiration() {
        assert!(parse_expiration("2025-09-11T11:30:00Z").is_some());
        assert!(parse_expiration("2025-09-11T11:30:00.123").is_some());
        assert!(parse_expiration("not a date").is_none());
    }
}
