// fieldops-client/src/http.rs
// HTTP 客户端 - 网络通信

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{ErrorKind, status_message};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::store::{AUTH_KEYS, KeyValueStore, keys};

/// 服务端返回的错误响应格式 (ABP envelope or bare message)
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<shared::AbpError>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error
            .and_then(|e| e.message().map(str::to_string))
            .or(self.message)
            .filter(|m| !m.trim().is_empty())
    }
}

/// HTTP 客户端 trait
///
/// Paths are relative to the API base URL (`services/app/{Service}/{Method}`).
/// Authenticated calls read the session token from the credential store on
/// every request.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;

    /// GET without the Authorization header
    async fn get_public<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;

    /// POST without the Authorization header
    async fn post_public<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;

    /// Drop the stored auth keys (called on 401)
    fn clear_credentials(&self) -> ClientResult<()>;
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, store: Arc<dyn KeyValueStore>) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer token, or refuse to send without one
    fn authorize(&self, request: RequestBuilder, path: &str) -> ClientResult<RequestBuilder> {
        match self.store.get_non_empty(keys::AUTH_TOKEN)? {
            Some(token) => Ok(request.bearer_auth(token)),
            None => {
                tracing::warn!(path = %path, "No session token, request not sent");
                Err(ClientError::NotAuthenticated)
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(path = %path, error = %e, "API request failed");
            ClientError::Network(e)
        })?;
        self.handle_response(response, path).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                path = %path,
                status = status.as_u16(),
                kind = %ErrorKind::from_status(status),
                "API response error"
            );
            if status == StatusCode::UNAUTHORIZED {
                match self.clear_credentials() {
                    Ok(()) => tracing::info!("Authentication expired, credentials cleared"),
                    Err(e) => tracing::error!(error = %e, "Failed to clear credentials"),
                }
                return Err(ClientError::AuthExpired);
            }
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: error_message(status, &text),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(path = %path, error = %e, "Undecodable response body");
            ClientError::Malformed(format!("{path}: {e}"))
        })
    }
}

/// Fixed message for well-known statuses, otherwise the server's own message
fn error_message(status: StatusCode, body: &str) -> String {
    if let Some(fixed) = status_message(status) {
        return fixed.to_string();
    }
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_default()
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)), path)?;
        tracing::debug!(path = %path, method = "GET", has_token = true, "API request");
        self.send(request, path).await
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body), path)?;
        tracing::debug!(path = %path, method = "POST", has_token = true, "API request");
        self.send(request, path).await
    }

    async fn get_public<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path = %path, method = "GET", has_token = false, "API request");
        self.send(self.client.get(self.url(path)), path).await
    }

    async fn post_public<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path = %path, method = "POST", has_token = false, "API request");
        self.send(self.client.post(self.url(path)).json(body), path).await
    }

    /// 认证已过期 - 清除本地凭证
    fn clear_credentials(&self) -> ClientResult<()> {
        self.store.remove_many(AUTH_KEYS)
    }
}
