//! HTTP status mapping for API errors

use http::StatusCode;

/// Message used when a failed request carries no message at all
pub const FALLBACK_NETWORK_MESSAGE: &str = "网络请求失败";

/// Fixed user-facing message for a failed HTTP status
///
/// Returns `None` for statuses without a fixed message (including 401, which
/// is handled by purging credentials); callers then pass the server's own
/// message through.
pub fn status_message(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some("请求参数错误"),
        StatusCode::FORBIDDEN => Some("没有权限访问该资源"),
        StatusCode::NOT_FOUND => Some("请求的资源不存在"),
        StatusCode::INTERNAL_SERVER_ERROR => Some("服务器内部错误"),
        StatusCode::BAD_GATEWAY => Some("网关错误"),
        StatusCode::SERVICE_UNAVAILABLE => Some("服务暂时不可用"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_messages() {
        assert_eq!(status_message(StatusCode::BAD_REQUEST), Some("请求参数错误"));
        assert_eq!(status_message(StatusCode::FORBIDDEN), Some("没有权限访问该资源"));
        assert_eq!(status_message(StatusCode::NOT_FOUND), Some("请求的资源不存在"));
        assert_eq!(status_message(StatusCode::INTERNAL_SERVER_ERROR), Some("服务器内部错误"));
        assert_eq!(status_message(StatusCode::BAD_GATEWAY), Some("网关错误"));
        assert_eq!(status_message(StatusCode::SERVICE_UNAVAILABLE), Some("服务暂时不可用"));
    }

    #[test]
    fn test_passthrough_statuses() {
        assert_eq!(status_message(StatusCode::UNAUTHORIZED), None);
        assert_eq!(status_message(StatusCode::CONFLICT), None);
        assert_eq!(status_message(StatusCode::GATEWAY_TIMEOUT), None);
    }
}
