//! 错误类型
//!
//! 区分四类错误：
//! - 配置错误：构造客户端时缺少 token，立即失败
//! - 调用方误用：AttachmentField 既没有 title 也没有 value
//! - 传输错误：`raise_on_error` 时 HTTP 状态码非 2xx
//! - 业务错误：`raise_on_error` 时响应 JSON 中 `ok` 为 false
//!
//! 后两类携带原始响应，方便调用方查看限流、权限等细节。

use thiserror::Error;

use crate::transport::ApiResponse;

/// Slack 客户端错误
#[derive(Debug, Error)]
pub enum SlackError {
    /// 缺少访问 token
    #[error("Slack access token is missing, please export \"{env}\" environment variable")]
    MissingToken { env: &'static str },

    /// AttachmentField 的 title 和 value 均未设置
    #[error("Title or value is required for attachment field")]
    EmptyAttachmentField,

    /// HTTP 状态码非 2xx
    #[error("HTTP {} from {}", .0.status, .0.url)]
    Http(ApiResponse),

    /// Slack API 返回 `ok: false`
    #[error("Slack API error: {}", api_error_code(.0))]
    Api(ApiResponse),

    /// 请求未能拿到响应（连接失败、超时等）
    #[error("Slack request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 响应体不是合法 JSON
    #[error("Failed to parse Slack response: {0}")]
    Decode(#[from] serde_json::Error),

    /// 分页响应中缺少指定的集合字段
    #[error("Slack response has no \"{key}\" array")]
    MissingCollection { key: String },
}

impl SlackError {
    /// 获取原始响应（仅 Http / Api 错误携带）
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            SlackError::Http(response) | SlackError::Api(response) => Some(response),
            _ => None,
        }
    }
}

fn api_error_code(response: &ApiResponse) -> String {
    response
        .error_code()
        .unwrap_or_else(|| "unknown_error".to_string())
}

pub type Result<T> = std::result::Result<T, SlackError>;
