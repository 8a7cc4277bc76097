//! HTTP 传输层
//!
//! `Transport` 是客户端与网络之间的唯一接缝：生产环境使用基于
//! `reqwest::blocking` 的 [`HttpTransport`]，测试中替换为记录请求的 mock。

use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::error::Result;

/// 一次待发送的 HTTP 请求
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP 方法
    pub method: Method,
    /// 完整 URL（base_url + resource handle）
    pub url: String,
    /// 请求头
    pub headers: Vec<(&'static str, String)>,
    /// Query 参数
    pub query: Vec<(String, String)>,
    /// JSON 请求体
    pub json: Option<Value>,
    /// 本次请求超时
    pub timeout: Duration,
}

impl ApiRequest {
    /// 按名称查找 query 参数
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// 按名称查找请求头
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// 原始 HTTP 响应
///
/// 不做任何解释，是否成功由调用方（或 `raise_on_error`）决定。
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub url: String,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 将响应体解析为 JSON
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// 响应 JSON 中的 `ok` 字段，缺失或无法解析时为 false
    pub fn ok(&self) -> bool {
        self.json()
            .ok()
            .and_then(|json| json.get("ok").and_then(Value::as_bool))
            .unwrap_or(false)
    }

    /// Slack 返回的错误码，如 `channel_not_found`、`ratelimited`
    pub fn error_code(&self) -> Option<String> {
        self.json()
            .ok()
            .and_then(|json| json.get("error").and_then(Value::as_str).map(str::to_string))
    }
}

/// HTTP 传输抽象
pub trait Transport: Send + Sync {
    /// 同步执行请求，直到拿到响应或超时
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// 基于 `reqwest::blocking` 的传输实现
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(json) = &request.json {
            builder = builder.body(serde_json::to_vec(json)?);
        }

        let start = Instant::now();
        let response = builder.send().map_err(|e| {
            warn!(
                url = %request.url,
                elapsed_ms = start.elapsed().as_millis(),
                error = %e,
                "Slack request failed"
            );
            e
        })?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response.text()?;

        debug!(
            url = %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "Slack request completed"
        );

        Ok(ApiResponse { status, url, body })
    }
}
