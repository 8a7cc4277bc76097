//! Slack Web API 客户端
//!
//! 负责认证、请求分发、分页遍历和发送通知。所有调用都是同步阻塞的，
//! 失败立即返回给调用方，不做重试。

pub mod message;
pub mod pagination;

pub use message::{Notification, PostedMessage};
pub use pagination::PageIterator;

use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::color::ColorRegistry;
use crate::config::{SlackConfig, ACCESS_TOKEN_ENV};
use crate::error::{Result, SlackError};
use crate::resource::{Resource, CHAT_DELETE, CHAT_POST_MESSAGE, CHAT_UPDATE, CONVERSATIONS_LIST, USERS_LIST};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// 单次调用选项
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Query 参数
    pub params: Vec<(String, String)>,
    /// JSON 请求体
    pub json: Option<Value>,
    /// 非 2xx 或 `ok: false` 时返回错误
    pub raise_on_error: bool,
    /// 覆盖默认超时
    pub timeout: Option<Duration>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    pub fn with_json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn with_raise_on_error(mut self, raise_on_error: bool) -> Self {
        self.raise_on_error = raise_on_error;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Slack 客户端
///
/// 构造后 token、请求头和颜色表都不再变化，可以在多次调用间复用。
pub struct Client {
    config: SlackConfig,
    colors: ColorRegistry,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// 使用默认 HTTP 传输创建客户端，token 为空时立即失败
    pub fn new(config: SlackConfig) -> Result<Self> {
        Self::check_token(&config)?;
        let transport = HttpTransport::new()?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// 从 `SLACK_ACCESS_TOKEN` 创建客户端
    pub fn from_env() -> Result<Self> {
        Self::new(SlackConfig::from_env()?)
    }

    /// 使用自定义传输创建客户端
    pub fn with_transport(config: SlackConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Self::check_token(&config)?;

        Ok(Self {
            config,
            colors: ColorRegistry::default(),
            transport,
        })
    }

    fn check_token(config: &SlackConfig) -> Result<()> {
        if config.token.trim().is_empty() {
            return Err(SlackError::MissingToken {
                env: ACCESS_TOKEN_ENV,
            });
        }
        Ok(())
    }

    /// 替换颜色表
    pub fn with_colors(mut self, colors: ColorRegistry) -> Self {
        self.colors = colors;
        self
    }

    pub fn config(&self) -> &SlackConfig {
        &self.config
    }

    pub fn colors(&self) -> &ColorRegistry {
        &self.colors
    }

    /// 调用任意资源
    ///
    /// `raise_on_error` 未开启时原样返回响应，由调用方自行判断。
    pub fn call(&self, resource: &Resource, options: CallOptions) -> Result<ApiResponse> {
        let request = ApiRequest {
            method: resource.method.clone(),
            url: format!("{}/{}", self.config.base_url.trim_end_matches('/'), resource.handle),
            headers: vec![
                ("Authorization", format!("Bearer {}", self.config.token)),
                ("Content-Type", "application/json; charset=utf-8".to_string()),
            ],
            query: options.params,
            json: options.json,
            timeout: options
                .timeout
                .unwrap_or_else(|| Duration::from_millis(self.config.timeout_ms)),
        };

        debug!(
            resource = resource.handle,
            method = %resource.method,
            timeout_ms = request.timeout.as_millis(),
            "Calling Slack API"
        );

        let start = Instant::now();
        let response = self.transport.execute(&request)?;

        debug!(
            resource = resource.handle,
            status = response.status.as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "Slack API responded"
        );

        if options.raise_on_error {
            Self::check_response(resource, response)
        } else {
            Ok(response)
        }
    }

    fn check_response(resource: &Resource, response: ApiResponse) -> Result<ApiResponse> {
        if !response.is_success() {
            warn!(
                resource = resource.handle,
                status = response.status.as_u16(),
                "Slack API returned non-success status"
            );
            return Err(SlackError::Http(response));
        }

        let json = response.json()?;
        if json.get("ok").and_then(Value::as_bool) != Some(true) {
            let code = json.get("error").and_then(Value::as_str).unwrap_or("unknown_error");
            warn!(
                resource = resource.handle,
                error = code,
                "Slack API returned ok=false"
            );
            return Err(SlackError::Api(response));
        }

        Ok(response)
    }

    /// 按游标分页遍历资源，惰性返回集合中的每一项
    ///
    /// 只有消费到当前页末尾时才会请求下一页；任意一页失败后迭代结束。
    pub fn iterate_pages(&self, resource: Resource, collection_key: impl Into<String>) -> PageIterator<'_> {
        PageIterator::new(self, resource, collection_key.into(), self.config.page_limit)
    }

    /// 遍历频道列表
    pub fn iter_channels(&self) -> PageIterator<'_> {
        self.iterate_pages(CONVERSATIONS_LIST, "channels")
    }

    /// 遍历用户列表
    pub fn iter_users(&self) -> PageIterator<'_> {
        self.iterate_pages(USERS_LIST, "members")
    }

    /// 发送通知到频道
    pub fn send_notification(&self, notification: &Notification) -> Result<ApiResponse> {
        let body = notification.to_body(&self.colors)?;

        debug!(
            channel = %notification.channel,
            attachments = notification.attachments.len(),
            blocks = notification.blocks.len(),
            thread_ts = ?notification.thread_ts,
            "Sending Slack notification"
        );

        self.call(
            &CHAT_POST_MESSAGE,
            CallOptions::new()
                .with_json(body)
                .with_raise_on_error(notification.raise_on_error),
        )
    }

    /// 更新已发送的通知
    pub fn update_notification(&self, ts: &str, notification: &Notification) -> Result<ApiResponse> {
        let mut body = notification.to_body(&self.colors)?;
        body["ts"] = Value::String(ts.to_string());

        debug!(channel = %notification.channel, ts, "Updating Slack notification");

        self.call(
            &CHAT_UPDATE,
            CallOptions::new()
                .with_json(body)
                .with_raise_on_error(notification.raise_on_error),
        )
    }

    /// 删除已发送的通知
    pub fn delete_notification(&self, channel: &str, ts: &str, raise_on_error: bool) -> Result<ApiResponse> {
        debug!(channel, ts, "Deleting Slack notification");

        self.call(
            &CHAT_DELETE,
            CallOptions::new()
                .with_json(serde_json::json!({ "channel": channel, "ts": ts }))
                .with_raise_on_error(raise_on_error),
        )
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // token 不输出
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url)
            .field("timeout_ms", &self.config.timeout_ms)
            .field("page_limit", &self.config.page_limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Method, StatusCode};
    use std::sync::Mutex;

    /// 按顺序返回预设响应并记录请求的 mock 传输
    struct MockTransport {
        responses: Mutex<Vec<ApiResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl MockTransport {
        fn new(responses: Vec<(StatusCode, &str)>) -> Arc<Self> {
            let responses = responses
                .into_iter()
                .rev()
                .map(|(status, body)| ApiResponse {
                    status,
                    url: "https://slack.com/api/mock".to_string(),
                    body: body.to_string(),
                })
                .collect();
            Arc::new(Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.responses.lock().unwrap().pop().expect("no scripted response left"))
        }
    }

    fn client_with(mock: &Arc<MockTransport>) -> Client {
        Client::with_transport(SlackConfig::with_token("xoxb-test"), mock.clone()).unwrap()
    }

    #[test]
    fn test_requires_token() {
        let mock = MockTransport::new(vec![]);
        let err = Client::with_transport(SlackConfig::default(), mock).unwrap_err();
        assert!(matches!(err, SlackError::MissingToken { .. }));
    }

    #[test]
    fn test_call_builds_request() {
        let mock = MockTransport::new(vec![(StatusCode::OK, r#"{"ok": true}"#)]);
        let client = client_with(&mock);

        client
            .call(&Resource::get("auth.test"), CallOptions::new().with_param("limit", 5))
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "https://slack.com/api/auth.test");
        assert_eq!(request.header("Authorization"), Some("Bearer xoxb-test"));
        assert_eq!(request.header("Content-Type"), Some("application/json; charset=utf-8"));
        assert_eq!(request.query_param("limit"), Some("5"));
        assert_eq!(request.timeout, Duration::from_millis(crate::config::DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn test_call_timeout_override() {
        let mock = MockTransport::new(vec![(StatusCode::OK, r#"{"ok": true}"#)]);
        let client = client_with(&mock);

        client
            .call(&CHAT_POST_MESSAGE, CallOptions::new().with_timeout(Duration::from_secs(3)))
            .unwrap();

        assert_eq!(mock.requests()[0].timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_raise_on_error_ok_false() {
        let body = r#"{"ok": false, "error": "not_in_channel"}"#;
        let mock = MockTransport::new(vec![(StatusCode::OK, body), (StatusCode::OK, body)]);
        let client = client_with(&mock);

        let err = client
            .call(&CHAT_POST_MESSAGE, CallOptions::new().with_raise_on_error(true))
            .unwrap_err();
        assert!(matches!(err, SlackError::Api(_)));
        assert_eq!(err.response().unwrap().body, body);

        // 不开启时原样返回
        let response = client.call(&CHAT_POST_MESSAGE, CallOptions::new()).unwrap();
        assert!(!response.ok());
        assert_eq!(response.body, body);
    }

    #[test]
    fn test_raise_on_error_http_status() {
        let mock = MockTransport::new(vec![(StatusCode::INTERNAL_SERVER_ERROR, "oops")]);
        let client = client_with(&mock);

        let err = client
            .call(&CHAT_POST_MESSAGE, CallOptions::new().with_raise_on_error(true))
            .unwrap_err();
        match err {
            SlackError::Http(response) => assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_raise_on_error_invalid_json() {
        let mock = MockTransport::new(vec![(StatusCode::OK, "not json")]);
        let client = client_with(&mock);

        let err = client
            .call(&CHAT_POST_MESSAGE, CallOptions::new().with_raise_on_error(true))
            .unwrap_err();
        assert!(matches!(err, SlackError::Decode(_)));
    }

    #[test]
    fn test_raise_on_error_missing_ok() {
        let body = r#"{"error": "invalid_auth"}"#;
        let mock = MockTransport::new(vec![(StatusCode::OK, body)]);
        let client = client_with(&mock);

        let err = client
            .call(&CHAT_POST_MESSAGE, CallOptions::new().with_raise_on_error(true))
            .unwrap_err();
        assert!(matches!(err, SlackError::Api(_)));
        assert_eq!(err.to_string(), "Slack API error: invalid_auth");
    }

    #[test]
    fn test_new_checks_token_before_transport() {
        let err = Client::new(SlackConfig::with_token("   ")).unwrap_err();
        assert!(matches!(err, SlackError::MissingToken { env: ACCESS_TOKEN_ENV }));
    }

    #[test]
    fn test_debug_hides_token() {
        let mock = MockTransport::new(vec![]);
        let client = client_with(&mock);
        assert!(!format!("{client:?}").contains("xoxb-test"));
        assert!(!format!("{:?}", client.config()).contains("xoxb-test"));
    }
}
