//! 客户端配置
//!
//! Token 读取方式：
//! 1. 直接传入 `SlackConfig::with_token`
//! 2. 环境变量 `SLACK_ACCESS_TOKEN`（可选 `SLACK_API_URL` 覆盖 API 地址）

use tracing::debug;

use crate::error::{Result, SlackError};

/// Token 环境变量名
pub const ACCESS_TOKEN_ENV: &str = "SLACK_ACCESS_TOKEN";

/// API 地址环境变量名（用于代理或测试）
pub const API_URL_ENV: &str = "SLACK_API_URL";

/// Slack Web API 基础 URL
pub const SLACK_API_URL: &str = "https://slack.com/api";

/// 默认请求超时（毫秒）
pub const DEFAULT_TIMEOUT_MS: u64 = 180_000;

/// 默认分页大小
pub const DEFAULT_RECORDS_LIMIT: u32 = 100;

/// Slack 客户端配置
#[derive(Clone)]
pub struct SlackConfig {
    /// Bearer token
    pub token: String,
    /// API 基础 URL
    pub base_url: String,
    /// 默认请求超时（毫秒），可按调用覆盖
    pub timeout_ms: u64,
    /// 默认分页大小
    pub page_limit: u32,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: SLACK_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            page_limit: DEFAULT_RECORDS_LIMIT,
        }
    }
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // token 不输出
        f.debug_struct("SlackConfig")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("page_limit", &self.page_limit)
            .finish_non_exhaustive()
    }
}

impl SlackConfig {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    /// 从环境变量加载，缺少 token 时立即失败
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意变量来源加载（便于测试，不触碰进程环境）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ACCESS_TOKEN_ENV)
            .filter(|t| !t.trim().is_empty())
            .ok_or(SlackError::MissingToken {
                env: ACCESS_TOKEN_ENV,
            })?;
        debug!("Using {} from environment", ACCESS_TOKEN_ENV);

        let base_url = lookup(API_URL_ENV)
            .filter(|u| !u.is_empty())
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| SLACK_API_URL.to_string());
        debug!(base_url = %base_url, "Slack API base url");

        Ok(Self {
            token: token.trim().to_string(),
            base_url,
            ..Default::default()
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }
}
