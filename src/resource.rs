//! Slack Web API 资源描述：路径 + HTTP 方法

use reqwest::Method;

/// 远程操作描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// API 方法名，如 `chat.postMessage`
    pub handle: &'static str,
    pub method: Method,
}

impl Resource {
    pub const fn new(handle: &'static str, method: Method) -> Self {
        Self { handle, method }
    }

    pub const fn get(handle: &'static str) -> Self {
        Self::new(handle, Method::GET)
    }

    pub const fn post(handle: &'static str) -> Self {
        Self::new(handle, Method::POST)
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.handle)
    }
}

/// 发送消息
pub const CHAT_POST_MESSAGE: Resource = Resource::post("chat.postMessage");

/// 更新已发送的消息
pub const CHAT_UPDATE: Resource = Resource::post("chat.update");

/// 删除消息
pub const CHAT_DELETE: Resource = Resource::post("chat.delete");

/// 频道列表（分页，集合字段 `channels`）
pub const CONVERSATIONS_LIST: Resource = Resource::get("conversations.list");

/// 用户列表（分页，集合字段 `members`）
pub const USERS_LIST: Resource = Resource::get("users.list");
