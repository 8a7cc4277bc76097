//! 通知消息构建
//!
//! `chat.postMessage` 请求体格式：
//! ```json
//! {
//!   "channel": "C123",
//!   "link_names": true,
//!   "as_user": false,
//!   "username": "ci-bot",
//!   "icon_emoji": ":robot_face:",
//!   "mrkdwn": true,
//!   "text": "Build *failed*",
//!   "attachments": [ ... ],
//!   "blocks": [ ... ]
//! }
//! ```

use serde::Deserialize;
use serde_json::{json, Value};

use crate::color::ColorRegistry;
use crate::error::Result;
use crate::payload::{records_of, Attachment, Block};
use crate::transport::ApiResponse;

/// 待发送的通知
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// 频道 ID 或名称
    pub channel: String,
    pub text: Option<String>,
    /// 设置后以自定义身份发送（`as_user: false`）
    pub username: Option<String>,
    /// 仅在 `as_user: false` 时生效
    pub icon_url: Option<String>,
    /// 仅在 `as_user: false` 时生效
    pub icon_emoji: Option<String>,
    /// 自动链接 @频道 / @用户名
    pub link_names: bool,
    pub raise_on_error: bool,
    pub attachments: Vec<Attachment>,
    pub blocks: Vec<Block>,
    /// 回复到指定消息的线程
    pub thread_ts: Option<String>,
}

impl Notification {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: None,
            username: None,
            icon_url: None,
            icon_emoji: None,
            link_names: true,
            raise_on_error: false,
            attachments: Vec::new(),
            blocks: Vec::new(),
            thread_ts: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    pub fn with_icon_emoji(mut self, icon_emoji: impl Into<String>) -> Self {
        self.icon_emoji = Some(icon_emoji.into());
        self
    }

    pub fn with_link_names(mut self, link_names: bool) -> Self {
        self.link_names = link_names;
        self
    }

    pub fn with_raise_on_error(mut self, raise_on_error: bool) -> Self {
        self.raise_on_error = raise_on_error;
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments.extend(attachments);
        self
    }

    pub fn with_block(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    pub fn with_blocks(mut self, blocks: impl IntoIterator<Item = Block>) -> Self {
        self.blocks.extend(blocks);
        self
    }

    /// 作为线程回复发送
    pub fn in_thread(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }

    /// 组装请求体
    pub fn to_body(&self, colors: &ColorRegistry) -> Result<Value> {
        let mut body = json!({
            "channel": self.channel,
            "link_names": self.link_names,
        });

        match self.username.as_deref().filter(|u| !u.is_empty()) {
            Some(username) => {
                body["as_user"] = Value::Bool(false);
                body["username"] = Value::String(username.to_string());

                // 以 token 所属用户身份发送时图标无效
                if let Some(icon_url) = self.icon_url.as_deref().filter(|u| !u.is_empty()) {
                    body["icon_url"] = Value::String(icon_url.to_string());
                }
                if let Some(icon_emoji) = self.icon_emoji.as_deref().filter(|e| !e.is_empty()) {
                    body["icon_emoji"] = Value::String(icon_emoji.to_string());
                }
            }
            None => {
                body["as_user"] = Value::Bool(true);
            }
        }

        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            body["mrkdwn"] = Value::Bool(true);
            body["text"] = Value::String(text.to_string());
        }

        if let Some(thread_ts) = self.thread_ts.as_deref().filter(|t| !t.is_empty()) {
            body["thread_ts"] = Value::String(thread_ts.to_string());
        }

        if let Some(attachments) = records_of(&self.attachments, colors)? {
            body["attachments"] = attachments;
        }

        if let Some(blocks) = records_of(&self.blocks, colors)? {
            body["blocks"] = blocks;
        }

        Ok(body)
    }
}

/// 已发送消息的定位信息，用于更新、删除或线程回复
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostedMessage {
    pub channel: String,
    pub ts: String,
}

impl PostedMessage {
    /// 从 `chat.postMessage` 的响应中提取
    pub fn from_response(response: &ApiResponse) -> Result<Self> {
        Ok(serde_json::from_str(&response.body)?)
    }
}
