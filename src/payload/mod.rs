//! 消息 payload 模型
//!
//! 所有可以放进消息的节点（attachment、block、field）都实现 [`PayloadNode`]，
//! 转换为 JSON 对象后由客户端组装成请求体。
//!
//! 序列化是稀疏的：未设置或为空（空字符串、0、空数组）的可选字段不会出现在
//! 输出中，Slack 对部分多余字段会直接报错。`short` 这类布尔开关例外，总是输出。

pub mod attachment;
pub mod block;

pub use attachment::{Attachment, AttachmentField};
pub use block::{
    Block, BlockTextField, ContextBlock, ContextElement, ContextImageElement, ContextTextElement,
    DividerBlock, ImageBlock, TextBlock,
};

use serde_json::{Map, Value};

use crate::color::ColorRegistry;
use crate::error::Result;

/// 序列化后的 JSON 对象
pub type Record = Map<String, Value>;

/// 可序列化为 Slack payload 的节点
pub trait PayloadNode {
    /// 使用指定颜色表转换为 JSON 对象
    fn to_record_with(&self, colors: &ColorRegistry) -> Result<Record>;

    /// 使用默认颜色表转换为 JSON 对象
    fn to_record(&self) -> Result<Record> {
        self.to_record_with(&ColorRegistry::default())
    }
}

/// 内容类型：根据 markdown 开关决定嵌套文本的 `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Markdown,
    PlainText,
}

impl ContentType {
    pub fn from_markdown(markdown: bool) -> Self {
        if markdown {
            ContentType::Markdown
        } else {
            ContentType::PlainText
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Markdown => "mrkdwn",
            ContentType::PlainText => "plain_text",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 仅在字符串非空时写入
pub(crate) fn insert_str(record: &mut Record, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        record.insert(key.to_string(), Value::String(value.to_string()));
    }
}

/// `{type, text}` 文本对象
pub(crate) fn text_record(content_type: ContentType, text: &str) -> Record {
    let mut record = Record::new();
    record.insert("type".to_string(), Value::String(content_type.as_str().to_string()));
    record.insert("text".to_string(), Value::String(text.to_string()));
    record
}

/// 依次序列化子节点，保持输入顺序；空列表返回 None
pub(crate) fn records_of<T: PayloadNode>(nodes: &[T], colors: &ColorRegistry) -> Result<Option<Value>> {
    if nodes.is_empty() {
        return Ok(None);
    }
    let records = nodes
        .iter()
        .map(|node| node.to_record_with(colors).map(Value::Object))
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(Value::Array(records)))
}
