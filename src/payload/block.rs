//! Block Kit 内容块
//!
//! 支持的块类型：section（文本）、divider、image、context。
//! 每个块根据 markdown 开关确定 [`ContentType`]，
//! 序列化时嵌套文本对象使用这个类型（context 文本元素可单独覆盖）。

use serde_json::Value;

use super::{insert_str, records_of, text_record, ContentType, PayloadNode, Record};
use crate::color::ColorRegistry;
use crate::error::Result;

/// 所有块共有的 `{type, block_id?}`
fn base_record(block_type: &str, block_id: Option<&str>) -> Record {
    let mut record = Record::new();
    record.insert("type".to_string(), Value::String(block_type.to_string()));
    insert_str(&mut record, "block_id", block_id);
    record
}

// ============================================================================
// Section
// ============================================================================

/// section 块中的字段
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTextField {
    pub text: String,
    content_type: ContentType,
}

impl BlockTextField {
    /// 创建 markdown 字段
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_markdown(text, true)
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::with_markdown(text, false)
    }

    pub fn with_markdown(text: impl Into<String>, markdown: bool) -> Self {
        Self {
            text: text.into(),
            content_type: ContentType::from_markdown(markdown),
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }
}

impl PayloadNode for BlockTextField {
    fn to_record_with(&self, _colors: &ColorRegistry) -> Result<Record> {
        Ok(text_record(self.content_type, &self.text))
    }
}

/// 文本块（section）
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub fields: Vec<BlockTextField>,
    pub block_id: Option<String>,
    content_type: ContentType,
}

impl TextBlock {
    /// 创建 markdown 文本块
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fields: Vec::new(),
            block_id: None,
            content_type: ContentType::Markdown,
        }
    }

    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.content_type = ContentType::from_markdown(markdown);
        self
    }

    pub fn with_field(mut self, field: BlockTextField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = BlockTextField>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn with_block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }
}

impl PayloadNode for TextBlock {
    fn to_record_with(&self, colors: &ColorRegistry) -> Result<Record> {
        let mut record = base_record("section", self.block_id.as_deref());
        record.insert("text".to_string(), Value::Object(text_record(self.content_type, &self.text)));
        if let Some(fields) = records_of(&self.fields, colors)? {
            record.insert("fields".to_string(), fields);
        }
        Ok(record)
    }
}

// ============================================================================
// Divider
// ============================================================================

/// 分割线
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DividerBlock {
    pub block_id: Option<String>,
}

impl DividerBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }
}

impl PayloadNode for DividerBlock {
    fn to_record_with(&self, _colors: &ColorRegistry) -> Result<Record> {
        Ok(base_record("divider", self.block_id.as_deref()))
    }
}

// ============================================================================
// Image
// ============================================================================

/// 图片块
///
/// Slack 的图片标题只接受 `plain_text`，因此默认关闭 markdown。
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub image_url: String,
    pub title: Option<String>,
    /// 未设置或为空时使用 image_url
    pub alt_text: Option<String>,
    pub block_id: Option<String>,
    content_type: ContentType,
}

impl ImageBlock {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            title: None,
            alt_text: None,
            block_id: None,
            content_type: ContentType::PlainText,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.content_type = ContentType::from_markdown(markdown);
        self
    }

    pub fn with_block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }
}

impl PayloadNode for ImageBlock {
    fn to_record_with(&self, _colors: &ColorRegistry) -> Result<Record> {
        let mut record = base_record("image", self.block_id.as_deref());
        record.insert("image_url".to_string(), Value::String(self.image_url.clone()));

        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            record.insert("title".to_string(), Value::Object(text_record(self.content_type, title)));
        }

        let alt_text = self
            .alt_text
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(&self.image_url);
        record.insert("alt_text".to_string(), Value::String(alt_text.to_string()));

        Ok(record)
    }
}

// ============================================================================
// Context
// ============================================================================

/// context 块中的文本元素
///
/// 未显式设置 markdown 时沿用所在块的类型；单独序列化时按 markdown 处理。
#[derive(Debug, Clone, PartialEq)]
pub struct ContextTextElement {
    pub text: String,
    content_type: Option<ContentType>,
}

impl ContextTextElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            content_type: None,
        }
    }

    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.content_type = Some(ContentType::from_markdown(markdown));
        self
    }

    /// 显式设置的类型，None 表示沿用所在块
    pub fn content_type(&self) -> Option<ContentType> {
        self.content_type
    }
}

/// context 块中的图片元素
#[derive(Debug, Clone, PartialEq)]
pub struct ContextImageElement {
    pub image_url: String,
    pub alt_text: Option<String>,
}

impl ContextImageElement {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            alt_text: None,
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }
}

/// context 块元素
#[derive(Debug, Clone, PartialEq)]
pub enum ContextElement {
    Text(ContextTextElement),
    Image(ContextImageElement),
}

impl From<ContextTextElement> for ContextElement {
    fn from(element: ContextTextElement) -> Self {
        ContextElement::Text(element)
    }
}

impl From<ContextImageElement> for ContextElement {
    fn from(element: ContextImageElement) -> Self {
        ContextElement::Image(element)
    }
}

impl ContextElement {
    /// 按所在块的类型序列化
    fn record_in(&self, block_type: ContentType) -> Record {
        match self {
            ContextElement::Text(element) => {
                text_record(element.content_type.unwrap_or(block_type), &element.text)
            }
            ContextElement::Image(element) => {
                let mut record = Record::new();
                record.insert("type".to_string(), Value::String("image".to_string()));
                record.insert("image_url".to_string(), Value::String(element.image_url.clone()));
                insert_str(&mut record, "alt_text", element.alt_text.as_deref());
                record
            }
        }
    }
}

impl PayloadNode for ContextElement {
    fn to_record_with(&self, _colors: &ColorRegistry) -> Result<Record> {
        Ok(self.record_in(ContentType::Markdown))
    }
}

/// context 块
#[derive(Debug, Clone, PartialEq)]
pub struct ContextBlock {
    pub elements: Vec<ContextElement>,
    pub block_id: Option<String>,
    content_type: ContentType,
}

impl ContextBlock {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            block_id: None,
            content_type: ContentType::Markdown,
        }
    }

    pub fn with_element(mut self, element: impl Into<ContextElement>) -> Self {
        self.elements.push(element.into());
        self
    }

    /// 添加文本元素，序列化时沿用块自身的 markdown 设置
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_element(ContextTextElement::new(text))
    }

    pub fn with_image(self, image_url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        self.with_element(ContextImageElement::new(image_url).with_alt_text(alt_text))
    }

    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.content_type = ContentType::from_markdown(markdown);
        self
    }

    pub fn with_block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }
}

impl Default for ContextBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadNode for ContextBlock {
    fn to_record_with(&self, _colors: &ColorRegistry) -> Result<Record> {
        let mut record = base_record("context", self.block_id.as_deref());
        let elements = self
            .elements
            .iter()
            .map(|element| Value::Object(element.record_in(self.content_type)))
            .collect();
        record.insert("elements".to_string(), Value::Array(elements));
        Ok(record)
    }
}

// ============================================================================
// Block
// ============================================================================

/// 内容块
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(TextBlock),
    Divider(DividerBlock),
    Image(ImageBlock),
    Context(ContextBlock),
}

impl Block {
    /// Slack 中的块类型名
    pub fn block_type(&self) -> &'static str {
        match self {
            Block::Text(_) => "section",
            Block::Divider(_) => "divider",
            Block::Image(_) => "image",
            Block::Context(_) => "context",
        }
    }
}

impl PayloadNode for Block {
    fn to_record_with(&self, colors: &ColorRegistry) -> Result<Record> {
        match self {
            Block::Text(block) => block.to_record_with(colors),
            Block::Divider(block) => block.to_record_with(colors),
            Block::Image(block) => block.to_record_with(colors),
            Block::Context(block) => block.to_record_with(colors),
        }
    }
}

impl From<TextBlock> for Block {
    fn from(block: TextBlock) -> Self {
        Block::Text(block)
    }
}

impl From<DividerBlock> for Block {
    fn from(block: DividerBlock) -> Self {
        Block::Divider(block)
    }
}

impl From<ImageBlock> for Block {
    fn from(block: ImageBlock) -> Self {
        Block::Image(block)
    }
}

impl From<ContextBlock> for Block {
    fn from(block: ContextBlock) -> Self {
        Block::Context(block)
    }
}
