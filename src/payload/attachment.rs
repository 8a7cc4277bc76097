//! 旧版消息附件（attachments）

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{insert_str, records_of, PayloadNode, Record};
use crate::color::ColorRegistry;
use crate::error::{Result, SlackError};

/// 附件字段
///
/// title 和 value 至少设置一个，否则序列化失败。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentField {
    pub title: Option<String>,
    pub value: Option<String>,
    /// 是否与相邻字段并排显示
    pub short: bool,
}

impl AttachmentField {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建带 title 和 value 的字段
    pub fn titled(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            value: Some(value.into()),
            short: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_short(mut self, short: bool) -> Self {
        self.short = short;
        self
    }
}

impl PayloadNode for AttachmentField {
    fn to_record_with(&self, _colors: &ColorRegistry) -> Result<Record> {
        if self.title.is_none() && self.value.is_none() {
            return Err(SlackError::EmptyAttachmentField);
        }

        let mut record = Record::new();
        record.insert("short".to_string(), Value::Bool(self.short));
        insert_str(&mut record, "title", self.title.as_deref());
        insert_str(&mut record, "value", self.value.as_deref());
        Ok(record)
    }
}

/// 消息附件
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub image_url: Option<String>,
    pub thumb_url: Option<String>,

    pub author_name: Option<String>,
    pub author_link: Option<String>,
    pub author_icon: Option<String>,

    pub title: Option<String>,
    pub title_link: Option<String>,

    pub text: Option<String>,
    pub pretext: Option<String>,

    pub footer: Option<String>,
    pub footer_icon: Option<String>,

    /// Unix 时间戳（秒），序列化为 `ts`
    pub timestamp: Option<i64>,

    pub fields: Vec<AttachmentField>,

    /// 颜色名或原始色值
    pub color: Option<String>,

    /// pretext / text / footer 是否按 markdown 渲染
    pub markdown: bool,
    /// title 是否按 markdown 渲染（需同时开启 `markdown`）
    pub title_markdown: bool,
}

impl Default for Attachment {
    fn default() -> Self {
        Self {
            image_url: None,
            thumb_url: None,
            author_name: None,
            author_link: None,
            author_icon: None,
            title: None,
            title_link: None,
            text: None,
            pretext: None,
            footer: None,
            footer_icon: None,
            timestamp: None,
            fields: Vec::new(),
            color: None,
            markdown: true,
            title_markdown: false,
        }
    }
}

impl Attachment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_pretext(mut self, pretext: impl Into<String>) -> Self {
        self.pretext = Some(pretext.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_title_link(mut self, title_link: impl Into<String>) -> Self {
        self.title_link = Some(title_link.into());
        self
    }

    /// 设置作者三元组，link / icon 可选
    pub fn with_author(
        mut self,
        name: impl Into<String>,
        link: Option<String>,
        icon: Option<String>,
    ) -> Self {
        self.author_name = Some(name.into());
        self.author_link = link;
        self.author_icon = icon;
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_footer_icon(mut self, footer_icon: impl Into<String>) -> Self {
        self.footer_icon = Some(footer_icon.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_thumb_url(mut self, thumb_url: impl Into<String>) -> Self {
        self.thumb_url = Some(thumb_url.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_timestamp_at(self, time: DateTime<Utc>) -> Self {
        self.with_timestamp(time.timestamp())
    }

    pub fn with_field(mut self, field: AttachmentField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = AttachmentField>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    pub fn with_title_markdown(mut self, title_markdown: bool) -> Self {
        self.title_markdown = title_markdown;
        self
    }

    /// 需要按 markdown 渲染的字段名，顺序固定：pretext, text, footer, title
    fn mrkdwn_in(&self) -> Vec<Value> {
        if !self.markdown {
            return Vec::new();
        }

        let candidates = [
            ("pretext", &self.pretext, true),
            ("text", &self.text, true),
            ("footer", &self.footer, true),
            ("title", &self.title, self.title_markdown),
        ];

        candidates
            .into_iter()
            .filter(|(_, value, enabled)| *enabled && value.as_deref().is_some_and(|v| !v.is_empty()))
            .map(|(name, _, _)| Value::String(name.to_string()))
            .collect()
    }
}

impl PayloadNode for Attachment {
    fn to_record_with(&self, colors: &ColorRegistry) -> Result<Record> {
        let mut record = Record::new();

        if let Some(color) = self.color.as_deref().filter(|c| !c.is_empty()) {
            record.insert("color".to_string(), Value::String(colors.resolve(color).to_string()));
        }

        insert_str(&mut record, "image_url", self.image_url.as_deref());
        insert_str(&mut record, "thumb_url", self.thumb_url.as_deref());
        insert_str(&mut record, "author_name", self.author_name.as_deref());
        insert_str(&mut record, "author_link", self.author_link.as_deref());
        insert_str(&mut record, "author_icon", self.author_icon.as_deref());
        insert_str(&mut record, "title", self.title.as_deref());
        insert_str(&mut record, "title_link", self.title_link.as_deref());
        insert_str(&mut record, "pretext", self.pretext.as_deref());
        insert_str(&mut record, "text", self.text.as_deref());
        insert_str(&mut record, "footer", self.footer.as_deref());
        insert_str(&mut record, "footer_icon", self.footer_icon.as_deref());

        if let Some(ts) = self.timestamp.filter(|ts| *ts != 0) {
            record.insert("ts".to_string(), Value::from(ts));
        }

        if let Some(fields) = records_of(&self.fields, colors)? {
            record.insert("fields".to_string(), fields);
        }

        let mrkdwn_in = self.mrkdwn_in();
        if !mrkdwn_in.is_empty() {
            record.insert("mrkdwn_in".to_string(), Value::Array(mrkdwn_in));
        }

        Ok(record)
    }
}
