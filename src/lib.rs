//! Slack Notifications - 向 Slack 频道发送带附件、内容块和字段的通知
//!
//! # 使用示例
//! ```ignore
//! use slack_notifications::{Attachment, AttachmentField, Client, Notification, TextBlock};
//!
//! let client = Client::from_env()?;
//! let notification = Notification::new("#deploys")
//!     .with_text("Deploy *finished*")
//!     .with_attachment(
//!         Attachment::new()
//!             .with_color("green")
//!             .with_field(AttachmentField::titled("Env", "prod").with_short(true)),
//!     )
//!     .with_block(TextBlock::new("All checks passed"));
//! client.send_notification(&notification)?;
//! ```

pub mod client;
pub mod color;
pub mod config;
pub mod error;
pub mod payload;
pub mod resource;
pub mod transport;

pub use client::{CallOptions, Client, Notification, PageIterator, PostedMessage};
pub use color::ColorRegistry;
pub use config::{SlackConfig, ACCESS_TOKEN_ENV, DEFAULT_RECORDS_LIMIT, DEFAULT_TIMEOUT_MS, SLACK_API_URL};
pub use error::{Result, SlackError};
pub use payload::{
    Attachment, AttachmentField, Block, BlockTextField, ContentType, ContextBlock, ContextElement,
    ContextImageElement, ContextTextElement, DividerBlock, ImageBlock, PayloadNode, Record, TextBlock,
};
pub use resource::Resource;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
