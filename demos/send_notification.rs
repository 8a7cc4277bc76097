//! 发送一条示例通知并列出前几个频道
//!
//! 用法：
//! ```text
//! SLACK_ACCESS_TOKEN=xoxb-... cargo run --example send_notification -- "#general"
//! ```

use anyhow::{Context, Result};
use slack_notifications::{
    Attachment, AttachmentField, BlockTextField, Client, ContextBlock, DividerBlock, Notification,
    PostedMessage, TextBlock,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // 通过 RUST_LOG 控制日志级别，默认为 info
    // 例如: RUST_LOG=slack_notifications=debug
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("slack_notifications=info,send_notification=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let channel = std::env::args().nth(1).unwrap_or_else(|| "#general".to_string());

    let mut colors = slack_notifications::ColorRegistry::new();
    colors.register("brand", "#4A154B");
    let client = Client::from_env()
        .context("Cannot create Slack client")?
        .with_colors(colors);

    let notification = Notification::new(&channel)
        .with_username("release-bot")
        .with_icon_emoji(":rocket:")
        .with_text("Release *v1.4.0* is out")
        .with_raise_on_error(true)
        .with_attachment(
            Attachment::new()
                .with_color("brand")
                .with_title("Changelog")
                .with_title_link("https://example.com/changelog")
                .with_text("• faster uploads\n• fixed login redirect")
                .with_footer("release pipeline")
                .with_timestamp_at(chrono::Utc::now())
                .with_fields([
                    AttachmentField::titled("Env", "production").with_short(true),
                    AttachmentField::titled("Duration", "4m 12s").with_short(true),
                ]),
        )
        .with_block(
            TextBlock::new("*Rollout status*")
                .with_field(BlockTextField::new("*Region*\neu-west-1"))
                .with_field(BlockTextField::new("*Health*\n:white_check_mark:")),
        )
        .with_block(DividerBlock::new())
        .with_block(ContextBlock::new().with_text("Triggered by `ci`"));

    let response = client
        .send_notification(&notification)
        .context("Failed to send notification")?;
    let posted = PostedMessage::from_response(&response)?;
    info!(channel = %posted.channel, ts = %posted.ts, "Notification sent");

    client
        .send_notification(
            &Notification::new(&posted.channel)
                .with_text("Details in thread")
                .in_thread(&posted.ts)
                .with_raise_on_error(true),
        )
        .context("Failed to reply in thread")?;

    for channel in client.iter_channels().with_limit(50).take(5) {
        let channel = channel?;
        info!(
            id = channel["id"].as_str().unwrap_or_default(),
            name = channel["name"].as_str().unwrap_or_default(),
            "Channel"
        );
    }

    Ok(())
}
