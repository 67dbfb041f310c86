//! Logging expenses from ordinary messages.
//!
//! A message is handled when it comes from a human, is a DM or mentions the
//! bot, and does not start with the command prefix. An image attachment turns
//! it into a receipt; otherwise the text is logged.

use crate::{
    bot::{BotData, COMMAND_PREFIX, FAILURE_REPLY},
    core::{
        intake::{self, IntakeError, LoggedExpenses},
        report,
    },
    errors::Result,
};
use poise::serenity_prelude as serenity;
use tracing::{debug, error, warn};

/// Turns an intake outcome into reply text.
///
/// Extraction failures become the friendly retry hint. Storage failures are
/// logged and answered with [`FAILURE_REPLY`], so every handled message gets
/// a reply.
#[must_use]
pub fn intake_reply(outcome: std::result::Result<LoggedExpenses, IntakeError>) -> String {
    match outcome {
        Ok(logged) => report::noted_reply(&logged).unwrap_or_else(|e| {
            error!("Failed to format logged expenses: {}", e);
            FAILURE_REPLY.to_string()
        }),
        Err(IntakeError::Extraction(e)) => {
            warn!("Extraction failed: {}", e);
            e.user_message().to_string()
        }
        Err(IntakeError::Storage(e)) => {
            error!("Failed to store expenses: {}", e);
            FAILURE_REPLY.to_string()
        }
    }
}

/// Removes `<@id>` / `<@!id>` mentions of the bot and trims the rest.
#[must_use]
pub fn strip_mention(content: &str, bot_id: serenity::UserId) -> String {
    content
        .replace(&format!("<@{bot_id}>"), "")
        .replace(&format!("<@!{bot_id}>"), "")
        .trim()
        .to_string()
}

/// Whether an attachment's content type is an image
fn is_image(attachment: &serenity::Attachment) -> bool {
    attachment
        .content_type
        .as_deref()
        .is_some_and(|t| t.starts_with("image/"))
}

/// Logs a DM or mention and replies with the result.
pub async fn handle_message(
    ctx: &serenity::Context,
    message: &serenity::Message,
    bot_id: serenity::UserId,
    data: &BotData,
) -> Result<()> {
    if message.author.bot {
        return Ok(());
    }
    let addressed = message.guild_id.is_none() || message.mentions_user_id(bot_id);
    if !addressed {
        return Ok(());
    }

    let text = strip_mention(&message.content, bot_id);
    if text.starts_with(COMMAND_PREFIX) {
        return Ok(());
    }

    let image = message.attachments.iter().find(|a| is_image(a));
    if image.is_none() && text.is_empty() {
        return Ok(());
    }

    let owner_id = message.author.id.to_string();
    let today = data.config.today();
    debug!(%owner_id, "Handling expense message");

    if let Err(e) = message.channel_id.broadcast_typing(&ctx.http).await {
        debug!("Typing indicator failed: {}", e);
    }

    let outcome = match image {
        Some(attachment) => {
            let bytes = match attachment.download().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    error!(%owner_id, "Failed to download receipt: {}", e);
                    message.reply(ctx, FAILURE_REPLY).await?;
                    return Ok(());
                }
            };
            let mime_type = attachment.content_type.as_deref().unwrap_or("image/jpeg");
            let caption = Some(text.as_str()).filter(|t| !t.is_empty());
            intake::log_receipt(
                &data.database,
                data.extractor.as_ref(),
                &owner_id,
                &bytes,
                mime_type,
                caption,
                today,
            )
            .await
        }
        None => {
            intake::log_text(
                &data.database,
                data.extractor.as_ref(),
                &owner_id,
                &text,
                today,
            )
            .await
        }
    };

    message.reply(ctx, intake_reply(outcome)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, ExtractionError};

    #[test]
    fn test_strip_mention() {
        let bot = serenity::UserId::new(1234);
        assert_eq!(strip_mention("<@1234> makan 20k", bot), "makan 20k");
        assert_eq!(strip_mention("kopi 25k <@!1234>", bot), "kopi 25k");
        assert_eq!(strip_mention("<@999> halo", bot), "<@999> halo");
    }

    #[test]
    fn test_intake_reply_maps_extraction_failures_to_hints() {
        let reply = intake_reply(Err(IntakeError::Extraction(ExtractionError::EmptyExtraction)));
        assert!(reply.starts_with("Hmm gue ga nangkep"));

        let reply = intake_reply(Err(IntakeError::Extraction(ExtractionError::Transport(
            "refused".into(),
        ))));
        assert!(reply.contains("gangguan"));
    }

    #[test]
    fn test_intake_reply_answers_storage_failures() {
        let reply = intake_reply(Err(IntakeError::Storage(Error::Database(
            sea_orm::DbErr::Custom("disk full".into()),
        ))));
        assert_eq!(reply, FAILURE_REPLY);

        let reply = intake_reply(Err(IntakeError::Storage(Error::AccountNotFound {
            id: "x".into(),
        })));
        assert_eq!(reply, FAILURE_REPLY);
    }
}
