//! Expense Discord commands - `catat` and `undo`.
//!
//! `catat` runs the same pipeline as a free-text DM. `undo` offers to delete
//! the latest record or, when it was logged together with others from one
//! message, the whole batch.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::message::intake_reply},
        core::{expense, intake, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::time::Duration;
    use tracing::info;

    const UNDO_TIMEOUT: Duration = Duration::from_secs(60);

    /// Logs expenses from a casual message, e.g. `makan soto 20k`.
    #[poise::command(slash_command, prefix_command)]
    pub async fn catat(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What you spent, e.g. \"kopi 25k sama temen\""]
        #[rest]
        text: String,
    ) -> Result<()> {
        ctx.defer().await?;

        let owner_id = ctx.author().id.to_string();
        let data = ctx.data();
        let outcome = intake::log_text(
            &data.database,
            data.extractor.as_ref(),
            &owner_id,
            text.trim(),
            data.config.today(),
        )
        .await;

        ctx.say(intake_reply(outcome)).await?;
        Ok(())
    }

    /// Deletes the most recent expense (or the whole message it came from).
    #[poise::command(slash_command, prefix_command)]
    pub async fn undo(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let db = ctx.data().database.as_ref();

        let Some(latest) = expense::find_latest(db, &owner_id).await? else {
            ctx.say("Tidak ada transaksi.").await?;
            return Ok(());
        };
        let batch = expense::find_batch(db, &latest).await?;

        let ctx_id = ctx.id();
        let all_id = format!("{ctx_id}:all");
        let one_id = format!("{ctx_id}:one");
        let cancel_id = format!("{ctx_id}:cancel");

        let mut buttons = Vec::new();
        if batch.len() > 1 {
            buttons.push(
                serenity::CreateButton::new(&all_id)
                    .label("Hapus semua")
                    .style(serenity::ButtonStyle::Danger),
            );
        }
        buttons.push(
            serenity::CreateButton::new(&one_id)
                .label("Hapus ini")
                .style(serenity::ButtonStyle::Danger),
        );
        buttons.push(
            serenity::CreateButton::new(&cancel_id)
                .label("Batal")
                .style(serenity::ButtonStyle::Secondary),
        );

        let handle = ctx
            .send(
                poise::CreateReply::default()
                    .content(report::undo_prompt(&latest, &batch)?)
                    .components(vec![serenity::CreateActionRow::Buttons(buttons)]),
            )
            .await?;

        let prefix = format!("{ctx_id}:");
        let press = serenity::ComponentInteractionCollector::new(ctx)
            .author_id(ctx.author().id)
            .channel_id(ctx.channel_id())
            .timeout(UNDO_TIMEOUT)
            .filter(move |press| press.data.custom_id.starts_with(&prefix))
            .await;

        let Some(press) = press else {
            handle
                .edit(
                    ctx,
                    poise::CreateReply::default()
                        .content("Dibatalkan")
                        .components(vec![]),
                )
                .await?;
            return Ok(());
        };

        let outcome = if press.data.custom_id == all_id {
            let removed =
                expense::delete_batch(db, &owner_id, &latest.raw_message, latest.created_at)
                    .await?;
            info!(%owner_id, removed, "Deleted expense batch");
            format!("✅ {removed} transaksi dihapus")
        } else if press.data.custom_id == one_id {
            let removed = expense::delete_expense(db, latest.id).await?;
            info!(%owner_id, expense_id = latest.id, removed, "Deleted expense");
            "✅ Dihapus".to_string()
        } else {
            "Dibatalkan".to_string()
        };

        press
            .create_response(
                ctx.serenity_context(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .content(outcome)
                        .components(vec![]),
                ),
            )
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
