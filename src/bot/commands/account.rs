//! Dashboard account commands - `setpassword` and `setalias`.
//!
//! Replies are ephemeral so a password typed in a server channel is only
//! echoed back to its owner.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::account::{self, MIN_PASSWORD_LEN},
        errors::{Error, Result},
    };
    use tracing::info;

    async fn reply_private(ctx: poise::Context<'_, BotData, Error>, text: String) -> Result<()> {
        ctx.send(poise::CreateReply::default().content(text).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Sets the password for the web dashboard.
    #[poise::command(slash_command, prefix_command)]
    pub async fn setpassword(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Dashboard password (min 4 characters)"]
        #[rest]
        password: String,
    ) -> Result<()> {
        let account_id = ctx.author().id.to_string();
        let display_name = ctx
            .author()
            .global_name
            .clone()
            .or_else(|| Some(ctx.author().name.clone()));

        match account::set_password(&ctx.data().database, &account_id, password.trim(), display_name)
            .await
        {
            Ok(_) => {
                info!(%account_id, "Dashboard password set");
                let text = format!(
                    "✅ Password udah ke-set!\n\nBuka dashboard di:\n{}\n\nLogin pake ID: `{account_id}`",
                    ctx.data().config.web_url
                );
                reply_private(ctx, text).await
            }
            Err(Error::InvalidPassword { .. }) => {
                reply_private(
                    ctx,
                    format!("Format: `/setpassword <password>`\nMin {MIN_PASSWORD_LEN} karakter."),
                )
                .await
            }
            Err(e) => Err(e),
        }
    }

    /// Sets a short alias to log in to the dashboard with instead of the numeric ID.
    #[poise::command(slash_command, prefix_command)]
    pub async fn setalias(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Alias, one word"] alias: String,
    ) -> Result<()> {
        let account_id = ctx.author().id.to_string();

        let text = match account::set_alias(&ctx.data().database, &account_id, &alias).await {
            Ok(updated) => format!(
                "✅ Alias ke-set! Sekarang bisa login pake `{}`",
                updated.alias.unwrap_or_default()
            ),
            Err(Error::AccountNotFound { .. }) => {
                "Set password dulu pake `/setpassword` ya.".to_string()
            }
            Err(Error::AliasTaken { alias }) => format!("Alias `{alias}` udah dipake orang lain 😅"),
            Err(Error::InvalidAlias { .. }) => {
                "Alias harus satu kata tanpa spasi dan ga boleh angka semua.".to_string()
            }
            Err(e) => return Err(e),
        };
        reply_private(ctx, text).await
    }
}

// Re-export all commands
pub use inner::*;
