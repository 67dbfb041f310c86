//! General Discord commands - ping, start/help and the provider credit check.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    const GUIDE: &str = "Gue **AturUang**, buat atur keuangan lo.\n\n\
        **Cara pakai:**\n\
        DM gue (atau mention gue) kayak chat biasa:\n\
        • _makan soto 20k_\n\
        • _kopi 35k di starbucks sama temen_\n\
        • _grab 45k kemarin, males jalan_\n\
        Kirim foto struk juga bisa 🧾\n\n\
        **Commands:**\n\
        `/catat` • `/today` • `/week` • `/month`\n\
        `/recent` • `/undo` • `/setpassword` • `/setalias`\n\n\
        Gas! 💸";

    /// Greets the user and explains how to log expenses.
    #[poise::command(slash_command, prefix_command)]
    pub async fn start(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let name = ctx
            .author()
            .global_name
            .clone()
            .unwrap_or_else(|| ctx.author().name.clone());
        ctx.say(format!("Yo {name}! 👋\n\n{GUIDE}")).await?;
        Ok(())
    }

    /// Shows how to use the bot.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(GUIDE).await?;
        Ok(())
    }

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Shows the remaining credit on the model provider account.
    #[poise::command(slash_command, prefix_command)]
    pub async fn credits(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let reply = match ctx.data().extractor.credit_balance().await {
            Some(balance) => format!(
                "💳 **Credit AI**\n\nSisa: **${:.2}**\nTerpakai: ${:.2} dari ${:.2}",
                balance.remaining, balance.used, balance.total
            ),
            None => "Gagal cek credit sekarang, coba lagi nanti ya.".to_string(),
        };
        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
