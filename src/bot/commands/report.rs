//! Report Discord commands - `today`, `week`, `month` and `recent`.
//!
//! Windows are computed from the configured local "today"; the text comes from
//! [`crate::core::report`].

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{expense, period::Period, report, summary::summarize},
        errors::{Error, Result},
    };

    const RECENT_LIMIT: u64 = 10;

    /// Lists today's expenses with a total.
    #[poise::command(slash_command, prefix_command)]
    pub async fn today(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let today = ctx.data().config.today();
        let (start, end) = Period::Today.range(today);

        let records = expense::find_in_range(&ctx.data().database, &owner_id, start, end).await?;
        ctx.say(report::today_reply(today, &records)?).await?;
        Ok(())
    }

    /// Summarizes this week (Monday to Sunday) by category.
    #[poise::command(slash_command, prefix_command)]
    pub async fn week(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let (start, end) = Period::Week.range(ctx.data().config.today());

        let records = expense::find_in_range(&ctx.data().database, &owner_id, start, end).await?;
        ctx.say(report::week_reply(&summarize(&records))?).await?;
        Ok(())
    }

    /// Summarizes this month by category with each category's share.
    #[poise::command(slash_command, prefix_command)]
    pub async fn month(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let today = ctx.data().config.today();
        let (start, end) = Period::Month.range(today);

        let records = expense::find_in_range(&ctx.data().database, &owner_id, start, end).await?;
        ctx.say(report::month_reply(today, &summarize(&records))?)
            .await?;
        Ok(())
    }

    /// Shows the 10 most recently logged expenses.
    #[poise::command(slash_command, prefix_command)]
    pub async fn recent(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let records = expense::find_recent(&ctx.data().database, &owner_id, RECENT_LIMIT).await?;
        ctx.say(report::recent_reply(&records)?).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
