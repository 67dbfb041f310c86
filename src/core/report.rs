//! Reply text for chat reports.
//!
//! Pure formatting over already-fetched records and [`Summary`] values; nothing
//! here touches the database. Output uses Discord markdown (`**bold**`,
//! `_italic_`).

use crate::{
    core::{
        intake::LoggedExpenses,
        summary::Summary,
        vocabulary::{Category, Mood},
    },
    entities::expense,
    errors::Result,
};
use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt::Write;

/// Formats whole Rupiah with id-ID thousands separators: `Rp20.000`.
#[must_use]
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-Rp{grouped}")
    } else {
        format!("Rp{grouped}")
    }
}

/// Compact form for tight layouts: `Rp1.5jt`, `Rp20k`, `Rp750`.
#[must_use]
pub fn format_rupiah_short(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    if abs >= 1_000_000 {
        format!("{sign}Rp{}jt", one_decimal(abs, 1_000_000))
    } else if abs >= 1_000 {
        format!("{sign}Rp{}k", one_decimal(abs, 1_000))
    } else {
        format!("{sign}Rp{abs}")
    }
}

/// `value / unit` rounded to one decimal, without a trailing `.0`
fn one_decimal(value: u64, unit: u64) -> String {
    let tenths = (value * 10 + unit / 2) / unit;
    if tenths % 10 == 0 {
        (tenths / 10).to_string()
    } else {
        format!("{}.{}", tenths / 10, tenths % 10)
    }
}

/// Indonesian weekday name
#[must_use]
pub const fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// Indonesian month name for `month` in `1..=12`
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "Januari",
        "Februari",
        "Maret",
        "April",
        "Mei",
        "Juni",
        "Juli",
        "Agustus",
        "September",
        "Oktober",
        "November",
        "Desember",
    ];
    month
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Confirmation after logging: one block per record, then today's total.
pub fn noted_reply(logged: &LoggedExpenses) -> Result<String> {
    let mut msg = String::from("✅ Noted!\n\n");

    if let Some(merchant) = &logged.merchant {
        writeln!(msg, "🧾 **{merchant}**")?;
    }
    if let Some(total) = logged.receipt_total {
        writeln!(msg, "Total struk: {}", format_rupiah(total))?;
    }
    if logged.merchant.is_some() || logged.receipt_total.is_some() {
        msg.push('\n');
    }

    for record in &logged.records {
        let mood = Mood::icon_for(record.mood.as_deref());
        write!(
            msg,
            "{} **{}** - {}",
            Category::icon_for(&record.category),
            record.item,
            format_rupiah(record.amount)
        )?;
        if !mood.is_empty() {
            write!(msg, " {mood}")?;
        }
        msg.push('\n');
        if let Some(place) = &record.place {
            writeln!(msg, "   📍 {place}")?;
        }
        if let Some(person) = &record.with_person {
            writeln!(msg, "   👥 {person}")?;
        }
        if let Some(story) = &record.story {
            writeln!(msg, "   💭 _{story}_")?;
        }
    }

    write!(
        msg,
        "\n📊 Total hari ini: **{}**",
        format_rupiah(logged.today_total)
    )?;
    Ok(msg)
}

/// Today's records, newest first, with a total.
pub fn today_reply(today: NaiveDate, records: &[expense::Model]) -> Result<String> {
    if records.is_empty() {
        return Ok("Belum ada pengeluaran hari ini ✨".to_string());
    }

    let mut msg = format!(
        "📅 **{}, {} {}**\n\n",
        day_name(today.weekday()),
        today.day(),
        month_name(today.month())
    );
    let mut total = 0;
    for record in records {
        total += record.amount;
        writeln!(
            msg,
            "{} {} - **{}**",
            Category::icon_for(&record.category),
            record.item,
            format_rupiah(record.amount)
        )?;
    }
    write!(msg, "\n**Total: {}**", format_rupiah(total))?;
    Ok(msg)
}

/// Week summary: total, count and categories by descending total.
pub fn week_reply(summary: &Summary) -> Result<String> {
    if summary.count == 0 {
        return Ok("Belum ada pengeluaran minggu ini ✨".to_string());
    }
    breakdown("📊 **Minggu Ini**", summary, false)
}

/// Month summary with each category's share of the total.
pub fn month_reply(today: NaiveDate, summary: &Summary) -> Result<String> {
    if summary.count == 0 {
        return Ok("Belum ada pengeluaran bulan ini ✨".to_string());
    }
    let title = format!("📊 **{} {}**", month_name(today.month()), today.year());
    breakdown(&title, summary, true)
}

fn breakdown(title: &str, summary: &Summary, with_share: bool) -> Result<String> {
    let mut msg = format!(
        "{title}\n\n💰 **{}** dari {} transaksi\n\n",
        format_rupiah(summary.total),
        summary.count
    );
    for entry in summary.categories_by_total() {
        write!(
            msg,
            "{} {} - {}",
            Category::icon_for(&entry.category),
            entry.category,
            format_rupiah(entry.total)
        )?;
        if with_share {
            if let Some(pct) = summary.percentage_of_total(entry.total) {
                write!(msg, " ({pct}%)")?;
            }
        }
        msg.push('\n');
    }
    Ok(msg)
}

/// Most recent records with their day and place.
pub fn recent_reply(records: &[expense::Model]) -> Result<String> {
    if records.is_empty() {
        return Ok("Belum ada transaksi.".to_string());
    }

    let mut msg = String::from("📝 **Recent**\n\n");
    for record in records {
        writeln!(
            msg,
            "{} {} - **{}**",
            Category::icon_for(&record.category),
            record.item,
            format_rupiah(record.amount)
        )?;
        write!(msg, "└ {}/{}", record.date.day(), record.date.month())?;
        if let Some(place) = &record.place {
            write!(msg, " • {place}")?;
        }
        msg.push_str("\n\n");
    }
    Ok(msg)
}

/// Undo confirmation for the latest record and the batch it belongs to.
pub fn undo_prompt(latest: &expense::Model, batch: &[expense::Model]) -> Result<String> {
    let mut msg = format!(
        "Hapus **{}** - {}?",
        latest.item,
        format_rupiah(latest.amount)
    );
    if batch.len() > 1 {
        let total: i64 = batch.iter().map(|r| r.amount).sum();
        write!(
            msg,
            "\n\nPesan yang sama nyatet {} transaksi (total {}).",
            batch.len(),
            format_rupiah(total)
        )?;
        for record in batch {
            write!(
                msg,
                "\n{} {} - {}",
                Category::icon_for(&record.category),
                record.item,
                format_rupiah_short(record.amount)
            )?;
        }
    }
    Ok(msg)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::summary::summarize;
    use chrono::Utc;

    fn record(id: i64, amount: i64, item: &str, category: &str) -> expense::Model {
        expense::Model {
            id,
            owner_id: "42".to_string(),
            amount,
            item: item.to_string(),
            category: category.to_string(),
            place: None,
            with_person: None,
            mood: None,
            story: None,
            date: NaiveDate::from_ymd_opt(2024, 2, 8).unwrap(),
            raw_message: "makan 50k, kopi 25k".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0), "Rp0");
        assert_eq!(format_rupiah(500), "Rp500");
        assert_eq!(format_rupiah(20_000), "Rp20.000");
        assert_eq!(format_rupiah(1_500_000), "Rp1.500.000");
        assert_eq!(format_rupiah(123_456_789), "Rp123.456.789");
        assert_eq!(format_rupiah(-35_000), "-Rp35.000");
    }

    #[test]
    fn test_format_rupiah_short() {
        assert_eq!(format_rupiah_short(750), "Rp750");
        assert_eq!(format_rupiah_short(20_000), "Rp20k");
        assert_eq!(format_rupiah_short(20_500), "Rp20.5k");
        assert_eq!(format_rupiah_short(1_500_000), "Rp1.5jt");
        assert_eq!(format_rupiah_short(2_000_000), "Rp2jt");
    }

    #[test]
    fn test_indonesian_names() {
        assert_eq!(day_name(Weekday::Thu), "Kamis");
        assert_eq!(month_name(2), "Februari");
        assert_eq!(month_name(13), "");
        assert_eq!(month_name(0), "");
    }

    #[test]
    fn test_noted_reply_lists_annotations_and_total() -> Result<()> {
        let mut coffee = record(1, 35_000, "hot chocolate", "coffee");
        coffee.place = Some("Arah Coffee".to_string());
        coffee.mood = Some("satisfied".to_string());
        coffee.story = Some("butuh me time".to_string());
        let logged = LoggedExpenses {
            records: vec![coffee],
            today_total: 55_000,
            merchant: None,
            receipt_total: None,
        };

        let msg = noted_reply(&logged)?;
        assert!(msg.starts_with("✅ Noted!"));
        assert!(msg.contains("☕ **hot chocolate** - Rp35.000 😌"));
        assert!(msg.contains("📍 Arah Coffee"));
        assert!(msg.contains("💭 _butuh me time_"));
        assert!(!msg.contains("👥"));
        assert!(msg.ends_with("📊 Total hari ini: **Rp55.000**"));
        Ok(())
    }

    #[test]
    fn test_noted_reply_for_receipt_shows_merchant() -> Result<()> {
        let logged = LoggedExpenses {
            records: vec![record(1, 30_000, "nasi goreng", "food")],
            today_total: 30_000,
            merchant: Some("Warung Bu Sri".to_string()),
            receipt_total: Some(30_000),
        };
        let msg = noted_reply(&logged)?;
        assert!(msg.contains("🧾 **Warung Bu Sri**"));
        assert!(msg.contains("Total struk: Rp30.000"));
        Ok(())
    }

    #[test]
    fn test_today_reply() -> Result<()> {
        let today = NaiveDate::from_ymd_opt(2024, 2, 8).unwrap();
        assert_eq!(today_reply(today, &[])?, "Belum ada pengeluaran hari ini ✨");

        let msg = today_reply(
            today,
            &[record(2, 25_000, "kopi", "coffee"), record(1, 50_000, "makan", "food")],
        )?;
        assert!(msg.starts_with("📅 **Kamis, 8 Februari**"));
        assert!(msg.ends_with("**Total: Rp75.000**"));
        Ok(())
    }

    #[test]
    fn test_month_reply_sorts_categories_and_shows_share() -> Result<()> {
        let records = vec![
            record(1, 25_000, "kopi", "coffee"),
            record(2, 50_000, "makan", "food"),
            record(3, 25_000, "grab", "transport"),
        ];
        let summary = summarize(&records);
        let msg = month_reply(NaiveDate::from_ymd_opt(2024, 2, 8).unwrap(), &summary)?;

        assert!(msg.starts_with("📊 **Februari 2024**"));
        assert!(msg.contains("**Rp100.000** dari 3 transaksi"));
        let food = msg.find("🍔 food - Rp50.000 (50%)").unwrap();
        let coffee = msg.find("☕ coffee - Rp25.000 (25%)").unwrap();
        assert!(food < coffee);
        Ok(())
    }

    #[test]
    fn test_empty_windows_do_not_compute_shares() -> Result<()> {
        let empty = summarize::<expense::Model>(&[]);
        assert_eq!(week_reply(&empty)?, "Belum ada pengeluaran minggu ini ✨");
        assert_eq!(
            month_reply(NaiveDate::from_ymd_opt(2024, 2, 8).unwrap(), &empty)?,
            "Belum ada pengeluaran bulan ini ✨"
        );
        Ok(())
    }

    #[test]
    fn test_week_reply_has_no_shares() -> Result<()> {
        let summary = summarize(&[record(1, 20_000, "makan", "food")]);
        let msg = week_reply(&summary)?;
        assert!(msg.contains("🍔 food - Rp20.000\n"));
        assert!(!msg.contains('%'));
        Ok(())
    }

    #[test]
    fn test_recent_reply_and_unknown_category_icon() -> Result<()> {
        let mut odd = record(1, 10_000, "parkir", "parking");
        odd.place = Some("Mall".to_string());
        let msg = recent_reply(&[odd])?;
        assert!(msg.contains("💸 parkir - **Rp10.000**"));
        assert!(msg.contains("└ 8/2 • Mall"));
        assert_eq!(recent_reply(&[])?, "Belum ada transaksi.");
        Ok(())
    }

    #[test]
    fn test_undo_prompt_mentions_batch() -> Result<()> {
        let a = record(1, 50_000, "makan", "food");
        let b = record(2, 25_000, "kopi", "coffee");
        let single = undo_prompt(&b, std::slice::from_ref(&b))?;
        assert_eq!(single, "Hapus **kopi** - Rp25.000?");

        let batch = undo_prompt(&b, &[a, b.clone()])?;
        assert!(batch.contains("2 transaksi (total Rp75.000)"));
        assert!(batch.contains("\n🍔 makan - Rp50k"));
        assert!(batch.contains("\n☕ kopi - Rp25k"));
        Ok(())
    }
}
