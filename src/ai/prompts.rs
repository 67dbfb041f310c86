//! Instruction prompts for the extraction models.
//!
//! The category and mood lists are rendered from
//! [`crate::core::vocabulary`], so the prompt can never drift from what the
//! normalizer and the icon lookups accept.

use super::ReferenceDates;
use crate::core::vocabulary::{category_list, mood_list};

/// Rules shared by the text and the receipt prompts
fn shared_rules() -> String {
    format!(
        r#"Kategori (WAJIB salah satu): {categories}
Mood (pilih yang paling cocok, atau null): {moods}

Singkatan nominal (Rupiah):
- "k", "rb", "ribu" = x1.000 (20k = 20000, 15rb = 15000)
- "jt", "juta" = x1.000.000 (1.5jt = 1500000)

Tanggal:
- "tadi", "barusan", "hari ini" atau tanpa keterangan = tanggal hari ini
- "kemarin" = tanggal kemarin
- Format tanggal ISO (YYYY-MM-DD)

Output HARUS JSON valid dengan bentuk:
{{
  "expenses": [
    {{
      "amount": 35000,
      "item": "hot chocolate hazelnut",
      "category": "coffee",
      "place": "Arah Coffee",
      "withPerson": "temen kantor",
      "mood": "satisfied",
      "story": "lagi butuh me time karena kerjaan hectic",
      "date": "2024-02-07"
    }}
  ]
}}

Rules:
- Amount HARUS angka bulat positif (bukan string)
- Kalau satu harga mencakup beberapa barang sekaligus (paket/combo), jadikan SATU expense dengan item gabungan
- Kalau ada beberapa pembelian terpisah dengan harga masing-masing, buat expense terpisah
- "story" adalah konteks emosional/alasan, bukan deskripsi item
- Jika tidak ada info, set null (jangan string kosong)
- Kalau pesan bukan pengeluaran, balas {{"expenses": [], "error": "<alasan singkat>"}}"#,
        categories = category_list(),
        moods = mood_list(),
    )
}

/// System prompt for chat messages.
#[must_use]
pub fn text_system_prompt() -> String {
    format!(
        r#"Kamu adalah AI assistant yang membantu mencatat pengeluaran dari pesan casual bahasa Indonesia.

Tugasmu:
1. Extract semua pengeluaran dari pesan user
2. Parse nominal dalam Rupiah
3. Detect mood/emosi dari konteks
4. Extract cerita/alasan di balik pengeluaran sebagai "story"
5. Kategorikan setiap pengeluaran
6. Tentukan tanggal dari kata relatif

{rules}

Contoh:
- "makan 20k" -> {{"expenses":[{{"amount":20000,"item":"makan","category":"food","place":null,"withPerson":null,"mood":null,"story":null,"date":"<hari ini>"}}]}}
- "makan 50k, kopi 25k, grab 30k" -> tiga expense: food 50000, coffee 25000, transport 30000
- "paket ayam geprek + es teh 25rb" -> satu expense food 25000 dengan item "paket ayam geprek + es teh"
- "grab 45k kemarin, males jalan" -> transport 45000, date kemarin, mood "reluctant", story "males jalan""#,
        rules = shared_rules(),
    )
}

/// System prompt for receipt photos.
#[must_use]
pub fn receipt_system_prompt() -> String {
    format!(
        r#"Kamu adalah AI assistant yang membaca foto struk/nota belanja dan mencatatnya sebagai pengeluaran.

Tugasmu:
1. Baca nama merchant/toko dari struk
2. Baca total akhir yang dibayar
3. Extract item-item pembelian sebagai expense; gabungkan item kecil yang sejenis kalau struknya panjang
4. Ongkir, biaya layanan, biaya aplikasi dan biaya pengiriman dicatat sebagai expense TERPISAH dengan category "transport"
5. Pakai tanggal di struk kalau terbaca, kalau tidak pakai tanggal hari ini
6. Kalau user kasih caption, pakai untuk mood/story/withPerson

Tambahkan dua field di level atas JSON:
- "merchant": nama toko (atau null)
- "total": total akhir sebagai angka (atau null)

{rules}"#,
        rules = shared_rules(),
    )
}

/// User turn for a chat message.
#[must_use]
pub fn text_user_prompt(message: &str, dates: ReferenceDates) -> String {
    format!(
        "Tanggal hari ini: {today}\nTanggal kemarin: {yesterday}\n\nPesan user:\n{message}",
        today = dates.today.format("%Y-%m-%d"),
        yesterday = dates.yesterday.format("%Y-%m-%d"),
    )
}

/// User turn accompanying a receipt photo.
#[must_use]
pub fn receipt_user_prompt(caption: Option<&str>, dates: ReferenceDates) -> String {
    let caption = caption
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("(tanpa caption)");
    format!(
        "Tanggal hari ini: {today}\nTanggal kemarin: {yesterday}\n\nCaption user:\n{caption}\n\nBaca struk di gambar ini.",
        today = dates.today.format("%Y-%m-%d"),
        yesterday = dates.yesterday.format("%Y-%m-%d"),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::vocabulary::{Category, Mood};
    use chrono::NaiveDate;

    fn dates() -> ReferenceDates {
        ReferenceDates::for_today(NaiveDate::from_ymd_opt(2024, 2, 8).unwrap())
    }

    #[test]
    fn test_prompts_list_every_category_and_mood() {
        for prompt in [text_system_prompt(), receipt_system_prompt()] {
            for category in Category::ALL {
                assert!(prompt.contains(category.as_str()), "missing {category}");
            }
            for mood in Mood::ALL {
                assert!(prompt.contains(mood.as_str()), "missing {mood}");
            }
            assert!(prompt.contains("\"jt\""));
            assert!(prompt.contains("\"expenses\""));
        }
    }

    #[test]
    fn test_receipt_prompt_mentions_fees_and_merchant() {
        let prompt = receipt_system_prompt();
        assert!(prompt.contains("Ongkir"));
        assert!(prompt.contains("\"merchant\""));
        assert!(prompt.contains("\"total\""));
    }

    #[test]
    fn test_user_prompt_carries_both_reference_dates() {
        let prompt = text_user_prompt("makan 20k", dates());
        assert!(prompt.contains("Tanggal hari ini: 2024-02-08"));
        assert!(prompt.contains("Tanggal kemarin: 2024-02-07"));
        assert!(prompt.ends_with("makan 20k"));
    }

    #[test]
    fn test_receipt_user_prompt_without_caption() {
        let prompt = receipt_user_prompt(Some("   "), dates());
        assert!(prompt.contains("(tanpa caption)"));
        let prompt = receipt_user_prompt(Some("makan bareng tim"), dates());
        assert!(prompt.contains("makan bareng tim"));
    }
}
