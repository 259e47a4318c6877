use crate::domain::model::{DayPart, DevotionBlock, VerseEntry};
use serde_json::{Map, Value};

/// 依序取第一個非空字串欄位
fn first_text(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .find(|text| !text.trim().is_empty())
        .map(str::to_string)
}

/// Maps one raw block record, with its legacy field aliases, onto a
/// `DevotionBlock`. `day_theme` fills in a missing title.
pub fn normalize_block(record: &Map<String, Value>, day_theme: Option<&str>) -> DevotionBlock {
    let title = first_text(record, &["title", "Theme", "theme"]).or_else(|| {
        day_theme
            .filter(|theme| !theme.trim().is_empty())
            .map(str::to_string)
    });

    let points = ["point1", "point2", "point3"]
        .iter()
        .filter_map(|key| first_text(record, &[*key]))
        .collect();

    DevotionBlock {
        title,
        verse_ref: first_text(
            record,
            &["verse_ref", "verseRef", "VerseRef", "scripture", "Scripture", "verse"],
        ),
        verse_text: first_text(record, &["verse_text", "verseText", "VerseText"]),
        encouragement_intro: first_text(record, &["encouragement_intro", "intro"]),
        points,
        closing: first_text(record, &["closing", "reflection", "note", "thought"]),
        prayer: first_text(
            record,
            &[
                "prayer",
                "morning_prayer",
                "morningPrayer",
                "night_prayer",
                "nightPrayer",
            ],
        ),
        bg_image: first_text(record, &["bg_image"]),
    }
}

/// 取出某一天的早晨或晚間內容
///
/// Looks for a nested block under the part's keys first. A flat record whose
/// `type` names the part (as in the older per-month files) is its own block.
/// Returns `None` when the block is absent, `null` or has nothing to show.
pub fn day_block(day: &Map<String, Value>, part: DayPart) -> Option<DevotionBlock> {
    let day_theme = first_text(day, &["theme", "Theme"]);

    let nested = part
        .block_keys()
        .iter()
        .find_map(|key| day.get(*key).and_then(Value::as_object));

    let record = match nested {
        Some(record) => record,
        None => {
            let kind = first_text(day, &["type"])?.to_ascii_lowercase();
            if !part.type_names().contains(&kind.as_str()) {
                return None;
            }
            day
        }
    };

    let block = normalize_block(record, day_theme.as_deref());
    block.is_displayable().then_some(block)
}

/// 合併同一天的經文紀錄
///
/// Earlier records win field by field; later ones (for example an image card
/// for the same date) only fill in what is still missing.
pub fn verse_entry(records: &[&Map<String, Value>], theme: Option<&str>) -> Option<VerseEntry> {
    let mut entry = VerseEntry::default();
    for record in records {
        entry.reference = entry
            .reference
            .or_else(|| first_text(record, &["ref", "reference", "verse_ref"]));
        entry.text = entry
            .text
            .or_else(|| first_text(record, &["text", "line", "verse_text"]));
        entry.caption = entry.caption.or_else(|| first_text(record, &["caption"]));
        entry.file = entry.file.or_else(|| first_text(record, &["file"]));
        entry.theme = entry.theme.or_else(|| first_text(record, &["theme"]));
    }
    entry.theme = entry.theme.or_else(|| theme.map(str::to_string));
    entry.is_displayable().then_some(entry)
}
