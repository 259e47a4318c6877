use crate::domain::model::{DevotionBlock, DevotionContent, Study, VerseEntry};
use chrono::NaiveDate;

fn push_block(lines: &mut Vec<String>, heading: &str, block: &DevotionBlock) {
    lines.push(heading.to_string());
    if let Some(title) = &block.title {
        lines.push(format!("*{}*", title));
    }
    match (&block.verse_ref, &block.verse_text) {
        (Some(reference), Some(text)) => lines.push(format!("{} - {}", reference, text)),
        (Some(reference), None) => lines.push(reference.clone()),
        (None, Some(text)) => lines.push(text.clone()),
        (None, None) => {}
    }
    if let Some(intro) = &block.encouragement_intro {
        lines.push(intro.clone());
    }
    for (i, point) in block.points.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, point));
    }
    if let Some(closing) = &block.closing {
        lines.push(closing.clone());
    }
    if let Some(prayer) = &block.prayer {
        lines.push(format!("Prayer: {}", prayer));
    }
}

fn push_verse(lines: &mut Vec<String>, entry: &VerseEntry) {
    if let Some(theme) = &entry.theme {
        lines.push(format!("Theme: {}", theme));
    }
    match (&entry.reference, &entry.text) {
        (Some(reference), Some(text)) => lines.push(format!("{}: {}", reference, text)),
        (Some(reference), None) => lines.push(reference.clone()),
        (None, Some(text)) => lines.push(text.clone()),
        (None, None) => {}
    }
    if let Some(caption) = &entry.caption {
        lines.push(caption.clone());
    }
}

/// 將解析結果轉成終端機可讀的純文字
pub fn render_text(content: &DevotionContent, date: NaiveDate, site_theme: &str) -> String {
    let mut lines = vec![
        format!("SoulStart - {}", site_theme),
        date.format("%A, %B %d, %Y").to_string(),
        String::new(),
    ];

    match content {
        DevotionContent::Morning(block) => push_block(&mut lines, "Sunrise Devotion", block),
        DevotionContent::Night(block) => push_block(&mut lines, "Sunset Devotion", block),
        DevotionContent::Both { morning, night } => {
            if let Some(block) = morning {
                push_block(&mut lines, "Sunrise Devotion", block);
            }
            if morning.is_some() && night.is_some() {
                lines.push(String::new());
            }
            if let Some(block) = night {
                push_block(&mut lines, "Sunset Devotion", block);
            }
        }
        DevotionContent::Verses(entry) => push_verse(&mut lines, entry),
        DevotionContent::Fallback(block) => push_block(&mut lines, "Today's Encouragement", block),
    }

    lines.join("\n")
}

pub fn render_studies(studies: &[Study]) -> String {
    if studies.is_empty() {
        return "No studies published yet.".to_string();
    }
    studies
        .iter()
        .map(|study| {
            let title = study.title.as_deref().unwrap_or_default();
            let mut line = match study.date.as_deref() {
                Some(date) => format!("{}  {}", date, title),
                None => format!("{:10}  {}", "", title),
            };
            if let Some(passage) = &study.passage {
                line.push_str(&format!(" ({})", passage));
            }
            if let Some(slug) = &study.slug {
                line.push_str(&format!(" [/study/{}]", slug));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
