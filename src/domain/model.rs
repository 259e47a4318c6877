use crate::utils::error::SoulStartError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// 要取得當日內容的哪一段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Morning,
    Night,
    Both,
    Verses,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Morning, Mode::Night, Mode::Both, Mode::Verses];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Morning => "morning",
            Mode::Night => "night",
            Mode::Both => "both",
            Mode::Verses => "verses",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SoulStartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" | "sunrise" => Ok(Mode::Morning),
            "night" | "sunset" | "evening" => Ok(Mode::Night),
            "both" => Ok(Mode::Both),
            "verses" => Ok(Mode::Verses),
            other => Err(SoulStartError::ValidationError {
                message: format!(
                    "Unknown mode '{}'. Expected morning, night, both or verses",
                    other
                ),
            }),
        }
    }
}

/// One half of a day: the sunrise or the sunset reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Night,
}

impl DayPart {
    /// Keys a day record may use for this part's block.
    pub fn block_keys(&self) -> &'static [&'static str] {
        match self {
            DayPart::Morning => &["morning", "sunrise", "Morning", "Sunrise"],
            DayPart::Night => &["night", "sunset", "Night", "Sunset"],
        }
    }

    /// Values of a flat record's `type` field that mark it as this part.
    pub fn type_names(&self) -> &'static [&'static str] {
        match self {
            DayPart::Morning => &["morning", "sunrise"],
            DayPart::Night => &["night", "sunset"],
        }
    }
}

/// 正規化後的單段靈修內容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevotionBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encouragement_intro: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prayer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_image: Option<String>,
}

impl DevotionBlock {
    /// A block can be shown only if it has a heading or a scripture line.
    pub fn is_displayable(&self) -> bool {
        self.title.is_some() || self.verse_ref.is_some() || self.verse_text.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseEntry {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl VerseEntry {
    pub fn is_displayable(&self) -> bool {
        self.reference.is_some() || self.text.is_some()
    }
}

/// The fixed content shown whenever a real devotion cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackDevotion {
    pub title: &'static str,
    pub verse_ref: &'static str,
    pub verse_text: &'static str,
    pub prayer: &'static str,
}

pub const FALLBACK_DEVOTION: FallbackDevotion = FallbackDevotion {
    title: "Strength for Today",
    verse_ref: "Psalm 118:24",
    verse_text: "This is the day the Lord has made; we will rejoice and be glad in it.",
    prayer: "Lord, order my steps today and keep me in Your care. Amen.",
};

impl FallbackDevotion {
    pub fn to_block(&self) -> DevotionBlock {
        DevotionBlock {
            title: Some(self.title.to_string()),
            verse_ref: Some(self.verse_ref.to_string()),
            verse_text: Some(self.verse_text.to_string()),
            prayer: Some(self.prayer.to_string()),
            ..DevotionBlock::default()
        }
    }
}

/// 解析結果；找不到資料時一律是 `Fallback`，不是錯誤
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DevotionContent {
    Morning(DevotionBlock),
    Night(DevotionBlock),
    Both {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        morning: Option<DevotionBlock>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        night: Option<DevotionBlock>,
    },
    Verses(VerseEntry),
    Fallback(DevotionBlock),
}

impl DevotionContent {
    pub fn fallback() -> Self {
        DevotionContent::Fallback(FALLBACK_DEVOTION.to_block())
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, DevotionContent::Fallback(_))
    }

    /// True when nothing in the payload could be rendered.
    pub fn is_empty(&self) -> bool {
        match self {
            DevotionContent::Morning(block)
            | DevotionContent::Night(block)
            | DevotionContent::Fallback(block) => !block.is_displayable(),
            DevotionContent::Both { morning, night } => {
                !morning.iter().chain(night.iter()).any(DevotionBlock::is_displayable)
            }
            DevotionContent::Verses(entry) => !entry.is_displayable(),
        }
    }

    /// The first title in the payload, for headings and log lines.
    pub fn headline(&self) -> Option<&str> {
        match self {
            DevotionContent::Morning(block)
            | DevotionContent::Night(block)
            | DevotionContent::Fallback(block) => block.title.as_deref(),
            DevotionContent::Both { morning, night } => morning
                .as_ref()
                .and_then(|b| b.title.as_deref())
                .or_else(|| night.as_ref().and_then(|b| b.title.as_deref())),
            DevotionContent::Verses(entry) => entry.reference.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    #[serde(default, deserialize_with = "scalar_text")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub passage: Option<String>,
}

/// 手寫的清單常把年份寫成數字（"date": 2025），一律轉成文字保留
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        Some(serde_json::Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}
