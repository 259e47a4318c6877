use crate::core::lookup::{find_entry, load_document, DocumentLookup, LookupMiss};
use crate::core::normalize::{day_block, verse_entry};
use crate::domain::model::{DayPart, DevotionContent, Mode};
use crate::domain::ports::{ConfigProvider, Storage};
use chrono::{Datelike, NaiveDate};
use serde_json::Value;

/// Sections of the verses document that hold dated records, in merge order.
const VERSE_SECTIONS: [&str; 3] = ["days", "texts", "cards"];

/// The content for one request, plus the reason a fallback was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub content: DevotionContent,
    pub miss: Option<LookupMiss>,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        self.miss.is_some()
    }
}

/// 依日期與模式挑出當日靈修內容
///
/// Resolution is total: a missing or corrupt year document, a missing date
/// entry and a missing mode block all end in the fixed fallback devotion.
/// Nothing here returns an error to the caller.
pub struct DevotionResolver<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> DevotionResolver<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub async fn resolve(&self, date: NaiveDate, mode: Mode) -> DevotionContent {
        self.resolve_explained(date, mode).await.content
    }

    pub async fn resolve_explained(&self, date: NaiveDate, mode: Mode) -> Resolution {
        let found = match mode {
            Mode::Morning => self.lookup_day(date, mode, &[DayPart::Morning]).await,
            Mode::Night => self.lookup_day(date, mode, &[DayPart::Night]).await,
            Mode::Both => {
                self.lookup_day(date, mode, &[DayPart::Morning, DayPart::Night])
                    .await
            }
            Mode::Verses => self.lookup_verses(date).await,
        };

        match found {
            Ok(content) => {
                tracing::debug!(%date, %mode, headline = ?content.headline(), "Resolved devotion");
                Resolution {
                    content,
                    miss: None,
                }
            }
            Err(miss) => {
                match &miss {
                    LookupMiss::DocumentUnreadable { .. } => {
                        tracing::warn!(%date, %mode, "Using fallback devotion: {}", miss)
                    }
                    _ => tracing::debug!(%date, %mode, "Using fallback devotion: {}", miss),
                }
                Resolution {
                    content: DevotionContent::fallback(),
                    miss: Some(miss),
                }
            }
        }
    }

    /// 連續多天的內容，從 `start` 開始；同一年的日子共用同一份年度檔
    pub async fn resolve_days(
        &self,
        start: NaiveDate,
        days: u32,
        mode: Mode,
    ) -> Vec<(NaiveDate, Resolution)> {
        let mut resolutions = Vec::with_capacity(days as usize);
        for date in start.iter_days().take(days as usize) {
            resolutions.push((date, self.resolve_explained(date, mode).await));
        }
        resolutions
    }

    async fn load(&self, path: String) -> Result<Value, LookupMiss> {
        match load_document(&self.storage, &path).await {
            DocumentLookup::Found(document) => Ok(document),
            DocumentLookup::NotFound => Err(LookupMiss::DocumentMissing { path }),
            DocumentLookup::ParseError(reason) => {
                Err(LookupMiss::DocumentUnreadable { path, reason })
            }
        }
    }

    async fn lookup_day(
        &self,
        date: NaiveDate,
        mode: Mode,
        parts: &[DayPart],
    ) -> Result<DevotionContent, LookupMiss> {
        let document = self
            .load(self.config.year_document_path(date.year()))
            .await?;
        let day = find_entry(&document, date).ok_or(LookupMiss::EntryMissing { date })?;

        let morning = parts
            .contains(&DayPart::Morning)
            .then(|| day_block(day, DayPart::Morning))
            .flatten();
        let night = parts
            .contains(&DayPart::Night)
            .then(|| day_block(day, DayPart::Night))
            .flatten();

        // "both" keeps whichever half exists; it only falls back when neither does
        match (mode, morning, night) {
            (Mode::Morning, Some(block), _) => Ok(DevotionContent::Morning(block)),
            (Mode::Night, _, Some(block)) => Ok(DevotionContent::Night(block)),
            (Mode::Both, morning, night) if morning.is_some() || night.is_some() => {
                Ok(DevotionContent::Both { morning, night })
            }
            _ => Err(LookupMiss::ModeBlockMissing { date, mode }),
        }
    }

    async fn lookup_verses(&self, date: NaiveDate) -> Result<DevotionContent, LookupMiss> {
        let document = self.load(self.config.verses_path().to_string()).await?;
        let theme = document
            .get("theme")
            .and_then(Value::as_str)
            .unwrap_or_else(|| self.config.site_theme());

        // 經文可放在 days、texts 或 cards 之下；都沒有時整份文件即為日期表
        let sections: Vec<&Value> = VERSE_SECTIONS
            .iter()
            .filter_map(|key| document.get(*key))
            .collect();
        let records: Vec<_> = if sections.is_empty() {
            find_entry(&document, date).into_iter().collect()
        } else {
            sections
                .into_iter()
                .filter_map(|section| find_entry(section, date))
                .collect()
        };
        if records.is_empty() {
            return Err(LookupMiss::EntryMissing { date });
        }

        verse_entry(&records, Some(theme))
            .map(DevotionContent::Verses)
            .ok_or(LookupMiss::ModeBlockMissing {
                date,
                mode: Mode::Verses,
            })
    }
}
