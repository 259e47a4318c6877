use crate::core::dates::parse_date;
use crate::core::lookup::{load_document, DocumentLookup};
use crate::domain::model::Study;
use crate::domain::ports::{ConfigProvider, Storage};
use serde_json::Value;
use std::cmp::Reverse;

pub struct StudyCatalog<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> StudyCatalog<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// 讀取讀經清單，新的在前；檔案缺漏或損毀時回傳空清單
    pub async fn load(&self) -> Vec<Study> {
        let path = self.config.studies_path();
        let items = match load_document(&self.storage, path).await {
            DocumentLookup::Found(Value::Array(items)) => items,
            DocumentLookup::Found(_) => {
                tracing::warn!("Study catalogue {} is not a list, ignoring it", path);
                return Vec::new();
            }
            DocumentLookup::NotFound => {
                tracing::debug!("No study catalogue at {}", path);
                return Vec::new();
            }
            DocumentLookup::ParseError(reason) => {
                tracing::warn!("Study catalogue {} could not be read: {}", path, reason);
                return Vec::new();
            }
        };

        let mut studies: Vec<Study> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Study>(item) {
                Ok(study) => Some(study),
                Err(e) => {
                    tracing::debug!("Skipping study entry in {}: {}", path, e);
                    None
                }
            })
            .filter(|study| {
                let titled = study.title.as_deref().is_some_and(|t| !t.trim().is_empty());
                if !titled {
                    tracing::debug!("Skipping untitled study {:?} in {}", study.slug, path);
                }
                titled
            })
            .collect();

        studies.sort_by_key(|study| Reverse(study.date.as_deref().and_then(parse_date)));
        studies
    }

    pub async fn find(&self, slug: &str) -> Option<Study> {
        self.load()
            .await
            .into_iter()
            .find(|study| study.slug.as_deref() == Some(slug))
    }
}
