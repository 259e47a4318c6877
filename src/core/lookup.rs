use crate::core::dates::{parse_date, parse_month_day};
use crate::domain::model::Mode;
use crate::domain::ports::Storage;
use crate::utils::error::SoulStartError;
use chrono::{Datelike, NaiveDate};
use serde_json::{Map, Value};
use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Fields a record may carry its own date in.
const DATE_FIELDS: [&str; 5] = ["date", "day", "Day", "DATE", "Date"];

/// 讀取文件的結果：找到、不存在、或無法解析
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentLookup {
    Found(Value),
    NotFound,
    ParseError(String),
}

/// Why the resolver fell back. Never surfaced to callers as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupMiss {
    #[error("document {path} does not exist")]
    DocumentMissing { path: String },

    #[error("document {path} could not be read: {reason}")]
    DocumentUnreadable { path: String, reason: String },

    #[error("no entry for {date}")]
    EntryMissing { date: NaiveDate },

    #[error("entry for {date} has no {mode} content")]
    ModeBlockMissing { date: NaiveDate, mode: Mode },
}

pub async fn load_document<S: Storage>(storage: &S, path: &str) -> DocumentLookup {
    let bytes = match storage.read_file(path).await {
        Ok(bytes) => bytes,
        Err(SoulStartError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return DocumentLookup::NotFound
        }
        Err(e) => return DocumentLookup::ParseError(e.to_string()),
    };

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes.as_slice());
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => DocumentLookup::Found(value),
        Err(e) => DocumentLookup::ParseError(e.to_string()),
    }
}

/// 在文件中找出指定日期的紀錄
///
/// Accepts an object keyed by month-day (`12-25`) or by a full date, an
/// object whose values carry their own `date`, or an array of dated records.
/// Full dates only match when the year matches too.
pub fn find_entry(document: &Value, date: NaiveDate) -> Option<&Map<String, Value>> {
    match document {
        Value::Object(entries) => entries.iter().find_map(|(key, value)| {
            let record = value.as_object()?;
            let key_date = parse_month_day(key, date.year())
                .or_else(|| parse_date(key))
                .or_else(|| record_date(record));
            (key_date == Some(date)).then_some(record)
        }),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .find(|record| record_date(record) == Some(date)),
        _ => None,
    }
}

fn record_date(record: &Map<String, Value>) -> Option<NaiveDate> {
    DATE_FIELDS
        .iter()
        .filter_map(|field| record.get(*field).and_then(Value::as_str))
        .find_map(parse_date)
}
