use chrono::NaiveDate;

/// Full-date spellings seen in hand-edited content files, tried in order.
/// Ambiguous dashed dates read day-first, slashed dates month-first.
const DATE_FORMATS: [&str; 10] = [
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%m-%d-%Y",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// 解析 `12-25` 或 `12/25` 這類月日鍵，年份由呼叫端提供
pub fn parse_month_day(key: &str, year: i32) -> Option<NaiveDate> {
    let trimmed = key.trim();
    let (month, day) = trimmed
        .split_once('-')
        .or_else(|| trimmed.split_once('/'))?;
    if month.len() > 2 || day.len() > 2 {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
