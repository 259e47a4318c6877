use chrono::NaiveDate;
use serde_json::json;
use soulstart::{
    CachedStorage, DevotionContent, DevotionResolver, LocalStorage, LookupMiss, Mode,
    SiteSettings, FALLBACK_DEVOTION,
};
use tempfile::TempDir;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_json(dir: &TempDir, name: &str, value: serde_json::Value) {
    std::fs::write(
        dir.path().join(name),
        serde_json::to_string_pretty(&value).unwrap(),
    )
    .unwrap();
}

fn resolver_for(dir: &TempDir) -> DevotionResolver<LocalStorage, SiteSettings> {
    let settings = SiteSettings {
        devotions_root: dir.path().to_string_lossy().to_string(),
        ..SiteSettings::default()
    };
    DevotionResolver::new(LocalStorage::new(dir.path()), settings)
}

fn christmas_document() -> serde_json::Value {
    json!({
        "12-24": {
            "theme": "Waiting",
            "morning": {"title": "Hope", "verse_ref": "Isaiah 9:2"},
            "night": {"title": "Silent Night", "verse_ref": "Luke 2:19", "prayer": "Quiet my heart."}
        },
        "12-25": {
            "morning": {"title": "Joy", "verse_ref": "Luke 2:10", "verse_text": "I bring you good news of great joy."}
        }
    })
}

#[tokio::test]
async fn test_every_mode_always_yields_a_payload() {
    let temp_dir = TempDir::new().unwrap();
    write_json(&temp_dir, "devotions_2025.json", christmas_document());
    let resolver = resolver_for(&temp_dir);

    for date in [ymd(2025, 12, 24), ymd(2025, 12, 25), ymd(2025, 12, 26), ymd(2019, 1, 1)] {
        for mode in Mode::ALL {
            let content = resolver.resolve(date, mode).await;
            assert!(!content.is_empty(), "empty payload for {} {}", date, mode);
        }
    }
}

#[tokio::test]
async fn test_absent_year_document_returns_exact_fallback() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = resolver_for(&temp_dir);

    for mode in Mode::ALL {
        let content = resolver.resolve(ymd(2030, 7, 4), mode).await;
        assert_eq!(content, DevotionContent::Fallback(FALLBACK_DEVOTION.to_block()));
    }
}

#[tokio::test]
async fn test_both_returns_both_blocks_unmodified() {
    let temp_dir = TempDir::new().unwrap();
    write_json(&temp_dir, "devotions_2025.json", christmas_document());
    let resolver = resolver_for(&temp_dir);

    match resolver.resolve(ymd(2025, 12, 24), Mode::Both).await {
        DevotionContent::Both { morning, night } => {
            let morning = morning.unwrap();
            let night = night.unwrap();
            assert_eq!(morning.title.as_deref(), Some("Hope"));
            assert_eq!(morning.verse_ref.as_deref(), Some("Isaiah 9:2"));
            assert_eq!(night.title.as_deref(), Some("Silent Night"));
            assert_eq!(night.prayer.as_deref(), Some("Quiet my heart."));
        }
        other => panic!("expected composite, got {:?}", other),
    }
}

#[tokio::test]
async fn test_christmas_scenario() {
    let temp_dir = TempDir::new().unwrap();
    write_json(&temp_dir, "devotions_2025.json", christmas_document());
    let resolver = resolver_for(&temp_dir);

    match resolver.resolve(ymd(2025, 12, 25), Mode::Morning).await {
        DevotionContent::Morning(block) => {
            assert_eq!(block.title.as_deref(), Some("Joy"));
            assert_eq!(
                block.verse_text.as_deref(),
                Some("I bring you good news of great joy.")
            );
        }
        other => panic!("expected morning content, got {:?}", other),
    }

    assert!(resolver.resolve(ymd(2025, 12, 25), Mode::Night).await.is_fallback());
    assert!(resolver.resolve(ymd(2025, 12, 26), Mode::Morning).await.is_fallback());
}

#[tokio::test]
async fn test_corrupt_year_document_falls_back_for_every_date() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("devotions_2025.json"),
        "{ \"12-25\": { \"morning\": { \"title\": \"Joy\" ",
    )
    .unwrap();
    let resolver = resolver_for(&temp_dir);

    for date in [ymd(2025, 1, 1), ymd(2025, 12, 25)] {
        let resolution = resolver.resolve_explained(date, Mode::Morning).await;
        assert_eq!(resolution.content, DevotionContent::fallback());
        assert!(matches!(
            resolution.miss,
            Some(LookupMiss::DocumentUnreadable { .. })
        ));
    }
}

#[tokio::test]
async fn test_invalid_encoding_is_unreadable() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("devotions_2025.json"),
        [b'{', b'"', 0xFF, 0xFE, b'"', b':', b'1', b'}'],
    )
    .unwrap();
    let resolver = resolver_for(&temp_dir);

    let resolution = resolver
        .resolve_explained(ymd(2025, 12, 25), Mode::Both)
        .await;
    assert!(resolution.is_fallback());
    assert!(matches!(
        resolution.miss,
        Some(LookupMiss::DocumentUnreadable { .. })
    ));
}

#[tokio::test]
async fn test_byte_order_mark_is_tolerated() {
    let temp_dir = TempDir::new().unwrap();
    let mut body = b"\xEF\xBB\xBF".to_vec();
    body.extend_from_slice(br#"{"12-25": {"morning": {"title": "Joy"}}}"#);
    std::fs::write(temp_dir.path().join("devotions_2025.json"), body).unwrap();
    let resolver = resolver_for(&temp_dir);

    let content = resolver.resolve(ymd(2025, 12, 25), Mode::Morning).await;
    assert_eq!(content.headline(), Some("Joy"));
}

#[tokio::test]
async fn test_migrated_array_document_with_legacy_fields() {
    let temp_dir = TempDir::new().unwrap();
    write_json(
        &temp_dir,
        "devotions_2025.json",
        json!([
            {
                "date": "2025-08-01",
                "theme": "Rooted",
                "morning": {
                    "title": "",
                    "verse_ref": "Colossians 2:7",
                    "encouragement_intro": "Today, remember:",
                    "point1": "You are planted",
                    "point2": "You are watered",
                    "point3": "",
                    "closing": "Grow where you are.",
                    "prayer": ""
                },
                "night": null
            },
            {
                "date": "2025-08-02",
                "theme": "",
                "morning": null,
                "night": {"Theme": "Rest", "scripture": "Psalm 4:8", "night_prayer": "Keep me."}
            }
        ]),
    );
    let resolver = resolver_for(&temp_dir);

    match resolver.resolve(ymd(2025, 8, 1), Mode::Morning).await {
        DevotionContent::Morning(block) => {
            assert_eq!(block.title.as_deref(), Some("Rooted"));
            assert_eq!(block.encouragement_intro.as_deref(), Some("Today, remember:"));
            assert_eq!(block.points.len(), 2);
            assert_eq!(block.prayer, None);
        }
        other => panic!("expected morning content, got {:?}", other),
    }
    assert!(resolver.resolve(ymd(2025, 8, 1), Mode::Night).await.is_fallback());

    match resolver.resolve(ymd(2025, 8, 2), Mode::Night).await {
        DevotionContent::Night(block) => {
            assert_eq!(block.title.as_deref(), Some("Rest"));
            assert_eq!(block.verse_ref.as_deref(), Some("Psalm 4:8"));
            assert_eq!(block.prayer.as_deref(), Some("Keep me."));
        }
        other => panic!("expected night content, got {:?}", other),
    }
}

#[tokio::test]
async fn test_year_selects_document() {
    let temp_dir = TempDir::new().unwrap();
    write_json(
        &temp_dir,
        "devotions_2025.json",
        json!({"01-01": {"morning": {"title": "New Mercies 2025"}}}),
    );
    write_json(
        &temp_dir,
        "devotions_2026.json",
        json!({"01-01": {"morning": {"title": "New Mercies 2026"}}}),
    );
    let resolver = resolver_for(&temp_dir);

    assert_eq!(
        resolver.resolve(ymd(2025, 1, 1), Mode::Morning).await.headline(),
        Some("New Mercies 2025")
    );
    assert_eq!(
        resolver.resolve(ymd(2026, 1, 1), Mode::Morning).await.headline(),
        Some("New Mercies 2026")
    );
}

#[tokio::test]
async fn test_cached_storage_resolves_the_same_content() {
    let temp_dir = TempDir::new().unwrap();
    write_json(&temp_dir, "devotions_2025.json", christmas_document());
    let settings = SiteSettings::default();
    let resolver = DevotionResolver::new(
        CachedStorage::new(LocalStorage::new(temp_dir.path())),
        settings,
    );

    let first = resolver.resolve(ymd(2025, 12, 24), Mode::Both).await;

    // the cache keeps serving the original document after the file goes away
    std::fs::remove_file(temp_dir.path().join("devotions_2025.json")).unwrap();
    let second = resolver.resolve(ymd(2025, 12, 24), Mode::Both).await;
    assert_eq!(first, second);
    assert!(!second.is_fallback());

    resolver.storage().clear().await;
    assert!(resolver.resolve(ymd(2025, 12, 24), Mode::Both).await.is_fallback());
}

#[tokio::test]
async fn test_week_preview_reads_each_document_once() {
    let temp_dir = TempDir::new().unwrap();
    write_json(&temp_dir, "devotions_2025.json", christmas_document());
    let resolver = DevotionResolver::new(
        CachedStorage::new(LocalStorage::new(temp_dir.path())),
        SiteSettings::default(),
    );

    let week = resolver.resolve_days(ymd(2025, 12, 24), 3, Mode::Morning).await;
    let dates: Vec<NaiveDate> = week.iter().map(|(date, _)| *date).collect();
    assert_eq!(dates, vec![ymd(2025, 12, 24), ymd(2025, 12, 25), ymd(2025, 12, 26)]);
    assert_eq!(week[0].1.content.headline(), Some("Hope"));
    assert_eq!(week[1].1.content.headline(), Some("Joy"));
    assert_eq!(
        week[2].1.miss,
        Some(LookupMiss::EntryMissing {
            date: ymd(2025, 12, 26)
        })
    );
    assert_eq!(resolver.storage().cached_paths().await, 1);

    // crossing into January needs the next year's document; it is absent, so nothing more is cached
    let turn = resolver.resolve_days(ymd(2025, 12, 31), 2, Mode::Morning).await;
    assert!(matches!(
        turn[1].1.miss,
        Some(LookupMiss::DocumentMissing { .. })
    ));
    assert_eq!(resolver.storage().cached_paths().await, 1);
}

#[tokio::test]
async fn test_verses_document_with_texts_and_cards() {
    let temp_dir = TempDir::new().unwrap();
    write_json(
        &temp_dir,
        "verses.json",
        json!({
            "theme": "Light",
            "texts": [{"date": "2025-12-25", "ref": "John 1:5", "line": "The light shines in the darkness."}],
            "cards": [{"date": "2025-12-25", "file": "john1-5.jpg", "caption": "Light wins"}]
        }),
    );

    let resolution = resolver_for(&temp_dir)
        .resolve_explained(ymd(2025, 12, 25), Mode::Verses)
        .await;
    assert!(!resolution.is_fallback());
    match resolution.content {
        DevotionContent::Verses(entry) => {
            assert_eq!(entry.reference.as_deref(), Some("John 1:5"));
            assert_eq!(entry.file.as_deref(), Some("john1-5.jpg"));
            assert_eq!(entry.theme.as_deref(), Some("Light"));
        }
        other => panic!("expected verses, got {:?}", other),
    }
}

#[tokio::test]
async fn test_custom_file_names() {
    let temp_dir = TempDir::new().unwrap();
    write_json(
        &temp_dir,
        "year-2025.json",
        json!({"12-25": {"night": {"title": "Peace"}}}),
    );
    write_json(
        &temp_dir,
        "scripture_cards.json",
        json!([{"date": "2025-12-25", "ref": "Luke 2:14", "text": "Peace on earth."}]),
    );
    let settings = SiteSettings {
        year_file_pattern: "year-{year}.json".to_string(),
        verses_file: "scripture_cards.json".to_string(),
        ..SiteSettings::default()
    };
    let resolver = DevotionResolver::new(LocalStorage::new(temp_dir.path()), settings);

    assert_eq!(
        resolver.resolve(ymd(2025, 12, 25), Mode::Night).await.headline(),
        Some("Peace")
    );
    assert_eq!(
        resolver.resolve(ymd(2025, 12, 25), Mode::Verses).await.headline(),
        Some("Luke 2:14")
    );
}
