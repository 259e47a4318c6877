use chrono::NaiveDate;
use clap::Parser;
use soulstart::app::render::render_text;
use soulstart::core::{ConfigProvider, Storage};
use soulstart::utils::logger;
use soulstart::{
    CachedStorage, CliConfig, DevotionResolver, LocalStorage, Mode, OutputFormat, SiteSettings,
    SoulStartError,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 設定檔會影響日誌格式，所以先讀
    let file_config = match cli.file_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let verbose = cli.verbose || file_config.as_ref().is_some_and(|c| c.verbose_logs());
    if cli.json_logs || file_config.as_ref().is_some_and(|c| c.json_logs()) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🌅 Starting soulstart");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = cli.settings(file_config).unwrap_or_else(|e| fail(e));
    let today = chrono::Local::now().date_naive();
    let date = cli.resolve_date(today).unwrap_or_else(|e| fail(e));
    let mode = cli.resolve_mode().unwrap_or_else(|e| fail(e));

    tracing::info!("📁 Devotions root: {}", settings.devotions_root());

    let storage = LocalStorage::new(&settings.devotions_root);
    let output = if settings.cache_documents {
        render(CachedStorage::new(storage), settings, date, cli.days, mode, cli.format).await
    } else {
        render(storage, settings, date, cli.days, mode, cli.format).await
    };

    match output {
        Ok(text) => println!("{}", text),
        Err(e) => fail(e),
    }

    Ok(())
}

async fn render<S: Storage>(
    storage: S,
    settings: SiteSettings,
    start: NaiveDate,
    days: u32,
    mode: Mode,
    format: OutputFormat,
) -> soulstart::Result<String> {
    let resolver = DevotionResolver::new(storage, settings);
    let resolutions = resolver.resolve_days(start, days, mode).await;
    let theme = resolver.config().site_theme();

    for (date, resolution) in &resolutions {
        match &resolution.miss {
            Some(miss) => {
                tracing::info!("🙏 Showing fallback devotion for {} ({}): {}", date, mode, miss)
            }
            None => tracing::info!("✅ Found {} devotion for {}", mode, date),
        }
    }

    match format {
        OutputFormat::Text => Ok(resolutions
            .iter()
            .map(|(date, resolution)| render_text(&resolution.content, *date, theme))
            .collect::<Vec<_>>()
            .join("\n\n")),
        OutputFormat::Json => {
            let mut payloads: Vec<serde_json::Value> = resolutions
                .into_iter()
                .map(|(date, resolution)| {
                    serde_json::json!({
                        "date": date,
                        "mode": mode,
                        "theme": theme,
                        "fallback": resolution.is_fallback(),
                        "content": resolution.content,
                    })
                })
                .collect();
            // 單日維持單一物件，多日輸出陣列
            let payload = if payloads.len() == 1 {
                payloads.remove(0)
            } else {
                serde_json::Value::Array(payloads)
            };
            Ok(serde_json::to_string_pretty(&payload)?)
        }
    }
}

fn fail(e: SoulStartError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
