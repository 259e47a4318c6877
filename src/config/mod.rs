pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_placeholder, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SITE_THEME: &str = "Faith to Rise, Grace to Rest";
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// 網站設定；啟動時決定一次，之後以參數傳遞
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub theme: String,
    pub site_url: String,
    pub join_url: Option<String>,
    pub devotions_root: String,
    pub year_file_pattern: String,
    pub verses_file: String,
    pub studies_file: String,
    pub cache_documents: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_SITE_THEME.to_string(),
            site_url: "http://127.0.0.1:5000".to_string(),
            join_url: None,
            devotions_root: "./devotions".to_string(),
            year_file_pattern: "devotions_{year}.json".to_string(),
            verses_file: "verses.json".to_string(),
            studies_file: "studies.json".to_string(),
            cache_documents: true,
        }
    }
}

impl Validate for SiteSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("site.theme", &self.theme)?;
        validate_url("site.site_url", &self.site_url)?;
        if let Some(join_url) = &self.join_url {
            validate_url("site.join_url", join_url)?;
        }
        validate_path("storage.devotions_root", &self.devotions_root)?;
        validate_placeholder(
            "storage.year_file_pattern",
            &self.year_file_pattern,
            YEAR_PLACEHOLDER,
        )?;
        validate_path("storage.verses_file", &self.verses_file)?;
        validate_path("storage.studies_file", &self.studies_file)?;
        Ok(())
    }
}

impl ConfigProvider for SiteSettings {
    fn site_theme(&self) -> &str {
        &self.theme
    }

    fn devotions_root(&self) -> &str {
        &self.devotions_root
    }

    fn year_document_path(&self, year: i32) -> String {
        self.year_file_pattern
            .replace(YEAR_PLACEHOLDER, &year.to_string())
    }

    fn verses_path(&self) -> &str {
        &self.verses_file
    }

    fn studies_path(&self) -> &str {
        &self.studies_file
    }
}

#[cfg(feature = "cli")]
pub use cli_args::{CliConfig, OutputFormat};

#[cfg(feature = "cli")]
mod cli_args {
    use super::SiteSettings;
    use crate::config::toml_config::SiteConfig;
    use crate::core::dates::parse_date;
    use crate::domain::model::Mode;
    use crate::utils::error::{Result, SoulStartError};
    use crate::utils::validation::Validate;
    use chrono::NaiveDate;
    use clap::{Parser, ValueEnum};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
    #[serde(rename_all = "lowercase")]
    pub enum OutputFormat {
        Text,
        Json,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "soulstart")]
    #[command(about = "Look up the SoulStart devotion for a day")]
    pub struct CliConfig {
        /// Date to look up, e.g. 2025-12-25 or "Dec 25, 2025" (default: today)
        #[arg(long)]
        pub date: Option<String>,

        /// morning, night, both or verses
        #[arg(long, default_value = "both")]
        pub mode: String,

        /// Number of consecutive days to show, starting at --date
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=366))]
        pub days: u32,

        /// Directory holding devotions_<YEAR>.json, verses.json and studies.json
        #[arg(long, env = "DEVOTIONS_ROOT")]
        pub devotions_root: Option<String>,

        /// Optional TOML settings file
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(long, env = "SITE_THEME")]
        pub site_theme: Option<String>,

        #[arg(long, value_enum, default_value = "text")]
        pub format: OutputFormat,

        /// Read every document straight from disk
        #[arg(long)]
        pub no_cache: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        pub fn file_config(&self) -> Result<Option<SiteConfig>> {
            self.config
                .as_deref()
                .map(SiteConfig::from_file)
                .transpose()
        }

        /// 合併設定檔與命令列參數；命令列優先
        pub fn settings(&self, file_config: Option<SiteConfig>) -> Result<SiteSettings> {
            let mut settings = file_config.map(SiteConfig::into_settings).unwrap_or_default();

            if let Some(root) = &self.devotions_root {
                settings.devotions_root = root.clone();
            }
            if let Some(theme) = &self.site_theme {
                settings.theme = theme.clone();
            }
            if self.no_cache {
                settings.cache_documents = false;
            }

            settings.validate()?;
            Ok(settings)
        }

        pub fn resolve_date(&self, today: NaiveDate) -> Result<NaiveDate> {
            match self.date.as_deref() {
                None => Ok(today),
                Some(raw) => parse_date(raw).ok_or_else(|| SoulStartError::ValidationError {
                    message: format!("Could not understand the date '{}'", raw),
                }),
            }
        }

        pub fn resolve_mode(&self) -> Result<Mode> {
            self.mode.parse()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::ports::ConfigProvider;

        fn parse(args: &[&str]) -> CliConfig {
            CliConfig::try_parse_from(std::iter::once("soulstart").chain(args.iter().copied()))
                .unwrap()
        }

        #[test]
        fn test_defaults() {
            let cli = parse(&["--devotions-root", "/srv/devotions"]);
            assert_eq!(cli.resolve_mode().unwrap(), Mode::Both);
            assert_eq!(cli.format, OutputFormat::Text);
            assert_eq!(cli.days, 1);

            let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
            assert_eq!(cli.resolve_date(today).unwrap(), today);

            let settings = cli.settings(None).unwrap();
            assert_eq!(settings.devotions_root(), "/srv/devotions");
            assert!(settings.cache_documents);
        }

        #[test]
        fn test_command_line_overrides_file() {
            let cli = parse(&[
                "--devotions-root",
                "/override",
                "--site-theme",
                "Grace to Rest",
                "--no-cache",
            ]);
            let file = SiteConfig::from_toml_str(
                "[site]\ntheme = \"From File\"\n[storage]\ndevotions_root = \"/from-file\"\n",
            )
            .unwrap();

            let settings = cli.settings(Some(file)).unwrap();
            assert_eq!(settings.devotions_root, "/override");
            assert_eq!(settings.theme, "Grace to Rest");
            assert!(!settings.cache_documents);
        }

        #[test]
        fn test_bad_date_and_mode_are_rejected() {
            let cli = parse(&["--date", "someday", "--mode", "noon"]);
            let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
            assert!(cli.resolve_date(today).is_err());
            assert!(cli.resolve_mode().is_err());
        }

        #[test]
        fn test_days_range() {
            assert_eq!(parse(&["--days", "7"]).days, 7);
            for bad in ["0", "367", "-1"] {
                let parsed = CliConfig::try_parse_from(["soulstart", "--days", bad]);
                assert!(parsed.is_err(), "--days {} should be rejected", bad);
            }
        }

        #[test]
        fn test_flexible_date_input() {
            let cli = parse(&["--date", "Dec 25, 2025", "--mode", "sunrise"]);
            let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
            assert_eq!(
                cli.resolve_date(today).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()
            );
            assert_eq!(cli.resolve_mode().unwrap(), Mode::Morning);
        }
    }
}
