use crate::config::SiteSettings;
use crate::utils::error::{Result, SoulStartError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub storage: StorageSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSection {
    pub theme: Option<String>,
    pub site_url: Option<String>,
    pub join_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub devotions_root: Option<String>,
    pub year_file_pattern: Option<String>,
    pub verses_file: Option<String>,
    pub studies_file: Option<String>,
    pub cache_documents: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SoulStartError::ConfigError {
                message: format!("Could not read config file '{}': {}", path.display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SoulStartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SITE_URL})；未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SoulStartError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用到預設值上，得到最終設定
    pub fn into_settings(self) -> SiteSettings {
        let defaults = SiteSettings::default();
        SiteSettings {
            theme: self.site.theme.unwrap_or(defaults.theme),
            site_url: self.site.site_url.unwrap_or(defaults.site_url),
            join_url: self.site.join_url.or(defaults.join_url),
            devotions_root: self.storage.devotions_root.unwrap_or(defaults.devotions_root),
            year_file_pattern: self
                .storage
                .year_file_pattern
                .unwrap_or(defaults.year_file_pattern),
            verses_file: self.storage.verses_file.unwrap_or(defaults.verses_file),
            studies_file: self.storage.studies_file.unwrap_or(defaults.studies_file),
            cache_documents: self
                .storage
                .cache_documents
                .unwrap_or(defaults.cache_documents),
        }
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn verbose_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_settings().validate()
    }
}
