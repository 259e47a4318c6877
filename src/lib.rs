pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use config::{cli::LocalStorage, toml_config::SiteConfig, SiteSettings};
pub use core::{
    cache::CachedStorage,
    lookup::LookupMiss,
    resolver::{DevotionResolver, Resolution},
    studies::StudyCatalog,
};
pub use domain::model::{DevotionBlock, DevotionContent, Mode, Study, VerseEntry, FALLBACK_DEVOTION};
pub use utils::error::{Result, SoulStartError};
