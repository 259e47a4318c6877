use clap::Parser;
use soulstart::app::render::render_studies;
use soulstart::utils::{logger, validation::Validate};
use soulstart::{LocalStorage, SiteConfig, StudyCatalog};

#[derive(Parser)]
#[command(name = "study-catalog")]
#[command(about = "List the published Bible studies, newest first")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Directory holding studies.json
    #[arg(long, env = "DEVOTIONS_ROOT")]
    devotions_root: Option<String>,

    /// Show a single study by slug
    #[arg(long)]
    slug: Option<String>,

    /// Print the catalogue as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let file_config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match SiteConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => SiteConfig::default(),
    };

    let mut settings = file_config.into_settings();
    if let Some(root) = args.devotions_root {
        settings.devotions_root = root;
    }

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let storage = LocalStorage::new(&settings.devotions_root);
    let catalog = StudyCatalog::new(storage, settings);

    if let Some(slug) = &args.slug {
        match catalog.find(slug).await {
            Some(study) if args.json => println!("{}", serde_json::to_string_pretty(&study)?),
            Some(study) => println!("{}", render_studies(std::slice::from_ref(&study))),
            None => {
                eprintln!("❌ Study not found: {}", slug);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let studies = catalog.load().await;
    tracing::info!("📚 {} studies in catalogue", studies.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&studies)?);
    } else {
        println!("{}", render_studies(&studies));
    }

    Ok(())
}
