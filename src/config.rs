use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DriveConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub page_size: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MirrorConfig {
    pub root_folder: String,
    #[serde(default)]
    pub ignore_dirs: Vec<String>,
    #[serde(default)]
    pub ignore_files: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub dir: String,
    pub file_name: String,
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub drive: DriveConfig,
    pub mirror: MirrorConfig,
    pub logging: LoggingConfig,
}

const DEFAULTS: &str = include_str!("../config/default.toml");

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        match ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => panic!("Failed to deserialize default config: {}", e),
            },
            Err(e) => panic!("Failed to parse default config: {}", e),
        }
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    load_with(None)
}

/// Loads configuration: embedded defaults, then `drive-mirror.toml` in the
/// working directory, then `DRIVE_MIRROR_CONFIG`, then `extra`, then
/// `DRIVE_MIRROR__*` environment variables.
pub fn load_with(extra: Option<&str>) -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        .add_source(::config::File::with_name("drive-mirror").required(false));

    if let Ok(custom_path) = std::env::var("DRIVE_MIRROR_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    if let Some(path) = extra {
        // Explicitly requested on the command line, so it has to exist
        builder = builder.add_source(::config::File::with_name(path).required(true));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("DRIVE_MIRROR").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    // Drive
    let base = url::Url::parse(&cfg.drive.base_url)
        .map_err(|e| anyhow::anyhow!("invalid drive.base_url {}: {}", cfg.drive.base_url, e))?;
    if base.scheme() != "https" && base.scheme() != "http" {
        return Err(anyhow::anyhow!("drive.base_url must be http(s): {}", cfg.drive.base_url));
    }
    if cfg.drive.page_size == 0 || cfg.drive.page_size > 1000 {
        return Err(anyhow::anyhow!("drive.page_size must be in 1..=1000"));
    }
    if cfg.drive.timeout_secs == 0 {
        return Err(anyhow::anyhow!("drive.timeout_secs must be > 0"));
    }

    // Mirror
    if cfg.mirror.root_folder.trim().is_empty() {
        return Err(anyhow::anyhow!("mirror.root_folder must not be empty"));
    }

    // Logging
    if cfg.logging.file_name.trim().is_empty() {
        return Err(anyhow::anyhow!("logging.file_name must not be empty"));
    }

    Ok(())
}
