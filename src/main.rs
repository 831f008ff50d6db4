use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drive_mirror::cli::Cli;
use drive_mirror::config::{self, LoggingConfig};
use drive_mirror::drive::DefaultDriveClient;
use drive_mirror::exclude::ExclusionRules;
use drive_mirror::mirror;

fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<(WorkerGuard, WorkerGuard)> {
    // Logging (stdout + tägliche Datei-Rotation unter logging.dir)
    std::fs::create_dir_all(&cfg.dir)?;
    let (stdout_nb, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let file_appender = tracing_appender::rolling::daily(&cfg.dir, &cfg.file_name);
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cfg.filter.as_str().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stdout_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    Ok((stdout_guard, file_guard))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration (embedded defaults -> drive-mirror.toml -> --config -> env/.env)
    let app_cfg = config::load_with(cli.config.as_deref())?;

    // Guards am Leben halten, damit Non-Blocking Writer korrekt flushen
    let _log_guards = init_logging(&app_cfg.logging)?;

    let settings = cli.resolve(&app_cfg)?;
    let dir_rules = ExclusionRules::new(settings.ignore_dirs.iter().cloned());
    let file_rules = ExclusionRules::new(settings.ignore_files.iter().cloned());

    let client = DefaultDriveClient::new(&app_cfg.drive, &settings.access_token)?;

    info!(
        root = %settings.root_folder,
        dest = %settings.dest.display(),
        dir_rules = dir_rules.len(),
        file_rules = file_rules.len(),
        "Mirroring drive"
    );
    let report = mirror::mirror(
        &client,
        &settings.root_folder,
        &settings.dest,
        &dir_rules,
        &file_rules,
    )
    .await?;

    info!(
        folders = report.folders_created,
        downloaded = report.files_downloaded,
        bytes = report.bytes_downloaded,
        existing = report.files_existing,
        folders_excluded = report.folders_excluded,
        files_excluded = report.files_excluded,
        failed = report.files_failed,
        unsafe_names = report.unsafe_names,
        "Mirror finished"
    );
    Ok(())
}
