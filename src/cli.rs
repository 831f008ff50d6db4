//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::error::{validation, AppResult};

/// Mirror a Google Drive folder tree to a local directory.
#[derive(Debug, Parser)]
#[command(name = "drive-mirror", version, about)]
pub struct Cli {
    /// Directory to save files to.
    #[arg(long)]
    pub dest: String,

    /// Directory name or glob pattern to skip (repeatable).
    #[arg(long = "ignore-dir", alias = "ignore_dir", value_name = "PATTERN")]
    pub ignore_dir: Vec<String>,

    /// File name or glob pattern to skip (repeatable).
    #[arg(long = "ignore-file", alias = "ignore_file", value_name = "PATTERN")]
    pub ignore_file: Vec<String>,

    /// Remote folder id to mirror [default: from config, usually "root"].
    #[arg(long, value_name = "FOLDER_ID")]
    pub root: Option<String>,

    /// OAuth access token for the Drive API.
    #[arg(long, env = "DRIVE_MIRROR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Additional configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,
}

/// Everything a run needs, after CLI flags were merged over configuration.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub dest: PathBuf,
    pub root_folder: String,
    pub access_token: String,
    pub ignore_dirs: Vec<String>,
    pub ignore_files: Vec<String>,
}

impl Cli {
    /// Merges flags over `cfg`. Ignore patterns from the command line are
    /// appended after the configured ones.
    pub fn resolve(self, cfg: &AppConfig) -> AppResult<RunSettings> {
        validation::validate_path(&self.dest)?;

        let root_folder = self.root.unwrap_or_else(|| cfg.mirror.root_folder.clone());
        let root_folder = validation::require_non_blank(Some(&root_folder), "root")?;

        let token = self.token.or_else(|| cfg.drive.access_token.clone());
        let access_token = validation::require_non_blank(token.as_deref(), "access_token")?;

        let mut ignore_dirs = cfg.mirror.ignore_dirs.clone();
        ignore_dirs.extend(self.ignore_dir);
        let mut ignore_files = cfg.mirror.ignore_files.clone();
        ignore_files.extend(self.ignore_file);

        Ok(RunSettings {
            dest: PathBuf::from(self.dest),
            root_folder,
            access_token,
            ignore_dirs,
            ignore_files,
        })
    }
}
