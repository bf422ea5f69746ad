mod classify;
mod commands;
mod config;
mod error;
mod git;
mod kms;
mod project;
mod runner;

use clap::{Parser, Subcommand};
use config::Config;
use error::Result;
use git::GitClient;
use runner::SystemRunner;
use std::path::{self, Path, PathBuf};

#[derive(Parser)]
#[command(name = "secrets")]
#[command(version)]
#[command(about = "Seal and open project secret files with a cloud KMS", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Skip calls to the key-management service
    #[arg(long, global = true)]
    dry_run: bool,

    /// Log debug info
    #[arg(long, global = true)]
    verbose: bool,

    /// Project root folder (autodetected from the working directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Encryption key name (derived from the origin remote by default)
    #[arg(long, global = true)]
    key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt secret files and keep their plaintext out of git
    Seal {
        /// Specific files to seal; all plaintext secret files when empty
        files: Vec<PathBuf>,
    },

    /// Decrypt sealed files
    Open {
        /// Specific files to open; all sealed secret files when empty
        files: Vec<PathBuf>,

        /// Open every .enc file within the repository
        #[arg(long)]
        open_all: bool,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are ordinary exits; anything else is a
            // usage error.
            let is_usage_error = err.use_stderr();
            let _ = err.print();
            if is_usage_error {
                std::process::exit(1);
            }
            return;
        }
    };

    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "info,secrets=debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::new(cli.dry_run);
    let runner = SystemRunner;
    let git = GitClient::new(&runner);

    let project_root = match &cli.root {
        Some(root) => path::absolute(root)?,
        None => project::find_project_root(Path::new("."))?,
    };
    let key = match cli.key {
        Some(ref key) => key.clone(),
        None => project::resolve_key_name(&git, &config, &project_root),
    };

    tracing::debug!(
        dry_run = config.dry_run,
        key = %key,
        root = %project_root.display(),
        "resolved options"
    );

    match cli.command {
        Commands::Seal { files } => {
            let files = absolute_files(files)?;
            commands::seal(&config, &runner, &project_root, &key, files)
        }
        Commands::Open { files, open_all } => {
            let files = absolute_files(files)?;
            commands::open(&config, &runner, &project_root, &key, files, open_all)
        }
    }
}

fn absolute_files(files: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    files
        .into_iter()
        .map(|file| Ok(path::absolute(file)?))
        .collect()
}
