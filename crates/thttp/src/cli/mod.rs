use std::path::{Path, PathBuf};

use clap::{ArgAction, CommandFactory, Parser, error::ErrorKind};

use crate::config::{Config, DEFAULT_PORT};
use crate::errors::{ThttpError, ThttpResult};

/// Trivial HTTP
///
/// Fetch files over HTTP, serve a local directory, and PUT standard input to
/// a remote URL, in any combination.
///
/// ## Served directory
/// - `GET` returns files from the directory
/// - `PUT` replaces a file with the request body
/// - `APPEND` appends the request body to a file, creating it if needed
///
/// Bare fetch targets such as `notes.txt` are fetched from
/// `http://localhost:<port>/notes.txt`, so `--serve` and fetching can be
/// combined in one invocation.
///
/// ## Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
#[derive(Parser, Debug, Clone)]
#[command(name = "thttp")]
#[command(about = "Fetch files over HTTP, serve a directory, or PUT standard input")]
#[command(version)]
pub struct Cli {
    /// Log each fetch to standard error
    #[arg(long)]
    pub verbose: bool,

    /// Send fetched content to standard output; `--stdout=false` saves files instead
    #[arg(
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub stdout: bool,

    /// Directory to serve files from
    #[arg(long, value_name = "DIR")]
    pub serve: Option<PathBuf>,

    /// TCP port for the file server
    #[arg(long, value_name = "PORT", default_value = DEFAULT_PORT)]
    pub port: String,

    /// Directory to save fetched files in when not writing to stdout
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// URL to PUT standard input to
    #[arg(long, value_name = "URL")]
    pub put: Option<String>,

    /// URLs or local-server paths to fetch, in order
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
}

impl Cli {
    /// Parse CLI arguments and convert to configuration.
    ///
    /// Exits with a usage message when no operation was requested.
    pub async fn parse_config() -> ThttpResult<Config> {
        let cli = Self::parse();
        if !cli.has_operation() {
            Self::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "nothing to do: give TARGETs to fetch, --serve <DIR> or --put <URL>",
                )
                .exit();
        }
        cli.into_config().await
    }

    fn has_operation(&self) -> bool {
        self.serve.is_some() || self.put.is_some() || !self.targets.is_empty()
    }

    pub async fn into_config(self) -> ThttpResult<Config> {
        if let Some(dir) = &self.serve {
            validate_serve_directory(dir).await?;
        }

        Ok(Config {
            serve_directory: self.serve,
            serve_port: self.port,
            get_targets: self.targets,
            put_target: self.put,
            verbose: self.verbose,
            to_stdout: self.stdout,
            download_dir: self.output_dir,
        })
    }
}

async fn validate_serve_directory(dir: &Path) -> ThttpResult<()> {
    match tokio::fs::metadata(dir).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ThttpError::configuration(format!(
            "not a directory: {}",
            dir.display()
        ))),
        Err(e) => Err(ThttpError::configuration(format!(
            "cannot serve {}: {}",
            dir.display(),
            e
        ))),
    }
}
