use std::path::PathBuf;

use crate::{
    errors::{ThttpError, ThttpResult},
    services::Validate,
};

pub const DEFAULT_PORT: &str = "9090";

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory exposed over HTTP; enables the server when set
    pub serve_directory: Option<PathBuf>,
    pub serve_port: String,
    /// Fetched strictly in this order
    pub get_targets: Vec<String>,
    /// URL receiving a PUT of standard input
    pub put_target: Option<String>,
    pub verbose: bool,
    /// Write fetched content to stdout instead of a local file
    pub to_stdout: bool,
    /// Where fetched files land when not writing to stdout
    pub download_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serve_directory: None,
            serve_port: DEFAULT_PORT.to_string(),
            get_targets: Vec::new(),
            put_target: None,
            verbose: false,
            to_stdout: true,
            download_dir: PathBuf::from("."),
        }
    }
}

/// How a run treats the background file server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Serve until the process is terminated; nothing is fetched or uploaded
    ServeOnly,
    /// Start the server, then fetch and upload without waiting on it
    ServeAndFetch,
    /// No server; fetch and upload only
    ClientOnly,
}

impl Config {
    /// Serving with no get targets blocks on the server, even when a put
    /// target is set.
    pub fn run_mode(&self) -> RunMode {
        match (&self.serve_directory, self.get_targets.is_empty()) {
            (Some(_), true) => RunMode::ServeOnly,
            (Some(_), false) => RunMode::ServeAndFetch,
            (None, _) => RunMode::ClientOnly,
        }
    }

    fn has_transfers(&self) -> bool {
        !self.get_targets.is_empty() || self.put_target.is_some()
    }
}

impl Validate for Config {
    fn validate(&self) -> ThttpResult<()> {
        if self.serve_directory.is_none() && !self.has_transfers() {
            return Err(ThttpError::configuration(
                "no files to fetch, no directory to serve and nothing to put",
            ));
        }

        if self.serve_directory.is_some() && self.serve_port.is_empty() {
            return Err(ThttpError::configuration("server port must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_rejected() {
        let result = Config::default().validate();
        assert!(matches!(result, Err(ThttpError::Configuration { .. })));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.serve_port, "9090");
        assert!(config.to_stdout);
        assert!(!config.verbose);
    }

    #[test]
    fn test_run_mode() {
        let serve_only = Config {
            serve_directory: Some(PathBuf::from(".")),
            ..Config::default()
        };
        assert_eq!(serve_only.run_mode(), RunMode::ServeOnly);
        assert!(serve_only.validate().is_ok());

        let serve_and_fetch = Config {
            get_targets: vec!["a.txt".to_string()],
            ..serve_only.clone()
        };
        assert_eq!(serve_and_fetch.run_mode(), RunMode::ServeAndFetch);

        let serve_and_put = Config {
            put_target: Some("http://localhost:9090/up".to_string()),
            ..serve_only
        };
        assert_eq!(serve_and_put.run_mode(), RunMode::ServeOnly);

        let serve_fetch_and_put = Config {
            get_targets: vec!["a.txt".to_string()],
            ..serve_and_put.clone()
        };
        assert_eq!(serve_fetch_and_put.run_mode(), RunMode::ServeAndFetch);

        let client = Config {
            put_target: Some("http://example.com/up".to_string()),
            ..Config::default()
        };
        assert_eq!(client.run_mode(), RunMode::ClientOnly);
        assert!(client.validate().is_ok());
    }

    #[test]
    fn test_empty_port_is_rejected_when_serving() {
        let config = Config {
            serve_directory: Some(PathBuf::from(".")),
            serve_port: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
