use tokio::io::AsyncRead;

use crate::{
    config::{Config, RunMode},
    errors::ThttpResult,
    server::FileServer,
    services::{FetchService, UploadService, Validate},
    utils::target::resolve_target,
};

/// Sequences one invocation: serve, then fetch, then upload
pub struct Runner {
    config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(self) -> ThttpResult<()> {
        self.run_with_input(tokio::io::stdin()).await
    }

    /// Run with `input` standing in for standard input during the upload
    pub async fn run_with_input<R>(self, input: R) -> ThttpResult<()>
    where
        R: AsyncRead + Unpin,
    {
        let config = &self.config;
        config.validate()?;

        let server = match &config.serve_directory {
            Some(dir) => Some(FileServer::start(dir, &config.serve_port).await?),
            None => None,
        };

        // Bare targets go to our own server when it is up, which matters when
        // the port was picked by the OS.
        let local_port = match &server {
            Some(server) => server.local_addr().port().to_string(),
            None => config.serve_port.clone(),
        };

        match (config.run_mode(), server) {
            (RunMode::ServeOnly, Some(server)) => return server.wait().await,
            // Dropping the handle leaves the server running in the background
            (_, _server) => {}
        }

        if !config.get_targets.is_empty() {
            let fetcher = FetchService::new(config.to_stdout, config.verbose)?
                .with_download_dir(&config.download_dir);

            for target in &config.get_targets {
                let url = resolve_target(target, &local_port)?;
                fetcher.fetch(&url).await?;
            }
        }

        if let Some(put_target) = &config.put_target {
            UploadService::new()?.upload(put_target, input).await?;
        }

        Ok(())
    }
}

/// Run `config` against the real standard input and working directory
pub async fn run(config: Config) -> ThttpResult<()> {
    Runner::new(config).run().await
}
