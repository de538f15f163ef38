use std::path::PathBuf;

use reqwest::{Client, Response, StatusCode};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use url::Url;

use crate::{
    errors::{ThttpError, ThttpResult},
    utils::{build_client, target::file_name_for},
};

/// Downloads resources with plain HTTP GETs
#[derive(Clone)]
pub struct FetchService {
    client: Client,
    to_stdout: bool,
    verbose: bool,
    download_dir: PathBuf,
}

impl FetchService {
    pub fn new(to_stdout: bool, verbose: bool) -> ThttpResult<Self> {
        Ok(Self {
            client: build_client()?,
            to_stdout,
            verbose,
            download_dir: PathBuf::from("."),
        })
    }

    /// Directory receiving fetched files when not writing to stdout
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Fetch `url` into stdout or into a file named after its last path segment.
    ///
    /// Nothing is created when the server answers with anything but 200.
    pub async fn fetch(&self, url: &Url) -> ThttpResult<u64> {
        if self.to_stdout {
            return self.fetch_into(url, &mut tokio::io::stdout()).await;
        }

        let file_name = file_name_for(url).ok_or_else(|| {
            ThttpError::local_io(
                url.path(),
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "URL has no file name to save to",
                ),
            )
        })?;
        let response = self.get(url).await?;
        let out_path = self.download_dir.join(file_name);
        let mut file = tokio::fs::File::create(&out_path)
            .await
            .map_err(|e| ThttpError::local_io(&out_path, e))?;

        self.announce(url, &response);
        copy_body(url, response, &mut file).await
    }

    /// Fetch `url` into an arbitrary writer
    pub async fn fetch_into<W>(&self, url: &Url, writer: &mut W) -> ThttpResult<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let response = self.get(url).await?;
        self.announce(url, &response);
        copy_body(url, response, writer).await
    }

    async fn get(&self, url: &Url) -> ThttpResult<Response> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ThttpError::network(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ThttpError::RemoteStatus {
                url: url.to_string(),
                detail: status_text(status),
            });
        }

        Ok(response)
    }

    fn announce(&self, url: &Url, response: &Response) {
        if self.verbose {
            tracing::info!("{}", fetching_line(url, response.content_length()));
        }
    }
}

/// Diagnostic line printed before a transfer; the size is left out when unknown
pub fn fetching_line(url: &Url, content_length: Option<u64>) -> String {
    match content_length {
        Some(len) => format!("Fetching {} ({} bytes)", url, len),
        None => format!("Fetching {}", url),
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

async fn copy_body<W>(url: &Url, mut response: Response, writer: &mut W) -> ThttpResult<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| ThttpError::network(url, e))?
    {
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    writer.flush().await?;

    tracing::debug!("Fetched {} bytes from {}", written, url);
    Ok(written)
}
