use reqwest::{Client, StatusCode, header::CONTENT_LENGTH};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{
    errors::{ThttpError, ThttpResult},
    utils::build_client,
};

/// Sends a buffered body to a remote URL with a single PUT
#[derive(Clone)]
pub struct UploadService {
    client: Client,
}

impl UploadService {
    pub fn new() -> ThttpResult<Self> {
        Ok(Self {
            client: build_client()?,
        })
    }

    /// PUT everything readable from `input` (standard input for the CLI) to
    /// `put_url`.
    ///
    /// The input is buffered in memory before the request is sent.
    pub async fn upload<R>(&self, put_url: &str, mut input: R) -> ThttpResult<()>
    where
        R: AsyncRead + Unpin,
    {
        let mut contents = Vec::new();
        input.read_to_end(&mut contents).await?;
        tracing::debug!("PUT {} ({} bytes)", put_url, contents.len());

        let response = self
            .client
            .put(put_url)
            .header(CONTENT_LENGTH, contents.len())
            .body(contents)
            .send()
            .await
            .map_err(|e| ThttpError::network(put_url, e))?;

        if response.status() != StatusCode::OK {
            let detail = response.text().await.unwrap_or_default();
            return Err(ThttpError::UploadRejected {
                url: put_url.to_string(),
                detail,
            });
        }

        Ok(())
    }
}
