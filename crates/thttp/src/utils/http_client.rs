use crate::errors::{ThttpError, ThttpResult};
use reqwest::Client;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the reqwest client shared by fetches and uploads.
///
/// No request timeout is set; a stalled transfer blocks until the peer gives up.
pub fn build_client() -> ThttpResult<Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ThttpError::Configuration {
            message: format!("HTTP client error: {}", e),
        })
}
