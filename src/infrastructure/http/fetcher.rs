use reqwest::Client;

use crate::shared::error::{ApiError, ApiResult};

// Some skin hosts reject requests that do not identify as a browser.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:12.0) Gecko/20100101 Firefox/12.0";

pub fn build_fetch_client() -> ApiResult<Client> {
    Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .map_err(|err| ApiError::Internal(format!("failed to build HTTP client: {err}")))
}

pub async fn fetch_bytes(client: &Client, url: &str) -> ApiResult<Vec<u8>> {
    let response = client.get(url).send().await.map_err(|err| {
        log::warn!("skin fetch failed for {url}: {err}");
        ApiError::InvalidUrl
    })?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("skin fetch for {url} returned HTTP {status}");
        return Err(ApiError::InvalidUrl);
    }

    let bytes = response.bytes().await.map_err(|err| {
        log::warn!("failed reading skin response body for {url}: {err}");
        ApiError::InvalidUrl
    })?;

    Ok(bytes.to_vec())
}
