use std::time::Duration;

use reqwest::{Client, redirect};

use crate::error::AnalyzeError;

/// Whole-request deadline for one page fetch. This is the only blocking
/// external operation; on expiry the request fails as a unit.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const REFERER: &str = "https://www.google.com/";

pub fn build_client() -> Result<Client, reqwest::Error> {
    let redirect_policy = redirect::Policy::custom(|attempt| {
        if attempt.previous().len() > 10 {
            attempt.error("Too many redirects (>10)")
        } else {
            attempt.follow()
        }
    });

    Client::builder()
        .redirect(redirect_policy)
        .timeout(FETCH_TIMEOUT)
        .build()
}

pub async fn fetch_html(client: &Client, url: &str) -> Result<String, AnalyzeError> {
    let resp = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept-Language", ACCEPT_LANGUAGE)
        .header("Referer", REFERER)
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(AnalyzeError::UpstreamStatus(resp.status()));
    }

    Ok(resp.text().await?)
}
