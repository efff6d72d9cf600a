use reqwest::header::USER_AGENT;
use reqwest::StatusCode;

pub const FEED_URL: &str = "https://techxplore.com/rss-feed/breaking/machine-learning-ai-news/";

/// Sent upstream so the feed host does not treat the proxy as a bot.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("error creating request: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
    #[error("error reading response body: {0}")]
    Body(#[source] reqwest::Error),
}

pub async fn fetch_feed(
    client: &reqwest::Client,
    url: &str,
    user_agent: &str,
) -> Result<FetchedFeed, FetchError> {
    let request = client
        .get(url)
        .header(USER_AGENT, user_agent)
        .build()
        .map_err(FetchError::Build)?;

    let response = client
        .execute(request)
        .await
        .map_err(FetchError::Transport)?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let body = response.bytes().await.map_err(FetchError::Body)?.to_vec();
    tracing::info!("RSS data received: {}", String::from_utf8_lossy(&body));

    Ok(FetchedFeed { status, body })
}
