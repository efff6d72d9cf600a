mod core;

pub use crate::core::config::{Config, ConfigError};
pub use crate::core::feed::fetcher::{
    fetch_feed, FetchError, FetchedFeed, BROWSER_USER_AGENT, FEED_URL,
};
pub use crate::core::feed::parser::{parse_feed_document, FeedParseError};
pub use crate::core::feed::types::{
    ArticleList, ArticleRecord, Channel, FeedDocument, FeedItem, Thumbnail,
};

use axum::extract::State;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use std::sync::Arc;

pub const RSS_ROUTE: &str = "/api/rss";

#[derive(Debug, Clone)]
pub struct AppState {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> reqwest::Result<Self> {
        Ok(Self {
            client: config.http_client()?,
            config: Arc::new(config),
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum ProxyError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] FeedParseError),
}

impl ProxyError {
    fn message(&self) -> &'static str {
        match self {
            ProxyError::Fetch(FetchError::Build(_)) => "Error creating request",
            ProxyError::Fetch(FetchError::Transport(_) | FetchError::HttpStatus(_)) => {
                "Error fetching RSS feed"
            }
            ProxyError::Fetch(FetchError::Body(_)) => "Error reading RSS data",
            ProxyError::Parse(_) => "Error parsing XML",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ProxyError::Fetch(FetchError::HttpStatus(code)) => upstream_status(*code),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::error!("{}: {}", self.message(), self);
        (self.status(), self.message()).into_response()
    }
}

/// Upstream error statuses are forwarded as-is. Anything else that is not a
/// 200 (informational, other 2xx, unresolved 3xx) becomes 502.
fn upstream_status(code: u16) -> StatusCode {
    match StatusCode::from_u16(code) {
        Ok(status) if status.is_client_error() || status.is_server_error() => status,
        _ => StatusCode::BAD_GATEWAY,
    }
}

async fn get_rss_feed(State(state): State<AppState>) -> Result<Json<ArticleList>, ProxyError> {
    let fetched = fetch_feed(&state.client, &state.config.feed_url, &state.config.user_agent).await?;
    tracing::debug!(status = %fetched.status, bytes = fetched.body.len(), "feed fetched");
    let feed = parse_feed_document(&fetched.body)?;
    Ok(Json(ArticleList::from_feed(&feed)))
}

async fn allow_any_origin(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(RSS_ROUTE, get(get_rss_feed))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.addr;
    let app = create_router(AppState::new(config)?);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server runs at http://localhost:{}{}", addr.port(), RSS_ROUTE);
    axum::serve(listener, app).await?;
    Ok(())
}
