use crate::{Game, GamesResponse};
use reqwest::{Client, StatusCode, Url};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const GAMES_PATH: &str = "/api/games";

/// Client for the game-listing backend.
#[derive(Debug, Clone)]
pub struct GamesApi {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for GamesApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Status { code: StatusCode, url: String },
    Parsing(String, String),
    InvalidUrl(String, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            // hyper drops the server's reason phrase, so the canonical one is shown.
            ApiError::Status { code, .. } => write!(
                f,
                "HTTP {} {}",
                code.as_u16(),
                code.canonical_reason().unwrap_or("Unknown Status")
            ),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::InvalidUrl(e, url) => write!(f, "Invalid backend URL {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl GamesApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("courtside/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout: None,
        }
    }

    /// Per-request timeout. Without one, requests run until the transport gives up.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the listing for `date`.
    ///
    /// The date is sent exactly as given, so an empty or malformed value
    /// reaches the backend and fails there.
    pub async fn fetch_games(&self, date: &str) -> ApiResult<Vec<Game>> {
        let url = format!("{}{GAMES_PATH}", self.base_url);
        let endpoint = Url::parse_with_params(&url, &[("date", date)])
            .map_err(|e| ApiError::InvalidUrl(e.to_string(), url.clone()))?;
        let mut request = self.client.get(endpoint);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { code: status, url });
        }

        // Read as text first so a bad body reports serde's message, not reqwest's.
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Parsing(e.to_string(), url.clone()))?;
        let envelope: GamesResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Parsing(e.to_string(), url))?;
        Ok(envelope.games)
    }
}
