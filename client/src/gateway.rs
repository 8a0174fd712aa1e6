use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;

use common::leaderboard::Leaderboard;
use common::log;

/// Gateway failures are never fatal; the driver is notified and the game
/// state is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport-level failure (connect, send, read).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered, but not with what we expect (non-2xx status or
    /// a body we cannot parse).
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Seam between the runner and the remote high-score service.
pub trait ScoreService {
    async fn fetch_high_scores(&self) -> Result<Leaderboard, GatewayError>;
    async fn submit_score(&self, name: &str, score: i64) -> Result<(), GatewayError>;
}

/// HTTP client for the remote high-score service.
pub struct LeaderboardGateway {
    client: Client<HttpConnector, Full<Bytes>>,
    base_url: String,
}

impl LeaderboardGateway {
    pub fn new(base_url: &str) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Uri, GatewayError> {
        format!("{}/{}", self.base_url, path)
            .parse()
            .map_err(|e| GatewayError::Protocol(format!("invalid endpoint: {}", e)))
    }

    async fn send(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<(hyper::StatusCode, Bytes), GatewayError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?
            .to_bytes();
        Ok((status, body))
    }
}

impl ScoreService for LeaderboardGateway {
    async fn fetch_high_scores(&self) -> Result<Leaderboard, GatewayError> {
        let uri = self.endpoint("highscores")?;
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Full::default())
            .map_err(|e| GatewayError::Protocol(e.to_string()))?;

        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(GatewayError::Protocol(format!(
                "high scores request returned status {}",
                status
            )));
        }

        Leaderboard::parse_response(&String::from_utf8_lossy(&body))
            .map_err(GatewayError::Protocol)
    }

    async fn submit_score(&self, name: &str, score: i64) -> Result<(), GatewayError> {
        let payload = serde_json::json!({
            "playerName": name,
            "score": score,
        });
        log!("Submitting score payload: {}", payload);

        let uri = self.endpoint("score")?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(payload.to_string())))
            .map_err(|e| GatewayError::Protocol(e.to_string()))?;

        let (status, _) = self.send(request).await?;
        if !status.is_success() {
            return Err(GatewayError::Protocol(format!(
                "score submission returned status {}",
                status
            )));
        }
        Ok(())
    }
}
