//! REST provider talking to the hierarchy backend over HTTP.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use treevault_core::config::api::ApiConfig;
use treevault_core::error::{AppError, ErrorKind};
use treevault_core::result::AppResult;
use treevault_core::types::NodeId;
use treevault_entity::{
    CreateNodeRequest, MoveNodeRequest, ProblemDetail, TagRequest, Tree, TreeNode,
    UpdateNodeRequest,
};

use crate::api::NodeApi;

/// HTTP backend provider.
///
/// Every call is attempted exactly once. Timeouts come from [`ApiConfig`]
/// and surface as [`ErrorKind::Transport`] errors.
#[derive(Debug, Clone)]
pub struct HttpNodeApi {
    /// Shared connection pool.
    client: Client,
    /// Backend root, e.g. `http://localhost:8080/`.
    base_url: Url,
}

impl HttpNodeApi {
    /// Create a provider from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid API base URL '{}': {e}", config.base_url),
                e,
            )
        })?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "API base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self { client, base_url })
    }

    /// Build `{base}/api/v1/{segments...}`, percent-encoding each segment.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v1"]).extend(segments);
        }
        url
    }

    /// Send a request and turn non-2xx responses into [`AppError`]s
    /// carrying the problem `detail`.
    async fn send(&self, request: RequestBuilder, operation: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(operation, error = %e, "Backend request failed");
            AppError::with_source(
                ErrorKind::Transport,
                format!("{operation} request failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "Backend responded");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let problem = serde_json::from_slice::<ProblemDetail>(&body).ok();

        let mut err = AppError::new(
            ErrorKind::from_status(status.as_u16()),
            format!("{operation} failed with HTTP {status}"),
        );
        if let Some(detail) = problem.and_then(|p| p.detail) {
            err = err.with_detail(detail);
        }

        warn!(operation, status = status.as_u16(), detail = ?err.detail, "Backend rejected request");
        Err(err)
    }

    /// Decode a JSON response body.
    async fn read_json<T: DeserializeOwned>(response: Response, operation: &str) -> AppResult<T> {
        let body = response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Transport,
                format!("{operation} response could not be read: {e}"),
                e,
            )
        })?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl NodeApi for HttpNodeApi {
    async fn get_tree(&self) -> AppResult<Tree> {
        let url = self.endpoint(["tree"]);
        let response = self.send(self.client.get(url), "get_tree").await?;
        Self::read_json(response, "get_tree").await
    }

    async fn get_node(&self, id: &NodeId) -> AppResult<TreeNode> {
        let url = self.endpoint(["nodes", id.as_str()]);
        let response = self.send(self.client.get(url), "get_node").await?;
        Self::read_json(response, "get_node").await
    }

    async fn create_node(&self, request: &CreateNodeRequest) -> AppResult<TreeNode> {
        let url = self.endpoint(["nodes"]);
        let response = self
            .send(self.client.post(url).json(request), "create_node")
            .await?;
        Self::read_json(response, "create_node").await
    }

    async fn update_node(&self, id: &NodeId, request: &UpdateNodeRequest) -> AppResult<TreeNode> {
        let url = self.endpoint(["nodes", id.as_str()]);
        let response = self
            .send(self.client.put(url).json(request), "update_node")
            .await?;
        Self::read_json(response, "update_node").await
    }

    async fn delete_node(&self, id: &NodeId) -> AppResult<()> {
        let url = self.endpoint(["nodes", id.as_str()]);
        self.send(self.client.delete(url), "delete_node").await?;
        Ok(())
    }

    async fn move_node(&self, id: &NodeId, request: &MoveNodeRequest) -> AppResult<TreeNode> {
        let url = self.endpoint(["nodes", id.as_str(), "move"]);
        let response = self
            .send(self.client.post(url).json(request), "move_node")
            .await?;
        Self::read_json(response, "move_node").await
    }

    async fn add_tag(&self, id: &NodeId, request: &TagRequest) -> AppResult<()> {
        let url = self.endpoint(["nodes", id.as_str(), "tags"]);
        self.send(self.client.post(url).json(request), "add_tag")
            .await?;
        Ok(())
    }

    async fn remove_tag(&self, id: &NodeId, key: &str) -> AppResult<()> {
        let url = self.endpoint(["nodes", id.as_str(), "tags", key]);
        self.send(self.client.delete(url), "remove_tag").await?;
        Ok(())
    }
}
