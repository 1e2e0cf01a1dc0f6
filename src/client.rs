use crate::{
    apis::DssProject,
    auth::{ApiKeyAuth, Authentication, NoAuth},
    error::{DssError, DssResult},
    export::{ExportStream, TransportGuard},
    models::{ErrorResponse, JsonObject, ProjectCreateRequest},
};
use log::{debug, info, warn};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::sync::{atomic::AtomicBool, Arc};
use url::Url;

/// Path prefix of the public API on a DSS host
pub const PUBLIC_API_PREFIX: &str = "/public/api";

/// Environment variable holding the DSS host URL
pub const ENV_DSS_URL: &str = "DKU_DSS_URL";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "DKU_API_KEY";

/// Main DSS client.
///
/// Clones share the underlying connection pool and the export-stream busy
/// flag, so an open [`ExportStream`] blocks every clone.
#[derive(Clone)]
pub struct DssClient {
    client: Client,
    base_url: Url,
    auth: Arc<dyn Authentication>,
    busy: Arc<AtomicBool>,
}

impl DssClient {
    /// Create a new DSS client for the given host (e.g. `http://dss:11200`)
    pub fn new(host: impl AsRef<str>, auth: impl Authentication + 'static) -> DssResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Self::with_client(client, host, auth)
    }

    /// Create a new DSS client with custom reqwest client
    pub fn with_client(
        client: Client,
        host: impl AsRef<str>,
        auth: impl Authentication + 'static,
    ) -> DssResult<Self> {
        let base_url = Self::public_api_url(host.as_ref())?;
        debug!("DSS public API at {}", base_url);

        Ok(Self {
            client,
            base_url,
            auth: Arc::new(auth),
            busy: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create a client from `DKU_DSS_URL` and `DKU_API_KEY`
    pub fn from_env() -> DssResult<Self> {
        let host = std::env::var(ENV_DSS_URL)
            .map_err(|_| DssError::Config(format!("{} is not set", ENV_DSS_URL)))?;

        match std::env::var(ENV_API_KEY) {
            Ok(key) if !key.is_empty() => Self::new(host, ApiKeyAuth::new(key)),
            _ => {
                warn!("{} is not set, connecting without authentication", ENV_API_KEY);
                Self::new(host, NoAuth)
            }
        }
    }

    fn public_api_url(host: &str) -> DssResult<Url> {
        let host = Url::parse(host)?;
        let path = format!("{}{}", host.path().trim_end_matches('/'), PUBLIC_API_PREFIX);
        let mut base_url = host;
        base_url.set_path(&path);
        Ok(base_url)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether an export stream currently holds the transport
    pub fn is_busy(&self) -> bool {
        self.busy.load(std::sync::atomic::Ordering::Acquire)
    }

    /// Resolve an API path (starting with `/`) against the base URL
    pub fn endpoint(&self, path: &str) -> DssResult<Url> {
        let url = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Ok(Url::parse(&url)?)
    }

    /// Get a handle on a project. No request is issued.
    pub fn get_project(&self, project_key: &str) -> DssProject<'_> {
        DssProject::new(self, project_key)
    }

    /// List the projects visible to the caller
    pub async fn list_projects(&self) -> DssResult<Vec<JsonObject>> {
        info!("Listing projects");
        let req = self.request(Method::GET, "/projects/").await?;
        debug!("HTTP GET /projects/");

        self.execute(req).await
    }

    /// Create a new project and return a handle on it
    ///
    /// # Arguments
    /// * `project_key` - Key of the new project
    /// * `name` - Display name
    /// * `owner` - Login of the project owner
    pub async fn create_project(
        &self,
        project_key: &str,
        name: &str,
        owner: &str,
    ) -> DssResult<DssProject<'_>> {
        info!("Creating project: {}", project_key);
        let body = ProjectCreateRequest {
            project_key: project_key.to_string(),
            name: name.to_string(),
            owner: owner.to_string(),
        };
        let req = self.request(Method::POST, "/projects/").await?.json(&body);
        debug!("HTTP POST /projects/ body={:?}", body);

        self.execute_empty(req).await?;
        Ok(self.get_project(project_key))
    }

    /// Build a request to the given path with authentication.
    ///
    /// Fails with [`DssError::TransportBusy`] while an export stream is open.
    pub async fn request(&self, method: Method, path: &str) -> DssResult<RequestBuilder> {
        if self.is_busy() {
            return Err(DssError::TransportBusy);
        }
        self.build_request(method, path).await
    }

    async fn build_request(&self, method: Method, path: &str) -> DssResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut headers = reqwest::header::HeaderMap::new();
        self.auth.apply_auth(&mut headers).await?;

        Ok(self.client.request(method, url).headers(headers))
    }

    /// Execute a request and deserialize the JSON response
    pub async fn execute<T>(&self, request: RequestBuilder) -> DssResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.execute_raw(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Execute a request whose response body is not used
    pub async fn execute_empty(&self, request: RequestBuilder) -> DssResult<()> {
        let response = self.execute_raw(request).await?;
        response.bytes().await?;
        Ok(())
    }

    /// Execute a request and return the response body as text
    pub async fn execute_text(&self, request: RequestBuilder) -> DssResult<String> {
        let response = self.execute_raw(request).await?;
        Ok(response.text().await?)
    }

    /// Execute a request and return the undecoded response once its status
    /// has been checked.
    ///
    /// Fails with [`DssError::TransportBusy`] while an export stream is open,
    /// even for a request built before the stream was opened.
    pub async fn execute_raw(&self, request: RequestBuilder) -> DssResult<Response> {
        if self.is_busy() {
            return Err(DssError::TransportBusy);
        }
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> DssResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    /// Claim the transport and open a raw GET stream on `path`
    pub async fn open_stream(&self, path: &str) -> DssResult<ExportStream> {
        let guard = TransportGuard::acquire(&self.busy)?;
        debug!("HTTP GET {} (streaming)", path);
        let req = self.build_request(Method::GET, path).await?;
        let response = self.send(req).await?;

        Ok(ExportStream::new(response, guard))
    }

    async fn error_from_response(status: StatusCode, response: Response) -> DssError {
        let body = response.text().await.unwrap_or_default();
        let (error_type, message) = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(error_resp) => (
                error_resp.error_type,
                error_resp
                    .message
                    .or(error_resp.detailed_message)
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            ),
            Err(_) => (None, format!("HTTP {}", status)),
        };
        debug!("DSS answered {}: {}", status, message);

        DssError::api_error(status.as_u16(), error_type, message)
    }
}
