use crate::{client::DssClient, error::DssResult, models::JsonObject};
use log::{debug, info};
use reqwest::Method;

/// A job run in a DSS project
pub struct DssJob<'a> {
    client: &'a DssClient,
    project_key: String,
    job_id: String,
}

impl<'a> DssJob<'a> {
    pub fn new(client: &'a DssClient, project_key: &str, job_id: &str) -> Self {
        Self {
            client,
            project_key: project_key.to_string(),
            job_id: job_id.to_string(),
        }
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn id(&self) -> &str {
        &self.job_id
    }

    fn path(&self, suffix: &str) -> String {
        format!(
            "/projects/{}/jobs/{}/{}",
            urlencoding::encode(&self.project_key),
            urlencoding::encode(&self.job_id),
            suffix
        )
    }

    /// Get the definition and current state of the job
    pub async fn get_status(&self) -> DssResult<JsonObject> {
        info!("Getting status of job {}.{}", self.project_key, self.job_id);
        let path = self.path("");
        let req = self.client.request(Method::GET, &path).await?;
        debug!("HTTP GET {}", path);

        self.client.execute(req).await
    }

    /// Ask DSS to abort the job
    pub async fn abort(&self) -> DssResult<()> {
        info!("Aborting job {}.{}", self.project_key, self.job_id);
        let path = self.path("abort");
        let req = self.client.request(Method::POST, &path).await?;
        debug!("HTTP POST {}", path);

        self.client.execute_empty(req).await
    }

    /// Get the full log of the job as text
    pub async fn get_log(&self) -> DssResult<String> {
        info!("Getting log of job {}.{}", self.project_key, self.job_id);
        let path = self.path("log");
        let req = self.client.request(Method::GET, &path).await?;
        debug!("HTTP GET {}", path);

        self.client.execute_text(req).await
    }
}
