use crate::{client::DssClient, error::DssResult, models::JsonObject};
use log::{debug, info};
use reqwest::Method;

/// An API service designed in a DSS project
pub struct DssApiService<'a> {
    client: &'a DssClient,
    project_key: String,
    service_id: String,
}

impl<'a> DssApiService<'a> {
    pub fn new(client: &'a DssClient, project_key: &str, service_id: &str) -> Self {
        Self {
            client,
            project_key: project_key.to_string(),
            service_id: service_id.to_string(),
        }
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn id(&self) -> &str {
        &self.service_id
    }

    fn packages_path(&self) -> String {
        format!(
            "/projects/{}/apiservices/{}/packages",
            urlencoding::encode(&self.project_key),
            urlencoding::encode(&self.service_id)
        )
    }

    fn package_path(&self, package_id: &str) -> String {
        format!("{}/{}", self.packages_path(), urlencoding::encode(package_id))
    }

    /// List the packages generated for this service
    pub async fn list_packages(&self) -> DssResult<Vec<JsonObject>> {
        info!("Listing packages of API service {}.{}", self.project_key, self.service_id);
        let path = self.packages_path();
        let req = self.client.request(Method::GET, &path).await?;
        debug!("HTTP GET {}", path);

        self.client.execute(req).await
    }

    /// Generate a new package of the service under `package_id`
    pub async fn create_package(&self, package_id: &str) -> DssResult<()> {
        info!("Generating package {} of API service {}", package_id, self.service_id);
        let path = self.package_path(package_id);
        let req = self.client.request(Method::POST, &path).await?;
        debug!("HTTP POST {}", path);

        self.client.execute_empty(req).await
    }

    pub async fn delete_package(&self, package_id: &str) -> DssResult<()> {
        info!("Deleting package {} of API service {}", package_id, self.service_id);
        let path = self.package_path(package_id);
        let req = self.client.request(Method::DELETE, &path).await?;
        debug!("HTTP DELETE {}", path);

        self.client.execute_empty(req).await
    }
}
