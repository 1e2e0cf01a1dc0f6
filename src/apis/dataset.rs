use crate::{client::DssClient, error::DssResult, models::JsonObject};
use log::{debug, info};
use reqwest::Method;

/// A dataset of a DSS project
pub struct DssDataset<'a> {
    client: &'a DssClient,
    project_key: String,
    dataset_name: String,
}

impl<'a> DssDataset<'a> {
    pub fn new(client: &'a DssClient, project_key: &str, dataset_name: &str) -> Self {
        Self {
            client,
            project_key: project_key.to_string(),
            dataset_name: dataset_name.to_string(),
        }
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn name(&self) -> &str {
        &self.dataset_name
    }

    fn path(&self) -> String {
        format!(
            "/projects/{}/datasets/{}",
            urlencoding::encode(&self.project_key),
            urlencoding::encode(&self.dataset_name)
        )
    }

    /// Get the definition of the dataset
    pub async fn get_definition(&self) -> DssResult<JsonObject> {
        info!("Getting definition of dataset {}.{}", self.project_key, self.dataset_name);
        let path = self.path();
        let req = self.client.request(Method::GET, &path).await?;
        debug!("HTTP GET {}", path);

        self.client.execute(req).await
    }

    /// Replace the definition of the dataset. `definition` should come from
    /// [`get_definition`](Self::get_definition).
    pub async fn set_definition(&self, definition: &JsonObject) -> DssResult<()> {
        info!("Setting definition of dataset {}.{}", self.project_key, self.dataset_name);
        let path = self.path();
        let req = self.client.request(Method::PUT, &path).await?.json(definition);
        debug!("HTTP PUT {}", path);

        self.client.execute_empty(req).await
    }

    /// Delete the dataset
    pub async fn delete(&self) -> DssResult<()> {
        info!("Deleting dataset {}.{}", self.project_key, self.dataset_name);
        let path = self.path();
        let req = self.client.request(Method::DELETE, &path).await?;
        debug!("HTTP DELETE {}", path);

        self.client.execute_empty(req).await
    }
}
