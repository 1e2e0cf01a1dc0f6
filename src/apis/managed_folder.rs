use crate::{client::DssClient, error::DssResult, models::JsonObject};
use log::{debug, info};
use reqwest::Method;

/// A managed folder of a DSS project, identified by its internal id
pub struct DssManagedFolder<'a> {
    client: &'a DssClient,
    project_key: String,
    folder_id: String,
}

impl<'a> DssManagedFolder<'a> {
    pub fn new(client: &'a DssClient, project_key: &str, folder_id: &str) -> Self {
        Self {
            client,
            project_key: project_key.to_string(),
            folder_id: folder_id.to_string(),
        }
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn id(&self) -> &str {
        &self.folder_id
    }

    fn path(&self, suffix: &str) -> String {
        format!(
            "/projects/{}/managedfolders/{}{}",
            urlencoding::encode(&self.project_key),
            urlencoding::encode(&self.folder_id),
            suffix
        )
    }

    pub async fn get_definition(&self) -> DssResult<JsonObject> {
        info!("Getting definition of managed folder {}.{}", self.project_key, self.folder_id);
        let path = self.path("");
        let req = self.client.request(Method::GET, &path).await?;
        debug!("HTTP GET {}", path);

        self.client.execute(req).await
    }

    pub async fn set_definition(&self, definition: &JsonObject) -> DssResult<()> {
        info!("Setting definition of managed folder {}.{}", self.project_key, self.folder_id);
        let path = self.path("");
        let req = self.client.request(Method::PUT, &path).await?.json(definition);
        debug!("HTTP PUT {}", path);

        self.client.execute_empty(req).await
    }

    pub async fn delete(&self) -> DssResult<()> {
        info!("Deleting managed folder {}.{}", self.project_key, self.folder_id);
        let path = self.path("");
        let req = self.client.request(Method::DELETE, &path).await?;
        debug!("HTTP DELETE {}", path);

        self.client.execute_empty(req).await
    }

    /// List the files stored in the folder
    pub async fn list_contents(&self) -> DssResult<JsonObject> {
        info!("Listing contents of managed folder {}.{}", self.project_key, self.folder_id);
        let path = self.path("/contents");
        let req = self.client.request(Method::GET, &path).await?;
        debug!("HTTP GET {}", path);

        self.client.execute(req).await
    }
}
