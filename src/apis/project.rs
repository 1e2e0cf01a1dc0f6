use crate::{
    apis::{DssApiService, DssDataset, DssJob, DssManagedFolder, DssScenario},
    client::DssClient,
    error::{DssError, DssResult},
    export::ExportStream,
    models::{
        CreatedObject, DatasetCreateRequest, DatasetSettings, JsonObject,
        ManagedFolderCreateRequest,
    },
};
use log::{debug, info};
use reqwest::Method;
use std::path::Path;
use tokio::{fs::File, io::AsyncWrite};

/// A project on the DSS instance
pub struct DssProject<'a> {
    client: &'a DssClient,
    project_key: String,
}

impl<'a> DssProject<'a> {
    pub fn new(client: &'a DssClient, project_key: impl Into<String>) -> Self {
        Self {
            client,
            project_key: project_key.into(),
        }
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    fn path(&self, suffix: &str) -> String {
        format!("/projects/{}{}", urlencoding::encode(&self.project_key), suffix)
    }

    async fn get_json<T>(&self, suffix: &str) -> DssResult<T>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let path = self.path(suffix);
        let req = self.client.request(Method::GET, &path).await?;
        debug!("HTTP GET {}", path);

        self.client.execute(req).await
    }

    async fn put_json(&self, suffix: &str, body: &JsonObject) -> DssResult<()> {
        let path = self.path(suffix);
        let req = self.client.request(Method::PUT, &path).await?.json(body);
        debug!("HTTP PUT {}", path);

        self.client.execute_empty(req).await
    }

    /// Delete the project. Requires an API key with admin rights.
    pub async fn delete(&self) -> DssResult<()> {
        info!("Deleting project: {}", self.project_key);
        let path = self.path("");
        let req = self.client.request(Method::DELETE, &path).await?;
        debug!("HTTP DELETE {}", path);

        self.client.execute_empty(req).await
    }

    /// Open a stream on the exported project archive.
    ///
    /// The client refuses every other call until the stream is drained,
    /// closed or dropped.
    pub async fn get_export_stream(&self) -> DssResult<ExportStream> {
        info!("Exporting project: {}", self.project_key);
        self.client.open_stream(&self.path("/export")).await
    }

    /// Export the project archive to a local file
    ///
    /// # Arguments
    /// * `path` - File in which the exported project is saved (truncated if it exists)
    ///
    /// A call refused with [`DssError::TransportBusy`]
    /// leaves an existing file untouched.
    pub async fn export_to_file(&self, path: impl AsRef<Path>) -> DssResult<u64> {
        let path = path.as_ref();
        info!("Exporting project {} to {}", self.project_key, path.display());
        if self.client.is_busy() {
            return Err(DssError::TransportBusy);
        }
        let file = File::create(path).await?;

        self.export_to_writer(file).await
    }

    /// Export the project archive into `writer`, which is dropped once the
    /// export ends, whether it succeeded or not
    pub async fn export_to_writer<W>(&self, mut writer: W) -> DssResult<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut stream = self.get_export_stream().await?;

        stream.write_to(&mut writer).await
    }

    /// Get the metadata attached to this project: label, description,
    /// checklists, tags and custom metadata
    pub async fn get_metadata(&self) -> DssResult<JsonObject> {
        info!("Getting metadata of project: {}", self.project_key);
        self.get_json("/metadata").await
    }

    /// Replace the metadata of this project.
    ///
    /// `metadata` should be an object previously returned by
    /// [`get_metadata`](Self::get_metadata), modified in place.
    pub async fn set_metadata(&self, metadata: &JsonObject) -> DssResult<()> {
        info!("Setting metadata of project: {}", self.project_key);
        self.put_json("/metadata", metadata).await
    }

    /// Get the owner and the group permissions of this project
    pub async fn get_permissions(&self) -> DssResult<JsonObject> {
        info!("Getting permissions of project: {}", self.project_key);
        self.get_json("/permissions").await
    }

    /// Replace the permissions of this project with an object of the same
    /// structure as the one returned by [`get_permissions`](Self::get_permissions)
    pub async fn set_permissions(&self, permissions: &JsonObject) -> DssResult<()> {
        info!("Setting permissions of project: {}", self.project_key);
        self.put_json("/permissions", permissions).await
    }

    /// List the datasets in this project
    pub async fn list_datasets(&self) -> DssResult<Vec<JsonObject>> {
        info!("Listing datasets of project: {}", self.project_key);
        self.get_json("/datasets/").await
    }

    /// Get a handle on a dataset. No request is issued.
    pub fn get_dataset(&self, dataset_name: &str) -> DssDataset<'a> {
        DssDataset::new(self.client, &self.project_key, dataset_name)
    }

    /// Create a dataset with empty parameters and the default format
    ///
    /// # Arguments
    /// * `dataset_name` - Name of the new dataset
    /// * `dataset_type` - Type of the dataset (e.g. "Filesystem")
    pub async fn create_dataset(
        &self,
        dataset_name: &str,
        dataset_type: &str,
    ) -> DssResult<DssDataset<'a>> {
        self.create_dataset_with_settings(dataset_name, dataset_type, DatasetSettings::default())
            .await
    }

    /// Create a dataset with explicit type parameters and format
    pub async fn create_dataset_with_settings(
        &self,
        dataset_name: &str,
        dataset_type: &str,
        settings: DatasetSettings,
    ) -> DssResult<DssDataset<'a>> {
        info!("Creating dataset {} in project: {}", dataset_name, self.project_key);
        let body = DatasetCreateRequest::new(&self.project_key, dataset_name, dataset_type, settings);
        let path = self.path("/datasets/");
        let req = self.client.request(Method::POST, &path).await?.json(&body);
        debug!("HTTP POST {} body={:?}", path, body);

        self.client.execute_empty(req).await?;
        Ok(self.get_dataset(dataset_name))
    }

    /// List the managed folders in this project
    pub async fn list_managed_folders(&self) -> DssResult<Vec<JsonObject>> {
        info!("Listing managed folders of project: {}", self.project_key);
        self.get_json("/managedfolders/").await
    }

    /// Get a handle on a managed folder. No request is issued.
    pub fn get_managed_folder(&self, folder_id: &str) -> DssManagedFolder<'a> {
        DssManagedFolder::new(self.client, &self.project_key, folder_id)
    }

    /// Create a managed folder; the handle uses the id generated by DSS
    pub async fn create_managed_folder(&self, name: &str) -> DssResult<DssManagedFolder<'a>> {
        info!("Creating managed folder {} in project: {}", name, self.project_key);
        let body = ManagedFolderCreateRequest {
            name: name.to_string(),
            project_key: self.project_key.clone(),
        };
        let path = self.path("/managedfolders/");
        let req = self.client.request(Method::POST, &path).await?.json(&body);
        debug!("HTTP POST {} body={:?}", path, body);

        let created: CreatedObject = self.client.execute(req).await?;
        Ok(self.get_managed_folder(&created.id))
    }

    /// List the jobs in this project, with their definition and state
    pub async fn list_jobs(&self) -> DssResult<Vec<JsonObject>> {
        info!("Listing jobs of project: {}", self.project_key);
        self.get_json("/jobs/").await
    }

    /// Get a handle on a job. No request is issued.
    pub fn get_job(&self, job_id: &str) -> DssJob<'a> {
        DssJob::new(self.client, &self.project_key, job_id)
    }

    /// Start a job and return a handle on it
    ///
    /// # Arguments
    /// * `definition` - Job type and outputs to build, sent as is
    ///   (see [`JobDefinitionBuilder`](crate::JobDefinitionBuilder))
    pub async fn start_job(&self, definition: &JsonObject) -> DssResult<DssJob<'a>> {
        info!("Starting job in project: {}", self.project_key);
        let path = self.path("/jobs/");
        let req = self.client.request(Method::POST, &path).await?.json(definition);
        debug!("HTTP POST {} body={:?}", path, definition);

        let created: CreatedObject = self.client.execute(req).await?;
        Ok(self.get_job(&created.id))
    }

    /// List the API services in this project
    pub async fn list_api_services(&self) -> DssResult<Vec<JsonObject>> {
        info!("Listing API services of project: {}", self.project_key);
        self.get_json("/apiservices/").await
    }

    /// Get a handle on an API service. No request is issued.
    pub fn get_api_service(&self, service_id: &str) -> DssApiService<'a> {
        DssApiService::new(self.client, &self.project_key, service_id)
    }

    /// List the scenarios in this project
    pub async fn list_scenarios(&self) -> DssResult<Vec<JsonObject>> {
        info!("Listing scenarios of project: {}", self.project_key);
        self.get_json("/scenarios/").await
    }

    /// Get a handle on a scenario. No request is issued.
    pub fn get_scenario(&self, scenario_id: &str) -> DssScenario<'a> {
        DssScenario::new(self.client, &self.project_key, scenario_id)
    }
}
