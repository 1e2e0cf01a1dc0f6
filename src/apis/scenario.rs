use crate::{client::DssClient, error::DssResult, models::JsonObject};
use log::{debug, info};
use reqwest::Method;

/// A scenario of a DSS project
pub struct DssScenario<'a> {
    client: &'a DssClient,
    project_key: String,
    scenario_id: String,
}

impl<'a> DssScenario<'a> {
    pub fn new(client: &'a DssClient, project_key: &str, scenario_id: &str) -> Self {
        Self {
            client,
            project_key: project_key.to_string(),
            scenario_id: scenario_id.to_string(),
        }
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn id(&self) -> &str {
        &self.scenario_id
    }

    fn path(&self, suffix: &str) -> String {
        format!(
            "/projects/{}/scenarios/{}/{}",
            urlencoding::encode(&self.project_key),
            urlencoding::encode(&self.scenario_id),
            suffix
        )
    }

    /// Trigger a run of the scenario
    ///
    /// # Arguments
    /// * `params` - Run parameters, sent as is (may be empty)
    pub async fn run(&self, params: &JsonObject) -> DssResult<JsonObject> {
        info!("Running scenario {}.{}", self.project_key, self.scenario_id);
        let path = self.path("run");
        let req = self.client.request(Method::POST, &path).await?.json(params);
        debug!("HTTP POST {} body={:?}", path, params);

        self.client.execute(req).await
    }

    pub async fn get_settings(&self) -> DssResult<JsonObject> {
        info!("Getting settings of scenario {}.{}", self.project_key, self.scenario_id);
        let path = self.path("");
        let req = self.client.request(Method::GET, &path).await?;
        debug!("HTTP GET {}", path);

        self.client.execute(req).await
    }

    /// Replace the settings of the scenario with an object obtained from
    /// [`get_settings`](Self::get_settings)
    pub async fn set_settings(&self, settings: &JsonObject) -> DssResult<()> {
        info!("Setting settings of scenario {}.{}", self.project_key, self.scenario_id);
        let path = self.path("");
        let req = self.client.request(Method::PUT, &path).await?.json(settings);
        debug!("HTTP PUT {}", path);

        self.client.execute_empty(req).await
    }
}
