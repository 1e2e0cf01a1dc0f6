use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic JSON object as exchanged with the DSS API.
///
/// Key order is preserved so that an object read with a `get_*` call and
/// written back with the matching `set_*` call keeps its layout.
pub type JsonObject = serde_json::Map<String, Value>;

/// Error body returned by DSS on failed calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "errorType")]
    pub error_type: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "detailedMessage")]
    pub detailed_message: Option<String>,
}

/// Response of a creation call that carries the generated identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedObject {
    pub id: String,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Project creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreateRequest {
    #[serde(rename = "projectKey")]
    pub project_key: String,
    pub name: String,
    pub owner: String,
}

/// Optional parts of a dataset definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSettings {
    /// Parameters of the dataset type
    pub params: JsonObject,
    /// Storage format, `None` lets DSS pick
    pub format_type: Option<String>,
    /// Parameters of the format
    pub format_params: JsonObject,
}

/// Dataset creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetCreateRequest {
    pub name: String,
    #[serde(rename = "projectKey")]
    pub project_key: String,
    #[serde(rename = "type")]
    pub dataset_type: String,
    pub params: JsonObject,
    #[serde(rename = "formatType")]
    pub format_type: Option<String>,
    #[serde(rename = "formatParams")]
    pub format_params: JsonObject,
}

impl DatasetCreateRequest {
    pub fn new(
        project_key: &str,
        name: &str,
        dataset_type: &str,
        settings: DatasetSettings,
    ) -> Self {
        Self {
            name: name.to_string(),
            project_key: project_key.to_string(),
            dataset_type: dataset_type.to_string(),
            params: settings.params,
            format_type: settings.format_type,
            format_params: settings.format_params,
        }
    }
}

/// Managed folder creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedFolderCreateRequest {
    pub name: String,
    #[serde(rename = "projectKey")]
    pub project_key: String,
}

/// Build mode of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    RecursiveBuild,
    NonRecursiveForcedBuild,
    RecursiveForcedBuild,
    RecursiveMissingOnlyBuild,
}

/// One output to build in a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutput {
    #[serde(rename = "projectKey")]
    pub project_key: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
}

/// Helper producing the definition passed to `DssProject::start_job`
#[derive(Debug, Clone)]
pub struct JobDefinitionBuilder {
    project_key: String,
    job_type: JobType,
    outputs: Vec<JobOutput>,
}

impl JobDefinitionBuilder {
    pub fn new(project_key: impl Into<String>, job_type: JobType) -> Self {
        Self {
            project_key: project_key.into(),
            job_type,
            outputs: Vec::new(),
        }
    }

    /// Add an output of this job's project
    pub fn with_output(mut self, id: impl Into<String>, partition: Option<&str>) -> Self {
        self.outputs.push(JobOutput {
            project_key: self.project_key.clone(),
            id: id.into(),
            partition: partition.map(str::to_string),
        });
        self
    }

    pub fn build(self) -> JsonObject {
        let mut definition = JsonObject::new();
        definition.insert("type".to_string(), serde_json::json!(self.job_type));
        definition.insert("outputs".to_string(), serde_json::json!(self.outputs));
        definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dataset_request_defaults_to_empty_params_and_null_format() {
        let request =
            DatasetCreateRequest::new("PKEY", "orders", "Filesystem", DatasetSettings::default());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "orders",
                "projectKey": "PKEY",
                "type": "Filesystem",
                "params": {},
                "formatType": null,
                "formatParams": {}
            })
        );
    }

    #[test]
    fn job_definition_lists_outputs() {
        let definition = JobDefinitionBuilder::new("PKEY", JobType::RecursiveForcedBuild)
            .with_output("orders", None)
            .with_output("sales", Some("2024-01-01"))
            .build();

        assert_eq!(
            Value::Object(definition),
            json!({
                "type": "RECURSIVE_FORCED_BUILD",
                "outputs": [
                    {"projectKey": "PKEY", "id": "orders"},
                    {"projectKey": "PKEY", "id": "sales", "partition": "2024-01-01"}
                ]
            })
        );
    }

    #[test]
    fn created_object_keeps_extra_fields() {
        let created: CreatedObject =
            serde_json::from_value(json!({"id": "F1", "name": "raw"})).unwrap();

        assert_eq!(created.id, "F1");
        assert_eq!(created.extra["name"], "raw");
    }

    #[test]
    fn error_body_fields_are_optional() {
        let body: ErrorResponse = serde_json::from_value(json!({"message": "nope"})).unwrap();

        assert_eq!(body.message.as_deref(), Some("nope"));
        assert!(body.error_type.is_none());
    }
}
