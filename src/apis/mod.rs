pub mod project;
pub mod dataset;
pub mod managed_folder;
pub mod job;
pub mod scenario;
pub mod api_service;

// Re-export all handles
pub use project::DssProject;
pub use dataset::DssDataset;
pub use managed_folder::DssManagedFolder;
pub use job::DssJob;
pub use scenario::DssScenario;
pub use api_service::DssApiService;
