/*
 * DSS client - handles on the public REST API of a Dataiku DSS instance
 */

// Internal modules
mod client;
pub mod models;
mod apis;
mod error;
mod auth;
mod export;

// Re-export public types and interfaces
pub use client::{DssClient, ENV_API_KEY, ENV_DSS_URL, PUBLIC_API_PREFIX};
pub use models::*;
pub use apis::*;
pub use error::{DssError, DssResult};
pub use auth::{Authentication, ApiKeyAuth, BearerAuth, NoAuth};
pub use export::{ExportStream, TransportGuard, EXPORT_CHUNK_SIZE};

// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DssClient,
        ApiKeyAuth, BearerAuth, NoAuth,
        DssError, DssResult,
        DssProject, DssDataset, DssManagedFolder, DssJob, DssScenario, DssApiService,
        ExportStream, JsonObject, DatasetSettings, JobDefinitionBuilder, JobType,
    };
}
