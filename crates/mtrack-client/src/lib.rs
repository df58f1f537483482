//! # mtrack-client -- Typed Rust client for the milestone tracker API
//!
//! Provides typed access to the three backend collections:
//! - **Projects** via `/projects/` (plus Gantt timelines)
//! - **Equipment sales** via `/equipment/sales/` (plus milestone schedules
//!   and structure assignment)
//! - **Milestone structures** via `/milestones/structures/`
//!
//! ## API Path Convention
//!
//! Every path is relative to the configured API root and ends with a slash:
//! `{api_base_url}/{collection}/[{id}/][{action}/]`, for example
//! `http://localhost:8000/api/equipment/sales/7/schedule/`.
//!
//! Failed calls carry the backend's `{"detail": "..."}` body; see
//! [`ApiError::detail`]. The client never retries.

pub mod config;
pub mod equipment;
pub mod error;
pub mod milestones;
pub mod projects;
pub mod resource;

pub use config::{ConfigError, TrackerConfig};
pub use equipment::EquipmentSaleClient;
pub use error::ApiError;
pub use milestones::MilestoneStructureClient;
pub use projects::ProjectClient;
pub use resource::{Resource, ResourceClient};

use std::time::Duration;

/// Top-level tracker API client. Holds one sub-client per collection, all
/// sharing a single connection pool.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    projects: ProjectClient,
    equipment_sales: EquipmentSaleClient,
    milestone_structures: MilestoneStructureClient,
}

impl TrackerClient {
    /// Create a new client from configuration.
    pub fn new(config: TrackerConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| ApiError::Http {
            endpoint: "client_init".into(),
            source: e,
        })?;

        tracing::debug!(api_base_url = %config.api_base_url, "tracker client ready");

        Ok(Self {
            projects: ResourceClient::new(http.clone(), config.api_base_url.clone()),
            equipment_sales: ResourceClient::new(http.clone(), config.api_base_url.clone()),
            milestone_structures: ResourceClient::new(http, config.api_base_url),
        })
    }

    /// Access the projects client.
    pub fn projects(&self) -> &ProjectClient {
        &self.projects
    }

    /// Access the equipment-sales client.
    pub fn equipment_sales(&self) -> &EquipmentSaleClient {
        &self.equipment_sales
    }

    /// Access the milestone-structures client.
    pub fn milestone_structures(&self) -> &MilestoneStructureClient {
        &self.milestone_structures
    }
}
