//! Typed client for the projects collection.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET/POST | `/projects/` | List / create |
//! | PUT/DELETE | `/projects/{id}/` | Update / delete |
//! | GET    | `/projects/{id}/timeline/` | One project with its Gantt timeline |
//! | GET    | `/projects/timelines/` | Every project with its timeline |

use mtrack_core::{Project, ProjectDraft, ProjectId, ProjectTimeline};

use crate::error::ApiError;
use crate::resource::{send_json, Resource, ResourceClient};

impl Resource for Project {
    type Id = ProjectId;
    type Draft = ProjectDraft;

    const COLLECTION_PATH: &'static str = "projects";
    const SINGULAR: &'static str = "project";
    const PLURAL: &'static str = "projects";

    fn id(&self) -> ProjectId {
        self.id
    }
}

/// Client for `/projects/`.
pub type ProjectClient = ResourceClient<Project>;

impl ResourceClient<Project> {
    /// Fetch one project with its timeline entries.
    ///
    /// Calls `GET {base}/projects/{id}/timeline/`.
    pub async fn timeline(&self, id: ProjectId) -> Result<ProjectTimeline, ApiError> {
        let path = self.path(&format!("{id}/timeline"));
        let endpoint = format!("GET {path}");
        send_json(endpoint, self.http().get(self.url(&path))).await
    }

    /// Fetch every project with its timeline entries.
    ///
    /// Calls `GET {base}/projects/timelines/`.
    pub async fn timelines(&self) -> Result<Vec<ProjectTimeline>, ApiError> {
        let path = self.path("timelines");
        let endpoint = format!("GET {path}");
        send_json(endpoint, self.http().get(self.url(&path))).await
    }
}
