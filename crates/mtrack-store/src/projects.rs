//! Project store: CRUD plus Gantt timeline reads.

use mtrack_core::{Project, ProjectId, ProjectTimeline};

use crate::error::StoreError;
use crate::store::ResourceStore;

pub type ProjectStore = ResourceStore<Project>;

impl ResourceStore<Project> {
    /// Fetch one project with its timeline. The cached projects are left
    /// untouched.
    pub async fn timeline(&self, id: ProjectId) -> Result<ProjectTimeline, StoreError> {
        self.run(
            "timeline",
            "Failed to fetch project timeline".into(),
            self.client().timeline(id),
            |_, timeline| timeline,
        )
        .await
    }

    /// Fetch every project with its timeline.
    pub async fn timelines(&self) -> Result<Vec<ProjectTimeline>, StoreError> {
        self.run(
            "timelines",
            "Failed to fetch project timelines".into(),
            self.client().timelines(),
            |_, timelines| timelines,
        )
        .await
    }
}
