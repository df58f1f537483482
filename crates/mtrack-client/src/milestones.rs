//! Typed client for the milestone-structures collection.
//!
//! Plain CRUD at `/milestones/structures/`; no extra actions.

use mtrack_core::{MilestoneStructure, MilestoneStructureDraft, MilestoneStructureId};

use crate::resource::{Resource, ResourceClient};

impl Resource for MilestoneStructure {
    type Id = MilestoneStructureId;
    type Draft = MilestoneStructureDraft;

    const COLLECTION_PATH: &'static str = "milestones/structures";
    const SINGULAR: &'static str = "milestone structure";
    const PLURAL: &'static str = "milestone structures";

    fn id(&self) -> MilestoneStructureId {
        self.id
    }
}

/// Client for `/milestones/structures/`.
pub type MilestoneStructureClient = ResourceClient<MilestoneStructure>;
