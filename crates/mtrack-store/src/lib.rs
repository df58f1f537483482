//! # mtrack-store -- Cached resource stores for the milestone tracker
//!
//! One [`ResourceStore`] per backend collection, each holding the cached
//! records plus `loading` and `error` state. Views read the stores through
//! copying accessors; actions (`fetch_all`, `create`, `update`, `delete`
//! and the per-resource extras) talk to the backend through
//! `mtrack-client` and fold the response into the cache.
//!
//! [`AppStores`] builds the three stores once over a shared
//! [`TrackerClient`] so that every view sees the same state.

pub mod equipment;
pub mod error;
pub mod projects;
pub mod store;

pub use equipment::EquipmentSaleStore;
pub use error::StoreError;
pub use projects::ProjectStore;
pub use store::{ResourceStore, StoreState};

use mtrack_client::TrackerClient;
use mtrack_core::MilestoneStructure;

pub type MilestoneStructureStore = ResourceStore<MilestoneStructure>;

/// The application's stores, built once and handed to view code.
#[derive(Debug, Clone)]
pub struct AppStores {
    pub projects: ProjectStore,
    pub equipment_sales: EquipmentSaleStore,
    pub milestone_structures: MilestoneStructureStore,
}

impl AppStores {
    pub fn new(client: &TrackerClient) -> Self {
        Self {
            projects: ResourceStore::new(client.projects().clone()),
            equipment_sales: ResourceStore::new(client.equipment_sales().clone()),
            milestone_structures: ResourceStore::new(client.milestone_structures().clone()),
        }
    }
}
