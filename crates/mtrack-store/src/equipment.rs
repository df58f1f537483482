//! Equipment-sale store: CRUD, milestone schedules, and structure assignment.

use mtrack_core::{EquipmentSale, EquipmentSaleId, EquipmentSaleSchedule, MilestoneStructureId};

use crate::error::StoreError;
use crate::store::{replace_by_id, ResourceStore};

pub type EquipmentSaleStore = ResourceStore<EquipmentSale>;

impl ResourceStore<EquipmentSale> {
    pub async fn schedule(&self, id: EquipmentSaleId) -> Result<EquipmentSaleSchedule, StoreError> {
        self.run(
            "schedule",
            "Failed to fetch equipment sale schedule".into(),
            self.client().schedule(id),
            |_, schedule| schedule,
        )
        .await
    }

    pub async fn schedules(&self) -> Result<Vec<EquipmentSaleSchedule>, StoreError> {
        self.run(
            "schedules",
            "Failed to fetch equipment sale schedules".into(),
            self.client().schedules(),
            |_, schedules| schedules,
        )
        .await
    }

    /// Point a sale at another milestone structure.
    ///
    /// The cached sale with `sale_id` is replaced by the server's updated
    /// representation; if it is not cached the collection is unchanged.
    pub async fn assign_milestone_structure(
        &self,
        sale_id: EquipmentSaleId,
        structure_id: MilestoneStructureId,
    ) -> Result<EquipmentSale, StoreError> {
        self.run(
            "assign_milestone_structure",
            "Failed to assign milestone structure".into(),
            self.client().assign_milestone(sale_id, structure_id),
            move |state, sale| {
                replace_by_id(&mut state.items, sale_id, &sale);
                sale
            },
        )
        .await
    }
}
