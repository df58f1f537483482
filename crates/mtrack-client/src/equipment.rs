//! Typed client for the equipment-sales collection.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET/POST | `/equipment/sales/` | List / create |
//! | PUT/DELETE | `/equipment/sales/{id}/` | Update / delete |
//! | GET    | `/equipment/sales/{id}/schedule/` | One sale with its milestone schedule |
//! | GET    | `/equipment/sales/schedules/` | Every sale with its schedule |
//! | POST   | `/equipment/sales/{id}/assign_milestone/` | Switch a sale's milestone structure |

use mtrack_core::{
    EquipmentSale, EquipmentSaleDraft, EquipmentSaleId, EquipmentSaleSchedule,
    MilestoneStructureId,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::resource::{send_json, Resource, ResourceClient};

impl Resource for EquipmentSale {
    type Id = EquipmentSaleId;
    type Draft = EquipmentSaleDraft;

    const COLLECTION_PATH: &'static str = "equipment/sales";
    const SINGULAR: &'static str = "equipment sale";
    const PLURAL: &'static str = "equipment sales";

    fn id(&self) -> EquipmentSaleId {
        self.id
    }
}

/// Body of `POST /equipment/sales/{id}/assign_milestone/`.
#[derive(Debug, Serialize)]
struct AssignMilestoneRequest {
    milestone_structure_id: MilestoneStructureId,
}

/// Client for `/equipment/sales/`.
pub type EquipmentSaleClient = ResourceClient<EquipmentSale>;

impl ResourceClient<EquipmentSale> {
    /// Fetch one sale with its computed milestone schedule.
    ///
    /// Calls `GET {base}/equipment/sales/{id}/schedule/`.
    pub async fn schedule(&self, id: EquipmentSaleId) -> Result<EquipmentSaleSchedule, ApiError> {
        let path = self.path(&format!("{id}/schedule"));
        let endpoint = format!("GET {path}");
        send_json(endpoint, self.http().get(self.url(&path))).await
    }

    /// Fetch every sale with its computed milestone schedule.
    ///
    /// Calls `GET {base}/equipment/sales/schedules/`.
    pub async fn schedules(&self) -> Result<Vec<EquipmentSaleSchedule>, ApiError> {
        let path = self.path("schedules");
        let endpoint = format!("GET {path}");
        send_json(endpoint, self.http().get(self.url(&path))).await
    }

    /// Assign a milestone structure to a sale and return the updated sale.
    ///
    /// Calls `POST {base}/equipment/sales/{id}/assign_milestone/`.
    pub async fn assign_milestone(
        &self,
        sale_id: EquipmentSaleId,
        structure_id: MilestoneStructureId,
    ) -> Result<EquipmentSale, ApiError> {
        let path = self.path(&format!("{sale_id}/assign_milestone"));
        let endpoint = format!("POST {path}");
        let body = AssignMilestoneRequest {
            milestone_structure_id: structure_id,
        };
        send_json(endpoint, self.http().post(self.url(&path)).json(&body)).await
    }
}
