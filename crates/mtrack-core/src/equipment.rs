//! Equipment sales.
//!
//! A sale references one [`MilestoneStructure`] that defines when its total
//! amount falls due. Reads embed the full structure; writes carry only its id.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::identity::{EquipmentSaleId, MilestoneStructureId};
use crate::milestone::MilestoneStructure;
use crate::schedule::{compute_schedule, ScheduledMilestone};

/// Equipment sale record (`/equipment/sales/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSale {
    pub id: EquipmentSaleId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub total_amount: Option<Amount>,
    #[serde(default)]
    pub milestone_structure: Option<MilestoneStructure>,
    #[serde(default)]
    pub project_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub unit_price: Option<Amount>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl EquipmentSale {
    /// Unit price as reported by the backend, or derived from total and quantity.
    pub fn effective_unit_price(&self) -> Option<Amount> {
        self.unit_price.or_else(|| match (self.total_amount, self.quantity) {
            (Some(total), q) if q > 0 => Some(Amount::new(total.value() / f64::from(q))),
            _ => None,
        })
    }

    /// Schedule computed locally from the embedded structure.
    ///
    /// `None` when the record lacks the structure, start date, or total.
    pub fn local_schedule(&self) -> Option<Vec<ScheduledMilestone>> {
        let structure = self.milestone_structure.as_ref()?;
        let start = self.project_start_date?;
        let total = self.total_amount?;
        Some(compute_schedule(total, &structure.milestones, start))
    }
}

/// Response of `/equipment/sales/{id}/schedule/` and `/equipment/sales/schedules/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSaleSchedule {
    #[serde(flatten)]
    pub sale: EquipmentSale,
    #[serde(default)]
    pub milestone_schedule: Vec<ScheduledMilestone>,
}

/// Body of `POST`/`PUT /equipment/sales/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSaleDraft {
    pub name: String,
    #[serde(default)]
    pub vendor: String,
    pub quantity: u32,
    pub total_amount: Amount,
    pub milestone_structure_id: MilestoneStructureId,
    pub project_start_date: NaiveDate,
}
