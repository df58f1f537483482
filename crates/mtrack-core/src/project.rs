//! Projects and their Gantt timelines.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::equipment::EquipmentSale;
use crate::identity::{EquipmentSaleId, MilestoneId, ProjectId};

/// Project record (`/projects/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub equipment_sales: Vec<EquipmentSale>,
    #[serde(default)]
    pub total_value: Option<Amount>,
    #[serde(default)]
    pub equipment_sales_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Total value as reported, or summed over the embedded sales.
    pub fn effective_total_value(&self) -> Amount {
        self.total_value.unwrap_or_else(|| {
            self.equipment_sales
                .iter()
                .filter_map(|s| s.total_amount)
                .sum()
        })
    }
}

/// One milestone of one sale on a project's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub sale_id: EquipmentSaleId,
    #[serde(default)]
    pub sale_name: String,
    #[serde(default)]
    pub milestone_id: Option<MilestoneId>,
    #[serde(default)]
    pub milestone_name: String,
    #[serde(default)]
    pub start_days: u32,
    #[serde(default)]
    pub end_days: u32,
    #[serde(default)]
    pub payment_percentage: f64,
    #[serde(default)]
    pub payment_amount: f64,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_due_date: Option<NaiveDate>,
    #[serde(default)]
    pub net_terms_days: u32,
}

/// Response of `/projects/{id}/timeline/` and `/projects/timelines/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTimeline {
    #[serde(flatten)]
    pub project: Project,
    #[serde(default)]
    pub project_timeline: Vec<TimelineEntry>,
}

/// Body of `POST`/`PUT /projects/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub description: String,
}
