//! Payment milestone structures.
//!
//! A structure is a reusable, uniquely named list of payment milestones.
//! Each milestone defines a share of the sale total, an offset in days from
//! the previous milestone, and net payment terms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::identity::{MilestoneId, MilestoneStructureId};

/// The scheduling terms shared by stored milestones and drafts.
///
/// [`compute_schedule`](crate::compute_schedule) and the validators work on
/// anything implementing this, so a form can be checked before it is sent.
pub trait MilestoneTerms {
    /// Backend id, if the milestone has been stored.
    fn id(&self) -> Option<MilestoneId> {
        None
    }
    fn name(&self) -> &str;
    fn payment_percentage(&self) -> Amount;
    fn net_terms_days(&self) -> u32;
    fn days_after_previous(&self) -> u32;
    fn order(&self) -> u32;
}

/// A milestone as returned inside a [`MilestoneStructure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMilestone {
    pub id: MilestoneId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub payment_percentage: Amount,
    #[serde(default)]
    pub net_terms_days: u32,
    #[serde(default)]
    pub days_after_previous: u32,
    #[serde(default)]
    pub order: u32,
}

impl MilestoneTerms for PaymentMilestone {
    fn id(&self) -> Option<MilestoneId> {
        Some(self.id)
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn payment_percentage(&self) -> Amount {
        self.payment_percentage
    }
    fn net_terms_days(&self) -> u32 {
        self.net_terms_days
    }
    fn days_after_previous(&self) -> u32 {
        self.days_after_previous
    }
    fn order(&self) -> u32 {
        self.order
    }
}

/// Milestone structure record (`/milestones/structures/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneStructure {
    pub id: MilestoneStructureId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub milestones: Vec<PaymentMilestone>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MilestoneStructure {
    /// Sum of every milestone's payment percentage.
    pub fn total_percentage(&self) -> Amount {
        self.milestones.iter().map(|m| m.payment_percentage).sum()
    }

    /// Days from project start to the last milestone's due date.
    pub fn span_days(&self) -> u32 {
        self.milestones.iter().map(|m| m.days_after_previous).sum()
    }
}

/// One milestone in a create/update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneDraft {
    pub name: String,
    pub payment_percentage: Amount,
    #[serde(default)]
    pub net_terms_days: u32,
    #[serde(default)]
    pub days_after_previous: u32,
    #[serde(default)]
    pub order: u32,
}

impl MilestoneTerms for MilestoneDraft {
    fn name(&self) -> &str {
        &self.name
    }
    fn payment_percentage(&self) -> Amount {
        self.payment_percentage
    }
    fn net_terms_days(&self) -> u32 {
        self.net_terms_days
    }
    fn days_after_previous(&self) -> u32 {
        self.days_after_previous
    }
    fn order(&self) -> u32 {
        self.order
    }
}

/// Body of `POST`/`PUT /milestones/structures/`.
///
/// On update the backend replaces the structure's milestones wholesale with
/// the ones in this draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneStructureDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub milestones: Vec<MilestoneDraft>,
}
