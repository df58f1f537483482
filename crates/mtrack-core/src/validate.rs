//! Client-side checks run on drafts before they are sent.
//!
//! The backend enforces the same rules; checking first lets a form show
//! feedback without a round trip.

use crate::amount::Amount;
use crate::equipment::EquipmentSaleDraft;
use crate::error::ValidationError;
use crate::milestone::{MilestoneStructureDraft, MilestoneTerms};

/// Longest name or vendor the backend stores.
pub const MAX_NAME_CHARS: usize = 200;

/// Furthest a milestone may land from project start.
pub const MAX_SCHEDULE_DAYS: u32 = 3650;

/// Milestone percentages must sum to a value in `[0, 100]`.
pub fn validate_payment_percentages<M: MilestoneTerms>(
    milestones: &[M],
) -> Result<(), ValidationError> {
    let total: Amount = milestones.iter().map(|m| m.payment_percentage()).sum();
    if total.value() > 100.0 {
        return Err(ValidationError::PercentageOverflow(total));
    }
    if total.value() < 0.0 {
        return Err(ValidationError::NegativePercentage(total));
    }
    Ok(())
}

/// No milestone may fall more than [`MAX_SCHEDULE_DAYS`] after project start.
///
/// Offsets are checked in input order, the order a form lists them.
pub fn validate_milestone_offsets<M: MilestoneTerms>(
    milestones: &[M],
) -> Result<(), ValidationError> {
    let mut cumulative: u32 = 0;
    for (i, milestone) in milestones.iter().enumerate() {
        cumulative = cumulative.saturating_add(milestone.days_after_previous());
        if cumulative > MAX_SCHEDULE_DAYS {
            return Err(ValidationError::MilestoneTooFar { index: i + 1 });
        }
    }
    Ok(())
}

/// Checks for a milestone-structure form.
pub fn validate_structure(draft: &MilestoneStructureDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::Required("Structure name"));
    }
    validate_payment_percentages(&draft.milestones)?;
    validate_milestone_offsets(&draft.milestones)
}

/// Checks for an equipment-sale form.
pub fn validate_equipment_sale(draft: &EquipmentSaleDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::Required("Equipment name"));
    }
    if draft.quantity == 0 {
        return Err(ValidationError::NotPositive("Quantity"));
    }
    if draft.total_amount.value() <= 0.0 {
        return Err(ValidationError::NotPositive("Total amount"));
    }
    if draft.name.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::TooLong {
            field: "Equipment name",
            max: MAX_NAME_CHARS,
        });
    }
    if draft.vendor.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::TooLong {
            field: "Vendor name",
            max: MAX_NAME_CHARS,
        });
    }
    Ok(())
}
