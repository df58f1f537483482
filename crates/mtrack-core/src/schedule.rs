//! # Milestone Schedule Computation
//!
//! Expands a milestone structure into dated payments for one sale. The
//! backend does the same for `/schedule/` responses; computing it locally
//! lets a form preview a schedule before the sale exists.
//!
//! Milestones are walked in `order`. Each one starts where the previous one
//! ended and ends `days_after_previous` later. The payment falls due at the
//! end plus `net_terms_days`.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::identity::MilestoneId;
use crate::milestone::MilestoneTerms;

/// One dated payment in a sale's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMilestone {
    #[serde(default)]
    pub id: Option<MilestoneId>,
    #[serde(default)]
    pub name: String,
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

/// Compute the payment schedule of `total_amount` under `milestones`,
/// counting days from `project_start`.
///
/// Dates that would overflow the calendar are left as `None`.
pub fn compute_schedule<M: MilestoneTerms>(
    total_amount: Amount,
    milestones: &[M],
    project_start: NaiveDate,
) -> Vec<ScheduledMilestone> {
    let mut ordered: Vec<&M> = milestones.iter().collect();
    ordered.sort_by_key(|m| m.order());

    let mut cumulative_days: u32 = 0;
    let mut schedule = Vec::with_capacity(ordered.len());

    for milestone in ordered {
        let start_days = cumulative_days;
        let end_days = cumulative_days.saturating_add(milestone.days_after_previous());

        let due_date = project_start.checked_add_days(Days::new(u64::from(end_days)));
        let payment_due_date = due_date
            .and_then(|d| d.checked_add_days(Days::new(u64::from(milestone.net_terms_days()))));

        schedule.push(ScheduledMilestone {
            id: milestone.id(),
            name: milestone.name().to_string(),
            start_days,
            end_days,
            payment_percentage: milestone.payment_percentage().value(),
            payment_amount: total_amount.percent(milestone.payment_percentage()).value(),
            due_date,
            payment_due_date,
            net_terms_days: milestone.net_terms_days(),
        });

        cumulative_days = end_days;
    }

    schedule
}
