//! # mtrack-core -- Foundational Types for the Milestone Tracker
//!
//! Every other crate in the workspace depends on this one. It performs no
//! I/O and has no internal crate dependencies.
//!
//! ## Contents
//!
//! - **Record types** exchanged with the backend: [`Project`],
//!   [`EquipmentSale`], [`MilestoneStructure`] and their timeline/schedule
//!   projections. Decoding is lenient: only `id` is required.
//! - **Typed identifiers** ([`ProjectId`], [`EquipmentSaleId`],
//!   [`MilestoneStructureId`], [`MilestoneId`]). You cannot pass a project id
//!   where a sale id is expected.
//! - **[`Amount`]**, a decimal quantity that accepts the backend's mixed
//!   number/string encoding.
//! - **Formatters** ([`format`]) turning numbers and dates into display text.
//! - **Schedule computation** ([`schedule`]) and **form validation**
//!   ([`validate`]) used before anything is sent to the backend.

pub mod amount;
pub mod equipment;
pub mod error;
pub mod format;
pub mod identity;
pub mod milestone;
pub mod project;
pub mod schedule;
pub mod validate;

pub use amount::Amount;
pub use equipment::{EquipmentSale, EquipmentSaleDraft, EquipmentSaleSchedule};
pub use error::ValidationError;
pub use format::{
    format_currency, format_currency_with, format_date, format_date_range, format_day,
    format_duration_days, format_number, format_percentage,
};
pub use identity::{EquipmentSaleId, MilestoneId, MilestoneStructureId, ProjectId};
pub use milestone::{
    MilestoneDraft, MilestoneStructure, MilestoneStructureDraft, MilestoneTerms, PaymentMilestone,
};
pub use project::{Project, ProjectDraft, ProjectTimeline, TimelineEntry};
pub use schedule::{compute_schedule, ScheduledMilestone};
