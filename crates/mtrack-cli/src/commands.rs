//! # Subcommand handlers
//!
//! - `view`: Render one page (`/`, `/milestones`, `/equipment`, `/chart`).
//! - `schedule`: Show the server-computed schedule of one or every sale.
//! - `assign`: Point an equipment sale at another milestone structure.
//! - `delete`: Delete a project, equipment sale, or milestone structure.
//! - `preview`: Validate a sale draft and compute its schedule locally.
//! - `create` / `update`: Save a project, sale, or structure from a JSON draft.
//!
//! Handlers return the process exit code. Store failures that the page can
//! still show (fetch errors, rejected form submissions) are printed and
//! exit with 1.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use serde::de::DeserializeOwned;

use mtrack_core::validate::{
    validate_equipment_sale, validate_milestone_offsets, validate_payment_percentages,
    validate_structure,
};
use mtrack_core::{
    compute_schedule, format_currency, Amount, EquipmentSaleDraft, EquipmentSaleId,
    MilestoneStructureDraft, MilestoneStructureId, ProjectDraft, ProjectId, ValidationError,
};
use mtrack_store::AppStores;

use crate::route::{parse_route, Route};
use crate::views;

/// Arguments for `mtrack view`.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// View path: `/`, `/milestones`, `/equipment` or `/chart`.
    #[arg(value_parser = parse_route, default_value = "/")]
    pub path: Route,
}

/// Arguments for `mtrack schedule`.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Equipment sale id. Omit to list every sale's schedule.
    #[arg(long)]
    pub sale: Option<u64>,
}

/// Arguments for `mtrack assign`.
#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Equipment sale id.
    #[arg(long)]
    pub sale: u64,
    /// Milestone structure id.
    #[arg(long)]
    pub structure: u64,
}

/// Record kinds accepted by `mtrack create`, `update` and `delete`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Project,
    Sale,
    Structure,
}

/// Arguments for `mtrack delete`.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Kind of record to delete.
    #[arg(value_enum)]
    pub kind: RecordKind,
    /// Record id.
    pub id: u64,
}

/// Arguments for `mtrack create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Kind of record to create.
    #[arg(value_enum)]
    pub kind: RecordKind,
    /// JSON file holding the draft.
    #[arg(long)]
    pub file: PathBuf,
}

/// Arguments for `mtrack update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Kind of record to update.
    #[arg(value_enum)]
    pub kind: RecordKind,
    /// Record id.
    pub id: u64,
    /// JSON file holding the replacement draft.
    #[arg(long)]
    pub file: PathBuf,
}

/// Arguments for `mtrack preview`.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Milestone structure id to schedule against.
    #[arg(long)]
    pub structure: u64,
    /// Total sale amount.
    #[arg(long)]
    pub total: f64,
    /// Project start date (YYYY-MM-DD).
    #[arg(long)]
    pub start: NaiveDate,
    /// Equipment name.
    #[arg(long, default_value = "Preview")]
    pub name: String,
    /// Vendor name.
    #[arg(long, default_value = "")]
    pub vendor: String,
    /// Number of units.
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
}

/// Fetch what `route` needs and render it. The flag is `true` when a
/// store reported an error.
pub async fn render_view(route: Route, stores: &AppStores) -> (String, bool) {
    match route {
        Route::Dashboard => {
            stores.projects.fetch_all().await;
            let state = stores.projects.snapshot();
            (views::dashboard(&state), state.error.is_some())
        }
        Route::MilestoneStructures => {
            stores.milestone_structures.fetch_all().await;
            let state = stores.milestone_structures.snapshot();
            (views::milestones(&state), state.error.is_some())
        }
        Route::EquipmentSales => {
            stores.equipment_sales.fetch_all().await;
            let state = stores.equipment_sales.snapshot();
            (views::equipment(&state), state.error.is_some())
        }
        Route::GanttChart => match stores.projects.timelines().await {
            Ok(timelines) => (views::gantt(&timelines, None), false),
            Err(e) => (views::gantt(&[], Some(e.message())), true),
        },
    }
}

/// Execute `mtrack view`.
pub async fn run_view(args: &ViewArgs, stores: &AppStores) -> Result<u8> {
    let (page, failed) = render_view(args.path, stores).await;
    print!("{page}");
    Ok(u8::from(failed))
}

/// Execute `mtrack schedule`.
pub async fn run_schedule(args: &ScheduleArgs, stores: &AppStores) -> Result<u8> {
    let schedules = match args.sale {
        Some(id) => vec![stores.equipment_sales.schedule(EquipmentSaleId::new(id)).await?],
        None => stores.equipment_sales.schedules().await?,
    };

    if schedules.is_empty() {
        println!("No equipment sales.");
    }
    for entry in &schedules {
        let title = format!(
            "{} ({}, total {})",
            entry.sale.name,
            entry.sale.vendor,
            format_currency(entry.sale.total_amount.map(|a| a.value()))
        );
        println!("{}", views::schedule(&title, &entry.milestone_schedule));
    }
    Ok(0)
}

/// Execute `mtrack assign`.
pub async fn run_assign(args: &AssignArgs, stores: &AppStores) -> Result<u8> {
    let sale_id = EquipmentSaleId::new(args.sale);
    let structure_id = MilestoneStructureId::new(args.structure);

    stores.equipment_sales.fetch_all().await;
    if stores.equipment_sales.find(sale_id).is_none() {
        tracing::warn!(%sale_id, "equipment sale not in the fetched list");
    }

    let sale = stores
        .equipment_sales
        .assign_milestone_structure(sale_id, structure_id)
        .await?;
    let structure = sale
        .milestone_structure
        .as_ref()
        .map(|s| s.name.as_str())
        .unwrap_or("none");
    println!("OK: equipment sale {sale_id} now uses milestone structure {structure}");
    Ok(0)
}

/// Execute `mtrack delete`.
pub async fn run_delete(args: &DeleteArgs, stores: &AppStores) -> Result<u8> {
    match args.kind {
        RecordKind::Project => stores.projects.delete(ProjectId::new(args.id)).await?,
        RecordKind::Sale => {
            stores
                .equipment_sales
                .delete(EquipmentSaleId::new(args.id))
                .await?
        }
        RecordKind::Structure => {
            stores
                .milestone_structures
                .delete(MilestoneStructureId::new(args.id))
                .await?
        }
    }
    println!("OK: deleted {:?} {}", args.kind, args.id);
    Ok(0)
}

/// Execute `mtrack preview`.
pub async fn run_preview(args: &PreviewArgs, stores: &AppStores) -> Result<u8> {
    let draft = EquipmentSaleDraft {
        name: args.name.clone(),
        vendor: args.vendor.clone(),
        quantity: args.quantity,
        total_amount: Amount::new(args.total),
        milestone_structure_id: MilestoneStructureId::new(args.structure),
        project_start_date: args.start,
    };
    validate_equipment_sale(&draft).context("invalid equipment sale")?;

    stores.milestone_structures.fetch_all().await;
    if let Some(error) = stores.milestone_structures.error() {
        bail!("{error}");
    }
    let Some(structure) = stores.milestone_structures.find(draft.milestone_structure_id) else {
        bail!("milestone structure not found: {}", draft.milestone_structure_id);
    };

    validate_payment_percentages(&structure.milestones)
        .and_then(|()| validate_milestone_offsets(&structure.milestones))
        .with_context(|| format!("milestone structure {:?} is not schedulable", structure.name))?;

    let rows = compute_schedule(draft.total_amount, &structure.milestones, draft.project_start_date);
    let title = format!("{} under {} from {}", draft.name, structure.name, args.start);
    print!("{}", views::schedule(&title, &rows));
    Ok(0)
}

/// Execute `mtrack create`.
pub async fn run_create(args: &CreateArgs, stores: &AppStores) -> Result<u8> {
    save(args.kind, None, &args.file, stores).await
}

/// Execute `mtrack update`.
pub async fn run_update(args: &UpdateArgs, stores: &AppStores) -> Result<u8> {
    save(args.kind, Some(args.id), &args.file, stores).await
}

fn read_draft<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse draft: {}", path.display()))
}

/// Print a form-level error the way the page shows it and yield exit code 1.
fn form_error(message: impl fmt::Display) -> u8 {
    println!("Error: {message}");
    1
}

async fn save(kind: RecordKind, id: Option<u64>, file: &Path, stores: &AppStores) -> Result<u8> {
    let verb = if id.is_some() { "updated" } else { "created" };
    match kind {
        RecordKind::Project => {
            let draft: ProjectDraft = read_draft(file)?;
            if draft.name.trim().is_empty() {
                return Ok(form_error(ValidationError::Required("Project name")));
            }
            let saved = match id {
                Some(id) => stores.projects.update(ProjectId::new(id), &draft).await,
                None => stores.projects.create(&draft).await,
            };
            match saved {
                Ok(project) => println!("OK: {verb} project {} {}", project.id, project.name),
                Err(e) => return Ok(form_error(e.message())),
            }
        }
        RecordKind::Sale => {
            let draft: EquipmentSaleDraft = read_draft(file)?;
            if let Err(e) = validate_equipment_sale(&draft) {
                return Ok(form_error(e));
            }
            let saved = match id {
                Some(id) => {
                    stores
                        .equipment_sales
                        .update(EquipmentSaleId::new(id), &draft)
                        .await
                }
                None => stores.equipment_sales.create(&draft).await,
            };
            let sale = match saved {
                Ok(sale) => sale,
                Err(e) => return Ok(form_error(e.message())),
            };
            println!("OK: {verb} equipment sale {} {}", sale.id, sale.name);
            if let Some(rows) = sale.local_schedule() {
                print!("{}", views::schedule("Payment schedule", &rows));
            }
        }
        RecordKind::Structure => {
            let draft: MilestoneStructureDraft = read_draft(file)?;
            if let Err(e) = validate_structure(&draft) {
                return Ok(form_error(e));
            }
            let saved = match id {
                Some(id) => {
                    stores
                        .milestone_structures
                        .update(MilestoneStructureId::new(id), &draft)
                        .await
                }
                None => stores.milestone_structures.create(&draft).await,
            };
            match saved {
                Ok(structure) => println!(
                    "OK: {verb} milestone structure {} {}",
                    structure.id, structure.name
                ),
                Err(e) => return Ok(form_error(e.message())),
            }
        }
    }
    Ok(0)
}
