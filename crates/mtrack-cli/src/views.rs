//! # Text views
//!
//! Each view renders one page from store state. Rendering is pure: the
//! command layer fetches, the functions here only format.

use std::fmt::Write;

use chrono::{Days, NaiveDate};
use mtrack_core::{
    format_currency, format_date_range, format_day, format_duration_days, format_number,
    format_percentage, Amount, EquipmentSale, MilestoneStructure, Project, ProjectTimeline,
    ScheduledMilestone,
};
use mtrack_store::StoreState;

use crate::route::Route;

/// Bar width of the Gantt chart, in characters.
pub const GANTT_WIDTH: usize = 40;

fn heading(out: &mut String, route: Route) {
    let title = route.title();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

fn status<R>(out: &mut String, state: &StoreState<R>) {
    if let Some(error) = &state.error {
        let _ = writeln!(out, "Error: {error}");
    }
}

fn optional_day(date: Option<NaiveDate>) -> String {
    date.map(format_day).unwrap_or_else(|| "-".to_string())
}

/// Project count, total value, and one row per project.
pub fn dashboard(projects: &StoreState<Project>) -> String {
    let mut out = String::new();
    heading(&mut out, Route::Dashboard);
    status(&mut out, projects);

    let total: Amount = projects
        .items
        .iter()
        .map(|p| p.effective_total_value())
        .sum();
    let _ = writeln!(out, "Projects:    {}", format_number(Some(projects.items.len() as f64)));
    let _ = writeln!(out, "Total value: {}", format_currency(Some(total.value())));

    if projects.items.is_empty() {
        let _ = writeln!(out, "\nNo projects yet.");
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<30} {:<14} {:>6} {:>16}", "Project", "Start", "Sales", "Value");
    for project in &projects.items {
        let sales = project
            .equipment_sales_count
            .unwrap_or(project.equipment_sales.len() as u32);
        let _ = writeln!(
            out,
            "{:<30} {:<14} {:>6} {:>16}",
            project.name,
            optional_day(project.start_date),
            sales,
            format_currency(Some(project.effective_total_value().value())),
        );
    }
    out
}

/// Every structure with its milestones, percentages and offsets.
pub fn milestones(structures: &StoreState<MilestoneStructure>) -> String {
    let mut out = String::new();
    heading(&mut out, Route::MilestoneStructures);
    status(&mut out, structures);

    if structures.items.is_empty() {
        let _ = writeln!(out, "No milestone structures yet.");
        return out;
    }

    for structure in &structures.items {
        let _ = writeln!(
            out,
            "\n{} [#{}] total {} over {}",
            structure.name,
            structure.id,
            format_percentage(structure.total_percentage().value(), 2),
            format_duration_days(structure.span_days()),
        );
        if !structure.description.is_empty() {
            let _ = writeln!(out, "  {}", structure.description);
        }

        let mut ordered: Vec<_> = structure.milestones.iter().collect();
        ordered.sort_by_key(|m| m.order);
        for milestone in ordered {
            let _ = writeln!(
                out,
                "  {:>2}. {:<24} {:>8}  +{:<4} net {}",
                milestone.order,
                milestone.name,
                format_percentage(milestone.payment_percentage.value(), 2),
                milestone.days_after_previous,
                milestone.net_terms_days,
            );
        }
    }
    out
}

/// Every sale with quantity, total, unit price and structure name.
pub fn equipment(sales: &StoreState<EquipmentSale>) -> String {
    let mut out = String::new();
    heading(&mut out, Route::EquipmentSales);
    status(&mut out, sales);

    if sales.items.is_empty() {
        let _ = writeln!(out, "No equipment sales yet.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<24} {:<16} {:>5} {:>16} {:>14} {:<20} {}",
        "Equipment", "Vendor", "Qty", "Total", "Unit", "Structure", "Start"
    );
    for sale in &sales.items {
        let structure = sale
            .milestone_structure
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("-");
        let _ = writeln!(
            out,
            "{:<24} {:<16} {:>5} {:>16} {:>14} {:<20} {}",
            sale.name,
            sale.vendor,
            format_number(Some(f64::from(sale.quantity))),
            format_currency(sale.total_amount.map(|a| a.value())),
            format_currency(sale.effective_unit_price().map(|a| a.value())),
            structure,
            optional_day(sale.project_start_date),
        );
    }
    out
}

/// Bar for the span `[start, end]` on a `0..=scale` axis.
///
/// Zero-length spans render as a single `*` marker.
pub fn gantt_bar(start: u32, end: u32, scale: u32, width: usize) -> String {
    let scale = scale.max(1) as usize;
    let col = |days: u32| (days as usize * width / scale).min(width);
    let mut from = col(start);
    let to = col(end.max(start));
    if to <= from {
        // keep the marker inside the axis
        from = from.min(width.saturating_sub(1));
    }

    let mut bar = " ".repeat(from);
    if to <= from {
        bar.push('*');
    } else {
        bar.push_str(&"#".repeat(to - from));
    }
    let used = bar.chars().count();
    bar.push_str(&" ".repeat(width.saturating_sub(used)));
    bar
}

/// One Gantt row per timeline entry, grouped by project.
pub fn gantt(timelines: &[ProjectTimeline], error: Option<&str>) -> String {
    let mut out = String::new();
    heading(&mut out, Route::GanttChart);
    if let Some(error) = error {
        let _ = writeln!(out, "Error: {error}");
    }

    let scale = timelines
        .iter()
        .flat_map(|t| t.project_timeline.iter())
        .map(|e| e.end_days)
        .max()
        .unwrap_or(0);

    if scale == 0 && timelines.iter().all(|t| t.project_timeline.is_empty()) {
        let _ = writeln!(out, "No scheduled payments.");
        return out;
    }

    for timeline in timelines {
        let project = &timeline.project;
        let last_due = timeline.project_timeline.iter().filter_map(|e| e.due_date).max();
        match (project.start_date, last_due) {
            (Some(start), Some(end)) => {
                let span = format_date_range(&start.to_string(), &end.to_string());
                let _ = writeln!(out, "\n{} ({span})", project.name);
            }
            _ => {
                let _ = writeln!(
                    out,
                    "\n{} (starts {})",
                    project.name,
                    optional_day(project.start_date)
                );
            }
        }
        if timeline.project_timeline.is_empty() {
            let _ = writeln!(out, "  no scheduled payments");
            continue;
        }
        for entry in &timeline.project_timeline {
            let start = project
                .start_date
                .and_then(|d| d.checked_add_days(Days::new(u64::from(entry.start_days))));
            let label = format!("{} / {}", entry.sale_name, entry.milestone_name);
            let _ = writeln!(
                out,
                "  {:<32} |{}| {:<13} {:<13} {:>14}",
                label,
                gantt_bar(entry.start_days, entry.end_days, scale, GANTT_WIDTH),
                optional_day(start),
                optional_day(entry.due_date),
                format_currency(Some(entry.payment_amount)),
            );
        }
    }
    out
}

/// A sale's payment schedule as a table, with a closing total.
pub fn schedule(title: &str, rows: &[ScheduledMilestone]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(
        out,
        "{:<24} {:>8} {:>14} {:<13} {:<13}",
        "Milestone", "Share", "Amount", "Due", "Payment due"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<24} {:>8} {:>14} {:<13} {:<13}",
            row.name,
            format_percentage(row.payment_percentage, 2),
            format_currency(Some(row.payment_amount)),
            optional_day(row.due_date),
            optional_day(row.payment_due_date),
        );
    }
    let total: Amount = rows.iter().map(|r| Amount::new(r.payment_amount)).sum();
    let _ = writeln!(
        out,
        "{:<24} {:>8} {:>14}",
        "Total",
        "",
        format_currency(Some(total.value()))
    );
    out
}
