//! # View routes
//!
//! | Path | View |
//! |------|------|
//! | `/` | Dashboard |
//! | `/milestones` | Milestone structures |
//! | `/equipment` | Equipment sales |
//! | `/chart` | Gantt chart |

use std::fmt;

/// One page of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    MilestoneStructures,
    EquipmentSales,
    GanttChart,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Dashboard,
        Route::MilestoneStructures,
        Route::EquipmentSales,
        Route::GanttChart,
    ];

    /// Resolve a view path. A single trailing slash is ignored; anything
    /// else unknown is rejected.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = match path.trim() {
            "/" => "/",
            other => other.strip_suffix('/').unwrap_or(other),
        };
        Route::ALL.into_iter().find(|r| r.path() == trimmed)
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::MilestoneStructures => "/milestones",
            Route::EquipmentSales => "/equipment",
            Route::GanttChart => "/chart",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::MilestoneStructures => "Milestone Structures",
            Route::EquipmentSales => "Equipment Sales",
            Route::GanttChart => "Payment Timeline",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// clap value parser for view paths.
pub fn parse_route(raw: &str) -> Result<Route, String> {
    Route::from_path(raw).ok_or_else(|| {
        let known: Vec<&str> = Route::ALL.iter().map(|r| r.path()).collect();
        format!("unknown view {raw:?} (expected one of {})", known.join(", "))
    })
}
