//! # Maintenance Schedule Calculation
//!
//! 月曆投影：月曆格建構、任務清單投影、月份導覽與任務表格查詢

pub mod grid;
pub mod navigation;
pub mod projector;
pub mod query;

use chrono::NaiveDate;
use serde::Serialize;

// Re-export 主要類型
pub use grid::{CalendarDay, CalendarGrid, CalendarGridBuilder, GRID_CELLS};
pub use navigation::NavigationController;
pub use projector::{StatusBreakdown, TaskCounts, TaskListProjector};
pub use query::{PageRequest, SortDirection, SortKey, SortSpec, TaskPage, TaskQuery};

/// 排程畫面快照
///
/// 畫面層需要的全部資料，皆為純資料。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    pub reference_date: NaiveDate,
    pub selected_date: NaiveDate,
    /// 如 `February 2024`
    pub month_label: String,
    pub grid: CalendarGrid,
    pub todays_tasks: Vec<maint_core::ScheduledTask>,
    pub upcoming_tasks: Vec<maint_core::ScheduledTask>,
    pub selected_day_tasks: Vec<maint_core::ScheduledTask>,
    pub counts: TaskCounts,
}

impl ScheduleSnapshot {
    pub fn to_json(&self) -> maint_core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
