//! 任務清單投影
//!
//! 今日、即將到來、選定日期三種清單與統計數字，全部由任務集合即時推得，
//! 不保存任何狀態。

use chrono::{Duration, NaiveDate};
use maint_core::{ScheduleConfig, ScheduledTask, TaskStatus, TaskStore};
use serde::Serialize;

/// 任務統計
///
/// 四個數字各自獨立過濾，不是互斥分區：同一任務可能同時計入多項。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    /// 今天
    pub today: usize,
    /// 今天起算的視窗內（含兩端）
    pub this_week: usize,
    /// 總數
    pub total: usize,
    /// 日期早於今天且未完成
    pub overdue: usize,
}

/// 各狀態任務數
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

/// 任務清單投影器
#[derive(Debug, Clone, Copy)]
pub struct TaskListProjector {
    upcoming_window_days: u32,
    upcoming_limit: usize,
}

impl Default for TaskListProjector {
    fn default() -> Self {
        Self::new(&ScheduleConfig::default())
    }
}

impl TaskListProjector {
    pub fn new(config: &ScheduleConfig) -> Self {
        Self {
            upcoming_window_days: config.upcoming_window_days,
            upcoming_limit: config.upcoming_limit,
        }
    }

    /// 視窗最後一天；超出日期範圍時取上限
    fn window_end(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_signed(Duration::days(i64::from(self.upcoming_window_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// 今天的任務
    pub fn todays_tasks(&self, store: &TaskStore, today: NaiveDate) -> Vec<ScheduledTask> {
        Self::selected_day_tasks(store, today)
    }

    /// 即將到來：`today < 日期 <= today + 視窗`，保留集合順序並截斷
    pub fn upcoming_tasks(&self, store: &TaskStore, today: NaiveDate) -> Vec<ScheduledTask> {
        let window_end = self.window_end(today);
        store
            .iter()
            .filter(|task| task.date > today && task.date <= window_end)
            .take(self.upcoming_limit)
            .cloned()
            .collect()
    }

    /// 選定日期的任務；每次呼叫都重新計算
    pub fn selected_day_tasks(store: &TaskStore, selected: NaiveDate) -> Vec<ScheduledTask> {
        store.on_date(selected).cloned().collect()
    }

    pub fn counts(&self, store: &TaskStore, today: NaiveDate) -> TaskCounts {
        let window_end = self.window_end(today);

        TaskCounts {
            today: store.on_date(today).count(),
            this_week: store.between(today, window_end).count(),
            total: store.len(),
            overdue: store.iter().filter(|task| task.is_overdue_on(today)).count(),
        }
    }

    /// 依狀態統計
    pub fn status_breakdown(store: &TaskStore) -> StatusBreakdown {
        store
            .iter()
            .fold(StatusBreakdown::default(), |mut acc, task| {
                match task.status {
                    TaskStatus::Scheduled => acc.scheduled += 1,
                    TaskStatus::InProgress => acc.in_progress += 1,
                    TaskStatus::Completed => acc.completed += 1,
                    TaskStatus::Overdue => acc.overdue += 1,
                }
                acc
            })
    }
}
