//! 月曆格
//!
//! 固定產生 6 週 × 7 天 = 42 格，第一格一定是週日。31 天且 1 號落在週六的月份
//! 需要第 6 列才能放下月底，因此不論月份長度都產生 6 列。

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use maint_core::dates::{days_from_sunday, first_of_month, is_weekend, shift_days};
use maint_core::{Clock, ScheduledTask, TaskStore};
use serde::Serialize;

/// 每週天數
pub const DAYS_PER_WEEK: usize = 7;
/// 月曆列數
pub const GRID_WEEKS: usize = 6;
/// 月曆格數
pub const GRID_CELLS: usize = DAYS_PER_WEEK * GRID_WEEKS;

/// 月曆中的一天
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,

    /// 當天的任務（依任務集合原順序）
    pub tasks: Vec<ScheduledTask>,

    /// 是否屬於正在顯示的月份
    pub is_current_month: bool,

    pub is_today: bool,

    pub is_weekend: bool,
}

/// 一次建構產生的完整月曆
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid {
    reference_date: NaiveDate,
    days: Vec<CalendarDay>,
}

impl CalendarGrid {
    /// 錨定月份的參考日期
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// 42 格，依週排列
    pub fn cells(&self) -> &[CalendarDay] {
        &self.days
    }

    /// 6 列，每列 7 天（週日到週六）
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> + '_ {
        self.days.chunks(DAYS_PER_WEEK)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|day| day.date == date)
    }

    /// 涵蓋的日期範圍（含兩端）
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.days.first()?.date, self.days.last()?.date))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range()
            .map(|(start, end)| date >= start && date <= end)
            .unwrap_or(false)
    }

    /// 所有格子中的任務總數
    pub fn task_count(&self) -> usize {
        self.days.iter().map(|day| day.tasks.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// 月曆格建構器
pub struct CalendarGridBuilder;

impl CalendarGridBuilder {
    /// 月曆第一格：當月 1 號往前推到週日
    pub fn grid_start(reference_date: NaiveDate) -> maint_core::Result<NaiveDate> {
        let first = first_of_month(reference_date);
        shift_days(first, -i64::from(days_from_sunday(first)))
    }

    /// 建立月曆
    ///
    /// 每次都重新產生全部 42 格，不修改任務集合。
    pub fn build(
        reference_date: NaiveDate,
        store: &TaskStore,
        today: NaiveDate,
    ) -> maint_core::Result<CalendarGrid> {
        let start = Self::grid_start(reference_date)?;
        let end = shift_days(start, GRID_CELLS as i64 - 1)?;

        // 先按日期分組，每格只需查表
        let mut by_date: HashMap<NaiveDate, Vec<ScheduledTask>> = HashMap::new();
        for task in store.between(start, end) {
            by_date.entry(task.date).or_default().push(task.clone());
        }

        let days: Vec<CalendarDay> = start
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| CalendarDay {
                date,
                tasks: by_date.remove(&date).unwrap_or_default(),
                is_current_month: date.year() == reference_date.year()
                    && date.month() == reference_date.month(),
                is_today: date == today,
                is_weekend: is_weekend(date),
            })
            .collect();

        tracing::debug!(
            "建立月曆 {}：{} ~ {}，任務 {} 筆",
            reference_date.format("%Y-%m"),
            start,
            end,
            days.iter().map(|day| day.tasks.len()).sum::<usize>()
        );

        Ok(CalendarGrid {
            reference_date,
            days,
        })
    }

    /// 以時鐘提供「今天」建立月曆
    pub fn build_with_clock<C: Clock>(
        reference_date: NaiveDate,
        store: &TaskStore,
        clock: &C,
    ) -> maint_core::Result<CalendarGrid> {
        Self::build(reference_date, store, clock.today())
    }
}
