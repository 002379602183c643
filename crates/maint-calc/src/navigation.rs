//! 月曆導覽
//!
//! 持有兩個互相獨立的狀態：錨定月曆月份的參考日期，以及日細節面板的選定日期。
//! 參考日期每次變動都整張重建月曆；選定日期變動不重建。

use chrono::NaiveDate;
use maint_core::dates::{month_label, shift_months};
use maint_core::{Clock, ScheduleConfig, ScheduledTask, SystemClock, TaskStore};

use crate::grid::{CalendarGrid, CalendarGridBuilder};
use crate::projector::{StatusBreakdown, TaskCounts, TaskListProjector};
use crate::ScheduleSnapshot;

/// 月曆導覽控制器
pub struct NavigationController<C: Clock = SystemClock> {
    store: TaskStore,
    config: ScheduleConfig,
    projector: TaskListProjector,
    clock: C,
    reference_date: NaiveDate,
    selected_date: NaiveDate,
    grid: CalendarGrid,
    /// 月曆重建次數
    generation: u64,
}

impl NavigationController<SystemClock> {
    /// 使用系統時鐘與預設配置
    pub fn new(store: TaskStore) -> maint_core::Result<Self> {
        Self::with_clock(store, ScheduleConfig::default(), SystemClock)
    }
}

impl<C: Clock> NavigationController<C> {
    /// 參考日期與選定日期都從今天開始
    pub fn with_clock(
        store: TaskStore,
        config: ScheduleConfig,
        clock: C,
    ) -> maint_core::Result<Self> {
        config.validate()?;

        let today = clock.today();
        let grid = CalendarGridBuilder::build(today, &store, today)?;

        Ok(Self {
            projector: TaskListProjector::new(&config),
            store,
            config,
            clock,
            reference_date: today,
            selected_date: today,
            grid,
            generation: 1,
        })
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// 月曆已重建的次數（含初次建立）
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 上個月（日期夾到該月最後一天）
    pub fn go_to_previous_month(&mut self) -> maint_core::Result<&CalendarGrid> {
        let target = shift_months(self.reference_date, -1)?;
        self.set_reference_date(target)
    }

    /// 下個月（日期夾到該月最後一天）
    pub fn go_to_next_month(&mut self) -> maint_core::Result<&CalendarGrid> {
        let target = shift_months(self.reference_date, 1)?;
        self.set_reference_date(target)
    }

    /// 回到今天：參考日期與選定日期都重設
    pub fn go_to_today(&mut self) -> maint_core::Result<&CalendarGrid> {
        let today = self.clock.today();
        self.selected_date = today;
        self.set_reference_date(today)
    }

    /// 直接跳到任一日期所在月份
    ///
    /// 重建失敗時保留原本的參考日期與月曆。
    pub fn set_reference_date(&mut self, date: NaiveDate) -> maint_core::Result<&CalendarGrid> {
        let grid = CalendarGridBuilder::build(date, &self.store, self.clock.today())?;

        tracing::debug!("月曆導覽 {} -> {}", self.reference_date, date);
        self.reference_date = date;
        self.grid = grid;
        self.generation += 1;
        Ok(&self.grid)
    }

    /// 以目前的參考日期重建（例如時鐘跨日之後）
    pub fn refresh(&mut self) -> maint_core::Result<&CalendarGrid> {
        self.set_reference_date(self.reference_date)
    }

    /// 選定日期，不改變參考日期，也不重建月曆
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn todays_tasks(&self) -> Vec<ScheduledTask> {
        self.projector.todays_tasks(&self.store, self.clock.today())
    }

    pub fn upcoming_tasks(&self) -> Vec<ScheduledTask> {
        self.projector.upcoming_tasks(&self.store, self.clock.today())
    }

    pub fn selected_day_tasks(&self) -> Vec<ScheduledTask> {
        TaskListProjector::selected_day_tasks(&self.store, self.selected_date)
    }

    pub fn counts(&self) -> TaskCounts {
        self.projector.counts(&self.store, self.clock.today())
    }

    pub fn status_breakdown(&self) -> StatusBreakdown {
        TaskListProjector::status_breakdown(&self.store)
    }

    /// 交給畫面層的完整快照
    pub fn snapshot(&self) -> ScheduleSnapshot {
        ScheduleSnapshot {
            reference_date: self.reference_date,
            selected_date: self.selected_date,
            month_label: month_label(self.reference_date),
            grid: self.grid.clone(),
            todays_tasks: self.todays_tasks(),
            upcoming_tasks: self.upcoming_tasks(),
            selected_day_tasks: self.selected_day_tasks(),
            counts: self.counts(),
        }
    }
}
