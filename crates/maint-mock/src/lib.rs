//! # Maintenance Schedule Mock Data
//!
//! 以種子產生可重現的排程任務，作為測試與展示用資料。

use chrono::{Duration, NaiveDate, NaiveTime};
use maint_core::{ScheduledTask, TaskPriority, TaskStatus, TaskStore, TaskType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use uuid::Builder;

pub const EQUIPMENT: [&str; 8] = [
    "Excavator 001",
    "Bulldozer 002",
    "Crane 003",
    "Forklift 004",
    "Generator 005",
    "Compressor 006",
    "Drill Press 007",
    "Lathe 008",
];

pub const TECHNICIANS: [&str; 8] = [
    "John Smith",
    "Sarah Johnson",
    "Mike Wilson",
    "Emily Davis",
    "Chris Brown",
    "Jessica Garcia",
    "David Miller",
    "Lisa Anderson",
];

pub const TITLES: [&str; 12] = [
    "Oil Change",
    "Filter Replacement",
    "Brake Inspection",
    "Battery Check",
    "Hydraulic Service",
    "Belt Replacement",
    "Calibration",
    "Safety Check",
    "Cleaning Service",
    "Lubrication",
    "Pressure Test",
    "Motor Repair",
];

pub const LOCATIONS: [&str; 7] = [
    "Workshop A",
    "Workshop B",
    "Factory Floor 1",
    "Factory Floor 2",
    "Warehouse North",
    "Production Line 1",
    "Assembly Area",
];

/// 可選工時（小時）
const DURATIONS: [i64; 6] = [1, 2, 3, 4, 6, 8];

/// 產生的狀態不含 Overdue
const STATUSES: [TaskStatus; 3] = [
    TaskStatus::Scheduled,
    TaskStatus::InProgress,
    TaskStatus::Completed,
];

/// 日期相對今天的範圍：往前 5 天到往後 24 天
const FIRST_DAY_OFFSET: i64 = -5;
const LAST_DAY_OFFSET: i64 = 24;

/// 最早開工時間 08:00
fn shift_start() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).expect("合法的時間常數")
}

/// 排程任務產生器
///
/// 同一個種子、同樣的呼叫順序會產生完全相同的任務（含ID）。
pub struct TaskFactory {
    seed: u64,
    rng: StdRng,
}

impl TaskFactory {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }

    /// 產生一筆任務，日期落在今天前後
    pub fn next_task(&mut self, today: NaiveDate) -> ScheduledTask {
        let offset = self.rng.gen_range(FIRST_DAY_OFFSET..=LAST_DAY_OFFSET);
        let date = today
            .checked_add_signed(Duration::days(offset))
            .unwrap_or(today);

        let start_time = shift_start() + Duration::hours(self.rng.gen_range(0..8));
        let duration = Decimal::from(self.pick(&DURATIONS));

        let id = Builder::from_random_bytes(self.rng.gen()).into_uuid();
        let title = self.pick(&TITLES).to_string();

        ScheduledTask::new(title, date, start_time, duration)
            .with_id(id)
            .with_equipment(self.pick(&EQUIPMENT).to_string())
            .with_technician(self.pick(&TECHNICIANS).to_string())
            .with_priority(self.pick(&TaskPriority::ALL))
            .with_status(self.pick(&STATUSES))
            .with_task_type(self.pick(&TaskType::ALL))
            .with_location(self.pick(&LOCATIONS).to_string())
    }

    /// 產生多筆任務
    pub fn generate(&mut self, count: usize, today: NaiveDate) -> Vec<ScheduledTask> {
        tracing::debug!("以種子 {} 產生 {} 筆任務", self.seed, count);
        (0..count).map(|_| self.next_task(today)).collect()
    }

    /// 產生任務並建立排序好的集合
    pub fn generate_store(
        &mut self,
        count: usize,
        today: NaiveDate,
    ) -> maint_core::Result<TaskStore> {
        TaskStore::new(self.generate(count, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::prelude::ToPrimitive;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_same_seed_same_tasks() {
        let a = TaskFactory::new(42).generate(45, today());
        let b = TaskFactory::new(42).generate(45, today());
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_differs() {
        let a = TaskFactory::new(1).generate(20, today());
        let b = TaskFactory::new(2).generate(20, today());
        assert_ne!(a, b);
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(2024)]
    fn test_generated_tasks_within_bounds(#[case] seed: u64) {
        let tasks = TaskFactory::new(seed).generate(100, today());
        let earliest = today() - Duration::days(5);
        let latest = today() + Duration::days(24);

        for task in &tasks {
            assert!(task.date >= earliest && task.date <= latest);
            assert!(task.start_time >= NaiveTime::from_hms_opt(8, 0, 0).unwrap());
            assert!(task.start_time <= NaiveTime::from_hms_opt(15, 0, 0).unwrap());
            assert!(DURATIONS.contains(&task.duration_hours.to_i64().unwrap()));
            assert_ne!(task.status, TaskStatus::Overdue);
            assert!(EQUIPMENT.contains(&task.equipment_name.as_str()));
        }
    }

    #[test]
    fn test_generate_store_sorted_and_unique() {
        let store = TaskFactory::new(42).generate_store(45, today()).unwrap();
        assert_eq!(store.len(), 45);
        assert!(store.tasks().windows(2).all(|w| w[0].date <= w[1].date));
    }
}
