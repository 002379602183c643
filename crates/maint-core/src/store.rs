//! 任務集合

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::task::{ScheduledTask, TaskRecord};
use crate::{MaintError, Result};

/// 排程任務集合（建立後唯讀）
///
/// 建立時依日期遞增做穩定排序；同一天的任務保留原始相對順序。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<ScheduledTask>,
}

impl TaskStore {
    /// 從已驗證的任務建立集合
    pub fn new(mut tasks: Vec<ScheduledTask>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id) {
                return Err(MaintError::DuplicateTaskId(task.id));
            }
        }

        tasks.sort_by_key(|task| task.date);

        tracing::info!("載入排程任務 {} 筆", tasks.len());
        Ok(Self { tasks })
    }

    /// 空集合
    pub fn empty() -> Self {
        Self::default()
    }

    /// 從外部記錄建立集合，任一筆無效即整批拒絕
    pub fn from_records(records: Vec<TaskRecord>) -> Result<Self> {
        let tasks = records
            .into_iter()
            .map(|record| {
                record.into_task().map_err(|err| {
                    tracing::warn!("拒絕任務記錄: {}", err);
                    err
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(tasks)
    }

    /// 從 JSON 陣列建立集合
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<TaskRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledTask> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 依ID查找任務
    pub fn get(&self, id: Uuid) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// 指定日曆日的任務
    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = &ScheduledTask> + '_ {
        self.tasks.iter().filter(move |task| task.is_on(date))
    }

    /// 日期落在 `[start, end]`（含兩端）的任務
    pub fn between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &ScheduledTask> + '_ {
        self.tasks
            .iter()
            .filter(move |task| task.date >= start && task.date <= end)
    }
}

impl<'a> IntoIterator for &'a TaskStore {
    type Item = &'a ScheduledTask;
    type IntoIter = std::slice::Iter<'a, ScheduledTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
