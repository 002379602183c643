//! 任務表格查詢
//!
//! 順序固定：條件過濾 → 穩定排序 → 分頁切片。

use std::cmp::Ordering;

use maint_core::{MaintError, ScheduledTask, TaskPriority, TaskStatus, TaskStore, TaskType};
use serde::{Deserialize, Serialize};

/// 排序欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Date,
    Title,
    Equipment,
    Priority,
    Status,
    Duration,
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reverse(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }

    fn compare(&self, a: &ScheduledTask, b: &ScheduledTask) -> Ordering {
        let ordering = match self.key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Equipment => a
                .equipment_name
                .to_lowercase()
                .cmp(&b.equipment_name.to_lowercase()),
            SortKey::Priority => a.priority.cmp(&b.priority),
            SortKey::Status => a.status.cmp(&b.status),
            SortKey::Duration => a.duration_hours.cmp(&b.duration_hours),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// 分頁請求（頁碼從 0 開始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { index: 0, size: 10 }
    }
}

/// 查詢結果的一頁
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    pub items: Vec<ScheduledTask>,
    /// 過濾後的總筆數
    pub total_matches: usize,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
}

/// 任務表格查詢
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub task_type: Option<TaskType>,
    /// 不分大小寫，比對標題、設備、技師、地點
    pub search: Option<String>,
    pub sort: Option<SortSpec>,
    pub page: PageRequest,
}

impl TaskQuery {
    pub fn new() -> Self {
        Self::default()
    }

    // 過濾條件改變時回到第一頁

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self.page.index = 0;
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self.page.index = 0;
        self
    }

    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self.page.index = 0;
        self
    }

    pub fn with_search(mut self, text: &str) -> Self {
        let text = text.trim().to_lowercase();
        self.search = if text.is_empty() { None } else { Some(text) };
        self.page.index = 0;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page(mut self, index: usize, size: usize) -> Self {
        self.page = PageRequest { index, size };
        self
    }

    /// 是否符合所有過濾條件
    pub fn matches(&self, task: &ScheduledTask) -> bool {
        if self.status.is_some_and(|status| task.status != status) {
            return false;
        }
        if self.priority.is_some_and(|priority| task.priority != priority) {
            return false;
        }
        if self.task_type.is_some_and(|task_type| task.task_type != task_type) {
            return false;
        }

        match &self.search {
            Some(needle) => {
                let needle = needle.to_lowercase();
                [
                    &task.title,
                    &task.equipment_name,
                    &task.technician,
                    &task.location,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }

    /// 執行查詢
    pub fn execute(&self, store: &TaskStore) -> maint_core::Result<TaskPage> {
        if self.page.size == 0 {
            return Err(MaintError::InvalidConfig("分頁大小必須大於 0".to_string()));
        }

        let mut matched: Vec<&ScheduledTask> =
            store.iter().filter(|task| self.matches(task)).collect();

        if let Some(sort) = &self.sort {
            matched.sort_by(|a, b| sort.compare(a, b));
        }

        let total_matches = matched.len();
        let page_count = total_matches.div_ceil(self.page.size);
        let items = matched
            .into_iter()
            .skip(self.page.index.saturating_mul(self.page.size))
            .take(self.page.size)
            .cloned()
            .collect();

        tracing::debug!(
            "任務查詢：符合 {} 筆，第 {}/{} 頁",
            total_matches,
            self.page.index.saturating_add(1),
            page_count
        );

        Ok(TaskPage {
            items,
            total_matches,
            page_index: self.page.index,
            page_size: self.page.size,
            page_count,
        })
    }
}
