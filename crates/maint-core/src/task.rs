//! 排程任務模型

use chrono::{Duration, NaiveDate, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::{parse_day, parse_hhmm};
use crate::{MaintError, Result};

/// 任務優先級
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// 任務狀態
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TaskStatus {
    /// 已排程
    #[default]
    Scheduled,
    /// 進行中
    #[serde(rename = "In Progress")]
    InProgress,
    /// 已完成
    Completed,
    /// 逾期
    Overdue,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        Self::Scheduled,
        Self::InProgress,
        Self::Completed,
        Self::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }
}

/// 維護類型
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TaskType {
    /// 預防性維護
    #[default]
    Preventive,
    /// 矯正性維護
    Corrective,
    /// 緊急維修
    Emergency,
    /// 巡檢
    Inspection,
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [
        Self::Preventive,
        Self::Corrective,
        Self::Emergency,
        Self::Inspection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preventive => "Preventive",
            Self::Corrective => "Corrective",
            Self::Emergency => "Emergency",
            Self::Inspection => "Inspection",
        }
    }
}

/// 排在日曆上的維護任務
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    /// 任務ID（建立時指派，生命週期內不變）
    pub id: Uuid,

    /// 標題
    pub title: String,

    /// 設備名稱
    pub equipment_name: String,

    /// 負責技師
    pub technician: String,

    /// 日曆日（不含時間）
    pub date: NaiveDate,

    /// 開始時間（僅供顯示，不參與排序）
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,

    /// 結束時間
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,

    /// 工時（小時）
    #[serde(rename = "duration")]
    pub duration_hours: Decimal,

    pub priority: TaskPriority,

    pub status: TaskStatus,

    #[serde(rename = "type")]
    pub task_type: TaskType,

    /// 地點
    pub location: String,

    /// 工作說明
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 預估成本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ScheduledTask {
    /// 創建新的排程任務
    ///
    /// 結束時間由開始時間加上工時推得。
    pub fn new(
        title: String,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_hours: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            equipment_name: String::new(),
            technician: String::new(),
            date,
            start_time,
            end_time: end_time_after(start_time, duration_hours),
            duration_hours,
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            task_type: TaskType::default(),
            location: String::new(),
            description: None,
            estimated_cost: None,
            notes: None,
        }
    }

    /// 建構器模式：指定ID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// 建構器模式：設置設備
    pub fn with_equipment(mut self, equipment_name: String) -> Self {
        self.equipment_name = equipment_name;
        self
    }

    /// 建構器模式：設置技師
    pub fn with_technician(mut self, technician: String) -> Self {
        self.technician = technician;
        self
    }

    /// 建構器模式：設置優先級
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// 建構器模式：設置維護類型
    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    /// 建構器模式：設置地點
    pub fn with_location(mut self, location: String) -> Self {
        self.location = location;
        self
    }

    /// 建構器模式：設置工作說明
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    /// 建構器模式：設置預估成本
    pub fn with_estimated_cost(mut self, cost: Decimal) -> Self {
        self.estimated_cost = Some(cost);
        self
    }

    /// 建構器模式：設置備註
    pub fn with_notes(mut self, notes: String) -> Self {
        self.notes = Some(notes);
        self
    }

    /// 建構器模式：覆寫結束時間
    pub fn with_end_time(mut self, end_time: NaiveTime) -> Self {
        self.end_time = end_time;
        self
    }

    /// 是否落在指定日曆日
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// 相對於 `today` 是否逾期（日期早於今天且未完成）
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.date < today && !self.is_completed()
    }
}

/// 單一任務工時上限（小時）
pub const MAX_TASK_HOURS: i64 = 24;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// 開始時間加上工時；跨過午夜時停在 23:59
pub fn end_time_after(start: NaiveTime, duration_hours: Decimal) -> NaiveTime {
    let minutes = match duration_hours
        .checked_mul(Decimal::from(60))
        .and_then(|minutes| minutes.round().to_i64())
    {
        Some(minutes) => minutes.clamp(0, MINUTES_PER_DAY),
        None if duration_hours.is_sign_negative() => 0,
        None => MINUTES_PER_DAY,
    };
    let (end, wrapped_secs) = start.overflowing_add_signed(Duration::minutes(minutes));

    if wrapped_secs != 0 {
        NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(end)
    } else {
        end
    }
}

/// 外部來源（產生器或 API）交付的任務記錄
///
/// 日期與時間以字串傳入，於 [`TaskRecord::into_task`] 驗證。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub equipment_name: String,
    #[serde(default)]
    pub technician: String,
    #[serde(default)]
    pub date: Option<String>,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    pub duration: Decimal,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TaskRecord {
    /// 錯誤訊息中用來指稱這筆記錄的字串
    fn label(&self) -> String {
        match self.id {
            Some(id) => format!("{} ({})", self.title, id),
            None => self.title.clone(),
        }
    }

    /// 轉換為排程任務
    ///
    /// 缺少或無法解析的日期直接拒絕，避免任務在所有日曆格中消失。
    pub fn into_task(self) -> Result<ScheduledTask> {
        let raw_date = match self.date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Err(MaintError::MissingDate { task: self.label() }),
        };
        let date = parse_day(raw_date).ok_or_else(|| MaintError::InvalidDate {
            task: self.label(),
            value: raw_date.to_string(),
        })?;

        let start_time = parse_hhmm(&self.start_time)
            .ok_or_else(|| MaintError::InvalidTime(self.start_time.clone()))?;

        if self.duration <= Decimal::ZERO || self.duration > Decimal::from(MAX_TASK_HOURS) {
            return Err(MaintError::InvalidDuration {
                task: self.label(),
                value: self.duration,
            });
        }

        let mut task = ScheduledTask::new(self.title, date, start_time, self.duration)
            .with_equipment(self.equipment_name)
            .with_technician(self.technician)
            .with_priority(self.priority)
            .with_status(self.status)
            .with_task_type(self.task_type)
            .with_location(self.location);
        task.description = self.description;
        task.estimated_cost = self.estimated_cost;
        task.notes = self.notes;

        if let Some(id) = self.id {
            task = task.with_id(id);
        }
        if let Some(raw_end) = self.end_time.as_deref() {
            let end_time =
                parse_hhmm(raw_end).ok_or_else(|| MaintError::InvalidTime(raw_end.to_string()))?;
            task = task.with_end_time(end_time);
        }

        Ok(task)
    }
}

/// `HH:MM` 時間格式的 serde 轉換
mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid HH:MM time: {}", raw)))
    }
}
