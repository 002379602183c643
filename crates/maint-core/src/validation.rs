//! 新增任務表單驗證
//!
//! 每個欄位對應一組規則，提交時一次評估全部欄位並回報所有錯誤。

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::ScheduleConfig;
use crate::dates::parse_hhmm;
use crate::task::{ScheduledTask, TaskPriority, TaskType};
use crate::{MaintError, Result};

/// 欄位規則
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldRule {
    /// 必填
    Required,
    /// 最少字元數
    MinLength(usize),
    /// 最小值（含）
    Min(Decimal),
    /// 最大值（含）
    Max(Decimal),
    /// `HH:MM` 時間格式
    TimeFormat,
}

/// 單一欄位錯誤
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub rule: FieldRule,
}

impl FieldError {
    pub fn new(field: &'static str, rule: FieldRule) -> Self {
        Self { field, rule }
    }

    /// 給使用者看的訊息
    pub fn message(&self) -> String {
        let name = display_name(self.field);
        match &self.rule {
            FieldRule::Required => format!("{} is required", name),
            FieldRule::MinLength(len) => {
                format!("{} must be at least {} characters", name, len)
            }
            FieldRule::Min(min) => format!("{} must be at least {}", name, min),
            FieldRule::Max(max) => format!("{} must be at most {}", name, max),
            FieldRule::TimeFormat => format!("{} must be in HH:MM format", name),
        }
    }
}

fn display_name(field: &str) -> &str {
    match field {
        "title" => "Task Title",
        "description" => "Description",
        "equipment" => "Equipment",
        "technician" => "Assigned Technician",
        "location" => "Location",
        "date" => "Scheduled Date",
        "start_time" => "Start Time",
        "duration_hours" => "Estimated Duration",
        "estimated_cost" => "Estimated Cost",
        other => other,
    }
}

/// 驗證結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// 欄位的第一個錯誤
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|err| err.field == field)
    }

    fn push(&mut self, field: &'static str, rule: FieldRule) {
        self.errors.push(FieldError::new(field, rule));
    }

    /// 必填字串，並檢查最少字元數
    fn check_text(&mut self, field: &'static str, value: &str, min_len: Option<usize>) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, FieldRule::Required);
            return;
        }
        if let Some(min_len) = min_len {
            if trimmed.chars().count() < min_len {
                self.push(field, FieldRule::MinLength(min_len));
            }
        }
    }

    fn check_range(
        &mut self,
        field: &'static str,
        value: Decimal,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) {
        if let Some(min) = min {
            if value < min {
                self.push(field, FieldRule::Min(min));
                return;
            }
        }
        if let Some(max) = max {
            if value > max {
                self.push(field, FieldRule::Max(max));
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(FieldError::message).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// 新增任務表單
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskForm {
    pub title: String,
    pub description: String,
    pub equipment: String,
    pub technician: String,
    pub location: String,
    pub date: Option<NaiveDate>,
    pub start_time: String,
    pub duration_hours: Option<Decimal>,
    pub estimated_cost: Option<Decimal>,
    pub priority: TaskPriority,
    pub task_type: TaskType,
    pub notes: Option<String>,
}

impl Default for NewTaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            equipment: String::new(),
            technician: String::new(),
            location: String::new(),
            date: None,
            start_time: String::new(),
            duration_hours: Some(Decimal::ONE),
            estimated_cost: None,
            priority: TaskPriority::Medium,
            task_type: TaskType::Preventive,
            notes: None,
        }
    }
}

impl NewTaskForm {
    /// 預設排在明天的空白表單
    pub fn for_tomorrow(today: NaiveDate) -> Self {
        Self {
            date: today.succ_opt(),
            ..Self::default()
        }
    }

    /// 依排程設定預填：明天、工作時段開始、預設工時
    pub fn from_settings(today: NaiveDate, config: &ScheduleConfig) -> Self {
        Self {
            start_time: config.working_hours_start.format("%H:%M").to_string(),
            duration_hours: Some(config.default_task_duration_hours),
            ..Self::for_tomorrow(today)
        }
    }

    /// 評估所有欄位
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        report.check_text("title", &self.title, Some(3));
        report.check_text("description", &self.description, Some(10));
        report.check_text("equipment", &self.equipment, None);
        report.check_text("technician", &self.technician, None);
        report.check_text("location", &self.location, None);

        if self.date.is_none() {
            report.push("date", FieldRule::Required);
        }

        if self.start_time.trim().is_empty() {
            report.push("start_time", FieldRule::Required);
        } else if parse_hhmm(&self.start_time).is_none() {
            report.push("start_time", FieldRule::TimeFormat);
        }

        match self.duration_hours {
            None => report.push("duration_hours", FieldRule::Required),
            Some(hours) => report.check_range(
                "duration_hours",
                hours,
                Some(Decimal::new(5, 1)),
                Some(Decimal::from(24)),
            ),
        }

        if let Some(cost) = self.estimated_cost {
            report.check_range("estimated_cost", cost, Some(Decimal::ZERO), None);
        }

        report
    }

    /// 驗證後建立排程任務（狀態為 Scheduled）
    pub fn into_task(&self) -> Result<ScheduledTask> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(MaintError::Validation(report));
        }

        // 驗證通過代表以下欄位皆存在
        let (Some(date), Some(start_time), Some(duration)) = (
            self.date,
            parse_hhmm(&self.start_time),
            self.duration_hours,
        ) else {
            return Err(MaintError::Validation(report));
        };

        let mut task =
            ScheduledTask::new(self.title.trim().to_string(), date, start_time, duration)
                .with_equipment(self.equipment.trim().to_string())
                .with_technician(self.technician.trim().to_string())
                .with_location(self.location.trim().to_string())
                .with_priority(self.priority)
                .with_task_type(self.task_type)
                .with_description(self.description.trim().to_string());

        if let Some(cost) = self.estimated_cost {
            task = task.with_estimated_cost(cost);
        }
        if let Some(notes) = self.notes.as_deref().map(str::trim) {
            if !notes.is_empty() {
                task = task.with_notes(notes.to_string());
            }
        }

        Ok(task)
    }
}
