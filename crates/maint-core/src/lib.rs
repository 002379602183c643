//! # Maintenance Schedule Core
//!
//! 維護排程的核心資料模型與類型定義

pub mod clock;
pub mod config;
pub mod dates;
pub mod store;
pub mod task;
pub mod validation;

// Re-export 主要類型
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ScheduleConfig, SettingsStore};
pub use store::TaskStore;
pub use task::{ScheduledTask, TaskPriority, TaskRecord, TaskStatus, TaskType};
pub use validation::{FieldError, FieldRule, NewTaskForm, ValidationReport};

/// 維護排程錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MaintError {
    #[error("任務缺少日期: {task}")]
    MissingDate { task: String },

    #[error("任務日期無法解析: {task} ({value})")]
    InvalidDate { task: String, value: String },

    #[error("無效的時間（需為 HH:MM）: {0}")]
    InvalidTime(String),

    #[error("任務工時超出範圍: {task} ({value} 小時)")]
    InvalidDuration {
        task: String,
        value: rust_decimal::Decimal,
    },

    #[error("日期超出範圍: {0}")]
    DateOutOfRange(String),

    #[error("重複的任務ID: {0}")]
    DuplicateTaskId(uuid::Uuid),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("表單驗證失敗: {0}")]
    Validation(ValidationReport),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MaintError>;
