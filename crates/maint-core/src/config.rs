//! 排程配置模型

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MaintError, Result};

/// 排程畫面與維護設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// 「即將到來」的視窗天數（不含今天）
    pub upcoming_window_days: u32,

    /// 「即將到來」清單最多顯示筆數
    pub upcoming_limit: usize,

    /// 新任務預設工時（小時）
    pub default_task_duration_hours: Decimal,

    /// 工作時段開始
    pub working_hours_start: NaiveTime,

    /// 工作時段結束
    pub working_hours_end: NaiveTime,

    /// 是否允許週末維護
    pub weekend_maintenance: bool,

    /// 提前幾天提醒
    pub reminder_days_before: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            upcoming_window_days: 7,
            upcoming_limit: 5,
            default_task_duration_hours: Decimal::from(2),
            working_hours_start: NaiveTime::from_hms_opt(8, 0, 0).expect("合法的時間常數"),
            working_hours_end: NaiveTime::from_hms_opt(17, 0, 0).expect("合法的時間常數"),
            weekend_maintenance: false,
            reminder_days_before: 3,
        }
    }
}

impl ScheduleConfig {
    /// 建構器模式：設置即將到來的視窗天數
    pub fn with_upcoming_window(mut self, days: u32) -> Self {
        self.upcoming_window_days = days;
        self
    }

    /// 建構器模式：設置即將到來清單上限
    pub fn with_upcoming_limit(mut self, limit: usize) -> Self {
        self.upcoming_limit = limit;
        self
    }

    /// 建構器模式：設置預設工時
    pub fn with_default_duration(mut self, hours: Decimal) -> Self {
        self.default_task_duration_hours = hours;
        self
    }

    /// 建構器模式：設置工作時段
    pub fn with_working_hours(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.working_hours_start = start;
        self.working_hours_end = end;
        self
    }

    /// 建構器模式：設置是否允許週末維護
    pub fn with_weekend_maintenance(mut self, allow: bool) -> Self {
        self.weekend_maintenance = allow;
        self
    }

    /// 建構器模式：設置提醒天數
    pub fn with_reminder_days(mut self, days: u32) -> Self {
        self.reminder_days_before = days;
        self
    }

    /// 檢查配置是否合法
    pub fn validate(&self) -> Result<()> {
        if self.upcoming_window_days == 0 {
            return Err(MaintError::InvalidConfig(
                "upcoming_window_days 必須大於 0".to_string(),
            ));
        }
        if self.upcoming_limit == 0 {
            return Err(MaintError::InvalidConfig(
                "upcoming_limit 必須大於 0".to_string(),
            ));
        }
        let hours = self.default_task_duration_hours;
        if hours < Decimal::new(5, 1) || hours > Decimal::from(24) {
            return Err(MaintError::InvalidConfig(format!(
                "default_task_duration_hours 必須介於 0.5 到 24: {}",
                hours
            )));
        }
        if !(1..=30).contains(&self.reminder_days_before) {
            return Err(MaintError::InvalidConfig(format!(
                "reminder_days_before 必須介於 1 到 30: {}",
                self.reminder_days_before
            )));
        }
        if self.working_hours_end <= self.working_hours_start {
            return Err(MaintError::InvalidConfig(format!(
                "工作時段結束 {} 必須晚於開始 {}",
                self.working_hours_end, self.working_hours_start
            )));
        }
        Ok(())
    }
}

/// 設定存放區
///
/// 取代畫面上「模擬延遲儲存」的作法：載入、更新皆先驗證再提交，
/// 失敗時保留原值與版本號。
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    current: ScheduleConfig,
    revision: u64,
}

impl SettingsStore {
    /// 以指定配置建立
    pub fn new(config: ScheduleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            current: config,
            revision: 0,
        })
    }

    /// 從 JSON 載入；缺少的欄位使用預設值
    pub fn load_json(json: &str) -> Result<Self> {
        let config: ScheduleConfig = serde_json::from_str(json)?;
        let store = Self::new(config)?;
        tracing::info!("已載入排程設定");
        Ok(store)
    }

    pub fn current(&self) -> &ScheduleConfig {
        &self.current
    }

    /// 每次成功更新遞增
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// 以閉包修改設定副本，驗證通過後提交
    pub fn update<F>(&mut self, change: F) -> Result<&ScheduleConfig>
    where
        F: FnOnce(&mut ScheduleConfig),
    {
        let mut draft = self.current.clone();
        change(&mut draft);
        draft.validate()?;

        self.current = draft;
        self.revision += 1;
        tracing::info!("排程設定已更新，版本 {}", self.revision);
        Ok(&self.current)
    }

    /// 還原為預設值
    pub fn reset(&mut self) {
        self.current = ScheduleConfig::default();
        self.revision += 1;
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.current)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = ScheduleConfig::default();
        assert_eq!(config.upcoming_window_days, 7);
        assert_eq!(config.upcoming_limit, 5);
        assert_eq!(config.default_task_duration_hours, Decimal::from(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ScheduleConfig::default()
            .with_upcoming_window(14)
            .with_upcoming_limit(10)
            .with_default_duration(Decimal::new(15, 1))
            .with_weekend_maintenance(true)
            .with_reminder_days(1);

        assert_eq!(config.upcoming_window_days, 14);
        assert_eq!(config.upcoming_limit, 10);
        assert_eq!(config.default_task_duration_hours, Decimal::new(15, 1));
        assert!(config.weekend_maintenance);
        assert_eq!(config.reminder_days_before, 1);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(ScheduleConfig::default()
            .with_upcoming_window(0)
            .validate()
            .is_err());
        assert!(ScheduleConfig::default()
            .with_upcoming_limit(0)
            .validate()
            .is_err());
        assert!(ScheduleConfig::default()
            .with_default_duration(Decimal::ZERO)
            .validate()
            .is_err());

        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert!(ScheduleConfig::default()
            .with_working_hours(nine, nine)
            .validate()
            .is_err());
    }

    #[rstest]
    #[case(Decimal::new(4, 1), 3, false)]
    #[case(Decimal::new(5, 1), 3, true)]
    #[case(Decimal::from(24), 3, true)]
    #[case(Decimal::new(241, 1), 3, false)]
    #[case(Decimal::from(100), 3, false)]
    #[case(Decimal::from(2), 0, false)]
    #[case(Decimal::from(2), 1, true)]
    #[case(Decimal::from(2), 30, true)]
    #[case(Decimal::from(2), 31, false)]
    fn test_duration_and_reminder_bounds(
        #[case] hours: Decimal,
        #[case] reminder_days: u32,
        #[case] valid: bool,
    ) {
        let result = ScheduleConfig::default()
            .with_default_duration(hours)
            .with_reminder_days(reminder_days)
            .validate();
        assert_eq!(result.is_ok(), valid);
    }

    #[test]
    fn test_settings_update_commits() {
        let mut store = SettingsStore::default();
        store.update(|cfg| cfg.upcoming_limit = 8).unwrap();

        assert_eq!(store.current().upcoming_limit, 8);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_settings_failed_update_keeps_previous() {
        let mut store = SettingsStore::default();
        let result = store.update(|cfg| cfg.upcoming_window_days = 0);

        assert!(matches!(result, Err(MaintError::InvalidConfig(_))));
        assert_eq!(store.current().upcoming_window_days, 7);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_settings_json_roundtrip_with_defaults() {
        let store = SettingsStore::load_json(r#"{"upcoming_limit": 3}"#).unwrap();
        assert_eq!(store.current().upcoming_limit, 3);
        assert_eq!(store.current().upcoming_window_days, 7);

        let json = store.to_json().unwrap();
        let reloaded = SettingsStore::load_json(&json).unwrap();
        assert_eq!(reloaded.current(), store.current());
    }

    #[test]
    fn test_settings_load_rejects_invalid() {
        let result = SettingsStore::load_json(r#"{"upcoming_limit": 0}"#);
        assert!(matches!(result, Err(MaintError::InvalidConfig(_))));
    }

    #[test]
    fn test_settings_reset() {
        let mut store = SettingsStore::default();
        store.update(|cfg| cfg.reminder_days_before = 10).unwrap();
        store.reset();

        assert_eq!(store.current(), &ScheduleConfig::default());
        assert_eq!(store.revision(), 2);
    }
}
