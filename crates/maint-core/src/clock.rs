//! 時鐘抽象
//!
//! 「今天」一律透過 [`Clock`] 取得，測試時以 [`FixedClock`] 固定日期。

use chrono::{Local, NaiveDate};

/// 提供當前日曆日
pub trait Clock {
    /// 今天（本地時區的日曆日）
    fn today(&self) -> NaiveDate;
}

/// 系統時鐘（本地時區）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 固定日期時鐘
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self(today)
    }

    /// 將時鐘調整到另一天
    pub fn set(&mut self, today: NaiveDate) {
        self.0 = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
