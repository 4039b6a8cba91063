use chrono::{Local, NaiveDate};

use crate::ports::Clock;

/// システム時計アダプター
///
/// 壁時計を読むのはこの実装のみ。コア層には`Clock`ポート経由で
/// 注入されるため、テストでは`FixedClock`に差し替えられる。
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 固定日付の時計（テスト用）
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_configured_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let clock = FixedClock(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.today(), date);
    }
}
