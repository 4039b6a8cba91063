use chrono::NaiveDate;
use rusty_lending_ddd::adapters::FixedClock;
use rusty_lending_ddd::adapters::memory::{CatalogStore, MemberStore};
use rusty_lending_ddd::application::lending::ServiceDependencies;
use std::sync::Arc;

/// テスト用の依存関係を作成する
///
/// インメモリのストアと固定日付の時計を使用し、
/// テストを決定的に保つ（壁時計には依存しない）。
pub fn create_test_deps(today: NaiveDate) -> ServiceDependencies {
    ServiceDependencies::new(
        Arc::new(CatalogStore::new()),
        Arc::new(MemberStore::new()),
        Arc::new(FixedClock(today)),
    )
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}
