use chrono::NaiveDate;

/// 時計ポート
///
/// 日付引数が省略された場合の「今日」を供給する。
/// コア層は壁時計を直接読まず、このポート経由でのみ日付を得る
/// （決定的なテストを可能にするため）。
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
