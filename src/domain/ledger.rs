use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::{BorrowRecord, Isbn};

/// 延滞料金（1日あたり）
pub const FINE_PER_DAY: Decimal = dec!(0.50);

/// 貸出履歴に対する純粋なクエリと延滞料金計算。
///
/// 履歴は不変のイベント列として扱い、現在の状態（未返却の記録、
/// 延滞料金残高）は常に履歴から再導出する。

/// 未返却の貸出記録を取得する（新しい順）
///
/// ISBNを指定した場合はそのISBNの記録のみを返す。
pub fn open_records<'a>(
    history: &'a [BorrowRecord],
    isbn: Option<&Isbn>,
) -> Vec<&'a BorrowRecord> {
    history
        .iter()
        .rev()
        .filter(|r| r.is_open())
        .filter(|r| isbn.is_none_or(|i| &r.isbn == i))
        .collect()
}

/// 指定ISBNの未返却の貸出記録を探す
///
/// 同一ISBNの未返却記録は構造上1件しか存在しない（貸出中の書籍は
/// 再貸出できない）が、探索は新しい記録を優先する。
pub fn find_open_record<'a>(history: &'a [BorrowRecord], isbn: &Isbn) -> Option<&'a BorrowRecord> {
    history.iter().rev().find(|r| &r.isbn == isbn && r.is_open())
}

/// 純粋関数：延滞日数を求める
///
/// 実効日 = 返却日（返却済み）または基準日（未返却）。
/// 期限内・期限当日は0日（負の差分は0に切り上げ）。
pub fn overdue_days(record: &BorrowRecord, as_of: NaiveDate) -> i64 {
    let effective_date = record.return_date.unwrap_or(as_of);
    (effective_date - record.due_date).num_days().max(0)
}

/// 純粋関数：延滞料金を全件再計算する
///
/// ビジネスルール：
/// - 1日あたり$0.50
/// - 全履歴の延滞日数 × 料率の合計
/// - 小数第2位に四捨五入（round-half-up）
///
/// 増分更新ではなく全件再計算のため冪等であり、
/// ルール判定の直前に安全に呼び出せる。
pub fn compute_fine(history: &[BorrowRecord], as_of: NaiveDate) -> Decimal {
    let total: Decimal = history
        .iter()
        .map(|r| Decimal::from(overdue_days(r, as_of)) * FINE_PER_DAY)
        .sum();

    total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{close_record, open_record};

    fn isbn(value: &str) -> Isbn {
        Isbn::new(value).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // TDD: open_records() / find_open_record() のテスト
    #[test]
    fn test_open_records_returns_only_open_entries() {
        let a = open_record(isbn("111"), date(2025, 1, 1));
        let b = close_record(&open_record(isbn("222"), date(2025, 1, 1)), date(2025, 1, 5)).unwrap();
        let c = open_record(isbn("333"), date(2025, 1, 2));
        let history = vec![a, b, c];

        let open = open_records(&history, None);
        assert_eq!(open.len(), 2);
        // 新しい順
        assert_eq!(open[0].isbn, isbn("333"));
        assert_eq!(open[1].isbn, isbn("111"));
    }

    #[test]
    fn test_open_records_filters_by_isbn() {
        let history = vec![
            open_record(isbn("111"), date(2025, 1, 1)),
            open_record(isbn("222"), date(2025, 1, 2)),
        ];

        let target = isbn("222");
        let open = open_records(&history, Some(&target));
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].isbn, target);
    }

    #[test]
    fn test_find_open_record_skips_closed_entries() {
        // 同じISBNの返却済み記録があっても、未返却の記録を見つける
        let closed =
            close_record(&open_record(isbn("111"), date(2025, 1, 1)), date(2025, 1, 5)).unwrap();
        let reopened = open_record(isbn("111"), date(2025, 2, 1));
        let history = vec![closed, reopened.clone()];

        let found = find_open_record(&history, &isbn("111"));
        assert_eq!(found, Some(&reopened));
    }

    #[test]
    fn test_find_open_record_returns_none_when_absent() {
        let history = vec![open_record(isbn("111"), date(2025, 1, 1))];
        assert_eq!(find_open_record(&history, &isbn("999")), None);
    }

    // TDD: overdue_days() のテスト
    #[test]
    fn test_overdue_days_zero_on_due_date() {
        let record = open_record(isbn("111"), date(2025, 1, 1));
        // 期限当日（2025-01-15）の返却は延滞なし
        let closed = close_record(&record, date(2025, 1, 15)).unwrap();
        assert_eq!(overdue_days(&closed, date(2025, 3, 1)), 0);
    }

    #[test]
    fn test_overdue_days_clamped_for_early_return() {
        let record = open_record(isbn("111"), date(2025, 1, 1));
        let closed = close_record(&record, date(2025, 1, 5)).unwrap();
        // 負の差分は0に切り上げ
        assert_eq!(overdue_days(&closed, date(2025, 3, 1)), 0);
    }

    #[test]
    fn test_overdue_days_one_day_late() {
        let record = open_record(isbn("111"), date(2025, 1, 1));
        let closed = close_record(&record, date(2025, 1, 16)).unwrap();
        assert_eq!(overdue_days(&closed, date(2025, 1, 16)), 1);
    }

    #[test]
    fn test_overdue_days_open_record_uses_reference_date() {
        let record = open_record(isbn("111"), date(2025, 1, 1));
        assert_eq!(overdue_days(&record, date(2025, 1, 10)), 0);
        assert_eq!(overdue_days(&record, date(2025, 1, 20)), 5);
    }

    // TDD: compute_fine() のテスト
    #[test]
    fn test_compute_fine_zero_for_empty_history() {
        assert_eq!(compute_fine(&[], date(2025, 1, 1)), dec!(0));
    }

    #[test]
    fn test_compute_fine_one_day_late_is_fifty_cents() {
        let record = open_record(isbn("111"), date(2025, 1, 1));
        let closed = close_record(&record, date(2025, 1, 16)).unwrap();
        assert_eq!(compute_fine(&[closed], date(2025, 1, 16)), dec!(0.50));
    }

    #[test]
    fn test_compute_fine_five_days_late_is_two_fifty() {
        // 2025-01-01貸出 → 期限2025-01-15 → 2025-01-20返却で5日延滞
        let record = open_record(isbn("111"), date(2025, 1, 1));
        let closed = close_record(&record, date(2025, 1, 20)).unwrap();
        assert_eq!(compute_fine(&[closed], date(2025, 1, 20)), dec!(2.50));
    }

    #[test]
    fn test_compute_fine_sums_across_records() {
        let a = close_record(&open_record(isbn("111"), date(2025, 1, 1)), date(2025, 1, 20))
            .unwrap(); // 5日延滞 = 2.50
        let b = close_record(&open_record(isbn("222"), date(2025, 1, 1)), date(2025, 1, 17))
            .unwrap(); // 2日延滞 = 1.00
        let c = open_record(isbn("333"), date(2025, 1, 1)); // 基準日時点で未返却

        // 基準日2025-01-18：cは3日延滞 = 1.50
        let fine = compute_fine(&[a, b, c], date(2025, 1, 18));
        assert_eq!(fine, dec!(5.00));
    }

    #[test]
    fn test_compute_fine_is_idempotent() {
        let record = open_record(isbn("111"), date(2025, 1, 1));
        let history = vec![record];
        let as_of = date(2025, 1, 25);

        let first = compute_fine(&history, as_of);
        let second = compute_fine(&history, as_of);
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_fine_rounds_to_two_decimals() {
        let record = open_record(isbn("111"), date(2025, 1, 1));
        let closed = close_record(&record, date(2025, 1, 18)).unwrap();
        let fine = compute_fine(&[closed], date(2025, 1, 18));
        assert_eq!(fine, dec!(1.50));
        assert_eq!(fine.scale(), 2);
    }
}
