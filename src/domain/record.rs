use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{CloseRecordError, Isbn};

/// 貸出期間（日数）
pub const LOAN_PERIOD_DAYS: u64 = 14;

/// 貸出記録 - 1冊の書籍の1回の貸出
///
/// 履歴として永続に保持され、削除されない。
/// 返却期限・延滞料金の計算と貸出履歴の表示に使用される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub isbn: Isbn,
    pub checkout_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl BorrowRecord {
    /// 未返却か（返却日が未設定か）
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// 純粋関数：貸出記録を開く
///
/// ビジネスルール：
/// - 返却期限は貸出日 + 14日間
/// - 返却日は未設定
///
/// 副作用なし。新しいBorrowRecordを返す。
pub fn open_record(isbn: Isbn, checkout_date: NaiveDate) -> BorrowRecord {
    let due_date = checkout_date + Days::new(LOAN_PERIOD_DAYS);

    BorrowRecord {
        isbn,
        checkout_date,
        due_date,
        return_date: None,
    }
}

/// 純粋関数：貸出記録を閉じる
///
/// ビジネスルール：
/// - 既に返却済みの記録は閉じられない
/// - 返却日は貸出日以降であること
///
/// 副作用なし。新しいBorrowRecordを返す。
pub fn close_record(
    record: &BorrowRecord,
    return_date: NaiveDate,
) -> Result<BorrowRecord, CloseRecordError> {
    if !record.is_open() {
        return Err(CloseRecordError::AlreadyClosed);
    }

    if return_date < record.checkout_date {
        return Err(CloseRecordError::ReturnBeforeCheckout);
    }

    Ok(BorrowRecord {
        return_date: Some(return_date),
        ..record.clone()
    })
}
