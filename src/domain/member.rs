use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BorrowRecord, Isbn, MemberId};

/// 会員エンティティ - 貸出集約のルート
///
/// 貸出履歴（BorrowRecord）は会員が排他的に所有する。
/// 不変条件：
/// - `borrowed_books`は未返却の貸出記録のISBN集合と常に一致する
/// - `fine_balance`は履歴から再計算される導出値（独立した真実の源ではない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub member_id: MemberId,
    pub name: String,
    pub borrowed_books: Vec<Isbn>,
    pub fine_balance: Decimal,
    pub history: Vec<BorrowRecord>,
}

impl Member {
    /// 登録時の会員を作成する（貸出なし、延滞料金なし）
    pub fn new(member_id: MemberId, name: impl Into<String>) -> Self {
        Self {
            member_id,
            name: name.into(),
            borrowed_books: Vec::new(),
            fine_balance: Decimal::ZERO,
            history: Vec::new(),
        }
    }

    /// 指定ISBNを現在借りているか
    pub fn has_borrowed(&self, isbn: &Isbn) -> bool {
        self.borrowed_books.contains(isbn)
    }
}
