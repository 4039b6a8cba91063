use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{Isbn, MemberId};

/// エラー分類
///
/// 呼び出し側はメッセージ文字列ではなくこの分類で分岐する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 識別子による検索が失敗した
    NotFound,
    /// 既存の識別子での登録
    Duplicate,
    /// 入力値が不正（空の識別子、日付の前後関係違反）
    InvalidInput,
    /// ビジネスルール違反
    RuleViolation,
    /// ストア層の障害
    Internal,
}

/// 貸出管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LendingError {
    /// 会員が存在しない
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    /// 書籍が存在しない
    #[error("Book not found: {0}")]
    BookNotFound(Isbn),

    /// 同じISBNの書籍が既に登録されている
    #[error("Book already exists: {0}")]
    DuplicateBook(Isbn),

    /// 同じIDの会員が既に登録されている
    #[error("Member already exists: {0}")]
    DuplicateMember(MemberId),

    /// 入力値が不正
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 延滞料金が閾値を超えている
    #[error("Member {member_id} has unpaid fines ${balance} (over ${threshold})")]
    FineLimitExceeded {
        member_id: MemberId,
        balance: Decimal,
        threshold: Decimal,
    },

    /// 貸出上限（3冊）に達している
    #[error("Member {member_id} already has {count} books on loan (max {max})")]
    LoanLimitExceeded {
        member_id: MemberId,
        count: usize,
        max: usize,
    },

    /// 書籍が貸出中
    #[error("Book {0} is not available")]
    BookNotAvailable(Isbn),

    /// 会員がその書籍を借りていない
    #[error("Member {member_id} does not have book {isbn} checked out")]
    NotCheckedOut { member_id: MemberId, isbn: Isbn },

    /// 未返却の貸出記録が見つからない
    #[error("No active borrow record for member {member_id}, isbn {isbn}")]
    NoActiveLoan { member_id: MemberId, isbn: Isbn },

    /// CatalogStoreのエラー
    #[error("Catalog store error")]
    CatalogStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// MemberStoreのエラー
    #[error("Member store error")]
    MemberStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LendingError {
    /// エラー分類への射影
    ///
    /// 呼び出し側はこの分類で分岐できる（メッセージ内容には依存しない）。
    pub fn kind(&self) -> ErrorKind {
        match self {
            LendingError::MemberNotFound(_) | LendingError::BookNotFound(_) => ErrorKind::NotFound,
            LendingError::DuplicateBook(_) | LendingError::DuplicateMember(_) => {
                ErrorKind::Duplicate
            }
            LendingError::InvalidInput(_) => ErrorKind::InvalidInput,
            LendingError::FineLimitExceeded { .. }
            | LendingError::LoanLimitExceeded { .. }
            | LendingError::BookNotAvailable(_)
            | LendingError::NotCheckedOut { .. }
            | LendingError::NoActiveLoan { .. } => ErrorKind::RuleViolation,
            LendingError::CatalogStoreError(_) | LendingError::MemberStoreError(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LendingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kind_projection_covers_taxonomy() {
        let isbn = Isbn::new("111").unwrap();
        let member_id = MemberId::new("M1").unwrap();

        assert_eq!(
            LendingError::MemberNotFound(member_id.clone()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            LendingError::DuplicateBook(isbn.clone()).kind(),
            ErrorKind::Duplicate
        );
        assert_eq!(
            LendingError::InvalidInput("isbn must not be empty".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            LendingError::FineLimitExceeded {
                member_id: member_id.clone(),
                balance: dec!(10.50),
                threshold: dec!(10.00),
            }
            .kind(),
            ErrorKind::RuleViolation
        );
        assert_eq!(
            LendingError::BookNotAvailable(isbn).kind(),
            ErrorKind::RuleViolation
        );
    }
}
