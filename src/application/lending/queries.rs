use crate::domain::{Book, BorrowRecord};

use super::errors::{LendingError, Result};
use super::lending_service::{ServiceDependencies, load_member};

/// 貸出可能な書籍の一覧を取得する（読み取り専用）
///
/// 順序は蔵書の登録順。書き込みと直列化されないため
/// 変更ロックは取らないが、ストアのエンティティ単位ロックにより
/// 書きかけの書籍を観測することはない。
pub async fn available_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    let books = deps
        .catalog
        .list()
        .await
        .map_err(LendingError::CatalogStoreError)?;

    Ok(books.into_iter().filter(|b| b.is_available).collect())
}

/// 会員の貸出履歴を取得する（読み取り専用）
///
/// 貸出順の全記録（返却済みを含む）を返す。
///
/// # エラー
/// - InvalidInput: 会員IDが空
/// - MemberNotFound: 会員が存在しない
pub async fn borrowing_history(
    deps: &ServiceDependencies,
    member_id: &str,
) -> Result<Vec<BorrowRecord>> {
    let member_id = crate::domain::MemberId::new(member_id)
        .map_err(|_| LendingError::InvalidInput("member_id must not be empty".to_string()))?;

    let member = load_member(deps, &member_id).await?;
    Ok(member.history)
}
