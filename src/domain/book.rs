use serde::{Deserialize, Serialize};

use super::Isbn;

/// 書籍エンティティ - 蔵書1冊
///
/// 貸出可否フラグは貸出エンジンのみが変更する。
/// 不変条件：`is_available`は未返却の貸出記録が存在しない場合のみtrue。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    pub is_available: bool,
}

impl Book {
    /// 登録時の書籍を作成する（貸出可能な状態）
    pub fn new(isbn: Isbn, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            isbn,
            title: title.into(),
            author: author.into(),
            is_available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_is_available() {
        let book = Book::new(Isbn::new("111").unwrap(), "Clean Code", "Robert C. Martin");
        assert!(book.is_available);
        assert_eq!(book.title, "Clean Code");
        assert_eq!(book.author, "Robert C. Martin");
    }
}
