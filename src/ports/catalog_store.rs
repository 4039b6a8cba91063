use crate::domain::{Book, Isbn};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 蔵書ストアポート
///
/// 貸出コンテキストと保管方式の境界を維持する。
/// 実装はISBNごとに書籍を1件保持し、登録順を保存する。
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// 書籍の現在状態を保存する（upsert）
    ///
    /// 新規の場合は挿入、既存の場合は全体を置き換える。
    /// 部分更新は行わず、常にエンティティの完全な状態を反映する。
    async fn save(&self, book: Book) -> Result<()>;

    /// ISBNで書籍を取得する
    async fn get(&self, isbn: &Isbn) -> Result<Option<Book>>;

    /// 全書籍を登録順で取得する
    ///
    /// 貸出可能書籍の一覧表示に使用される。
    async fn list(&self) -> Result<Vec<Book>>;
}
