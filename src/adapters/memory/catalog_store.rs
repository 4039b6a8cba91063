use crate::domain::{Book, Isbn};
use crate::ports::catalog_store::{CatalogStore as CatalogStoreTrait, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::RwLock;

/// CatalogStoreのインメモリ実装
///
/// IndexMapにより登録順を保存する（`list`は常に登録順）。
/// 内部ロックで個々の読み書きを保護するため、クエリが
/// 書きかけの書籍を観測することはない。
pub struct CatalogStore {
    books: RwLock<IndexMap<Isbn, Book>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(IndexMap::new()),
        }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStoreTrait for CatalogStore {
    async fn save(&self, book: Book) -> Result<()> {
        let mut books = self.books.write().expect("catalog lock poisoned");
        books.insert(book.isbn.clone(), book);
        Ok(())
    }

    async fn get(&self, isbn: &Isbn) -> Result<Option<Book>> {
        let books = self.books.read().expect("catalog lock poisoned");
        Ok(books.get(isbn).cloned())
    }

    async fn list(&self) -> Result<Vec<Book>> {
        let books = self.books.read().expect("catalog lock poisoned");
        Ok(books.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(isbn: &str, title: &str) -> Book {
        Book::new(Isbn::new(isbn).unwrap(), title, "author")
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = CatalogStore::new();
        store.save(book("333", "c")).await.unwrap();
        store.save(book("111", "a")).await.unwrap();
        store.save(book("222", "b")).await.unwrap();

        let isbns: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.isbn.value().to_string())
            .collect();
        assert_eq!(isbns, vec!["333", "111", "222"]);
    }

    #[tokio::test]
    async fn test_save_replaces_existing_entry_in_place() {
        let store = CatalogStore::new();
        store.save(book("111", "old")).await.unwrap();
        store.save(book("222", "other")).await.unwrap();

        let mut updated = book("111", "new");
        updated.is_available = false;
        store.save(updated).await.unwrap();

        let books = store.list().await.unwrap();
        assert_eq!(books.len(), 2);
        // 置き換えても順序は変わらない
        assert_eq!(books[0].title, "new");
        assert!(!books[0].is_available);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = CatalogStore::new();
        let found = store.get(&Isbn::new("999").unwrap()).await.unwrap();
        assert!(found.is_none());
    }
}
