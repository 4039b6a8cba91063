use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{self, Book, BorrowRecord, Isbn, Member, MemberId, commands::*};
use crate::ports::{CatalogStore, Clock, MemberStore};

use super::errors::{LendingError, Result};

/// 会員1人あたりの最大貸出冊数
pub const MAX_BORROWED: usize = 3;

/// 貸出をブロックする延滞料金の閾値（これを超えると貸出不可）
pub const FINE_BLOCK_THRESHOLD: Decimal = dec!(10.00);

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
///
/// `mutation_lock`はすべての「検証してから変更する」操作を直列化する。
/// 同一の書籍・会員に対する貸出と返却が交錯しても、途中状態を
/// 観測した判定は起こらない（同一ISBNへの同時貸出は片方だけ成功する）。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub catalog: Arc<dyn CatalogStore>,
    pub members: Arc<dyn MemberStore>,
    pub clock: Arc<dyn Clock>,
    mutation_lock: Arc<Mutex<()>>,
}

impl ServiceDependencies {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        members: Arc<dyn MemberStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            members,
            clock,
            mutation_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// 生文字列をISBNに検証・変換するヘルパー関数
fn parse_isbn(raw: &str) -> Result<Isbn> {
    Isbn::new(raw).map_err(|_| LendingError::InvalidInput("isbn must not be empty".to_string()))
}

/// 生文字列を会員IDに検証・変換するヘルパー関数
fn parse_member_id(raw: &str) -> Result<MemberId> {
    MemberId::new(raw)
        .map_err(|_| LendingError::InvalidInput("member_id must not be empty".to_string()))
}

/// ストアから会員を取得するヘルパー関数
///
/// checkout_book, return_book, calculate_fine, borrowing_historyで共通利用される。
///
/// # エラー
/// - MemberStoreError: ストア読み込み失敗
/// - MemberNotFound: 会員が存在しない
pub(super) async fn load_member(
    deps: &ServiceDependencies,
    member_id: &MemberId,
) -> Result<Member> {
    deps.members
        .get(member_id)
        .await
        .map_err(LendingError::MemberStoreError)?
        .ok_or_else(|| LendingError::MemberNotFound(member_id.clone()))
}

/// ストアから書籍を取得するヘルパー関数
async fn load_book(deps: &ServiceDependencies, isbn: &Isbn) -> Result<Book> {
    deps.catalog
        .get(isbn)
        .await
        .map_err(LendingError::CatalogStoreError)?
        .ok_or_else(|| LendingError::BookNotFound(isbn.clone()))
}

/// 書籍を登録する
///
/// ビジネスルール：
/// - ISBNは空でないこと
/// - 同じISBNの書籍が未登録であること
///
/// 登録された書籍は貸出可能な状態で挿入される。
pub async fn add_book(deps: &ServiceDependencies, cmd: AddBook) -> Result<()> {
    let isbn = parse_isbn(&cmd.isbn)?;

    let _guard = deps.mutation_lock.lock().await;

    let existing = deps
        .catalog
        .get(&isbn)
        .await
        .map_err(LendingError::CatalogStoreError)?;
    if existing.is_some() {
        return Err(LendingError::DuplicateBook(isbn));
    }

    let book = Book::new(isbn, cmd.title, cmd.author);
    deps.catalog
        .save(book.clone())
        .await
        .map_err(LendingError::CatalogStoreError)?;

    tracing::info!(isbn = %book.isbn, title = %book.title, "book added");
    Ok(())
}

/// 会員を登録する
///
/// ビジネスルール：
/// - 会員IDは空でないこと
/// - 同じIDの会員が未登録であること
///
/// 登録された会員は貸出なし・延滞料金なしの状態で挿入される。
pub async fn register_member(deps: &ServiceDependencies, cmd: RegisterMember) -> Result<()> {
    let member_id = parse_member_id(&cmd.member_id)?;

    let _guard = deps.mutation_lock.lock().await;

    let existing = deps
        .members
        .get(&member_id)
        .await
        .map_err(LendingError::MemberStoreError)?;
    if existing.is_some() {
        return Err(LendingError::DuplicateMember(member_id));
    }

    let member = Member::new(member_id, cmd.name);
    deps.members
        .save(member.clone())
        .await
        .map_err(LendingError::MemberStoreError)?;

    tracing::info!(member_id = %member.member_id, "member registered");
    Ok(())
}

/// 書籍を貸し出す
///
/// ビジネスルール（この順に検証し、最初の違反で中断）：
/// - 会員が存在すること
/// - 書籍が存在すること
/// - 延滞料金残高（貸出日時点で再計算）が$10.00以下であること
/// - 貸出中の冊数が3冊未満であること
/// - 書籍が貸出可能であること
///
/// すべての検証が変更より先に行われる。失敗時に途中状態は残らない。
///
/// # 戻り値
/// 成功時は作成された貸出記録（返却期限 = 貸出日 + 14日間）
pub async fn checkout_book(deps: &ServiceDependencies, cmd: CheckoutBook) -> Result<BorrowRecord> {
    let member_id = parse_member_id(&cmd.member_id)?;
    let isbn = parse_isbn(&cmd.isbn)?;

    // 検証から保存までを直列化する
    let _guard = deps.mutation_lock.lock().await;

    // 1. 会員・書籍の存在確認
    let mut member = load_member(deps, &member_id).await?;
    let mut book = load_book(deps, &isbn).await?;

    // 2. 貸出日の解決（省略時はClockポートの今日）
    let checkout_date = cmd.checkout_date.unwrap_or_else(|| deps.clock.today());

    // 3. 延滞料金を貸出日時点で再計算してから閾値を判定する
    //    （古い残高で誤って許可・拒否しないため）
    member.fine_balance = domain::ledger::compute_fine(&member.history, checkout_date);

    if member.fine_balance > FINE_BLOCK_THRESHOLD {
        return Err(LendingError::FineLimitExceeded {
            member_id,
            balance: member.fine_balance,
            threshold: FINE_BLOCK_THRESHOLD,
        });
    }

    // 4. 貸出上限確認（3冊まで）。冊数は台帳の未返却記録から導出する
    let active_count = domain::ledger::open_records(&member.history, None).len();
    if active_count >= MAX_BORROWED {
        return Err(LendingError::LoanLimitExceeded {
            member_id,
            count: active_count,
            max: MAX_BORROWED,
        });
    }

    // 5. 書籍の貸出可能性確認
    if !book.is_available {
        return Err(LendingError::BookNotAvailable(isbn));
    }

    // 6. ドメイン層の純粋関数で貸出記録を作成
    let record = domain::record::open_record(isbn.clone(), checkout_date);

    // 7. 1つの論理トランザクションとして状態を更新
    book.is_available = false;
    member.borrowed_books.push(isbn.clone());
    member.history.push(record.clone());

    deps.catalog
        .save(book)
        .await
        .map_err(LendingError::CatalogStoreError)?;
    deps.members
        .save(member)
        .await
        .map_err(LendingError::MemberStoreError)?;

    tracing::info!(
        member_id = %member_id,
        isbn = %isbn,
        due_date = %record.due_date,
        "checkout successful"
    );
    Ok(record)
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 会員・書籍が存在すること
/// - 会員がそのISBNを現在借りていること
/// - 返却日は貸出日以降であること
///
/// 成功時：記録を閉じ、書籍を貸出可能に戻し、延滞料金残高を
/// 返却日時点で再計算する。
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<BorrowRecord> {
    let member_id = parse_member_id(&cmd.member_id)?;
    let isbn = parse_isbn(&cmd.isbn)?;

    let _guard = deps.mutation_lock.lock().await;

    // 1. 会員・書籍の存在確認
    let mut member = load_member(deps, &member_id).await?;
    let mut book = load_book(deps, &isbn).await?;

    // 2. 返却日の解決
    let return_date = cmd.return_date.unwrap_or_else(|| deps.clock.today());

    // 3. 会員が現在借りていることの確認
    if !member.has_borrowed(&isbn) {
        return Err(LendingError::NotCheckedOut { member_id, isbn });
    }

    // 4. 未返却の貸出記録を特定する（新しい記録を優先）
    let slot = member
        .history
        .iter_mut()
        .rev()
        .find(|r| r.isbn == isbn && r.is_open())
        .ok_or_else(|| LendingError::NoActiveLoan {
            member_id: member_id.clone(),
            isbn: isbn.clone(),
        })?;

    // 5. ドメイン層の純粋関数で記録を閉じる（日付の前後関係もここで検証）
    let closed = domain::record::close_record(slot, return_date)
        .map_err(|e| LendingError::InvalidInput(format!("{:?}", e)))?;

    // 6. 1つの論理トランザクションとして状態を更新
    *slot = closed.clone();
    member.borrowed_books.retain(|i| i != &isbn);
    book.is_available = true;

    // 7. 延滞料金残高を返却日時点で再計算する
    member.fine_balance = domain::ledger::compute_fine(&member.history, return_date);

    deps.catalog
        .save(book)
        .await
        .map_err(LendingError::CatalogStoreError)?;
    deps.members
        .save(member)
        .await
        .map_err(LendingError::MemberStoreError)?;

    tracing::info!(
        member_id = %member_id,
        isbn = %isbn,
        return_date = %return_date,
        "return successful"
    );
    Ok(closed)
}

/// 延滞料金残高を再計算して保存する
///
/// 全履歴からの再計算であり増分更新ではないため、冪等であり
/// 何度呼んでも同じ結果になる。`as_of`省略時はClockポートの今日。
///
/// # 戻り値
/// 更新後の延滞料金残高
pub async fn calculate_fine(
    deps: &ServiceDependencies,
    member_id: &str,
    as_of: Option<NaiveDate>,
) -> Result<Decimal> {
    let member_id = parse_member_id(member_id)?;

    let _guard = deps.mutation_lock.lock().await;

    let mut member = load_member(deps, &member_id).await?;
    let as_of = as_of.unwrap_or_else(|| deps.clock.today());

    member.fine_balance = domain::ledger::compute_fine(&member.history, as_of);
    let balance = member.fine_balance;

    deps.members
        .save(member)
        .await
        .map_err(LendingError::MemberStoreError)?;

    tracing::debug!(member_id = %member_id, balance = %balance, "fine recalculated");
    Ok(balance)
}
