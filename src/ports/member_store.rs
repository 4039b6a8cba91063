use crate::domain::{Member, MemberId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 会員ストアポート
///
/// 会員は貸出履歴を含む集約全体として保存・取得される。
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// 会員の現在状態を保存する（upsert）
    ///
    /// 借りている書籍・延滞料金残高・履歴を含む完全な状態を反映する。
    async fn save(&self, member: Member) -> Result<()>;

    /// 会員IDで会員を取得する
    async fn get(&self, member_id: &MemberId) -> Result<Option<Member>>;
}
