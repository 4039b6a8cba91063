use crate::domain::{Member, MemberId};
use crate::ports::member_store::{MemberStore as MemberStoreTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory implementation of MemberStore
///
/// Stores the full member aggregate (borrow list, fine balance, history)
/// under an interior read-write lock so concurrent readers never observe
/// a partially written member.
pub struct MemberStore {
    members: RwLock<HashMap<MemberId, Member>>,
}

impl MemberStore {
    pub fn new() -> Self {
        Self {
            members: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemberStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberStoreTrait for MemberStore {
    async fn save(&self, member: Member) -> Result<()> {
        let mut members = self.members.write().expect("member lock poisoned");
        members.insert(member.member_id.clone(), member);
        Ok(())
    }

    async fn get(&self, member_id: &MemberId) -> Result<Option<Member>> {
        let members = self.members.read().expect("member lock poisoned");
        Ok(members.get(member_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_get_roundtrip() {
        let store = MemberStore::new();
        let id = MemberId::new("M1").unwrap();
        store.save(Member::new(id.clone(), "Apurv")).await.unwrap();

        let found = store.get(&id).await.unwrap();
        assert_eq!(found.unwrap().name, "Apurv");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = MemberStore::new();
        let found = store.get(&MemberId::new("M9").unwrap()).await.unwrap();
        assert!(found.is_none());
    }
}
