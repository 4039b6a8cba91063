use serde::{Deserialize, Serialize};
use std::fmt;

use super::IdentityError;

/// ISBN - 蔵書管理コンテキストの書籍識別子
///
/// 不変条件：空文字列は不可。
/// 型システムでこの制約を強制し、不正な値を作成できないようにする。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Isbn(String);

impl Isbn {
    /// 新規作成
    ///
    /// # エラー
    /// 空文字列の場合は`IdentityError::Empty`を返す
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 会員ID - 会員管理コンテキストの識別子
///
/// 不変条件：空文字列は不可。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    /// 新規作成
    ///
    /// # エラー
    /// 空文字列の場合は`IdentityError::Empty`を返す
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
