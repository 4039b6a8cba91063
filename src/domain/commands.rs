use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// コマンド：書籍を登録する
///
/// 識別子は呼び出し側の生文字列のまま受け取り、
/// エンジン側で値オブジェクトに検証・変換する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
}

/// コマンド：会員を登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMember {
    pub member_id: String,
    pub name: String,
}

/// コマンド：書籍を貸し出す
///
/// `checkout_date`が`None`の場合はClockポートの今日の日付を使用する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutBook {
    pub member_id: String,
    pub isbn: String,
    pub checkout_date: Option<NaiveDate>,
}

/// コマンド：書籍を返却する
///
/// `return_date`が`None`の場合はClockポートの今日の日付を使用する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub member_id: String,
    pub isbn: String,
    pub return_date: Option<NaiveDate>,
}
