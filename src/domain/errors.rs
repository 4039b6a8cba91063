/// 識別子のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityError {
    /// 空文字列が渡された
    Empty,
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseRecordError {
    /// 既に返却済み
    AlreadyClosed,
    /// 返却日が貸出日より前
    ReturnBeforeCheckout,
}
