//! # API レスポンスエンベロープ
//!
//! 全エンドポイント共通のレスポンス形式 `{ "success": bool, "message": string, ... }` を提供する。
//!
//! ペイロードはエンティティ名をキーとしてエンベロープのトップレベルに展開される
//! （例: `{ "success": true, "message": "...", "user": { ... } }`）。
//! ペイロードを持たない失敗レスポンスは `success` と `message` のみを返す。

use serde::{Deserialize, Serialize};

/// 全エンドポイントの統一レスポンス型
///
/// `T` はペイロードを表す構造体で、フィールドがエンベロープに flatten される。
/// キー名は `T` 側のフィールド名で決まる（`user`, `player`, `players` など）。
///
/// ## 使用例
///
/// ```
/// use playerhub_shared::ApiEnvelope;
///
/// let response = ApiEnvelope::<()>::failure("User not found");
/// assert!(!response.success);
/// assert!(response.payload.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub payload: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// ペイロード付きの成功レスポンスを作成する
    pub fn success(message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Some(payload),
        }
    }

    /// ペイロードなしの失敗レスポンスを作成する
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
        }
    }
}
