//! # API エラー定義
//!
//! ユースケースで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! すべてのエラーは共通エンベロープ `{ "success": false, "message": "..." }` で返す。
//!
//! 認証の業務エラー（入力不備・重複・未登録・パスワード不一致）は 200 で返し、
//! フロントエンドは `success` と `message` で結果を表示する。
//! リクエストとして解釈できないボディは 400、サーバー側の障害は 500 とする。
//!
//! | エラー | HTTP | message |
//! |--------|------|---------|
//! | `AuthError::BadRequest` | 400 | リクエストボディのエラー内容 |
//! | `AuthError::Validation` | 200 | バリデーションメッセージ |
//! | `AuthError::DuplicateEmail` | 200 | `Email already registered` |
//! | `AuthError::UserNotFound` | 200 | `User not found` |
//! | `AuthError::InvalidCredentials` | 200 | `Invalid password` |
//! | `AuthError::Database` / `Internal` | 500 | `Internal server error` |
//! | `PlayerError::BadRequest` | 400 | リクエストボディのエラー内容 |
//! | `PlayerError::Database` | 500 | `Internal server error` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use playerhub_domain::DomainError;
use playerhub_infra::InfraError;
use playerhub_shared::ApiEnvelope;
use thiserror::Error;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// 失敗エンベロープのレスポンスを作成する
pub(crate) fn failure_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiEnvelope::<()>::failure(message))).into_response()
}

/// 認証（サインアップ・ログイン）で発生するエラー
#[derive(Debug, Error)]
pub enum AuthError {
    /// リクエストボディを JSON として解釈できない
    #[error("{0}")]
    BadRequest(String),

    /// 入力値が不正
    #[error("{0}")]
    Validation(String),

    /// メールアドレスが既に登録されている
    #[error("Email already registered")]
    DuplicateEmail,

    /// メールアドレスに該当するユーザーが存在しない
    #[error("User not found")]
    UserNotFound,

    /// パスワードが一致しない
    #[error("Invalid password")]
    InvalidCredentials,

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AuthError::Validation(msg),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::Validation(_)
            | AuthError::DuplicateEmail
            | AuthError::UserNotFound
            | AuthError::InvalidCredentials => StatusCode::OK,
            AuthError::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                return failure_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE);
            }
            AuthError::Internal(msg) => {
                tracing::error!("内部エラー: {}", msg);
                return failure_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE);
            }
        };

        failure_response(status, self.to_string())
    }
}

/// 選手 API で発生するエラー
#[derive(Debug, Error)]
pub enum PlayerError {
    /// リクエストボディが不正
    #[error("{0}")]
    BadRequest(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl IntoResponse for PlayerError {
    fn into_response(self) -> Response {
        match self {
            PlayerError::BadRequest(msg) => failure_response(StatusCode::BAD_REQUEST, msg),
            PlayerError::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                failure_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    async fn into_parts(response: Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[rstest]
    #[case(AuthError::BadRequest("expected value".to_string()), StatusCode::BAD_REQUEST, "expected value")]
    #[case(AuthError::Validation("Name is required".to_string()), StatusCode::OK, "Name is required")]
    #[case(AuthError::DuplicateEmail, StatusCode::OK, "Email already registered")]
    #[case(AuthError::UserNotFound, StatusCode::OK, "User not found")]
    #[case(AuthError::InvalidCredentials, StatusCode::OK, "Invalid password")]
    #[case(AuthError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")]
    #[tokio::test]
    async fn test_認証エラーはエンベロープ形式で返る(
        #[case] error: AuthError,
        #[case] expected_status: StatusCode,
        #[case] expected_message: &str,
    ) {
        let (status, json) = into_parts(error.into_response()).await;

        assert_eq!(status, expected_status);
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "message": expected_message })
        );
    }

    #[tokio::test]
    async fn test_データベースエラーの詳細はレスポンスに含まれない() {
        let error = AuthError::Database(InfraError::unexpected("connection refused"));

        let (status, json) = into_parts(error.into_response()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Internal server error");
        assert!(!json.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_選手apiのデータベースエラーは500になる() {
        let error = PlayerError::Database(InfraError::unexpected("timeout"));

        let (status, json) = into_parts(error.into_response()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "message": "Internal server error" })
        );
    }

    #[rstest]
    fn test_ドメインエラーはバリデーションエラーに変換される() {
        let error: AuthError = DomainError::Validation("Email is required".to_string()).into();
        assert!(matches!(error, AuthError::Validation(msg) if msg == "Email is required"));
    }
}
