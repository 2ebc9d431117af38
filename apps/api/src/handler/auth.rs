//! # 認証ハンドラ
//!
//! サインアップとログインのエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /api/signup` - ユーザー登録
//! - `POST /api/login` - ログイン
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Login successful",
//!   "user": { "id": 1, "name": "A", "email": "a@x.com" }
//! }
//! ```
//!
//! パスワードのダイジェストはレスポンスに含めない。ログイン成功後も
//! セッションやトークンは発行しない。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use playerhub_domain::user::User;
use playerhub_shared::ApiEnvelope;
use serde::{Deserialize, Serialize};

use crate::{error::AuthError, usecase::AuthUseCase};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub usecase: Arc<dyn AuthUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// サインアップリクエスト
///
/// 未指定のフィールドは空文字列として扱い、ユースケースのバリデーションで拒否する。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name:     String,
    pub email:    String,
    pub password: String,
}

/// ログインリクエスト
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email:    String,
    pub password: String,
}

/// レスポンス用のユーザー情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id:    i64,
    pub name:  String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id:    user.id().as_i64(),
            name:  user.name().as_str().to_string(),
            email: user.email().as_str().to_string(),
        }
    }
}

/// エンベロープの `user` キー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub user: UserResponse,
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            user: UserResponse::from(user),
        }
    }
}

// --- ハンドラ ---

/// POST /api/signup
///
/// 成功時は 201 Created と登録ユーザーを返す。
pub async fn signup(
    State(state): State<Arc<AuthState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(req) = payload.map_err(|e| AuthError::BadRequest(e.body_text()))?;

    let user = state
        .usecase
        .signup(&req.name, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::success(
            "User registered successfully",
            UserPayload::from(&user),
        )),
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<Arc<AuthState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(req) = payload.map_err(|e| AuthError::BadRequest(e.body_text()))?;

    let user = state.usecase.login(&req.email, &req.password).await?;

    Ok(Json(ApiEnvelope::success(
        "Login successful",
        UserPayload::from(&user),
    )))
}
