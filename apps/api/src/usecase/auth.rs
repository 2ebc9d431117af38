//! # 認証ユースケース
//!
//! サインアップとログインのビジネスロジックを実装する。
//!
//! ## サインアップ
//!
//! 1. 名前・メールアドレス・パスワードを検証する
//! 2. メールアドレスが登録済みなら `DuplicateEmail`
//! 3. パスワードをハッシュ化してユーザーを保存する
//!
//! 手順 2 と 3 の間に同じメールアドレスで並行登録された場合は、
//! データベースの一意制約による `Conflict` を `DuplicateEmail` に変換する。
//!
//! ## ログイン
//!
//! 1. メールアドレスでユーザーを検索し、存在しなければ `UserNotFound`
//! 2. 保存済みダイジェストでパスワードを検証し、不一致なら `InvalidCredentials`
//!
//! Argon2 の計算は CPU バウンドのため `spawn_blocking` で実行する。

use std::sync::Arc;

use async_trait::async_trait;
use playerhub_domain::{
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
    user::{Email, NewUser, User, UserName},
};
use playerhub_infra::{PasswordHasher, repository::UserRepository};

use super::AuthUseCase;
use crate::error::AuthError;

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    async fn hash_password(&self, password: PlainPassword) -> Result<PasswordHash, AuthError> {
        let hasher = self.password_hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("ハッシュ化タスクの実行に失敗: {e}")))??;
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: PlainPassword,
        hash: PasswordHash,
    ) -> Result<PasswordVerifyResult, AuthError> {
        let hasher = self.password_hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("検証タスクの実行に失敗: {e}")))
    }
}

#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    #[tracing::instrument(skip_all)]
    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let name = UserName::new(name)?;
        let email = Email::new(email)?;
        let password = PlainPassword::for_signup(password)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            tracing::info!("登録済みのメールアドレスでサインアップが試行されました");
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self.hash_password(password).await?;

        let new_user = NewUser {
            name,
            email,
            password_hash,
        };

        let user = self
            .user_repository
            .insert(new_user)
            .await
            .map_err(|e| match e.as_conflict() {
                Some(_) => AuthError::DuplicateEmail,
                None => AuthError::Database(e),
            })?;

        tracing::info!(user_id = %user.id(), "ユーザーを登録しました");
        Ok(user)
    }

    #[tracing::instrument(skip_all)]
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        // 形式が不正なメールアドレスは登録され得ないため、未登録として扱う
        let Ok(email) = Email::new(email) else {
            return Err(AuthError::UserNotFound);
        };

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            tracing::info!("未登録のメールアドレスでログインが試行されました");
            return Err(AuthError::UserNotFound);
        };

        let result = self
            .verify_password(PlainPassword::new(password), user.password_hash().clone())
            .await?;

        if result.is_mismatch() {
            tracing::warn!(user_id = %user.id(), "パスワードが一致しません");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id(), "ログインに成功しました");
        Ok(user)
    }
}
