//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! メールアドレスの一意性はデータベースの一意制約で担保する。
//! 同時に同じメールアドレスでサインアップされても、書き込めるのは 1 件のみ。

use async_trait::async_trait;
use playerhub_domain::{
    password::PasswordHash,
    user::{Email, NewUser, User, UserId, UserName},
};
use sqlx::PgPool;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// メールアドレスでユーザーを検索
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError>;

    /// 新規ユーザーを保存し、採番済みのユーザーを返す
    ///
    /// # Errors
    ///
    /// - 同じメールアドレスのユーザーが存在する場合は `Conflict`
    /// - データベースエラー
    async fn insert(&self, new_user: NewUser) -> Result<User, InfraError>;
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id:            i64,
    name:          String,
    email:         String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::from_db(
            UserId::from_i64(row.id),
            UserName::new(row.name).map_err(|e| InfraError::unexpected(e.to_string()))?,
            Email::new(row.email).map_err(|e| InfraError::unexpected(e.to_string()))?,
            PasswordHash::new(row.password_hash),
        ))
    }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, new_user: NewUser) -> Result<User, InfraError> {
        // 一意制約違反はエラーではなく空の結果として受け取り、Conflict に変換する
        let row = sqlx::query_as::<_, (i64,)>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(new_user.name.as_str())
        .bind(new_user.email.as_str())
        .bind(new_user.password_hash.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some((id,)) = row else {
            return Err(InfraError::conflict("User", new_user.email.as_str()));
        };

        Ok(User::from_new(UserId::from_i64(id), new_user))
    }
}
