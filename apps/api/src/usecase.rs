//! # ユースケース層
//!
//! API のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラテストでスタブに差し替えられるようトレイトを定義
//! - **依存性注入**: リポジトリとパスワードハッシュ実装を外部から注入

pub mod auth;
pub mod player;

use async_trait::async_trait;
pub use auth::AuthUseCaseImpl;
use playerhub_domain::{
    player::{Player, PlayerProfile},
    user::User,
};
pub use player::PlayerUseCaseImpl;

use crate::error::{AuthError, PlayerError};

/// 認証ユースケーストレイト
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// ユーザーを登録する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(User)`: 採番済みの登録ユーザー
    /// - `Err(AuthError::Validation)`: 入力値が不正
    /// - `Err(AuthError::DuplicateEmail)`: メールアドレスが登録済み
    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError>;

    /// メールアドレスとパスワードでログインする
    ///
    /// ## 戻り値
    ///
    /// - `Ok(User)`: 認証に成功したユーザー
    /// - `Err(AuthError::UserNotFound)`: メールアドレスが未登録
    /// - `Err(AuthError::InvalidCredentials)`: パスワード不一致
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;
}

/// 選手ユースケーストレイト
#[async_trait]
pub trait PlayerUseCase: Send + Sync {
    /// 選手を登録する（入力値は検証しない）
    async fn add_player(&self, profile: PlayerProfile) -> Result<Player, PlayerError>;

    /// 全選手を登録順で取得する
    async fn list_players(&self) -> Result<Vec<Player>, PlayerError>;
}
