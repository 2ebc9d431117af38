//! # テスト用モックリポジトリ
//!
//! ユースケーステストとハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! playerhub-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use playerhub_domain::{
    player::{Player, PlayerId, PlayerProfile},
    user::{Email, NewUser, User, UserId},
};

use crate::{
    error::InfraError,
    repository::{PlayerRepository, UserRepository},
};

// ===== MockUserRepository =====

/// インメモリのユーザーリポジトリ
///
/// PostgreSQL 実装と同様に、メールアドレスの重複は `Conflict` を返す。
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users:   Arc<Mutex<Vec<User>>>,
    failing: Arc<AtomicBool>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以降の操作をすべてデータベースエラー扱いにする
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// 保存済みのユーザーを取得する
    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn check_failing(&self) -> Result<(), InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("mock user repository failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        self.check_failing()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, InfraError> {
        self.check_failing()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email() == &new_user.email) {
            return Err(InfraError::conflict("User", new_user.email.as_str()));
        }

        let id = UserId::from_i64(users.len() as i64 + 1);
        let user = User::from_new(id, new_user);
        users.push(user.clone());
        Ok(user)
    }
}

// ===== MockPlayerRepository =====

/// インメモリの選手リポジトリ
#[derive(Clone, Default)]
pub struct MockPlayerRepository {
    players: Arc<Mutex<Vec<Player>>>,
    failing: Arc<AtomicBool>,
}

impl MockPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以降の操作をすべてデータベースエラー扱いにする
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check_failing(&self) -> Result<(), InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("mock player repository failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl PlayerRepository for MockPlayerRepository {
    async fn insert(&self, profile: PlayerProfile) -> Result<Player, InfraError> {
        self.check_failing()?;
        let mut players = self.players.lock().unwrap();
        let id = PlayerId::from_i64(players.len() as i64 + 1);
        let player = Player::new(id, profile);
        players.push(player.clone());
        Ok(player)
    }

    async fn find_all(&self) -> Result<Vec<Player>, InfraError> {
        self.check_failing()?;
        Ok(self.players.lock().unwrap().clone())
    }
}
