//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`User`] | ユーザー | サインアップ済みのアカウント |
//! | [`NewUser`] | 新規ユーザー | 採番前の登録内容 |
//! | [`Email`] | メールアドレス | ログインキー（全ユーザーで一意） |
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use playerhub_domain::{
//!     password::PasswordHash,
//!     user::{Email, NewUser, User, UserId, UserName},
//! };
//!
//! let new_user = NewUser {
//!     name:          UserName::new("Alice")?,
//!     email:         Email::new("alice@example.com")?,
//!     password_hash: PasswordHash::new("$argon2id$..."),
//! };
//!
//! // 永続化層が ID を採番した後に User として復元する
//! let user = User::from_new(UserId::from_i64(1), new_user);
//! assert_eq!(user.email().as_str(), "alice@example.com");
//! # Ok(())
//! # }
//! ```

use crate::{DomainError, password::PasswordHash};

define_serial_id! {
    /// ユーザー ID（データベース採番）
    pub struct UserId;
}

define_validated_string! {
    /// ユーザー表示名
    pub struct UserName {
        label: "Name",
        max_length: 100,
    }
}

/// メールアドレス（値オブジェクト）
///
/// 前後の空白を除去したうえで `local@domain` の形式であることを要求する。
/// 大文字小文字は区別して保存・照合する。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `@` を含み、その前後が空でない
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation("Email is required".to_string()));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation("Email format is invalid".to_string()));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation("Email format is invalid".to_string()));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "Email must be at most 255 characters".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 採番前の新規ユーザー
///
/// パスワードはハッシュ化済みの状態でのみ保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name:          UserName,
    pub email:         Email,
    pub password_hash: PasswordHash,
}

/// ユーザーエンティティ
///
/// 作成後は更新・削除されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:            UserId,
    name:          UserName,
    email:         Email,
    password_hash: PasswordHash,
}

impl User {
    /// 採番済み ID と新規ユーザーの内容からエンティティを作成する
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
        }
    }

    /// データベースから復元する
    pub fn from_db(id: UserId, name: UserName, email: Email, password_hash: PasswordHash) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
