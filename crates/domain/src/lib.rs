//! # PlayerHub ドメイン層
//!
//! ユーザーと選手のドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、ハッシュ実装）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`password`] - 平文パスワード・ダイジェスト・検証結果
//! - [`player`] - 選手エンティティ
//! - [`user`] - ユーザーエンティティとメールアドレス

#[macro_use]
mod macros;

pub mod error;
pub mod password;
pub mod player;
pub mod user;

pub use error::DomainError;
