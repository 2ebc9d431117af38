//! # リポジトリ実装
//!
//! ユーザーと選手の永続化を担当するリポジトリを提供する。
//!
//! ユースケース層はトレイト経由で利用し、テストではモックに差し替える。

pub mod player_repository;
pub mod user_repository;

pub use player_repository::{PlayerRepository, PostgresPlayerRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
