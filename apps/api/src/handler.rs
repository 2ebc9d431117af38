//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `auth`: サインアップ・ログイン
//! - `health`: ヘルスチェック
//! - `player`: 選手の登録・一覧

pub mod auth;
pub mod health;
pub mod player;

pub use auth::{AuthState, login, signup};
pub use health::{ReadinessState, health_check, readiness_check};
pub use player::{PlayerState, add_player, get_all_players};
