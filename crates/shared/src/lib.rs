//! # PlayerHub 共有ユーティリティ
//!
//! ワークスペース全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換は各アプリの責務）
//! - tracing / tower 関連は `observability` feature で有効化する

pub mod api_response;
#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod health;
pub mod observability;

pub use api_response::ApiEnvelope;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
