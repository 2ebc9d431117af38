//! # ミドルウェア
//!
//! API サーバー用のミドルウェアを提供する。

mod basic_auth;

pub use basic_auth::{AuthenticatedAccount, BasicAuthState, require_basic_auth};
