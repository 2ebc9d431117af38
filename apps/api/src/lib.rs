//! # PlayerHub API サーバー
//!
//! 選手の登録・一覧と、ユーザーのサインアップ・ログインを提供する HTTP API。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - DI とルーター構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`middleware`] - Basic 認証ミドルウェア
//! - [`usecase`] - ビジネスロジック
//!
//! ## 依存関係
//!
//! - `playerhub_domain`: ドメインモデル
//! - `playerhub_infra`: データベース接続・リポジトリ・パスワードハッシュ
//! - `playerhub_shared`: レスポンスエンベロープ・オブザーバビリティ

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
