//! # PlayerHub API サーバー
//!
//! 選手管理とユーザー認証を提供する単一の HTTP サーバー。
//!
//! ## 環境変数
//!
//! 設定項目は [`playerhub_api::config`] を参照。
//! ログ出力は `RUST_LOG`（フィルタ）と `LOG_FORMAT`（`json` / `pretty`）で制御する。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p playerhub-api
//!
//! # 本番環境（環境変数を直接指定）
//! DATABASE_URL=postgres://... LOG_FORMAT=json cargo run -p playerhub-api --release
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use playerhub_api::{app_builder::build_app, config::ApiConfig, handler::ReadinessState};
use playerhub_infra::{
    Argon2PasswordHasher,
    db,
    repository::{PostgresPlayerRepository, PostgresUserRepository},
};
use playerhub_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. データベース接続とマイグレーション
/// 5. ルーターの構築
/// 6. HTTP サーバーの起動（SIGINT / SIGTERM で graceful shutdown）
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("playerhub-api"));
    let _tracing_guard = tracing::info_span!("app", service = "playerhub-api").entered();

    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!("API サーバーを起動します: {}", config.bind_address());
    log_security_policy(&config);

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベースへの接続に失敗しました")?;
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    let app = build_app(
        &config,
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresPlayerRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(ReadinessState { pool }),
    );

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API サーバーを停止しました");
    Ok(())
}

/// 起動時に認証と CORS の設定内容をログに出す
fn log_security_policy(config: &ApiConfig) {
    if config.basic_accounts.is_empty() {
        tracing::warn!("Basic 認証アカウントが未設定です。全リクエストを認証なしで許可します");
    } else {
        for account in &config.basic_accounts {
            tracing::info!(username = %account.username, role = %account.role, "Basic 認証アカウント");
        }
        tracing::info!(
            count = config.basic_accounts.len(),
            "Basic 認証を有効にしました（OPTIONS と /health は除外）"
        );
    }

    tracing::info!(origins = ?config.cors_allowed_origins, "CORS 許可オリジン");
}

/// SIGINT（Ctrl+C）または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl+C ハンドラの登録に失敗: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラの登録に失敗: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
