//! # アプリケーション構築
//!
//! DI（ユースケース・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use playerhub_infra::{
    PasswordHasher,
    repository::{PlayerRepository, UserRepository},
};
use playerhub_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::ApiConfig,
    handler::{
        AuthState,
        PlayerState,
        ReadinessState,
        add_player,
        get_all_players,
        health_check,
        login,
        readiness_check,
        signup,
    },
    middleware::{BasicAuthState, require_basic_auth},
    usecase::{AuthUseCaseImpl, PlayerUseCaseImpl},
};

/// CORS プリフライト結果のキャッシュ時間
const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

/// 許可オリジンから CORS レイヤーを構築する
///
/// 資格情報付きリクエストを許可するため、ヘッダーはワイルドカードではなく
/// リクエストの `Access-Control-Request-Headers` をそのまま返す。
/// ワイルドカード `*` とヘッダー値として不正なオリジンは警告を出して無視する。
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter(|origin| {
            if origin.as_str() == "*" {
                tracing::warn!("資格情報付き CORS ではワイルドカードのオリジンを無視します");
                return false;
            }
            true
        })
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "不正な CORS オリジンを無視します");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}

/// DI コンテナの構築とルーター定義を行う
///
/// インフラ初期化済みの依存を受け取り、ユースケース → State → Router の
/// 順に組み立てる。
pub fn build_app(
    config: &ApiConfig,
    user_repository: Arc<dyn UserRepository>,
    player_repository: Arc<dyn PlayerRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    readiness_state: Arc<ReadinessState>,
) -> Router {
    let auth_state = Arc::new(AuthState {
        usecase: Arc::new(AuthUseCaseImpl::new(
            user_repository,
            password_hasher.clone(),
        )),
    });

    let player_state = Arc::new(PlayerState {
        usecase: Arc::new(PlayerUseCaseImpl::new(player_repository)),
    });

    let basic_auth_state = BasicAuthState {
        accounts: config.basic_accounts.clone().into(),
        password_hasher,
    };

    // レイヤー順序: 下に書いたものが外側
    // 1. SetRequestIdLayer（最外）: UUID v7 の Request ID を付与
    // 2. TraceLayer: request_id を含むリクエストスパン
    // 3. CanonicalLogLineLayer: リクエスト完了時に 1 行サマリログを出力
    // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
    // 5. CorsLayer: プリフライトに応答し、401 を含む全レスポンスに CORS ヘッダーを付与
    // 6. require_basic_auth: Basic 認証
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(
            Router::new()
                .route("/api/signup", post(signup))
                .route("/api/login", post(login))
                .with_state(auth_state),
        )
        .merge(
            Router::new()
                .route("/addPlayer", post(add_player))
                .route("/getAllPlayer", get(get_all_players))
                .with_state(player_state),
        )
        .layer(from_fn_with_state(basic_auth_state, require_basic_auth))
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
