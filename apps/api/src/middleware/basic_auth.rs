//! # Basic 認証ミドルウェア
//!
//! 設定された Basic 認証アカウントでリクエストを認証する。
//!
//! ## ポリシー
//!
//! - アカウントが 1 件も設定されていない場合は全リクエストを許可する
//! - CORS プリフライト（`OPTIONS`）とヘルスチェック（`/health*`）は常に許可する
//! - それ以外は `Authorization: Basic ...` が必須。失敗時は 401 と
//!   `WWW-Authenticate: Basic realm="playerhub"` を返す
//!
//! 認証に成功したアカウントは [`AuthenticatedAccount`] としてリクエスト拡張に格納する。

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use playerhub_domain::password::PlainPassword;
use playerhub_infra::PasswordHasher;
use subtle::ConstantTimeEq;

use crate::{
    config::{AccountRole, BasicAccount},
    error::failure_response,
};

const WWW_AUTHENTICATE_VALUE: &str = r#"Basic realm="playerhub""#;

/// Basic 認証ミドルウェアの状態
#[derive(Clone)]
pub struct BasicAuthState {
    pub accounts:        Arc<[BasicAccount]>,
    pub password_hasher: Arc<dyn PasswordHasher>,
}

/// 認証済みアカウント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub username: String,
    pub role:     AccountRole,
}

/// 認証を必要としないリクエストかどうか
fn is_exempt(method: &Method, path: &str) -> bool {
    method == Method::OPTIONS || path == "/health" || path.starts_with("/health/")
}

/// `Authorization` ヘッダーからユーザー名とパスワードを取り出す
fn parse_basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// ユーザー名が一致するアカウントを探す
///
/// 全アカウントと定数時間で比較し、一致位置による処理時間の差を出さない。
fn find_account<'a>(accounts: &'a [BasicAccount], username: &str) -> Option<&'a BasicAccount> {
    let mut matched = None;
    for account in accounts {
        let is_equal: bool = account.username.as_bytes().ct_eq(username.as_bytes()).into();
        if is_equal && matched.is_none() {
            matched = Some(account);
        }
    }
    matched
}

fn unauthorized() -> Response {
    let mut response = failure_response(StatusCode::UNAUTHORIZED, "Unauthorized");
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static(WWW_AUTHENTICATE_VALUE),
    );
    response
}

/// Basic 認証ミドルウェア
pub async fn require_basic_auth(
    State(state): State<BasicAuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if state.accounts.is_empty() || is_exempt(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    let Some((username, password)) = parse_basic_credentials(request.headers()) else {
        tracing::debug!("Basic 認証ヘッダーがありません");
        return unauthorized();
    };

    let Some(account) = find_account(&state.accounts, &username).cloned() else {
        tracing::warn!("Basic 認証に失敗しました: 不明なユーザー");
        return unauthorized();
    };

    let hasher = state.password_hasher.clone();
    let hash = account.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || {
        hasher.verify(&PlainPassword::new(password), &hash)
    })
    .await;

    match verified {
        Ok(result) if result.is_match() => {
            tracing::debug!(
                username = %account.username,
                role = %account.role,
                "Basic 認証に成功しました"
            );
            request.extensions_mut().insert(AuthenticatedAccount {
                username: account.username,
                role:     account.role,
            });
            next.run(request).await
        }
        Ok(_) => {
            tracing::warn!(username = %account.username, "Basic 認証に失敗しました: パスワード不一致");
            unauthorized()
        }
        Err(e) => {
            tracing::error!("Basic 認証の検証タスクの実行に失敗: {}", e);
            failure_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

#[cfg(test)]
mod tests {
    use argon2::Params;
    use axum::{Router, middleware::from_fn_with_state, routing::get};
    use playerhub_domain::password::PasswordHash;
    use playerhub_infra::Argon2PasswordHasher;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tower::ServiceExt;

    use super::*;

    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(Params::new(1024, 1, 1, None))
    }

    fn account(username: &str, role: AccountRole, password: &str) -> BasicAccount {
        BasicAccount {
            username: username.to_string(),
            role,
            password_hash: hasher().hash(&PlainPassword::new(password)).unwrap(),
        }
    }

    fn create_test_app(accounts: Vec<BasicAccount>) -> Router {
        let state = BasicAuthState {
            accounts:        accounts.into(),
            password_hasher: Arc::new(hasher()),
        };

        Router::new()
            .route(
                "/whoami",
                get(|request: Request<Body>| async move {
                    request
                        .extensions()
                        .get::<AuthenticatedAccount>()
                        .map_or_else(|| "anonymous".to_string(), |a| a.username.clone())
                }),
            )
            .route("/health", get(|| async { "ok" }))
            .layer(from_fn_with_state(state, require_basic_auth))
    }

    fn basic(username: &str, password: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
    }

    fn request(method: Method, uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_アカウント未設定の場合は認証なしで許可する() {
        let sut = create_test_app(vec![]);

        let response = sut
            .oneshot(request(Method::GET, "/whoami", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "anonymous");
    }

    #[tokio::test]
    async fn test_正しい資格情報で認証済みアカウントが渡される() {
        let sut = create_test_app(vec![account("admin", AccountRole::Admin, "s3cret")]);

        let response = sut
            .oneshot(request(
                Method::GET,
                "/whoami",
                Some(&basic("admin", "s3cret")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "admin");
    }

    #[rstest]
    #[case::ヘッダーなし(None)]
    #[case::パスワード不一致(Some(basic("admin", "wrong")))]
    #[case::不明なユーザー(Some(basic("nobody", "s3cret")))]
    #[case::basic以外のスキーム(Some("Bearer token".to_string()))]
    #[case::不正なbase64(Some("Basic !!!".to_string()))]
    #[tokio::test]
    async fn test_認証に失敗した場合は401を返す(#[case] authorization: Option<String>) {
        let sut = create_test_app(vec![account("admin", AccountRole::Admin, "s3cret")]);

        let response = sut
            .oneshot(request(Method::GET, "/whoami", authorization.as_deref()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            WWW_AUTHENTICATE_VALUE
        );
        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "message": "Unauthorized" })
        );
    }

    #[tokio::test]
    async fn test_ヘルスチェックは認証なしで許可する() {
        let sut = create_test_app(vec![account("admin", AccountRole::Admin, "s3cret")]);

        let response = sut
            .oneshot(request(Method::GET, "/health", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[case(Method::OPTIONS, "/api/signup", true)]
    #[case(Method::GET, "/health", true)]
    #[case(Method::GET, "/health/ready", true)]
    #[case(Method::GET, "/healthz", false)]
    #[case(Method::POST, "/addPlayer", false)]
    fn test_認証除外の判定(#[case] method: Method, #[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_exempt(&method, path), expected);
    }

    #[rstest]
    fn test_ユーザー名の一致するアカウントを返す() {
        let accounts = vec![
            BasicAccount {
                username:      "admin".to_string(),
                role:          AccountRole::Admin,
                password_hash: PasswordHash::new("$argon2id$a"),
            },
            BasicAccount {
                username:      "viewer".to_string(),
                role:          AccountRole::User,
                password_hash: PasswordHash::new("$argon2id$b"),
            },
        ];

        assert_eq!(
            find_account(&accounts, "viewer").map(|a| a.role),
            Some(AccountRole::User)
        );
        assert!(find_account(&accounts, "admi").is_none());
    }

    #[rstest]
    fn test_パスワードにコロンを含む資格情報を解析できる() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&basic("admin", "a:b")).unwrap(),
        );

        assert_eq!(
            parse_basic_credentials(&headers),
            Some(("admin".to_string(), "a:b".to_string()))
        );
    }
}
