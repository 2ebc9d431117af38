//! # アプリケーション設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `API_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `API_PORT` | No | `8080` | ポート番号 |
//! | `DATABASE_URL` | **Yes** | - | PostgreSQL 接続 URL |
//! | `CORS_ALLOWED_ORIGINS` | No | `http://localhost:8081,http://localhost:5000` | 許可するオリジン（カンマ区切り） |
//! | `BASIC_AUTH_ACCOUNTS` | No | なし | Basic 認証アカウント（`;` 区切り） |
//!
//! `BASIC_AUTH_ACCOUNTS` の各要素は `ユーザー名:ロール:Argon2 ハッシュ` の形式:
//!
//! ```text
//! admin:ADMIN:$argon2id$v=19$m=65536,t=1,p=1$...;viewer:USER:$argon2id$...
//! ```
//!
//! 解析処理は環境変数に触れない純粋関数として分離し、単体テスト可能にしている。

use std::env;

use playerhub_domain::password::PasswordHash;
use strum::{Display, EnumString};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:8081,http://localhost:5000";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),

    /// ポート番号が不正
    #[error("API_PORT は有効なポート番号である必要があります: {0}")]
    InvalidPort(String),

    /// CORS オリジンにワイルドカードが指定された
    #[error("CORS_ALLOWED_ORIGINS にワイルドカード `*` は指定できません")]
    WildcardOrigin,

    /// Basic 認証アカウントの書式が不正
    #[error("BASIC_AUTH_ACCOUNTS の書式が不正です: {0}")]
    InvalidAccount(String),
}

/// Basic 認証アカウントのロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum AccountRole {
    Admin,
    User,
}

/// Basic 認証アカウント
///
/// パスワードは Argon2 のハッシュでのみ保持する。
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAccount {
    pub username:      String,
    pub role:          AccountRole,
    pub password_hash: PasswordHash,
}

impl std::fmt::Debug for BasicAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAccount")
            .field("username", &self.username)
            .field("role", &self.role)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:                 String,
    /// ポート番号
    pub port:                 u16,
    /// データベース接続 URL
    pub database_url:         String,
    /// CORS で許可するオリジン
    pub cors_allowed_origins: Vec<String>,
    /// Basic 認証アカウント（空の場合は認証なし）
    pub basic_accounts:       Vec<BasicAccount>,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("API_PORT") {
            Ok(value) => parse_port(&value)?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host: env::var("API_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            cors_allowed_origins: parse_origins(
                &env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGINS.to_string()),
            )?,
            basic_accounts: parse_accounts(&env::var("BASIC_AUTH_ACCOUNTS").unwrap_or_default())?,
        })
    }

    /// バインドアドレスを `host:port` 形式で返す
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// ポート番号をパースする
pub fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(value.to_string()))
}

/// カンマ区切りのオリジン一覧をパースする
///
/// 空要素は無視する。資格情報付きの CORS ではワイルドカードを使えないため
/// `*` はエラーとする。
pub fn parse_origins(value: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if origins.iter().any(|origin| origin == "*") {
        return Err(ConfigError::WildcardOrigin);
    }
    Ok(origins)
}

/// `;` 区切りの Basic 認証アカウント一覧をパースする
///
/// 各要素は先頭の 2 つの `:` で分割し、残りをハッシュとして扱う。
pub fn parse_accounts(value: &str) -> Result<Vec<BasicAccount>, ConfigError> {
    value
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_account)
        .collect()
}

fn parse_account(entry: &str) -> Result<BasicAccount, ConfigError> {
    let mut parts = entry.splitn(3, ':');
    let (Some(username), Some(role), Some(hash)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ConfigError::InvalidAccount(
            "ユーザー名:ロール:ハッシュ の形式で指定してください".to_string(),
        ));
    };

    if username.is_empty() {
        return Err(ConfigError::InvalidAccount(
            "ユーザー名が空です".to_string(),
        ));
    }

    let role = role
        .parse::<AccountRole>()
        .map_err(|_| ConfigError::InvalidAccount(format!("不明なロール: {role}")))?;

    if !hash.starts_with('$') {
        return Err(ConfigError::InvalidAccount(format!(
            "{username} のパスワードは PHC 形式のハッシュで指定してください"
        )));
    }

    Ok(BasicAccount {
        username: username.to_string(),
        role,
        password_hash: PasswordHash::new(hash),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$olntqw+EoVpwH4B1vUAI0A$5yCA1izLODgz8nQOInDGwbuQB/AS0sIQDwpmIilve5M";

    #[rstest]
    fn test_オリジン一覧をカンマで分割する() {
        let origins = parse_origins("http://localhost:8081, http://localhost:5000,").unwrap();
        assert_eq!(
            origins,
            vec![
                "http://localhost:8081".to_string(),
                "http://localhost:5000".to_string()
            ]
        );
    }

    #[rstest]
    fn test_空文字列のオリジン設定は空リストになる() {
        assert!(parse_origins("").unwrap().is_empty());
    }

    #[rstest]
    #[case("*")]
    #[case("http://localhost:8081, *")]
    fn test_ワイルドカードのオリジンはエラー(#[case] input: &str) {
        assert_eq!(parse_origins(input), Err(ConfigError::WildcardOrigin));
    }

    #[rstest]
    #[case("8080", 8080)]
    #[case(" 3000 ", 3000)]
    fn test_ポート番号をパースする(#[case] input: &str, #[case] expected: u16) {
        assert_eq!(parse_port(input), Ok(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("70000")]
    fn test_不正なポート番号はエラー(#[case] input: &str) {
        assert!(matches!(parse_port(input), Err(ConfigError::InvalidPort(_))));
    }

    #[rstest]
    fn test_アカウント一覧をパースする() {
        let input = format!("admin:ADMIN:{HASH}; viewer:USER:{HASH}");

        let accounts = parse_accounts(&input).unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].username, "admin");
        assert_eq!(accounts[0].role, AccountRole::Admin);
        assert_eq!(accounts[0].password_hash.as_str(), HASH);
        assert_eq!(accounts[1].username, "viewer");
        assert_eq!(accounts[1].role, AccountRole::User);
    }

    #[rstest]
    fn test_アカウント未設定は空リストになる() {
        assert_eq!(parse_accounts("").unwrap(), vec![]);
    }

    #[rstest]
    #[case("admin")]
    #[case("admin:ADMIN")]
    #[case(":ADMIN:$argon2id$x")]
    #[case("admin:ROOT:$argon2id$x")]
    #[case("admin:ADMIN:plaintext")]
    fn test_不正なアカウント書式はエラー(#[case] input: &str) {
        assert!(matches!(
            parse_accounts(input),
            Err(ConfigError::InvalidAccount(_))
        ));
    }

    #[rstest]
    fn test_アカウントのdebug出力はハッシュをマスクする() {
        let accounts = parse_accounts(&format!("admin:ADMIN:{HASH}")).unwrap();
        let debug = format!("{:?}", accounts[0]);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("argon2id"));
    }

    #[rstest]
    fn test_ロールは大文字で表示される() {
        assert_eq!(AccountRole::Admin.to_string(), "ADMIN");
        assert_eq!(AccountRole::User.to_string(), "USER");
    }
}
