//! # パスワードハッシュ
//!
//! Argon2id によるパスワードのハッシュ化と検証を提供する。
//!
//! ハッシュは PHC 文字列形式で、アルゴリズム・パラメータ・ソルトを含む。
//! そのため検証時は保存済みハッシュに埋め込まれたパラメータが使われ、
//! 生成時のパラメータを変更しても既存ユーザーのログインには影響しない。

use argon2::{
    Argon2,
    Params,
    PasswordHasher as _,
    PasswordVerifier as _,
    password_hash::{PasswordHash as Argon2PasswordHash, SaltString},
};
use playerhub_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::InfraError;

/// パスワードのハッシュ化と検証を担当するトレイト
pub trait PasswordHasher: Send + Sync {
    /// ランダムなソルトを付与してパスワードをハッシュ化する
    ///
    /// 同じパスワードでも呼び出しごとに異なるダイジェストを返す。
    ///
    /// # Errors
    ///
    /// - ハッシュ計算に失敗した場合
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;

    /// パスワードを検証する
    ///
    /// ダイジェストが PHC 形式として解釈できない場合も `Mismatch` を返す。
    fn verify(&self, password: &PlainPassword, hash: &PasswordHash) -> PasswordVerifyResult;
}

/// Argon2id によるパスワードハッシュの実装
///
/// OWASP 推奨パラメータ（RFC 9106）を使用:
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::with_params(Params::new(
            65536, // memory (KB) = 64 MB
            1,     // iterations
            1,     // parallelism
            None,  // output length (default: 32)
        ))
    }

    /// ハッシュ生成パラメータを指定して作成する
    ///
    /// テストでは計算コストの低いパラメータを渡す。
    /// パラメータが不正な場合は既定値（`Params::default()`）にフォールバックする。
    pub fn with_params(params: Result<Params, argon2::Error>) -> Self {
        let params = params.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Argon2 パラメータが不正なため既定値を使用します");
            Params::default()
        });

        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        let salt_bytes: [u8; 16] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| InfraError::unexpected(format!("ソルトの生成に失敗: {e}")))?;

        let hash = self
            .argon2
            .hash_password(password.as_str().as_bytes(), &salt)
            .map_err(|e| InfraError::unexpected(format!("パスワードのハッシュ化に失敗: {e}")))?;

        Ok(PasswordHash::new(hash.to_string()))
    }

    fn verify(&self, password: &PlainPassword, hash: &PasswordHash) -> PasswordVerifyResult {
        let parsed = match Argon2PasswordHash::new(hash.as_str()) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "不正なハッシュ形式のため不一致として扱います");
                return PasswordVerifyResult::Mismatch;
            }
        };

        let matched = self
            .argon2
            .verify_password(password.as_str().as_bytes(), &parsed)
            .is_ok();

        PasswordVerifyResult::from(matched)
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    // password123 を本番パラメータでハッシュ化したもの
    const TEST_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$olntqw+EoVpwH4B1vUAI0A$5yCA1izLODgz8nQOInDGwbuQB/AS0sIQDwpmIilve5M";

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(Params::new(1024, 1, 1, None))
    }

    #[rstest]
    fn test_ハッシュ化したパスワードを検証できる(hasher: Argon2PasswordHasher) {
        let password = PlainPassword::new("secret1");

        let hash = hasher.hash(&password).unwrap();

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify(&password, &hash).is_match());
    }

    #[rstest]
    fn test_異なるパスワードは不一致になる(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash(&PlainPassword::new("secret1")).unwrap();

        let result = hasher.verify(&PlainPassword::new("wrong"), &hash);

        assert!(result.is_mismatch());
    }

    #[rstest]
    fn test_同じパスワードでもソルトにより異なるダイジェストになる(
        hasher: Argon2PasswordHasher,
    ) {
        let password = PlainPassword::new("secret1");

        let first = hasher.hash(&password).unwrap();
        let second = hasher.hash(&password).unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify(&password, &first).is_match());
        assert!(hasher.verify(&password, &second).is_match());
    }

    #[rstest]
    fn test_ダイジェストにパスワードが含まれない(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash(&PlainPassword::new("secret1")).unwrap();
        assert!(!hash.as_str().contains("secret1"));
    }

    #[rstest]
    fn test_保存済みハッシュのパラメータで検証される(hasher: Argon2PasswordHasher) {
        // 生成パラメータ（m=1024）と異なるハッシュ（m=65536）も検証できる
        let hash = PasswordHash::new(TEST_HASH);

        assert!(
            hasher
                .verify(&PlainPassword::new("password123"), &hash)
                .is_match()
        );
    }

    #[rstest]
    #[case("not-a-valid-hash")]
    #[case("")]
    fn test_不正なハッシュ形式は不一致になる(
        hasher: Argon2PasswordHasher,
        #[case] invalid: &str,
    ) {
        let result = hasher.verify(&PlainPassword::new("password123"), &PasswordHash::new(invalid));

        assert!(result.is_mismatch());
    }

    #[rstest]
    fn test_空のパスワードもハッシュ化できる(hasher: Argon2PasswordHasher) {
        let password = PlainPassword::new("");

        let hash = hasher.hash(&password).unwrap();

        assert!(hasher.verify(&password, &hash).is_match());
    }
}
