//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | サインアップ・ログイン時の入力値 |
//! | [`PasswordHash`] | ダイジェスト | 永続化用のソルト付きハッシュ値 |
//! | [`PasswordVerifyResult`] | 検証結果 | パスワード検証の成否 |

use crate::DomainError;

/// 平文パスワード（サインアップ・ログイン時の入力値）
///
/// Debug 出力ではパスワードの値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

impl PlainPassword {
    /// パスワードを作成する
    ///
    /// ログイン時の入力値は検証しない（不一致は検証結果で表現する）。
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// サインアップ用にパスワードを作成する
    ///
    /// 空文字列は登録できない。
    pub fn for_signup(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("Password is required".to_string()));
        }
        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// パスワードハッシュ（ダイジェスト）
///
/// Argon2id の PHC 文字列形式（`$argon2id$v=19$...`）をラップする。
/// データベースに保存される形式であり、HTTP レスポンスには含めない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// ハッシュ文字列からインスタンスを作成する
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

/// パスワード検証結果
///
/// bool ではなく専用の型を使うことで、呼び出し側の分岐を明示する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
    /// パスワードが一致した
    Match,
    /// パスワードが一致しなかった（ダイジェストが不正な場合も含む）
    Mismatch,
}

impl PasswordVerifyResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }
}

impl From<bool> for PasswordVerifyResult {
    fn from(matched: bool) -> Self {
        if matched { Self::Match } else { Self::Mismatch }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_平文パスワードのdebug出力はマスクされる() {
        let password = PlainPassword::new("secret");
        let debug = format!("{:?}", password);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }

    #[rstest]
    fn test_サインアップ用パスワードは空文字列を拒否する() {
        let result = PlainPassword::for_signup("");
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[rstest]
    fn test_サインアップ用パスワードは前後の空白を保持する() {
        // 平文パスワードは trim しない（入力どおりにハッシュ化する）
        let password = PlainPassword::for_signup(" pw ").unwrap();
        assert_eq!(password.as_str(), " pw ");
    }

    #[rstest]
    #[case(true, PasswordVerifyResult::Match)]
    #[case(false, PasswordVerifyResult::Mismatch)]
    fn test_boolからの変換(#[case] matched: bool, #[case] expected: PasswordVerifyResult) {
        assert_eq!(PasswordVerifyResult::from(matched), expected);
    }
}
