//! # 選手
//!
//! 選手エンティティを定義する。
//!
//! 選手プロフィールには一切のバリデーションを行わない。未入力・ゼロを含む
//! あらゆる値をそのまま受け付け、永続化する。
//!
//! ## JSON 形式
//!
//! フロントエンドとの互換性のため、フィールド名は camelCase で入出力する。
//! `phone` は数値のほか数値文字列・空文字列・null も受け付ける
//! （空文字列と null は 0）:
//!
//! ```json
//! {
//!   "playerId": 1,
//!   "playerName": "Virat",
//!   "playerCity": "Delhi",
//!   "phone": 9876543210,
//!   "playedIn": "IPL",
//!   "playerType": "Batsman",
//!   "lastPlayedFor": "RCB"
//! }
//! ```

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    de::{self, Unexpected},
};

define_serial_id! {
    /// 選手 ID（データベース採番）
    pub struct PlayerId;
}

/// 選手プロフィール（採番前の登録内容）
///
/// すべての文字列フィールドは任意。`phone` は未指定・null・空文字列のとき 0。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerProfile {
    #[serde(rename = "playerName")]
    pub name:            Option<String>,
    #[serde(rename = "playerCity")]
    pub city:            Option<String>,
    #[serde(deserialize_with = "deserialize_phone")]
    pub phone:           i64,
    pub played_in:       Option<String>,
    pub player_type:     Option<String>,
    pub last_played_for: Option<String>,
}

/// 電話番号を数値・数値文字列・null から読み取る
fn deserialize_phone<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PhoneInput {
        Number(i64),
        Text(String),
    }

    match Option::<PhoneInput>::deserialize(deserializer)? {
        None => Ok(0),
        Some(PhoneInput::Number(number)) => Ok(number),
        Some(PhoneInput::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(0);
            }
            text.parse().map_err(|_| {
                de::Error::invalid_value(Unexpected::Str(text), &"数値の電話番号")
            })
        }
    }
}

/// 選手エンティティ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(rename = "playerId")]
    pub id:      PlayerId,
    #[serde(flatten)]
    pub profile: PlayerProfile,
}

impl Player {
    pub fn new(id: PlayerId, profile: PlayerProfile) -> Self {
        Self { id, profile }
    }
}
