//! # 選手ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /addPlayer` - 選手登録
//! - `GET /getAllPlayer` - 選手一覧
//!
//! パスはフロントエンドとの互換性のため camelCase のまま公開する。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use playerhub_domain::player::{Player, PlayerProfile};
use playerhub_shared::ApiEnvelope;
use serde::{Deserialize, Serialize};

use crate::{error::PlayerError, usecase::PlayerUseCase};

/// 選手ハンドラの共有状態
pub struct PlayerState {
    pub usecase: Arc<dyn PlayerUseCase>,
}

/// エンベロープの `data` キー（登録した選手）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerPayload {
    pub data: Player,
}

/// エンベロープの `data` キー（選手一覧）
///
/// フロントエンドは `data` 配列を一覧として描画する。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayersPayload {
    pub data: Vec<Player>,
}

/// POST /addPlayer
///
/// 成功時は 201 Created と採番済みの選手を返す。
pub async fn add_player(
    State(state): State<Arc<PlayerState>>,
    payload: Result<Json<PlayerProfile>, JsonRejection>,
) -> Result<impl IntoResponse, PlayerError> {
    let Json(profile) = payload.map_err(|e| PlayerError::BadRequest(e.body_text()))?;

    let player = state.usecase.add_player(profile).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::success(
            "Player added successfully",
            PlayerPayload { data: player },
        )),
    ))
}

/// GET /getAllPlayer
pub async fn get_all_players(
    State(state): State<Arc<PlayerState>>,
) -> Result<impl IntoResponse, PlayerError> {
    let players = state.usecase.list_players().await?;

    Ok(Json(ApiEnvelope::success(
        "Players fetched successfully",
        PlayersPayload { data: players },
    )))
}
