//! # 選手ユースケース
//!
//! 選手の登録と一覧取得。入力値の検証は行わず、そのまま永続化する。

use std::sync::Arc;

use async_trait::async_trait;
use playerhub_domain::player::{Player, PlayerProfile};
use playerhub_infra::repository::PlayerRepository;

use super::PlayerUseCase;
use crate::error::PlayerError;

/// 選手ユースケースの実装
pub struct PlayerUseCaseImpl {
    player_repository: Arc<dyn PlayerRepository>,
}

impl PlayerUseCaseImpl {
    pub fn new(player_repository: Arc<dyn PlayerRepository>) -> Self {
        Self { player_repository }
    }
}

#[async_trait]
impl PlayerUseCase for PlayerUseCaseImpl {
    #[tracing::instrument(skip_all)]
    async fn add_player(&self, profile: PlayerProfile) -> Result<Player, PlayerError> {
        let player = self.player_repository.insert(profile).await?;
        tracing::info!(player_id = %player.id, "選手を登録しました");
        Ok(player)
    }

    #[tracing::instrument(skip_all)]
    async fn list_players(&self) -> Result<Vec<Player>, PlayerError> {
        let players = self.player_repository.find_all().await?;
        tracing::debug!(count = players.len(), "選手一覧を取得しました");
        Ok(players)
    }
}
