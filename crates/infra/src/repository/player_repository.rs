//! # PlayerRepository
//!
//! 選手情報の永続化を担当するリポジトリ。

use async_trait::async_trait;
use playerhub_domain::player::{Player, PlayerId, PlayerProfile};
use sqlx::PgPool;

use crate::error::InfraError;

/// 選手リポジトリトレイト
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// 選手を保存し、採番済みの選手を返す
    async fn insert(&self, profile: PlayerProfile) -> Result<Player, InfraError>;

    /// 全選手を ID 昇順（登録順）で取得する
    async fn find_all(&self) -> Result<Vec<Player>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct PlayerRow {
    id:              i64,
    player_name:     Option<String>,
    player_city:     Option<String>,
    phone:           i64,
    played_in:       Option<String>,
    player_type:     Option<String>,
    last_played_for: Option<String>,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Player::new(
            PlayerId::from_i64(row.id),
            PlayerProfile {
                name:            row.player_name,
                city:            row.player_city,
                phone:           row.phone,
                played_in:       row.played_in,
                player_type:     row.player_type,
                last_played_for: row.last_played_for,
            },
        )
    }
}

/// PostgreSQL 実装の PlayerRepository
#[derive(Debug, Clone)]
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, profile: PlayerProfile) -> Result<Player, InfraError> {
        let (id,) = sqlx::query_as::<_, (i64,)>(
            r#"
            INSERT INTO players (
                player_name, player_city, phone, played_in, player_type, last_played_for
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(profile.name.as_deref())
        .bind(profile.city.as_deref())
        .bind(profile.phone)
        .bind(profile.played_in.as_deref())
        .bind(profile.player_type.as_deref())
        .bind(profile.last_played_for.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(Player::new(PlayerId::from_i64(id), profile))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Player>, InfraError> {
        let rows = sqlx::query_as::<_, PlayerRow>(
            r#"
            SELECT id, player_name, player_city, phone, played_in, player_type, last_played_for
            FROM players
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Player::from).collect())
    }
}
