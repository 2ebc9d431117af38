//! PlayerRepository 統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://localhost/playerhub cargo test -p playerhub-infra --test player_repository_test -- --ignored
//! ```

use playerhub_domain::player::PlayerProfile;
use playerhub_infra::repository::{PlayerRepository, PostgresPlayerRepository};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

fn profile(name: &str) -> PlayerProfile {
    PlayerProfile {
        name: Some(name.to_string()),
        phone: 9_876_543_210,
        ..PlayerProfile::default()
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_保存した選手を登録順に取得できる(pool: PgPool) {
    let sut = PostgresPlayerRepository::new(pool);

    let first = sut.insert(profile("Virat")).await.unwrap();
    let second = sut.insert(profile("Rohit")).await.unwrap();

    let all = sut.find_all().await.unwrap();

    assert_eq!(all, vec![first, second]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_空のプロフィールもそのまま保存できる(pool: PgPool) {
    let sut = PostgresPlayerRepository::new(pool);

    let inserted = sut.insert(PlayerProfile::default()).await.unwrap();
    let all = sut.find_all().await.unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(all[0], inserted);
    assert_eq!(all[0].profile, PlayerProfile::default());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_選手がいない場合は空のリストを返す(pool: PgPool) {
    let sut = PostgresPlayerRepository::new(pool);

    let all = sut.find_all().await.unwrap();

    assert!(all.is_empty());
}
