//! UserRepository 統合テスト
//!
//! データベースを使用したテスト。sqlx::test マクロにより
//! テストごとに専用のデータベースが作成され、マイグレーションが適用される。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://localhost/playerhub cargo test -p playerhub-infra --test user_repository_test -- --ignored
//! ```

use playerhub_domain::{
    password::PasswordHash,
    user::{Email, NewUser, UserName},
};
use playerhub_infra::{
    InfraErrorKind,
    repository::{PostgresUserRepository, UserRepository},
};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

fn new_user(email: &str) -> NewUser {
    NewUser {
        name:          UserName::new("A").unwrap(),
        email:         Email::new(email).unwrap(),
        password_hash: PasswordHash::new("$argon2id$v=19$m=1024,t=1,p=1$c2FsdHNhbHQ$aGFzaA"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_保存したユーザーをメールアドレスで検索できる(pool: PgPool) {
    let sut = PostgresUserRepository::new(pool);

    let inserted = sut.insert(new_user("a@x.com")).await.unwrap();
    let found = sut
        .find_by_email(&Email::new("a@x.com").unwrap())
        .await
        .unwrap()
        .expect("ユーザーが見つかること");

    assert_eq!(found, inserted);
    assert_eq!(found.name().as_str(), "A");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_存在しないメールアドレスはnoneを返す(pool: PgPool) {
    let sut = PostgresUserRepository::new(pool);

    let found = sut
        .find_by_email(&Email::new("missing@x.com").unwrap())
        .await
        .unwrap();

    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_重複したメールアドレスはconflictになる(pool: PgPool) {
    let sut = PostgresUserRepository::new(pool);
    sut.insert(new_user("a@x.com")).await.unwrap();

    let err = sut.insert(new_user("a@x.com")).await.unwrap_err();

    assert!(matches!(err.kind(), InfraErrorKind::Conflict { .. }));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_メールアドレスは大文字小文字を区別する(pool: PgPool) {
    let sut = PostgresUserRepository::new(pool);
    sut.insert(new_user("a@x.com")).await.unwrap();

    let result = sut.insert(new_user("A@x.com")).await;

    assert!(result.is_ok());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_同時サインアップでも保存されるのは1件のみ(pool: PgPool) {
    let sut = PostgresUserRepository::new(pool.clone());

    let (first, second) = tokio::join!(
        sut.insert(new_user("race@x.com")),
        sut.insert(new_user("race@x.com")),
    );

    assert!(first.is_ok() ^ second.is_ok());
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("race@x.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
