use clubdir_db::models::user::CreateUser;
use clubdir_db::repositories::UserRepo;
use sqlx::PgPool;

fn new_user(name: &str, hash: &str) -> CreateUser {
    CreateUser {
        username: name.into(),
        password_hash: hash.into(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_by_username(pool: PgPool) {
    let created = UserRepo::create(&pool, &new_user("admin", "hash")).await.unwrap();
    let found = UserRepo::find_by_username(&pool, "admin").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.password_hash, "hash");
    assert!(UserRepo::find_by_username(&pool, "Admin").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_username_is_unique(pool: PgPool) {
    UserRepo::create(&pool, &new_user("admin", "a")).await.unwrap();
    assert!(UserRepo::create(&pool, &new_user("admin", "b")).await.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_if_absent_keeps_existing_password(pool: PgPool) {
    let first = UserRepo::create_if_absent(&pool, &new_user("admin", "first"))
        .await
        .unwrap();
    assert!(first.is_some());

    let second = UserRepo::create_if_absent(&pool, &new_user("admin", "second"))
        .await
        .unwrap();
    assert!(second.is_none());

    let stored = UserRepo::find_by_username(&pool, "admin").await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "first");
}
