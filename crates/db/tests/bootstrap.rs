use sqlx::PgPool;

/// Connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    clubdir_db::health_check(&pool).await.unwrap();

    for table in ["clubs", "users"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Blank college or club names are refused by the schema itself.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_natural_key_is_rejected(pool: PgPool) {
    let result = sqlx::query("INSERT INTO clubs (college_name, club_name) VALUES ('  ', 'Chess')")
        .execute(&pool)
        .await;
    assert!(result.is_err());

    let result = sqlx::query("INSERT INTO clubs (college_name, club_name) VALUES ('COEP', '')")
        .execute(&pool)
        .await;
    assert!(result.is_err());
}

/// The natural key is indexed but not unique.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_natural_key_is_not_unique(pool: PgPool) {
    for _ in 0..2 {
        sqlx::query("INSERT INTO clubs (college_name, club_name) VALUES ('COEP', 'Chess')")
            .execute(&pool)
            .await
            .unwrap();
    }
}

/// `updated_at` moves forward on update.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, created): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO clubs (college_name, club_name) VALUES ('COEP', 'Chess') \
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let (updated,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE clubs SET club_advisor = 'Dr. Rao' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(updated >= created);
}
