use sqlx::PgPool;

/// Idempotent create follow; returns true if a new row was inserted.
pub async fn create_follow(
    pool: &PgPool,
    follower_id: i64,
    following_id: i64,
) -> Result<bool, sqlx::Error> {
    let inserted = sqlx::query_as::<_, (i64,)>(
        r#"
        INSERT INTO followers (follower_id, following_id, created_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (follower_id, following_id) DO NOTHING
        RETURNING follower_id
        "#,
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

/// Idempotent delete; returns true if a row was removed.
pub async fn delete_follow(
    pool: &PgPool,
    follower_id: i64,
    following_id: i64,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM followers
        WHERE follower_id = $1 AND following_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(following_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}
