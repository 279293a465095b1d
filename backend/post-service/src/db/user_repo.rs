use crate::models::{Subnoddit, User};
use sqlx::PgPool;

pub async fn find_user_by_id(pool: &PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username, created_at FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username, created_at FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn find_subnoddit_by_id(
    pool: &PgPool,
    subnoddit_id: i64,
) -> Result<Option<Subnoddit>, sqlx::Error> {
    sqlx::query_as::<_, Subnoddit>(
        "SELECT id, name, description, created_at FROM subnoddits WHERE id = $1",
    )
    .bind(subnoddit_id)
    .fetch_optional(pool)
    .await
}
