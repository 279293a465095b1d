use crate::models::PostVote;
use sqlx::PgPool;

/// Find the vote a user cast on a post, including reset (0) votes
pub async fn find_vote(
    pool: &PgPool,
    user_id: i64,
    post_id: i64,
) -> Result<Option<PostVote>, sqlx::Error> {
    let vote = sqlx::query_as::<_, PostVote>(
        r#"
        SELECT user_id, post_id, direction, created_at, updated_at
        FROM post_votes
        WHERE user_id = $1 AND post_id = $2
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(vote)
}

/// Record a user's first vote on a post
pub async fn create_vote(
    pool: &PgPool,
    user_id: i64,
    post_id: i64,
    direction: i16,
) -> Result<PostVote, sqlx::Error> {
    let vote = sqlx::query_as::<_, PostVote>(
        r#"
        INSERT INTO post_votes (user_id, post_id, direction)
        VALUES ($1, $2, $3)
        RETURNING user_id, post_id, direction, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .bind(direction)
    .fetch_one(pool)
    .await?;

    Ok(vote)
}

/// Change the direction of an existing vote. A direction of 0 keeps the row.
pub async fn update_vote_direction(
    pool: &PgPool,
    user_id: i64,
    post_id: i64,
    direction: i16,
) -> Result<PostVote, sqlx::Error> {
    let vote = sqlx::query_as::<_, PostVote>(
        r#"
        UPDATE post_votes
        SET direction = $3, updated_at = NOW()
        WHERE user_id = $1 AND post_id = $2
        RETURNING user_id, post_id, direction, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .bind(direction)
    .fetch_one(pool)
    .await?;

    Ok(vote)
}
