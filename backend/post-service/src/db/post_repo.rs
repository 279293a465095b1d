use crate::models::{NewPost, Post, PostChanges, PostQuery, PostScope, PostWithVotes};
use sqlx::{PgPool, Postgres, QueryBuilder};

const POST_WITH_VOTES_SELECT: &str = r#"
    SELECT p.id, p.title, p.text, p.attachment, p.user_id, u.username, p.subnoddit_id,
           COALESCE(SUM(pv.direction), 0)::BIGINT AS votes,
           p.created_at, p.updated_at
    FROM posts p
    JOIN users u ON u.id = p.user_id
    LEFT JOIN post_votes pv ON pv.post_id = p.id
"#;

/// Append the WHERE clause selecting the posts covered by `scope`.
fn push_scope(qb: &mut QueryBuilder<'_, Postgres>, scope: PostScope) {
    match scope {
        PostScope::All => {}
        PostScope::Author(user_id) => {
            qb.push(" WHERE p.user_id = ").push_bind(user_id);
        }
        PostScope::Subnoddit(subnoddit_id) => {
            qb.push(" WHERE p.subnoddit_id = ").push_bind(subnoddit_id);
        }
        PostScope::FollowedBy {
            user_id,
            subnoddit_id,
        } => {
            qb.push(
                " WHERE p.user_id IN (SELECT f.following_id FROM followers f WHERE f.follower_id = ",
            )
            .push_bind(user_id)
            .push(")");
            if let Some(subnoddit_id) = subnoddit_id {
                qb.push(" AND p.subnoddit_id = ").push_bind(subnoddit_id);
            }
        }
    }
}

/// Find a post row by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, text, attachment, user_id, subnoddit_id, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID together with its author name and vote sum
pub async fn find_post_with_votes(
    pool: &PgPool,
    post_id: i64,
) -> Result<Option<PostWithVotes>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(POST_WITH_VOTES_SELECT);
    qb.push(" WHERE p.id = ")
        .push_bind(post_id)
        .push(" GROUP BY p.id, u.username");

    let post = qb
        .build_query_as::<PostWithVotes>()
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// List posts in `query.scope`.
///
/// With a vote ordering, posts are sorted by vote sum and ties fall back to
/// newest first; without one, newest first.
pub async fn list_posts(pool: &PgPool, query: PostQuery) -> Result<Vec<PostWithVotes>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(POST_WITH_VOTES_SELECT);
    push_scope(&mut qb, query.scope);
    qb.push(" GROUP BY p.id, u.username ORDER BY ");

    if let Some(order) = query.order_by_votes {
        qb.push("votes ").push(order.as_sql()).push(", ");
    }
    qb.push("p.created_at DESC, p.id DESC");

    qb.push(" LIMIT ")
        .push_bind(query.limit)
        .push(" OFFSET ")
        .push_bind(query.offset);

    let posts = qb.build_query_as::<PostWithVotes>().fetch_all(pool).await?;

    Ok(posts)
}

/// Count every post in `scope`, ignoring pagination
pub async fn count_posts(pool: &PgPool, scope: PostScope) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts p");
    push_scope(&mut qb, scope);

    let count = qb.build_query_scalar::<i64>().fetch_one(pool).await?;

    Ok(count)
}

/// Insert a new post
pub async fn create_post(pool: &PgPool, post: &NewPost) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, text, attachment, user_id, subnoddit_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, title, text, attachment, user_id, subnoddit_id, created_at, updated_at
        "#,
    )
    .bind(&post.title)
    .bind(&post.text)
    .bind(&post.attachment)
    .bind(post.user_id)
    .bind(post.subnoddit_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Write the editable columns of a post
pub async fn update_post(
    pool: &PgPool,
    post_id: i64,
    changes: &PostChanges,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = $1, text = $2, attachment = $3, subnoddit_id = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING id, title, text, attachment, user_id, subnoddit_id, created_at, updated_at
        "#,
    )
    .bind(&changes.title)
    .bind(&changes.text)
    .bind(&changes.attachment)
    .bind(changes.subnoddit_id)
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Delete a post; returns the number of rows removed
pub async fn delete_post(pool: &PgPool, post_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
