/// Database access layer
///
/// This module provides:
/// - Connection pool creation and migrations (`pool`)
/// - Query functions per table (`post_repo`, `vote_repo`, `user_repo`, `follow_repo`)
/// - [`PostRepository`], the seam the services depend on, and its PostgreSQL
///   implementation [`PgPostRepository`]
pub mod follow_repo;
pub mod pool;
pub mod post_repo;
pub mod user_repo;
pub mod vote_repo;

pub use pool::{create_pool, migrate};

use crate::models::{
    NewPost, Post, PostChanges, PostQuery, PostScope, PostVote, PostWithVotes, Subnoddit, User,
};
use async_trait::async_trait;
use sqlx::PgPool;

/// Storage operations used by the post and follow services.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_user(&self, user_id: i64) -> Result<Option<User>, sqlx::Error>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;

    async fn find_subnoddit(&self, subnoddit_id: i64) -> Result<Option<Subnoddit>, sqlx::Error>;

    async fn find_post(&self, post_id: i64) -> Result<Option<Post>, sqlx::Error>;

    async fn find_post_with_votes(&self, post_id: i64)
        -> Result<Option<PostWithVotes>, sqlx::Error>;

    async fn list_posts(&self, query: PostQuery) -> Result<Vec<PostWithVotes>, sqlx::Error>;

    async fn count_posts(&self, scope: PostScope) -> Result<i64, sqlx::Error>;

    async fn create_post(&self, post: NewPost) -> Result<Post, sqlx::Error>;

    async fn update_post(&self, post_id: i64, changes: PostChanges) -> Result<Post, sqlx::Error>;

    /// Returns the number of rows removed
    async fn delete_post(&self, post_id: i64) -> Result<u64, sqlx::Error>;

    async fn find_vote(&self, user_id: i64, post_id: i64) -> Result<Option<PostVote>, sqlx::Error>;

    async fn create_vote(
        &self,
        user_id: i64,
        post_id: i64,
        direction: i16,
    ) -> Result<PostVote, sqlx::Error>;

    async fn update_vote_direction(
        &self,
        user_id: i64,
        post_id: i64,
        direction: i16,
    ) -> Result<PostVote, sqlx::Error>;

    /// Returns true if a new edge was inserted
    async fn create_follow(&self, follower_id: i64, following_id: i64)
        -> Result<bool, sqlx::Error>;

    /// Returns true if an edge was removed
    async fn delete_follow(&self, follower_id: i64, following_id: i64)
        -> Result<bool, sqlx::Error>;
}

/// [`PostRepository`] backed by PostgreSQL
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_user(&self, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        user_repo::find_user_by_id(&self.pool, user_id).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        user_repo::find_user_by_username(&self.pool, username).await
    }

    async fn find_subnoddit(&self, subnoddit_id: i64) -> Result<Option<Subnoddit>, sqlx::Error> {
        user_repo::find_subnoddit_by_id(&self.pool, subnoddit_id).await
    }

    async fn find_post(&self, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
        post_repo::find_post_by_id(&self.pool, post_id).await
    }

    async fn find_post_with_votes(
        &self,
        post_id: i64,
    ) -> Result<Option<PostWithVotes>, sqlx::Error> {
        post_repo::find_post_with_votes(&self.pool, post_id).await
    }

    async fn list_posts(&self, query: PostQuery) -> Result<Vec<PostWithVotes>, sqlx::Error> {
        post_repo::list_posts(&self.pool, query).await
    }

    async fn count_posts(&self, scope: PostScope) -> Result<i64, sqlx::Error> {
        post_repo::count_posts(&self.pool, scope).await
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, sqlx::Error> {
        post_repo::create_post(&self.pool, &post).await
    }

    async fn update_post(&self, post_id: i64, changes: PostChanges) -> Result<Post, sqlx::Error> {
        post_repo::update_post(&self.pool, post_id, &changes).await
    }

    async fn delete_post(&self, post_id: i64) -> Result<u64, sqlx::Error> {
        post_repo::delete_post(&self.pool, post_id).await
    }

    async fn find_vote(&self, user_id: i64, post_id: i64) -> Result<Option<PostVote>, sqlx::Error> {
        vote_repo::find_vote(&self.pool, user_id, post_id).await
    }

    async fn create_vote(
        &self,
        user_id: i64,
        post_id: i64,
        direction: i16,
    ) -> Result<PostVote, sqlx::Error> {
        vote_repo::create_vote(&self.pool, user_id, post_id, direction).await
    }

    async fn update_vote_direction(
        &self,
        user_id: i64,
        post_id: i64,
        direction: i16,
    ) -> Result<PostVote, sqlx::Error> {
        vote_repo::update_vote_direction(&self.pool, user_id, post_id, direction).await
    }

    async fn create_follow(
        &self,
        follower_id: i64,
        following_id: i64,
    ) -> Result<bool, sqlx::Error> {
        follow_repo::create_follow(&self.pool, follower_id, following_id).await
    }

    async fn delete_follow(
        &self,
        follower_id: i64,
        following_id: i64,
    ) -> Result<bool, sqlx::Error> {
        follow_repo::delete_follow(&self.pool, follower_id, following_id).await
    }
}
