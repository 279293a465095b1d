/// Post service - lookup, listing, news feed, authoring and voting
use crate::config::PostsConfig;
use crate::db::PostRepository;
use crate::error::{AppError, Result};
use crate::metrics::posts::{record_operation, record_vote};
use crate::middleware::check_post_ownership;
use crate::models::{
    CreatePostRequest, FeedFilter, MessageResponse, NewPost, Post, PostChanges, PostFilter,
    PostQuery, PostResponse, PostScope, PostsResponse, SavedPostResponse, SortOrder,
    UpdatePostRequest, VoteDirection, VoteRequest,
};
use crate::services::votes::VoteAction;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

pub const POST_NOT_FOUND: &str = "Post not found";
pub const USER_NOT_FOUND: &str = "User not found";
pub const SUBNODDIT_NOT_FOUND: &str = "Subnoddit not found";
pub const WRONG_FILTERS: &str = "Wrong filters";

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    pagination: PostsConfig,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self::with_pagination(repo, PostsConfig::default())
    }

    pub fn with_pagination(repo: Arc<dyn PostRepository>, pagination: PostsConfig) -> Self {
        Self { repo, pagination }
    }

    /// Get a post with its vote sum
    pub async fn find_one(&self, post_id: i64) -> Result<PostResponse> {
        let result = match self.repo.find_post_with_votes(post_id).await {
            Ok(Some(post)) => Ok(PostResponse { post }),
            Ok(None) => {
                debug!(post_id, "post lookup missed");
                Err(AppError::NotFound(POST_NOT_FOUND.to_string()))
            }
            Err(err) => Err(err.into()),
        };
        record_operation("find_one", &result);
        result
    }

    /// List posts, optionally for one author or one subnoddit
    pub async fn find_many(&self, filter: PostFilter) -> Result<PostsResponse> {
        let result = self.find_many_inner(filter).await;
        record_operation("find_many", &result);
        result
    }

    async fn find_many_inner(&self, filter: PostFilter) -> Result<PostsResponse> {
        let scope = match (filter.username.as_deref(), filter.subnoddit_id) {
            (Some(_), Some(_)) => {
                warn!("post listing requested with both username and subnoddit filters");
                return Err(AppError::Internal(WRONG_FILTERS.to_string()));
            }
            (Some(username), None) => {
                let user = self
                    .repo
                    .find_user_by_username(username)
                    .await?
                    .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;
                PostScope::Author(user.id)
            }
            (None, Some(subnoddit_id)) => {
                self.require_subnoddit(subnoddit_id).await?;
                PostScope::Subnoddit(subnoddit_id)
            }
            (None, None) => PostScope::All,
        };

        self.list(scope, filter.limit, filter.offset, filter.order_by_votes)
            .await
    }

    /// Posts authored by the users `user_id` follows
    pub async fn news_feed(&self, user_id: i64, filter: FeedFilter) -> Result<PostsResponse> {
        let result = self.news_feed_inner(user_id, filter).await;
        record_operation("news_feed", &result);
        result
    }

    async fn news_feed_inner(&self, user_id: i64, filter: FeedFilter) -> Result<PostsResponse> {
        if let Some(subnoddit_id) = filter.subnoddit_id {
            self.require_subnoddit(subnoddit_id).await?;
        }

        let scope = PostScope::FollowedBy {
            user_id,
            subnoddit_id: filter.subnoddit_id,
        };

        self.list(scope, filter.limit, filter.offset, filter.order_by_votes)
            .await
    }

    /// Create a post owned by `user_id`
    pub async fn create(&self, user_id: i64, input: CreatePostRequest) -> Result<SavedPostResponse> {
        let result = self.create_inner(user_id, input).await;
        record_operation("create", &result);
        result
    }

    async fn create_inner(&self, user_id: i64, input: CreatePostRequest) -> Result<SavedPostResponse> {
        input.validate()?;

        self.require_user(user_id).await?;
        self.require_subnoddit(input.subnoddit_id).await?;

        let post = self
            .repo
            .create_post(NewPost {
                title: input.title,
                text: input.text,
                attachment: input.attachment,
                user_id,
                subnoddit_id: input.subnoddit_id,
            })
            .await?;

        info!(
            post_id = post.id,
            user_id,
            subnoddit_id = post.subnoddit_id,
            "post created"
        );

        Ok(SavedPostResponse { post })
    }

    /// Update a post owned by `user_id`
    pub async fn update(
        &self,
        user_id: i64,
        post_id: i64,
        input: UpdatePostRequest,
    ) -> Result<SavedPostResponse> {
        let result = self.update_inner(user_id, post_id, input).await;
        record_operation("update", &result);
        result
    }

    async fn update_inner(
        &self,
        user_id: i64,
        post_id: i64,
        input: UpdatePostRequest,
    ) -> Result<SavedPostResponse> {
        let post = self.require_post(post_id).await?;
        check_post_ownership(user_id, &post)?;

        input.validate()?;

        if let Some(subnoddit_id) = input.subnoddit_id {
            self.require_subnoddit(subnoddit_id).await?;
        }

        let changes = PostChanges::merge(&post, input);
        let post = self.repo.update_post(post_id, changes).await?;

        info!(post_id, user_id, "post updated");

        Ok(SavedPostResponse { post })
    }

    /// Delete a post owned by `user_id`
    pub async fn delete(&self, user_id: i64, post_id: i64) -> Result<MessageResponse> {
        let result = self.delete_inner(user_id, post_id).await;
        record_operation("delete", &result);
        result
    }

    async fn delete_inner(&self, user_id: i64, post_id: i64) -> Result<MessageResponse> {
        let post = self.require_post(post_id).await?;
        check_post_ownership(user_id, &post)?;

        let affected = self.repo.delete_post(post_id).await?;
        if affected != 1 {
            tracing::error!(post_id, affected, "post delete affected an unexpected number of rows");
            return Err(AppError::Internal(format!(
                "Post delete affected {} rows",
                affected
            )));
        }

        info!(post_id, user_id, "post deleted");

        Ok(MessageResponse::new("Post deleted"))
    }

    /// Up/down vote a post; repeating the same vote resets it
    pub async fn vote(
        &self,
        user_id: i64,
        post_id: i64,
        input: VoteRequest,
    ) -> Result<MessageResponse> {
        let result = self.vote_inner(user_id, post_id, input).await;
        record_operation("vote", &result);
        result
    }

    async fn vote_inner(
        &self,
        user_id: i64,
        post_id: i64,
        input: VoteRequest,
    ) -> Result<MessageResponse> {
        let direction = VoteDirection::try_from(input.direction).map_err(|value| {
            AppError::BadRequest(format!("Vote direction must be 1 or -1, got {}", value))
        })?;

        self.require_user(user_id).await?;
        self.require_post(post_id).await?;

        let existing = self.repo.find_vote(user_id, post_id).await?;
        let action = VoteAction::decide(existing.map(|vote| vote.direction), direction);

        match action {
            VoteAction::Insert(direction) => {
                self.repo
                    .create_vote(user_id, post_id, direction.as_i16())
                    .await?;
            }
            VoteAction::Reset | VoteAction::Set(_) => {
                self.repo
                    .update_vote_direction(user_id, post_id, action.stored_direction())
                    .await?;
            }
        }

        debug!(
            post_id,
            user_id,
            direction = action.stored_direction(),
            "vote recorded"
        );
        record_vote(action.message());

        Ok(MessageResponse::new(action.message()))
    }

    async fn list(
        &self,
        scope: PostScope,
        limit: Option<i64>,
        offset: Option<i64>,
        order_by_votes: Option<SortOrder>,
    ) -> Result<PostsResponse> {
        let (limit, offset) = self.page(limit, offset)?;

        let posts = self
            .repo
            .list_posts(PostQuery {
                scope,
                limit,
                offset,
                order_by_votes,
            })
            .await?;
        let posts_count = self.repo.count_posts(scope).await?;

        Ok(PostsResponse { posts, posts_count })
    }

    fn page(&self, limit: Option<i64>, offset: Option<i64>) -> Result<(i64, i64)> {
        let limit = limit
            .unwrap_or(self.pagination.default_page_size)
            .clamp(1, self.pagination.max_page_size);
        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(AppError::BadRequest(
                "offset must not be negative".to_string(),
            ));
        }
        Ok((limit, offset))
    }

    async fn require_user(&self, user_id: i64) -> Result<()> {
        match self.repo.find_user(user_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(USER_NOT_FOUND.to_string())),
        }
    }

    async fn require_subnoddit(&self, subnoddit_id: i64) -> Result<()> {
        match self.repo.find_subnoddit(subnoddit_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(SUBNODDIT_NOT_FOUND.to_string())),
        }
    }

    async fn require_post(&self, post_id: i64) -> Result<Post> {
        self.repo
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockPostRepository;
    use crate::models::{PostVote, PostWithVotes, Subnoddit, User};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            created_at: Utc::now(),
        }
    }

    fn subnoddit(id: i64) -> Subnoddit {
        Subnoddit {
            id,
            name: format!("sub{}", id),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn post(id: i64, user_id: i64, subnoddit_id: i64) -> Post {
        let now = Utc::now();
        Post {
            id,
            title: format!("post {}", id),
            text: Some("hello".to_string()),
            attachment: None,
            user_id,
            subnoddit_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn listed(id: i64, votes: i64) -> PostWithVotes {
        let now = Utc::now();
        PostWithVotes {
            id,
            title: format!("post {}", id),
            text: None,
            attachment: None,
            user_id: 1,
            username: "alice".to_string(),
            subnoddit_id: 1,
            votes,
            created_at: now,
            updated_at: now,
        }
    }

    fn vote_row(user_id: i64, post_id: i64, direction: i16) -> PostVote {
        let now = Utc::now();
        PostVote {
            user_id,
            post_id,
            direction,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(repo: MockPostRepository) -> PostService {
        PostService::new(Arc::new(repo))
    }

    // ============================================
    // find_one
    // ============================================

    #[tokio::test]
    async fn find_one_returns_post_with_vote_sum() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_post_with_votes()
            .with(eq(1))
            .returning(|_| Ok(Some(listed(1, 5))));

        let response = service(repo).find_one(1).await.unwrap();
        assert_eq!(response.post.id, 1);
        assert_eq!(response.post.votes, 5);
    }

    #[tokio::test]
    async fn find_one_missing_post_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_post_with_votes().returning(|_| Ok(None));

        let err = service(repo).find_one(404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Post not found"));
    }

    // ============================================
    // find_many
    // ============================================

    #[tokio::test]
    async fn find_many_rejects_both_filters() {
        let repo = MockPostRepository::new();

        let err = service(repo)
            .find_many(PostFilter {
                username: Some("alice".into()),
                subnoddit_id: Some(1),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(ref msg) if msg == "Wrong filters"));
    }

    #[tokio::test]
    async fn find_many_by_username_scopes_to_author() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_user_by_username()
            .withf(|username| username == "alice")
            .returning(|_| Ok(Some(user(7, "alice"))));
        repo.expect_list_posts()
            .withf(|query| query.scope == PostScope::Author(7) && query.limit == 5 && query.offset == 10)
            .returning(|_| Ok(vec![listed(1, 0)]));
        repo.expect_count_posts()
            .with(eq(PostScope::Author(7)))
            .returning(|_| Ok(11));

        let response = service(repo)
            .find_many(PostFilter {
                username: Some("alice".into()),
                limit: Some(5),
                offset: Some(10),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(response.posts.len(), 1);
        assert_eq!(response.posts_count, 11);
    }

    #[tokio::test]
    async fn find_many_unknown_username_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_user_by_username().returning(|_| Ok(None));

        let err = service(repo)
            .find_many(PostFilter {
                username: Some("ghost".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "User not found"));
    }

    #[tokio::test]
    async fn find_many_unknown_subnoddit_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_subnoddit().returning(|_| Ok(None));

        let err = service(repo)
            .find_many(PostFilter {
                subnoddit_id: Some(99),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Subnoddit not found"));
    }

    #[tokio::test]
    async fn find_many_passes_vote_order_and_clamps_limit() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_subnoddit()
            .with(eq(3))
            .returning(|id| Ok(Some(subnoddit(id))));
        repo.expect_list_posts()
            .withf(|query| {
                query.scope == PostScope::Subnoddit(3)
                    && query.order_by_votes == Some(SortOrder::Desc)
                    && query.limit == 100
                    && query.offset == 0
            })
            .returning(|_| Ok(vec![listed(2, 9), listed(1, 3), listed(3, -2)]));
        repo.expect_count_posts().returning(|_| Ok(3));

        let response = service(repo)
            .find_many(PostFilter {
                subnoddit_id: Some(3),
                limit: Some(10_000),
                order_by_votes: Some(SortOrder::Desc),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(response
            .posts
            .windows(2)
            .all(|pair| pair[0].votes >= pair[1].votes));
    }

    #[tokio::test]
    async fn find_many_without_filters_lists_everything() {
        let mut repo = MockPostRepository::new();
        repo.expect_list_posts()
            .withf(|query| query.scope == PostScope::All && query.limit == 20)
            .returning(|_| Ok(vec![]));
        repo.expect_count_posts()
            .with(eq(PostScope::All))
            .returning(|_| Ok(0));

        let response = service(repo).find_many(PostFilter::default()).await.unwrap();
        assert!(response.posts.is_empty());
        assert_eq!(response.posts_count, 0);
    }

    #[tokio::test]
    async fn negative_offset_is_bad_request() {
        let repo = MockPostRepository::new();

        let err = service(repo)
            .find_many(PostFilter {
                offset: Some(-1),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    // ============================================
    // news_feed
    // ============================================

    #[tokio::test]
    async fn news_feed_lists_followed_authors_ascending() {
        let mut repo = MockPostRepository::new();
        repo.expect_list_posts()
            .withf(|query| {
                query.scope
                    == PostScope::FollowedBy {
                        user_id: 1,
                        subnoddit_id: None,
                    }
                    && query.order_by_votes == Some(SortOrder::Asc)
            })
            .returning(|_| Ok(vec![listed(4, -3), listed(5, 0), listed(6, 8)]));
        repo.expect_count_posts().returning(|_| Ok(3));

        let response = service(repo)
            .news_feed(
                1,
                FeedFilter {
                    order_by_votes: Some(SortOrder::Asc),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(response.posts_count, 3);
        assert!(response
            .posts
            .windows(2)
            .all(|pair| pair[0].votes <= pair[1].votes));
    }

    #[tokio::test]
    async fn news_feed_with_subnoddit_filter() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_subnoddit()
            .with(eq(2))
            .returning(|id| Ok(Some(subnoddit(id))));
        repo.expect_list_posts()
            .withf(|query| {
                query.scope
                    == PostScope::FollowedBy {
                        user_id: 1,
                        subnoddit_id: Some(2),
                    }
            })
            .returning(|_| Ok(vec![listed(4, 1)]));
        repo.expect_count_posts().returning(|_| Ok(1));

        let response = service(repo)
            .news_feed(
                1,
                FeedFilter {
                    subnoddit_id: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(response.posts.len(), 1);
    }

    #[tokio::test]
    async fn news_feed_unknown_subnoddit_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_subnoddit().returning(|_| Ok(None));

        let err = service(repo)
            .news_feed(
                1,
                FeedFilter {
                    subnoddit_id: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Subnoddit not found"));
    }

    // ============================================
    // create
    // ============================================

    fn create_request() -> CreatePostRequest {
        CreatePostRequest {
            title: "First post".into(),
            text: Some("hello noddit".into()),
            attachment: None,
            subnoddit_id: 2,
        }
    }

    #[tokio::test]
    async fn create_persists_post_for_user() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_user()
            .with(eq(1))
            .returning(|id| Ok(Some(user(id, "alice"))));
        repo.expect_find_subnoddit()
            .with(eq(2))
            .returning(|id| Ok(Some(subnoddit(id))));
        repo.expect_create_post()
            .withf(|new| new.user_id == 1 && new.subnoddit_id == 2 && new.title == "First post")
            .returning(|new| {
                let now = Utc::now();
                Ok(Post {
                    id: 10,
                    title: new.title,
                    text: new.text,
                    attachment: new.attachment,
                    user_id: new.user_id,
                    subnoddit_id: new.subnoddit_id,
                    created_at: now,
                    updated_at: now,
                })
            });

        let response = service(repo).create(1, create_request()).await.unwrap();
        assert_eq!(response.post.user_id, 1);
        assert_eq!(response.post.subnoddit_id, 2);
        assert_eq!(response.post.title, "First post");
    }

    #[tokio::test]
    async fn create_for_missing_user_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_user().returning(|_| Ok(None));

        let err = service(repo).create(1, create_request()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "User not found"));
    }

    #[tokio::test]
    async fn create_in_missing_subnoddit_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_user()
            .returning(|id| Ok(Some(user(id, "alice"))));
        repo.expect_find_subnoddit().returning(|_| Ok(None));

        let err = service(repo).create(1, create_request()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Subnoddit not found"));
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload() {
        let repo = MockPostRepository::new();
        let mut req = create_request();
        req.title = String::new();

        let err = service(repo).create(1, req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    // ============================================
    // update
    // ============================================

    #[tokio::test]
    async fn update_merges_fields_for_owner() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_post()
            .with(eq(10))
            .returning(|id| Ok(Some(post(id, 1, 2))));
        repo.expect_find_subnoddit()
            .with(eq(3))
            .returning(|id| Ok(Some(subnoddit(id))));
        repo.expect_update_post()
            .withf(|post_id, changes| {
                *post_id == 10
                    && changes.title == "renamed"
                    && changes.text.as_deref() == Some("hello")
                    && changes.subnoddit_id == 3
            })
            .returning(|post_id, changes| {
                let mut updated = post(post_id, 1, changes.subnoddit_id);
                updated.title = changes.title;
                Ok(updated)
            });

        let response = service(repo)
            .update(
                1,
                10,
                UpdatePostRequest {
                    title: Some("renamed".into()),
                    subnoddit_id: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(response.post.title, "renamed");
        assert_eq!(response.post.subnoddit_id, 3);
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_post().returning(|_| Ok(None));

        let err = service(repo)
            .update(1, 10, UpdatePostRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Post not found"));
    }

    #[tokio::test]
    async fn update_by_non_owner_is_unauthorized() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_post()
            .returning(|id| Ok(Some(post(id, 1, 2))));
        repo.expect_update_post().never();

        // Payload is invalid too; ownership is checked first.
        let err = service(repo)
            .update(
                2,
                10,
                UpdatePostRequest {
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn update_to_missing_subnoddit_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_post()
            .returning(|id| Ok(Some(post(id, 1, 2))));
        repo.expect_find_subnoddit().returning(|_| Ok(None));
        repo.expect_update_post().never();

        let err = service(repo)
            .update(
                1,
                10,
                UpdatePostRequest {
                    subnoddit_id: Some(42),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Subnoddit not found"));
    }

    // ============================================
    // delete
    // ============================================

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_post()
            .returning(|id| Ok(Some(post(id, 1, 2))));
        repo.expect_delete_post()
            .with(eq(10))
            .times(1)
            .returning(|_| Ok(1));

        let response = service(repo).delete(1, 10).await.unwrap();
        assert_eq!(response.message, "Post deleted");
    }

    #[tokio::test]
    async fn delete_with_unexpected_row_count_is_internal_error() {
        for affected in [0u64, 2] {
            let mut repo = MockPostRepository::new();
            repo.expect_find_post()
                .returning(|id| Ok(Some(post(id, 1, 2))));
            repo.expect_delete_post().returning(move |_| Ok(affected));

            let err = service(repo).delete(1, 10).await.unwrap_err();
            assert!(matches!(err, AppError::Internal(_)));
        }
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_unauthorized() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_post()
            .returning(|id| Ok(Some(post(id, 1, 2))));
        repo.expect_delete_post().never();

        let err = service(repo).delete(2, 10).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn delete_missing_post_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_post().returning(|_| Ok(None));

        let err = service(repo).delete(1, 10).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    // ============================================
    // vote
    // ============================================

    fn voting_repo() -> MockPostRepository {
        let mut repo = MockPostRepository::new();
        repo.expect_find_user()
            .returning(|id| Ok(Some(user(id, "alice"))));
        repo.expect_find_post()
            .returning(|id| Ok(Some(post(id, 9, 2))));
        repo
    }

    #[tokio::test]
    async fn first_upvote_creates_vote() {
        let mut repo = voting_repo();
        repo.expect_find_vote().returning(|_, _| Ok(None));
        repo.expect_create_vote()
            .with(eq(1), eq(10), eq(1i16))
            .times(1)
            .returning(|user_id, post_id, direction| Ok(vote_row(user_id, post_id, direction)));

        let response = service(repo)
            .vote(1, 10, VoteRequest { direction: 1 })
            .await
            .unwrap();
        assert_eq!(response.message, "upvoted");
    }

    #[tokio::test]
    async fn first_downvote_creates_vote() {
        let mut repo = voting_repo();
        repo.expect_find_vote().returning(|_, _| Ok(None));
        repo.expect_create_vote()
            .with(eq(1), eq(10), eq(-1i16))
            .returning(|user_id, post_id, direction| Ok(vote_row(user_id, post_id, direction)));

        let response = service(repo)
            .vote(1, 10, VoteRequest { direction: -1 })
            .await
            .unwrap();
        assert_eq!(response.message, "downvoted");
    }

    #[tokio::test]
    async fn repeated_vote_resets_to_zero() {
        let mut repo = voting_repo();
        repo.expect_find_vote()
            .returning(|user_id, post_id| Ok(Some(vote_row(user_id, post_id, 1))));
        repo.expect_create_vote().never();
        repo.expect_update_vote_direction()
            .with(eq(1), eq(10), eq(0i16))
            .times(1)
            .returning(|user_id, post_id, direction| Ok(vote_row(user_id, post_id, direction)));

        let response = service(repo)
            .vote(1, 10, VoteRequest { direction: 1 })
            .await
            .unwrap();
        assert_eq!(response.message, "vote reset");
    }

    #[tokio::test]
    async fn vote_from_reset_sets_direction() {
        let mut repo = voting_repo();
        repo.expect_find_vote()
            .returning(|user_id, post_id| Ok(Some(vote_row(user_id, post_id, 0))));
        repo.expect_update_vote_direction()
            .with(eq(1), eq(10), eq(-1i16))
            .times(1)
            .returning(|user_id, post_id, direction| Ok(vote_row(user_id, post_id, direction)));

        let response = service(repo)
            .vote(1, 10, VoteRequest { direction: -1 })
            .await
            .unwrap();
        assert_eq!(response.message, "downvoted");
    }

    #[tokio::test]
    async fn vote_with_invalid_direction_is_bad_request() {
        for direction in [0, 2, -5] {
            let err = service(MockPostRepository::new())
                .vote(1, 10, VoteRequest { direction })
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }

    #[tokio::test]
    async fn vote_on_missing_post_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_user()
            .returning(|id| Ok(Some(user(id, "alice"))));
        repo.expect_find_post().returning(|_| Ok(None));

        let err = service(repo)
            .vote(1, 10, VoteRequest { direction: 1 })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Post not found"));
    }

    #[tokio::test]
    async fn vote_by_missing_user_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_user().returning(|_| Ok(None));

        let err = service(repo)
            .vote(1, 10, VoteRequest { direction: 1 })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "User not found"));
    }

    #[tokio::test]
    async fn database_failures_propagate() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_post_with_votes()
            .returning(|_| Err(sqlx::Error::PoolTimedOut));

        let err = service(repo).find_one(1).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
