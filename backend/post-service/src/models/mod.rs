/// Data models for post-service
///
/// This module defines:
/// - Stored rows: users, subnoddits, posts, post votes
/// - `PostWithVotes`: a post joined with its author and aggregated vote sum
/// - Service inputs (filters, create/update payloads, vote direction)
/// - Response envelopes returned by the HTTP layer
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subnoddit {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: Option<String>,
    pub attachment: Option<String>,
    pub user_id: i64,
    pub subnoddit_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post as listed to clients: author name and the sum of all vote directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PostWithVotes {
    pub id: i64,
    pub title: String,
    pub text: Option<String>,
    pub attachment: Option<String>,
    pub user_id: i64,
    pub username: String,
    pub subnoddit_id: i64,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PostVote {
    pub user_id: i64,
    pub post_id: i64,
    /// -1, 0 or 1. Zero is a reset vote, the row is kept.
    pub direction: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =====================================================================
// Votes
// =====================================================================

/// Direction a user may vote in. Reset (0) is reached only by repeating a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_i16(self) -> i16 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            VoteDirection::Up => "upvoted",
            VoteDirection::Down => "downvoted",
        }
    }
}

impl TryFrom<i16> for VoteDirection {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteDirection::Up),
            -1 => Ok(VoteDirection::Down),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct VoteRequest {
    /// 1 to upvote, -1 to downvote
    pub direction: i16,
}

// =====================================================================
// Listing filters
// =====================================================================

/// Vote-sum ordering for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter accepted by `find_many`. `username` and `subnoddit_id` are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostFilter {
    pub username: Option<String>,
    pub subnoddit_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub order_by_votes: Option<SortOrder>,
}

/// Filter accepted by `news_feed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedFilter {
    pub subnoddit_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub order_by_votes: Option<SortOrder>,
}

/// Which posts a repository listing covers, after the service resolved the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScope {
    All,
    Author(i64),
    Subnoddit(i64),
    /// Posts authored by users the given user follows, optionally in one subnoddit
    FollowedBy {
        user_id: i64,
        subnoddit_id: Option<i64>,
    },
}

/// Resolved, paginated listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    pub scope: PostScope,
    pub limit: i64,
    pub offset: i64,
    pub order_by_votes: Option<SortOrder>,
}

// =====================================================================
// Create / update payloads
// =====================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(max = 40000))]
    pub text: Option<String>,
    #[validate(length(max = 2048))]
    pub attachment: Option<String>,
    pub subnoddit_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(length(max = 40000))]
    pub text: Option<String>,
    #[validate(length(max = 2048))]
    pub attachment: Option<String>,
    pub subnoddit_id: Option<i64>,
}

/// Insert payload handed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub text: Option<String>,
    pub attachment: Option<String>,
    pub user_id: i64,
    pub subnoddit_id: i64,
}

/// Full set of editable columns written back by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub text: Option<String>,
    pub attachment: Option<String>,
    pub subnoddit_id: i64,
}

impl PostChanges {
    /// Overlay the supplied fields of `req` onto the stored post.
    pub fn merge(post: &Post, req: UpdatePostRequest) -> Self {
        Self {
            title: req.title.unwrap_or_else(|| post.title.clone()),
            text: req.text.or_else(|| post.text.clone()),
            attachment: req.attachment.or_else(|| post.attachment.clone()),
            subnoddit_id: req.subnoddit_id.unwrap_or(post.subnoddit_id),
        }
    }
}

// =====================================================================
// Response envelopes
// =====================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub post: PostWithVotes,
}

/// Envelope for create/update, which return the stored row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavedPostResponse {
    pub post: Post,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostsResponse {
    pub posts: Vec<PostWithVotes>,
    #[serde(rename = "postsCount")]
    pub posts_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_post() -> Post {
        let now = Utc::now();
        Post {
            id: 7,
            title: "original".into(),
            text: Some("body".into()),
            attachment: None,
            user_id: 1,
            subnoddit_id: 3,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn vote_direction_accepts_only_up_and_down() {
        assert_eq!(VoteDirection::try_from(1), Ok(VoteDirection::Up));
        assert_eq!(VoteDirection::try_from(-1), Ok(VoteDirection::Down));
        assert_eq!(VoteDirection::try_from(0), Err(0));
        assert_eq!(VoteDirection::try_from(2), Err(2));
    }

    #[test]
    fn merge_keeps_unspecified_fields() {
        let post = stored_post();
        let changes = PostChanges::merge(
            &post,
            UpdatePostRequest {
                title: Some("edited".into()),
                ..Default::default()
            },
        );

        assert_eq!(changes.title, "edited");
        assert_eq!(changes.text.as_deref(), Some("body"));
        assert_eq!(changes.attachment, None);
        assert_eq!(changes.subnoddit_id, 3);
    }

    #[test]
    fn merge_moves_post_to_new_subnoddit() {
        let post = stored_post();
        let changes = PostChanges::merge(
            &post,
            UpdatePostRequest {
                subnoddit_id: Some(9),
                attachment: Some("https://img.example/cat.png".into()),
                ..Default::default()
            },
        );

        assert_eq!(changes.title, "original");
        assert_eq!(changes.subnoddit_id, 9);
        assert_eq!(
            changes.attachment.as_deref(),
            Some("https://img.example/cat.png")
        );
    }

    #[test]
    fn posts_response_uses_posts_count_key() {
        let body = serde_json::to_value(PostsResponse {
            posts: vec![],
            posts_count: 4,
        })
        .unwrap();
        assert_eq!(body["postsCount"], 4);
    }

    #[test]
    fn create_request_rejects_empty_title() {
        let req = CreatePostRequest {
            title: String::new(),
            text: None,
            attachment: None,
            subnoddit_id: 1,
        };
        assert!(req.validate().is_err());
    }
}
