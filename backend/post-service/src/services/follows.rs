/// Follow service - maintains the follower edges the news feed reads
use crate::db::PostRepository;
use crate::error::{AppError, Result};
use crate::models::MessageResponse;
use crate::services::posts::USER_NOT_FOUND;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct FollowService {
    repo: Arc<dyn PostRepository>,
}

impl FollowService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Idempotent follow of `following_id` by `follower_id`.
    pub async fn follow(&self, follower_id: i64, following_id: i64) -> Result<MessageResponse> {
        if follower_id == following_id {
            return Err(AppError::BadRequest("Users cannot follow themselves".to_string()));
        }

        for user_id in [follower_id, following_id] {
            if self.repo.find_user(user_id).await?.is_none() {
                return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
            }
        }

        let inserted = self.repo.create_follow(follower_id, following_id).await?;
        if inserted {
            info!(follower_id, following_id, "follow created");
            Ok(MessageResponse::new("User followed"))
        } else {
            Ok(MessageResponse::new("Already following"))
        }
    }

    /// Idempotent unfollow.
    pub async fn unfollow(&self, follower_id: i64, following_id: i64) -> Result<MessageResponse> {
        let removed = self.repo.delete_follow(follower_id, following_id).await?;
        if removed {
            info!(follower_id, following_id, "follow removed");
            Ok(MessageResponse::new("User unfollowed"))
        } else {
            Ok(MessageResponse::new("Not following"))
        }
    }
}
