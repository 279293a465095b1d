/// Authorization module for post-service
///
/// Ownership-based permission checks: users only modify posts they own.
use crate::error::AppError;
use crate::models::Post;

/// Result type for permission checks
pub type PermissionResult = Result<(), AppError>;

/// Check if a user owns a post
pub fn check_post_ownership(user_id: i64, post: &Post) -> PermissionResult {
    if post.user_id == user_id {
        Ok(())
    } else {
        tracing::warn!(
            user_id,
            post_id = post.id,
            owner_id = post.user_id,
            "refused modification of a post owned by another user"
        );
        Err(AppError::Unauthorized(
            "You are not the owner of this post".to_string(),
        ))
    }
}
