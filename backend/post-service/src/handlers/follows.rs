use crate::error::Result;
use crate::middleware::UserId;
use crate::models::MessageResponse;
use crate::services::FollowService;
use actix_web::{web, HttpResponse};

/// Follow a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/follow",
    tag = "follows",
    params(("user_id" = i64, Path, description = "User to follow")),
    responses(
        (status = 200, description = "Followed (or already following)", body = MessageResponse),
        (status = 400, description = "Cannot follow yourself"),
        (status = 404, description = "User not found")
    )
)]
pub async fn follow_user(
    service: web::Data<FollowService>,
    target: web::Path<i64>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let response = service.follow(user_id.0, target.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Unfollow a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/follow",
    tag = "follows",
    params(("user_id" = i64, Path, description = "User to unfollow")),
    responses(
        (status = 200, description = "Unfollowed (or was not following)", body = MessageResponse)
    )
)]
pub async fn unfollow_user(
    service: web::Data<FollowService>,
    target: web::Path<i64>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let response = service.unfollow(user_id.0, target.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
