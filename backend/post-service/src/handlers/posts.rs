/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::middleware::UserId;
use crate::models::{
    CreatePostRequest, MessageResponse, PostFilter, PostResponse, PostsResponse,
    SavedPostResponse, UpdatePostRequest, VoteRequest,
};
use crate::services::PostService;
use actix_web::{web, HttpResponse};

/// List posts, filtered by author username or subnoddit
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    params(PostFilter),
    responses(
        (status = 200, description = "Posts with vote sums", body = PostsResponse),
        (status = 404, description = "User or subnoddit not found"),
        (status = 500, description = "Both username and subnoddit_id supplied")
    )
)]
pub async fn list_posts(
    service: web::Data<PostService>,
    query: web::Query<PostFilter>,
) -> Result<HttpResponse> {
    let response = service.find_many(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Get a post by ID
#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}",
    tag = "posts",
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post with vote sum", body = PostResponse),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let response = service.find_one(post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Create a new post
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = SavedPostResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "User or subnoddit not found")
    )
)]
pub async fn create_post(
    service: web::Data<PostService>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let response = service.create(user_id.0, req.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Update a post owned by the caller
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{post_id}",
    tag = "posts",
    params(("post_id" = i64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = SavedPostResponse),
        (status = 401, description = "Caller does not own the post"),
        (status = 404, description = "Post or subnoddit not found")
    )
)]
pub async fn update_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
    user_id: UserId,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let response = service
        .update(user_id.0, post_id.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Delete a post owned by the caller
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}",
    tag = "posts",
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 401, description = "Caller does not own the post"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let response = service.delete(user_id.0, post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Up- or downvote a post; repeating the same vote resets it
#[utoipa::path(
    post,
    path = "/api/v1/posts/{post_id}/vote",
    tag = "posts",
    params(("post_id" = i64, Path, description = "Post id")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "upvoted, downvoted or vote reset", body = MessageResponse),
        (status = 400, description = "Direction is not 1 or -1"),
        (status = 404, description = "User or post not found")
    )
)]
pub async fn vote_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
    user_id: UserId,
    req: web::Json<VoteRequest>,
) -> Result<HttpResponse> {
    let response = service
        .vote(user_id.0, post_id.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
