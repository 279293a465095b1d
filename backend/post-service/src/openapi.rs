/// OpenAPI documentation for the Noddit Post Service
use crate::handlers;
use crate::models::{
    CreatePostRequest, MessageResponse, Post, PostResponse, PostWithVotes, PostsResponse,
    SavedPostResponse, SortOrder, UpdatePostRequest, VoteRequest,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Noddit Post Service API",
        version = "1.0.0",
        description = "Posts for the Noddit forum: lookup with vote sums, listing by author or subnoddit, a news feed of followed users, authoring, and up/down voting.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    paths(
        handlers::posts::list_posts,
        handlers::posts::get_post,
        handlers::posts::create_post,
        handlers::posts::update_post,
        handlers::posts::delete_post,
        handlers::posts::vote_post,
        handlers::feed::get_feed,
        handlers::follows::follow_user,
        handlers::follows::unfollow_user,
    ),
    components(schemas(
        Post,
        PostWithVotes,
        PostResponse,
        SavedPostResponse,
        PostsResponse,
        CreatePostRequest,
        UpdatePostRequest,
        VoteRequest,
        MessageResponse,
        SortOrder,
    )),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "posts", description = "Post lookup, authoring, and voting"),
        (name = "feed", description = "Posts by followed users"),
        (name = "follows", description = "Follower relationships"),
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}
