/// HTTP handlers for post-service endpoints
///
/// This module contains handlers for:
/// - Posts: list, read, create, update, delete, vote
/// - Feed: posts by followed users
/// - Follows: follow / unfollow another user
pub mod feed;
pub mod follows;
pub mod posts;

// Re-export handler functions at module level
pub use feed::get_feed;
pub use follows::{follow_user, unfollow_user};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post, vote_post};

use actix_web::web;

/// Register the `/api/v1` routes. Expects `web::Data<PostService>` and
/// `web::Data<FollowService>` in app data.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/feed").route("", web::get().to(get_feed)))
        .service(
            web::scope("/posts")
                .service(
                    web::resource("")
                        .route(web::get().to(list_posts))
                        .route(web::post().to(create_post)),
                )
                .service(
                    web::resource("/{post_id}")
                        .route(web::get().to(get_post))
                        .route(web::patch().to(update_post))
                        .route(web::delete().to(delete_post)),
                )
                .service(web::resource("/{post_id}/vote").route(web::post().to(vote_post))),
        )
        .service(
            web::resource("/users/{user_id}/follow")
                .route(web::post().to(follow_user))
                .route(web::delete().to(unfollow_user)),
        );
}
