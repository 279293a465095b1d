use crate::error::Result;
use crate::middleware::UserId;
use crate::models::{FeedFilter, PostsResponse};
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use tracing::debug;

/// News feed: posts by the users the caller follows
#[utoipa::path(
    get,
    path = "/api/v1/feed",
    tag = "feed",
    params(FeedFilter),
    responses(
        (status = 200, description = "Posts by followed users", body = PostsResponse),
        (status = 401, description = "Missing user context"),
        (status = 404, description = "Subnoddit not found")
    )
)]
pub async fn get_feed(
    service: web::Data<PostService>,
    user_id: UserId,
    query: web::Query<FeedFilter>,
) -> Result<HttpResponse> {
    let filter = query.into_inner();
    debug!(
        user_id = user_id.0,
        subnoddit_id = ?filter.subnoddit_id,
        limit = ?filter.limit,
        offset = ?filter.offset,
        "feed request"
    );

    let response = service.news_feed(user_id.0, filter).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use crate::db::MockPostRepository;
    use crate::handlers::configure_api;
    use crate::middleware::USER_ID_HEADER;
    use crate::models::{PostScope, SortOrder};
    use crate::services::{FollowService, PostService};
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::Value;
    use std::sync::Arc;

    #[actix_web::test]
    async fn feed_is_scoped_to_caller() {
        let mut repo = MockPostRepository::new();
        repo.expect_list_posts()
            .withf(|query| {
                query.scope
                    == PostScope::FollowedBy {
                        user_id: 3,
                        subnoddit_id: None,
                    }
                    && query.order_by_votes == Some(SortOrder::Asc)
            })
            .returning(|_| Ok(vec![]));
        repo.expect_count_posts().returning(|_| Ok(0));
        let repo = Arc::new(repo);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(PostService::new(repo.clone())))
                .app_data(web::Data::new(FollowService::new(repo)))
                .service(web::scope("/api/v1").configure(configure_api)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/feed?order_by_votes=asc")
            .insert_header((USER_ID_HEADER, "3"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["postsCount"], 0);
    }
}
