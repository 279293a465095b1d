/// HTTP middleware utilities for post-service
///
/// Provides the acting-user extractor, ownership checks, and request metrics.
/// Authentication happens upstream; the gateway forwards the authenticated
/// user id in the `X-User-Id` header.
pub mod permissions;

pub use permissions::*;

use crate::error::AppError;
use crate::metrics::http::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "X-User-Id";

// =====================================================================
// Acting user
// =====================================================================

/// Identifier of the user performing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing user context".to_string()))
            .and_then(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map(UserId)
                    .map_err(|_| AppError::Unauthorized("Invalid user ID".to_string()))
            });

        ready(user_id)
    }
}

// =====================================================================
// Metrics middleware
// =====================================================================

pub struct MetricsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct MetricsMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let path = req.path().to_string();
        let method = req.method().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let res = service.call(req).await;
            let elapsed = start.elapsed();

            let status = match &res {
                Ok(response) => response.status().as_u16().to_string(),
                Err(err) => err.as_response_error().status_code().as_u16().to_string(),
            };
            HTTP_REQUESTS_TOTAL
                .with_label_values(&[method.as_str(), status.as_str()])
                .inc();
            HTTP_REQUEST_DURATION_SECONDS
                .with_label_values(&[method.as_str()])
                .observe(elapsed.as_secs_f64());

            tracing::debug!(%method, %path, %status, elapsed_ms = elapsed.as_millis() as u64, "request completed");
            res
        })
    }
}
