//! Generic short-circuiting gate.
//!
//! A [`Gate`] wraps a route with a [`GatePolicy`]: the policy inspects the
//! request before the handler runs and either lets it through or answers
//! immediately with its own response. The stub extension points in
//! [`guards`](super::guards) are all policies mounted through this one
//! transform.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};

/// Decision point evaluated before the wrapped handler.
pub trait GatePolicy: Clone {
    /// Let the request pass (`Ok`) or short-circuit with a response.
    fn evaluate(&self, req: &ServiceRequest) -> Result<(), HttpResponse>;
}

/// Middleware mounting a [`GatePolicy`] in front of a route.
#[derive(Clone)]
pub struct Gate<P> {
    policy: P,
}

impl<P: GatePolicy> Gate<P> {
    /// Wrap routes with the given policy.
    pub fn new(policy: P) -> Self {
        Self { policy }
    }
}

impl<S, B, P> Transform<S, ServiceRequest> for Gate<P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    P: GatePolicy + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = GateMiddleware<S, P>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GateMiddleware {
            service,
            policy: self.policy.clone(),
        }))
    }
}

/// Service wrapper produced by [`Gate`].
pub struct GateMiddleware<S, P> {
    service: S,
    policy: P,
}

impl<S, B, P> Service<ServiceRequest> for GateMiddleware<S, P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    P: GatePolicy + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Err(response) = self.policy.evaluate(&req) {
            let (request, _) = req.into_parts();
            return Box::pin(ready(Ok(
                ServiceResponse::new(request, response).map_into_right_body()
            )));
        }
        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::respond;

    #[derive(Clone)]
    struct DenyAll;

    impl GatePolicy for DenyAll {
        fn evaluate(&self, _req: &ServiceRequest) -> Result<(), HttpResponse> {
            Err(respond::forbidden("no entry"))
        }
    }

    #[derive(Clone)]
    struct AllowAll;

    impl GatePolicy for AllowAll {
        fn evaluate(&self, _req: &ServiceRequest) -> Result<(), HttpResponse> {
            Ok(())
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn denying_policies_short_circuit() {
        let app = test::init_service(
            App::new().wrap(Gate::new(DenyAll)).route(
                "/",
                web::get().to(|| async { HttpResponse::Ok().body("reached") }),
            ),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 403);
    }

    #[rstest]
    #[actix_web::test]
    async fn allowing_policies_pass_through() {
        let app = test::init_service(
            App::new().wrap(Gate::new(AllowAll)).route(
                "/",
                web::get().to(|| async { HttpResponse::Ok().body("reached") }),
            ),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "reached");
    }
}
