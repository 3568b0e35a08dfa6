//! Bearer-token authentication middleware.
//!
//! Validates `Authorization: Bearer <token>` and inserts the decoded
//! `UserId` into request extensions for handlers to extract. Every failure
//! mode (missing header, wrong scheme, malformed, expired, bad signature)
//! produces the same generic 401 response; the client never learns which
//! check failed.
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use uuid::Uuid;

use crate::error::AppError;
use crate::security::jwt;

/// User id extracted from a verified session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

pub struct JwtAuthMiddleware {
    secret: Rc<String>,
}

impl JwtAuthMiddleware {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Rc::new(secret.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            secret: self.secret.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    secret: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let secret = self.secret.clone();

        Box::pin(async move {
            // Extract header data to an owned String before touching
            // extensions_mut; no RefCell borrow may be live at that point.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            let user_id = auth_header
                .as_deref()
                .and_then(|h| h.strip_prefix("Bearer "))
                .and_then(|token| jwt::verify_token(token, &secret));

            match user_id {
                Some(id) => {
                    req.extensions_mut().insert(UserId(id));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                None => {
                    let res = AppError::Unauthorized.error_response();
                    Ok(req.into_response(res).map_into_right_body())
                }
            }
        })
    }
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<UserId>().copied() {
            Some(user_id) => ready(Ok(user_id)),
            None => ready(Err(AppError::Unauthorized.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "middleware-test-secret-0123456789abc";

    async fn whoami(user: UserId) -> HttpResponse {
        HttpResponse::Ok().body(user.0.to_string())
    }

    #[actix_web::test]
    async fn valid_token_binds_user_id() {
        let user_id = Uuid::new_v4();
        let token = jwt::issue_token(user_id, SECRET).unwrap();

        let app = test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(JwtAuthMiddleware::new(SECRET))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert_eq!(body, user_id.to_string().as_bytes());
    }

    #[actix_web::test]
    async fn all_failure_modes_share_one_response() {
        let expired = {
            let now = Utc::now().timestamp();
            let claims = jwt::Claims {
                sub: Uuid::new_v4().to_string(),
                iat: now - 7_200,
                exp: now - 3_600,
            };
            encode(
                &Header::default(),
                &claims,
                &EncodingKey::from_secret(SECRET.as_bytes()),
            )
            .unwrap()
        };

        let app = test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(JwtAuthMiddleware::new(SECRET))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let requests = vec![
            test::TestRequest::get().uri("/whoami"),
            test::TestRequest::get()
                .uri("/whoami")
                .insert_header(("Authorization", "Basic Zm9vOmJhcg==")),
            test::TestRequest::get()
                .uri("/whoami")
                .insert_header(("Authorization", "Bearer not.a.token")),
            test::TestRequest::get()
                .uri("/whoami")
                .insert_header(("Authorization", format!("Bearer {expired}"))),
        ];

        let mut bodies = Vec::new();
        for req in requests {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status().as_u16(), 401);
            bodies.push(test::read_body(resp).await);
        }

        // Identical body regardless of why authentication failed.
        assert!(bodies.windows(2).all(|w| w[0] == w[1]));
    }
}
