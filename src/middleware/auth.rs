use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::auth_service::{self, TOKEN_COOKIE};

pub use crate::services::auth_service::Claims;

/// Extractor direto para rotas onde o mesmo path mistura métodos públicos
/// e protegidos (o wrap de scope cobriria os dois). Usa os Claims já
/// injetados pelo middleware quando presentes, senão valida o cookie aqui.
impl FromRequest for Claims {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(claims) = req.extensions().get::<Claims>() {
            return ready(Ok(claims.clone()));
        }

        let result = match req.cookie(TOKEN_COOKIE) {
            Some(cookie) => auth_service::verify_token(cookie.value()).map_err(|e| {
                log::warn!("❌ Rejected request with invalid token: {}", e);
                actix_web::error::ErrorUnauthorized("unauthorized access")
            }),
            None => Err(actix_web::error::ErrorUnauthorized("unauthorized access")),
        };

        ready(result)
    }
}

/// Gate de autenticação: lê o cookie `token`, valida o JWT e injeta os
/// Claims nas extensions da request. Sem cookie ou token inválido -> 401
/// antes de qualquer handler rodar.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req.cookie(TOKEN_COOKIE).map(|c| c.value().to_string());

        match token {
            Some(token) => match auth_service::verify_token(&token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);

                    let fut = self.service.call(req);
                    Box::pin(async move {
                        let res = fut.await?;
                        Ok(res)
                    })
                }
                Err(e) => {
                    log::warn!("❌ Rejected request with invalid token: {}", e);
                    Box::pin(async move {
                        Err(actix_web::error::ErrorUnauthorized("unauthorized access"))
                    })
                }
            },
            None => Box::pin(async move {
                Err(actix_web::error::ErrorUnauthorized("unauthorized access"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_missing_cookie_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = Claims::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn test_tampered_token_is_unauthorized() {
        let req = TestRequest::default()
            .cookie(Cookie::new(TOKEN_COOKIE, "definitely.not.valid"))
            .to_http_request();
        let result = Claims::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn test_valid_cookie_yields_claims() {
        let token = auth_service::generate_jwt("nadia@example.com", None).unwrap();
        let req = TestRequest::default()
            .cookie(Cookie::new(TOKEN_COOKIE, token))
            .to_http_request();
        let claims = Claims::from_request(&req, &mut Payload::None)
            .await
            .expect("valid token");
        assert_eq!(claims.sub, "nadia@example.com");
    }
}
