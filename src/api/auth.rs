use actix_web::{web, HttpResponse};

use crate::services::auth_service::{self, TokenRequest};

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Session cookie set"),
        (status = 500, description = "Token generation failed")
    )
)]
pub async fn issue_token(request: web::Json<TokenRequest>) -> HttpResponse {
    log::info!("🔐 POST /jwt - email: {}", request.email);

    match auth_service::generate_jwt(&request.email, request.name.as_deref()) {
        Ok(token) => HttpResponse::Ok()
            .cookie(auth_service::session_cookie(token))
            .json(serde_json::json!({ "success": true })),
        Err(e) => {
            log::error!("❌ Failed to issue token: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session cookie cleared")
    )
)]
pub async fn logout() -> HttpResponse {
    log::info!("👋 GET /logout");

    HttpResponse::Ok()
        .cookie(auth_service::clear_session_cookie())
        .json(serde_json::json!({ "success": true }))
}
