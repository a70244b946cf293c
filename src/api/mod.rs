pub mod auth;
pub mod health;
pub mod users;
pub mod biodatas;
pub mod favorites;
pub mod contact_requests;
pub mod success_stories;
pub mod payments;
pub mod stats;
pub mod swagger;

use actix_web::HttpResponse;
use mongodb::bson::oid::ObjectId;

use crate::database::MongoDB;
use crate::middleware::auth::Claims;
use crate::services::user_service;

/// Gate de admin dos handlers: o token já passou pelo AuthMiddleware,
/// aqui checamos o papel armazenado no banco.
pub(crate) async fn require_admin(db: &MongoDB, claims: &Claims) -> Result<(), HttpResponse> {
    match user_service::is_admin(db, &claims.sub).await {
        Ok(true) => Ok(()),
        Ok(false) => {
            log::warn!("🚫 {} tried an admin-only endpoint", claims.sub);
            Err(HttpResponse::Forbidden().json(serde_json::json!({
                "success": false,
                "error": "forbidden: admin role required"
            })))
        }
        Err(e) => {
            log::error!("❌ Admin check failed for {}: {}", claims.sub, e);
            Err(HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            })))
        }
    }
}

/// Id de path malformado é erro do caller (400); falha de banco depois
/// do parse continua sendo 500 no handler.
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, HttpResponse> {
    ObjectId::parse_str(id).map_err(|e| {
        log::warn!("🚫 Rejected malformed object id '{}': {}", id, e);
        HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("Invalid id '{}'", id)
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_malformed_object_id_is_bad_request() {
        let response = parse_object_id("not-a-hex-id").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_valid_object_id_parses() {
        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex()).unwrap(), oid);
    }
}
