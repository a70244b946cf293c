use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::{
    api::require_admin,
    database::MongoDB,
    middleware::auth::Claims,
    models::{UpdateUserStatusRequest, UpsertUserRequest, UserResponse},
    services::user_service,
};

#[derive(Debug, Deserialize)]
pub struct UserSearchQuery {
    pub search: Option<String>,
}

/// PUT /user - upsert de login (insere, atualiza status ou no-op)
pub async fn upsert_user(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    request: web::Json<UpsertUserRequest>,
) -> impl Responder {
    log::info!("📝 PUT /user - email: {}", request.email);

    // o dono do token só pode mexer no próprio registro
    if user.sub != request.email {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "success": false,
            "error": "token identity does not match payload email"
        }));
    }

    match user_service::upsert_user(&db, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error upserting user: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /user/{email}
pub async fn get_user(db: web::Data<MongoDB>, email: web::Path<String>) -> impl Responder {
    match user_service::get_user_by_email(&db, &email).await {
        Ok(Some(user)) => HttpResponse::Ok().json(UserResponse::from(user)),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "user not found"
        })),
        Err(e) => {
            log::error!("❌ Error fetching user {}: {}", email, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /users?search= - admin
pub async fn list_users(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    query: web::Query<UserSearchQuery>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&db, &user).await {
        return forbidden;
    }

    match user_service::list_users(&db, query.search.as_deref()).await {
        Ok(response) => {
            log::info!("📋 GET /users - {} users listed", response.count);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Error listing users: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// PATCH /users/update/{email} - admin, comando validado
pub async fn update_user_status(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    email: web::Path<String>,
    request: web::Json<UpdateUserStatusRequest>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&db, &user).await {
        return forbidden;
    }

    match user_service::update_user_status(&db, &email, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error updating user {}: {}", email, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
