use actix_web::{web, HttpResponse, Responder};

use crate::{
    api::{parse_object_id, require_admin},
    database::MongoDB,
    middleware::auth::Claims,
    models::CreateContactRequest,
    services::{contact_request_service, user_service},
};

/// POST /contactReq - cria Pending em nome do dono do token
pub async fn create_contact_request(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    request: web::Json<CreateContactRequest>,
) -> impl Responder {
    match contact_request_service::create_contact_request(&db, &user.sub, request.into_inner())
        .await
    {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => {
            log::error!("❌ Error creating contact request: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /contactReqs - admin lista todos
pub async fn list_all(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> impl Responder {
    if let Err(forbidden) = require_admin(&db, &user).await {
        return forbidden;
    }

    match contact_request_service::list_contact_requests(&db, None).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error listing contact requests: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /contactReqs/{email} - o requester só lista os próprios
pub async fn list_by_requester(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    email: web::Path<String>,
) -> impl Responder {
    if user.sub != *email {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "success": false,
            "error": "forbidden: not your contact requests"
        }));
    }

    match contact_request_service::list_contact_requests(&db, Some(&email)).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error listing contact requests for {}: {}", email, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// PATCH /contactReq/approve/{id} - admin, idempotente
pub async fn approve(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&db, &user).await {
        return forbidden;
    }

    let object_id = match parse_object_id(&id) {
        Ok(oid) => oid,
        Err(bad_request) => return bad_request,
    };

    match contact_request_service::approve_contact_request(&db, object_id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error approving contact request {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// DELETE /contactReq/{id} - requester ou admin
pub async fn delete(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> impl Responder {
    let object_id = match parse_object_id(&id) {
        Ok(oid) => oid,
        Err(bad_request) => return bad_request,
    };

    let admin = match user_service::is_admin(&db, &user.sub).await {
        Ok(admin) => admin,
        Err(e) => {
            log::error!("❌ Admin check failed: {}", e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }));
        }
    };

    match contact_request_service::delete_contact_request(&db, object_id, &user.sub, admin).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error deleting contact request {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
