use actix_web::{web, HttpResponse, Responder};

use crate::{
    api::parse_object_id, database::MongoDB, middleware::auth::Claims,
    models::AddFavoriteRequest, services::favorite_service,
};

/// POST /favBiodata - adiciona um favorito para o dono do token
pub async fn add_favorite(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    request: web::Json<AddFavoriteRequest>,
) -> impl Responder {
    match favorite_service::add_favorite(&db, &user.sub, request.into_inner()).await {
        Ok(response) => {
            if response.success {
                HttpResponse::Created().json(response)
            } else {
                // duplicata
                HttpResponse::Conflict().json(response)
            }
        }
        Err(e) => {
            log::error!("❌ Error adding favourite: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /favBiodatas - favoritos do dono do token
pub async fn list_favorites(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> impl Responder {
    match favorite_service::list_favorites(&db, &user.sub).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error listing favourites: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// DELETE /favBiodata/{id} - só remove se o favorito for do dono do token
pub async fn delete_favorite(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> impl Responder {
    let object_id = match parse_object_id(&id) {
        Ok(oid) => oid,
        Err(bad_request) => return bad_request,
    };

    match favorite_service::delete_favorite(&db, &user.sub, object_id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error deleting favourite {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
