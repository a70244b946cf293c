use actix_web::{web, HttpResponse, Responder};

use crate::{
    database::MongoDB, middleware::auth::Claims, models::CreateSuccessStoryRequest,
    services::success_story_service,
};

/// GET /success-stories - público, mais recentes primeiro
pub async fn list_success_stories(db: web::Data<MongoDB>) -> impl Responder {
    match success_story_service::list_success_stories(&db).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error listing success stories: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// POST /success-stories - autenticado, append-only.
/// Claims via extractor: o path é compartilhado com o GET público.
pub async fn create_success_story(
    user: Claims,
    db: web::Data<MongoDB>,
    request: web::Json<CreateSuccessStoryRequest>,
) -> impl Responder {
    log::info!("💍 POST /success-stories - by {}", user.sub);

    match success_story_service::create_success_story(&db, request.into_inner()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => {
            log::error!("❌ Error creating success story: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
