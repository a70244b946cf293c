use actix_web::{web, HttpResponse, Responder};

use crate::{
    api::require_admin, database::MongoDB, middleware::auth::Claims, services::stats_service,
};

#[utoipa::path(
    get,
    path = "/admin-stat",
    tag = "Admin",
    responses(
        (status = 200, description = "Dashboard counts", body = stats_service::AdminStatsResponse),
        (status = 401, description = "Missing or invalid session cookie"),
        (status = 403, description = "Authenticated but not an admin")
    )
)]
pub async fn admin_stats(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> impl Responder {
    if let Err(forbidden) = require_admin(&db, &user).await {
        return forbidden;
    }

    match stats_service::admin_stats(&db).await {
        Ok(response) => {
            log::info!(
                "📊 GET /admin-stat - {} biodatas, {} marriages",
                response.total_biodata,
                response.total_marriages
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Error computing admin stats: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
