use actix_web::{web, HttpResponse, Responder};

use crate::{
    api::{parse_object_id, require_admin},
    database::MongoDB,
    middleware::auth::Claims,
    models::{BiodataListQuery, CreateBiodataRequest, SimilarBiodataQuery, UpdateBiodataStatusRequest},
    services::{biodata_service, user_service},
};

#[utoipa::path(
    get,
    path = "/biodatas",
    tag = "Biodatas",
    params(BiodataListQuery),
    responses(
        (status = 200, description = "Paginated biodata page with total count")
    )
)]
pub async fn list_biodatas(
    db: web::Data<MongoDB>,
    query: web::Query<BiodataListQuery>,
) -> impl Responder {
    match biodata_service::list_biodatas(&db, query.into_inner()).await {
        Ok(response) => {
            log::info!(
                "📋 GET /biodatas - page {} ({} of {})",
                response.page,
                response.biodatas.len(),
                response.total
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Error listing biodatas: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /biodata/{id} - lookup pelo _id interno
pub async fn get_biodata(db: web::Data<MongoDB>, id: web::Path<String>) -> impl Responder {
    match biodata_service::get_biodata(&db, &id).await {
        Ok(Some(biodata)) => HttpResponse::Ok().json(biodata),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "biodata not found"
        })),
        Err(e) => {
            log::error!("❌ Error fetching biodata {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /similarBiodatas?biodata_type= - até 3 perfis do mesmo tipo
pub async fn similar_biodatas(
    db: web::Data<MongoDB>,
    query: web::Query<SimilarBiodataQuery>,
) -> impl Responder {
    match biodata_service::similar_biodatas(&db, query.biodata_type).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error fetching similar biodatas: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /viewBiodata/{email} - o próprio dono ou um admin
pub async fn view_biodata(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    email: web::Path<String>,
) -> impl Responder {
    if user.sub != *email {
        match user_service::is_admin(&db, &user.sub).await {
            Ok(true) => {}
            Ok(false) => {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "success": false,
                    "error": "forbidden: not the profile owner"
                }))
            }
            Err(e) => {
                log::error!("❌ Admin check failed: {}", e);
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "success": false,
                    "error": e
                }));
            }
        }
    }

    match biodata_service::get_biodatas_by_owner(&db, &email).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error fetching biodatas for {}: {}", email, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/biodata",
    tag = "Biodatas",
    request_body = CreateBiodataRequest,
    responses(
        (status = 201, description = "Biodata created with its sequential id", body = crate::models::CreateBiodataResponse),
        (status = 401, description = "Missing or invalid session cookie")
    )
)]
pub async fn create_biodata(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    request: web::Json<CreateBiodataRequest>,
) -> impl Responder {
    log::info!("📝 POST /biodata - owner: {}", user.sub);

    match biodata_service::create_biodata(&db, &user.sub, request.into_inner()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => {
            log::error!("❌ Error creating biodata: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /checkout/{biodataId} - lookup pelo id sequencial antes do pagamento
pub async fn checkout_lookup(db: web::Data<MongoDB>, biodata_id: web::Path<i64>) -> impl Responder {
    match biodata_service::checkout_lookup(&db, *biodata_id).await {
        Ok(Some(biodata)) => HttpResponse::Ok().json(biodata),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "biodata not found"
        })),
        Err(e) => {
            log::error!("❌ Error in checkout lookup #{}: {}", biodata_id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /allPremiumReq - admin
pub async fn premium_requests(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> impl Responder {
    if let Err(forbidden) = require_admin(&db, &user).await {
        return forbidden;
    }

    match biodata_service::premium_requests(&db).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error listing premium requests: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /allPremiumMember - público
pub async fn premium_members(db: web::Data<MongoDB>) -> impl Responder {
    match biodata_service::premium_members(&db).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error listing premium members: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// PATCH /biodata/requestPremium/{id} - dono pede premium
pub async fn request_premium(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> impl Responder {
    let object_id = match parse_object_id(&id) {
        Ok(oid) => oid,
        Err(bad_request) => return bad_request,
    };

    match biodata_service::request_premium(&db, object_id, &user.sub).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error requesting premium for {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// PATCH /makePremium/{id} - admin força Premium
pub async fn make_premium(
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

    match biodata_service::make_premium(&db, object_id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error making biodata {} premium: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// PATCH /biodata/{id} - admin seta status (enum validado no deserialize).
/// Claims via extractor: o path é compartilhado com o GET público.
pub async fn set_status(
    user: Claims,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    request: web::Json<UpdateBiodataStatusRequest>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&db, &user).await {
        return forbidden;
    }

    let object_id = match parse_object_id(&id) {
        Ok(oid) => oid,
        Err(bad_request) => return bad_request,
    };

    match biodata_service::set_status(&db, object_id, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error setting status of biodata {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
