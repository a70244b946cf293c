use actix_web::{web, HttpResponse, Responder};

use crate::{
    middleware::auth::Claims,
    services::payment_service::{self, PaymentIntentRequest},
};

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret for the charge", body = payment_service::PaymentIntentResponse),
        (status = 400, description = "Non-positive amount"),
        (status = 401, description = "Missing or invalid session cookie")
    )
)]
pub async fn create_payment_intent(
    user: web::ReqData<Claims>,
    request: web::Json<PaymentIntentRequest>,
) -> impl Responder {
    log::info!(
        "💳 POST /create-payment-intent - {} (amount: {})",
        user.sub,
        request.amount
    );

    if request.amount <= 0.0 {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "amount must be positive"
        }));
    }

    match payment_service::create_payment_intent(request.amount).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error creating payment intent: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
