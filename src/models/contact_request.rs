use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum RequestStatus {
    Pending,
    Approved,
}

/// Pedido de revelação de contato (collection `contact_requests`).
/// Criado como Pending; admin aprova (idempotente); só o requester ou admin deleta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub requester_email: String,
    pub biodata_id: i64,
    pub name: String,
    pub mobile_number: String,
    pub contact_email: String,
    pub request_status: RequestStatus,
    pub created_at: i64,
}

/// Request de criação (POST /contactReq) — requester_email vem do token
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateContactRequest {
    pub biodata_id: i64,
    pub name: String,
    pub mobile_number: String,
    pub contact_email: String,
}
