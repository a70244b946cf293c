use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum BiodataType {
    Male,
    Female,
}

/// Estado premium de um perfil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum BiodataStatus {
    Normal,
    Requested,
    Premium,
}

/// Matrimonial profile (stored in the `biodatas` collection).
///
/// `biodata_id` is the customer-facing sequential id, assigned once at creation
/// from the atomic counter — immutable afterwards. The Mongo `_id` stays internal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Biodata {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub biodata_id: i64,
    pub biodata_type: BiodataType,
    pub biodata_status: BiodataStatus,
    /// Owner email, always taken from the verified session claims
    pub contact_email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub date_of_birth: String,
    pub height: String,
    pub weight: String,
    pub age: i32,
    pub occupation: String,
    pub race: String,
    pub fathers_name: String,
    pub mothers_name: String,
    pub permanent_division: String,
    pub present_division: String,
    pub expected_partner_age: String,
    pub expected_partner_height: String,
    pub expected_partner_weight: String,
    pub mobile_number: String,
    pub created_at: i64,
}

/// Request de criação de biodata (POST /biodata).
/// contact_email NÃO vem do body — é sempre o email do token.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateBiodataRequest {
    pub biodata_type: BiodataType,
    pub name: String,
    pub profile_image: Option<String>,
    pub date_of_birth: String,
    pub height: String,
    pub weight: String,
    pub age: i32,
    pub occupation: String,
    pub race: String,
    pub fathers_name: String,
    pub mothers_name: String,
    pub permanent_division: String,
    pub present_division: String,
    pub expected_partner_age: String,
    pub expected_partner_height: String,
    pub expected_partner_weight: String,
    pub mobile_number: String,
}

/// Comando validado de mudança de status (PATCH /biodata/{id}).
/// O enum rejeita qualquer valor fora de Normal/Requested/Premium no deserialize.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateBiodataStatusRequest {
    pub status: BiodataStatus,
}

/// Query da listagem paginada (GET /biodatas)
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BiodataListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub biodata_type: Option<BiodataType>,
    pub permanent_division: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SimilarBiodataQuery {
    pub biodata_type: BiodataType,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreateBiodataResponse {
    pub success: bool,
    pub biodata_id: i64,
}

#[derive(Debug, Serialize)]
pub struct BiodataListResponse {
    pub success: bool,
    pub biodatas: Vec<Biodata>,
    /// Total de documentos que casam com o filtro (para calcular páginas)
    pub total: u64,
    pub page: i64,
    pub limit: i64,
}
