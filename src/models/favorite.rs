use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Favorited biodata snapshot (stored in the `fav_biodatas` collection).
/// `added_by` comes from the verified claims; one favorite per (owner, biodata_id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub added_by: String,
    pub biodata_id: i64,
    pub name: String,
    pub permanent_division: String,
    pub occupation: String,
    pub created_at: i64,
}

/// Request de adição aos favoritos (POST /favBiodata)
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AddFavoriteRequest {
    pub biodata_id: i64,
    pub name: String,
    pub permanent_division: String,
    pub occupation: String,
}
