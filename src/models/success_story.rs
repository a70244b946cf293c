use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Success story (collection `success_stories`) — append-only pela API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessStory {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub self_biodata_id: i64,
    pub partner_biodata_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub couple_image: Option<String>,
    pub review: String,
    pub marriage_date: String,
    pub created_at: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateSuccessStoryRequest {
    pub self_biodata_id: i64,
    pub partner_biodata_id: i64,
    pub couple_image: Option<String>,
    pub review: String,
    pub marriage_date: String,
}
