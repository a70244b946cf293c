use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Role/status of a user account.
/// "Requested" means the user asked for an admin role elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum UserStatus {
    Normal,
    Requested,
    Admin,
}

/// User account (stored in the `users` collection).
/// Invariant: at most one document per email (unique index).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub status: UserStatus,
    /// Millisecond epoch, server-assigned at first insert
    pub timestamp: i64,
}

/// Request para o upsert de login (PUT /user)
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpsertUserRequest {
    pub email: String,
    pub name: String,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub status: Option<UserStatus>,
}

/// Comando validado de atualização de papel (PATCH /users/update/{email}).
/// Apenas o campo status — nunca merge arbitrário de campos.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserStatusRequest {
    pub status: UserStatus,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub status: UserStatus,
    pub timestamp: i64,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: u.email,
            name: u.name,
            photo_url: u.photo_url,
            status: u.status,
            timestamp: u.timestamp,
        }
    }
}
