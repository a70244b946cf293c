// ==================== USERS ====================
// Upsert de login, busca, listagem admin e mudança de papel.
// O upsert tem três saídas (ver UpsertBranch) — um login repetido nunca
// sobrescreve um registro existente.

use crate::database::MongoDB;
use crate::models::{UpdateUserStatusRequest, UpsertUserRequest, User, UserResponse, UserStatus};
use futures::stream::StreamExt;
use mongodb::bson::{doc, to_bson};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertBranch {
    Inserted,
    StatusUpdated,
    Unchanged,
}

#[derive(Debug, Serialize)]
pub struct UpsertUserResponse {
    pub success: bool,
    pub outcome: UpsertBranch,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub success: bool,
    pub users: Vec<UserResponse>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub success: bool,
    pub matched: u64,
    pub modified: u64,
}

/// Decide o destino do upsert sem tocar no banco.
/// (a) sem registro -> insert; (b) registro existe e status pedido é
/// Requested -> atualiza só o status; (c) qualquer outro caso -> no-op.
pub fn upsert_branch(exists: bool, incoming_status: Option<UserStatus>) -> UpsertBranch {
    if !exists {
        UpsertBranch::Inserted
    } else if incoming_status == Some(UserStatus::Requested) {
        UpsertBranch::StatusUpdated
    } else {
        UpsertBranch::Unchanged
    }
}

/// Status gravado no insert de login. Admin nunca entra por aqui — esse
/// papel só é concedido via PATCH /users/update/{email} por outro admin.
pub fn insert_status(incoming_status: Option<UserStatus>) -> UserStatus {
    match incoming_status {
        Some(UserStatus::Requested) => UserStatus::Requested,
        _ => UserStatus::Normal,
    }
}

/// PUT /user - upsert de login
pub async fn upsert_user(
    db: &MongoDB,
    request: UpsertUserRequest,
) -> Result<UpsertUserResponse, String> {
    let collection = db.collection::<User>("users");

    let existing = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    match upsert_branch(existing.is_some(), request.status) {
        UpsertBranch::Inserted => {
            let new_user = User {
                id: None,
                email: request.email.clone(),
                name: request.name,
                photo_url: request.photo_url,
                status: insert_status(request.status),
                timestamp: chrono::Utc::now().timestamp_millis(),
            };

            let result = collection
                .insert_one(&new_user)
                .await
                .map_err(|e| format!("Failed to insert user: {}", e))?;

            log::info!("✅ New user saved: {}", request.email);

            let mut saved = new_user;
            saved.id = result.inserted_id.as_object_id();

            Ok(UpsertUserResponse {
                success: true,
                outcome: UpsertBranch::Inserted,
                user: saved.into(),
            })
        }
        UpsertBranch::StatusUpdated => {
            // usuário existente pedindo elevação de papel — só o status muda
            let status_bson =
                to_bson(&UserStatus::Requested).map_err(|e| format!("Serialize error: {}", e))?;

            collection
                .update_one(
                    doc! { "email": &request.email },
                    doc! { "$set": { "status": status_bson } },
                )
                .await
                .map_err(|e| format!("Failed to update user status: {}", e))?;

            log::info!("📋 User {} requested role elevation", request.email);

            let mut user = existing.ok_or("User vanished during update")?;
            user.status = UserStatus::Requested;

            Ok(UpsertUserResponse {
                success: true,
                outcome: UpsertBranch::StatusUpdated,
                user: user.into(),
            })
        }
        UpsertBranch::Unchanged => {
            // login repetido — devolve o registro como está
            let user = existing.ok_or("User vanished during upsert")?;

            Ok(UpsertUserResponse {
                success: true,
                outcome: UpsertBranch::Unchanged,
                user: user.into(),
            })
        }
    }
}

/// GET /user/{email}
pub async fn get_user_by_email(db: &MongoDB, email: &str) -> Result<Option<User>, String> {
    let collection = db.collection::<User>("users");

    collection
        .find_one(doc! { "email": email })
        .await
        .map_err(|e| format!("Database error: {}", e))
}

/// GET /users - listagem admin, busca parcial case-insensitive por nome
pub async fn list_users(db: &MongoDB, search: Option<&str>) -> Result<ListUsersResponse, String> {
    let collection = db.collection::<User>("users");

    let filter = match search {
        Some(term) if !term.is_empty() => doc! {
            "name": { "$regex": term, "$options": "i" }
        },
        _ => doc! {},
    };

    let mut cursor = collection
        .find(filter)
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut users = Vec::new();
    while let Some(user) = cursor.next().await {
        match user {
            Ok(user) => users.push(UserResponse::from(user)),
            Err(e) => log::warn!("⚠️ Skipping undecodable user document: {}", e),
        }
    }

    let count = users.len();

    Ok(ListUsersResponse {
        success: true,
        users,
        count,
    })
}

/// PATCH /users/update/{email} - comando validado, apenas o campo status
pub async fn update_user_status(
    db: &MongoDB,
    email: &str,
    request: UpdateUserStatusRequest,
) -> Result<UpdateStatusResponse, String> {
    let collection = db.collection::<User>("users");

    let status_bson = to_bson(&request.status).map_err(|e| format!("Serialize error: {}", e))?;

    let result = collection
        .update_one(
            doc! { "email": email },
            doc! { "$set": { "status": status_bson } },
        )
        .await
        .map_err(|e| format!("Failed to update user: {}", e))?;

    log::info!(
        "🔧 User {} status set to {:?} (matched: {})",
        email,
        request.status,
        result.matched_count
    );

    Ok(UpdateStatusResponse {
        success: true,
        matched: result.matched_count,
        modified: result.modified_count,
    })
}

/// Checa se o email autenticado é um admin armazenado.
/// Ok(false) = autenticado mas sem papel de admin.
pub async fn is_admin(db: &MongoDB, email: &str) -> Result<bool, String> {
    let user = get_user_by_email(db, email).await?;
    Ok(matches!(
        user,
        Some(User {
            status: UserStatus::Admin,
            ..
        })
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_email_always_inserts() {
        assert_eq!(upsert_branch(false, None), UpsertBranch::Inserted);
        assert_eq!(
            upsert_branch(false, Some(UserStatus::Requested)),
            UpsertBranch::Inserted
        );
        assert_eq!(
            upsert_branch(false, Some(UserStatus::Admin)),
            UpsertBranch::Inserted
        );
    }

    #[test]
    fn test_insert_never_grants_admin() {
        // um login novo pedindo Admin entra como Normal
        assert_eq!(insert_status(Some(UserStatus::Admin)), UserStatus::Normal);
        assert_eq!(insert_status(None), UserStatus::Normal);
        assert_eq!(insert_status(Some(UserStatus::Normal)), UserStatus::Normal);
        assert_eq!(
            insert_status(Some(UserStatus::Requested)),
            UserStatus::Requested
        );
    }

    #[test]
    fn test_existing_with_requested_updates_status_only() {
        assert_eq!(
            upsert_branch(true, Some(UserStatus::Requested)),
            UpsertBranch::StatusUpdated
        );
    }

    #[test]
    fn test_existing_relogin_is_noop() {
        assert_eq!(upsert_branch(true, None), UpsertBranch::Unchanged);
        assert_eq!(
            upsert_branch(true, Some(UserStatus::Normal)),
            UpsertBranch::Unchanged
        );
        // nem um payload com Admin muda nada no re-login
        assert_eq!(
            upsert_branch(true, Some(UserStatus::Admin)),
            UpsertBranch::Unchanged
        );
    }
}
