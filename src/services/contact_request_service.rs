// ==================== CONTACT REQUESTS ====================
// Pedido de revelação de contato: criado Pending pelo requester, aprovado
// por admin (idempotente), deletado pelo requester ou por admin.

use crate::database::MongoDB;
use crate::models::{ContactRequest, CreateContactRequest, RequestStatus};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CreateContactResponse {
    pub success: bool,
    pub request_id: String,
}

#[derive(Debug, Serialize)]
pub struct ListContactsResponse {
    pub success: bool,
    pub requests: Vec<ContactRequest>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ApproveContactResponse {
    pub success: bool,
    pub matched: u64,
    pub modified: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteContactResponse {
    pub success: bool,
    pub deleted: u64,
}

/// POST /contactReq - requester vem do token, nunca do body
pub async fn create_contact_request(
    db: &MongoDB,
    requester_email: &str,
    request: CreateContactRequest,
) -> Result<CreateContactResponse, String> {
    let contact_request = ContactRequest {
        id: None,
        requester_email: requester_email.to_string(),
        biodata_id: request.biodata_id,
        name: request.name,
        mobile_number: request.mobile_number,
        contact_email: request.contact_email,
        request_status: RequestStatus::Pending,
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    let result = db
        .collection::<ContactRequest>("contact_requests")
        .insert_one(&contact_request)
        .await
        .map_err(|e| format!("Failed to insert contact request: {}", e))?;

    log::info!(
        "✅ Contact request for biodata #{} created by {}",
        contact_request.biodata_id,
        requester_email
    );

    Ok(CreateContactResponse {
        success: true,
        request_id: result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .unwrap_or_default(),
    })
}

/// GET /contactReqs (admin, todos) e GET /contactReqs/{email} (próprios)
pub async fn list_contact_requests(
    db: &MongoDB,
    requester_email: Option<&str>,
) -> Result<ListContactsResponse, String> {
    let filter: Document = match requester_email {
        Some(email) => doc! { "requester_email": email },
        None => doc! {},
    };

    let mut cursor = db
        .collection::<ContactRequest>("contact_requests")
        .find(filter)
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut requests = Vec::new();
    while let Some(request) = cursor.next().await {
        match request {
            Ok(request) => requests.push(request),
            Err(e) => log::warn!("⚠️ Skipping undecodable contact request: {}", e),
        }
    }

    let count = requests.len();

    Ok(ListContactsResponse {
        success: true,
        requests,
        count,
    })
}

/// PATCH /contactReq/approve/{id} - admin; incondicional e idempotente.
/// Reaprovar um pedido já aprovado ou inexistente reporta zero afetados.
pub async fn approve_contact_request(
    db: &MongoDB,
    object_id: ObjectId,
) -> Result<ApproveContactResponse, String> {
    let approved = to_bson(&RequestStatus::Approved).map_err(|e| format!("Serialize error: {}", e))?;

    let result = db
        .collection::<ContactRequest>("contact_requests")
        .update_one(
            doc! { "_id": object_id },
            doc! { "$set": { "request_status": approved } },
        )
        .await
        .map_err(|e| format!("Failed to approve contact request: {}", e))?;

    log::info!(
        "✅ Contact request {} approved (matched: {})",
        object_id,
        result.matched_count
    );

    Ok(ApproveContactResponse {
        success: true,
        matched: result.matched_count,
        modified: result.modified_count,
    })
}

/// DELETE /contactReq/{id} - admin deleta qualquer um, o requester só os seus.
/// Zero deletados (id ausente ou de outro dono) é sucesso com deleted=0.
pub async fn delete_contact_request(
    db: &MongoDB,
    object_id: ObjectId,
    requester_email: &str,
    is_admin: bool,
) -> Result<DeleteContactResponse, String> {
    let filter = if is_admin {
        doc! { "_id": object_id }
    } else {
        doc! { "_id": object_id, "requester_email": requester_email }
    };

    let result = db
        .collection::<ContactRequest>("contact_requests")
        .delete_one(filter)
        .await
        .map_err(|e| format!("Failed to delete contact request: {}", e))?;

    log::info!(
        "🗑️  Contact request {} delete by {} (deleted: {})",
        object_id,
        requester_email,
        result.deleted_count
    );

    Ok(DeleteContactResponse {
        success: true,
        deleted: result.deleted_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> MongoDB {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/heartsUnite_test".to_string());
        MongoDB::new(&uri).await.expect("connect")
    }

    fn sample_request(biodata_id: i64) -> CreateContactRequest {
        CreateContactRequest {
            biodata_id,
            name: "Test Profile".to_string(),
            mobile_number: "01700000000".to_string(),
            contact_email: "profile@test.com".to_string(),
        }
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_requester_cannot_delete_anothers_request() {
        let db = test_db().await;
        let requester = format!("req-{}@test.com", ObjectId::new().to_hex());

        let created = create_contact_request(&db, &requester, sample_request(7))
            .await
            .expect("create");
        let request_id = ObjectId::parse_str(&created.request_id).expect("hex id");

        let intruder = delete_contact_request(&db, request_id, "intruder@test.com", false)
            .await
            .expect("delete attempt");
        assert_eq!(intruder.deleted, 0);

        let own = delete_contact_request(&db, request_id, &requester, false)
            .await
            .expect("own delete");
        assert_eq!(own.deleted, 1);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_admin_deletes_any_request() {
        let db = test_db().await;
        let requester = format!("req-{}@test.com", ObjectId::new().to_hex());

        let created = create_contact_request(&db, &requester, sample_request(8))
            .await
            .expect("create");
        let request_id = ObjectId::parse_str(&created.request_id).expect("hex id");

        let admin = delete_contact_request(&db, request_id, "admin@test.com", true)
            .await
            .expect("admin delete");
        assert_eq!(admin.deleted, 1);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_approve_is_idempotent() {
        let db = test_db().await;
        let requester = format!("req-{}@test.com", ObjectId::new().to_hex());

        let created = create_contact_request(&db, &requester, sample_request(9))
            .await
            .expect("create");
        let request_id = ObjectId::parse_str(&created.request_id).expect("hex id");

        let first = approve_contact_request(&db, request_id).await.expect("approve");
        assert_eq!((first.matched, first.modified), (1, 1));

        // reaprovar casa o documento mas não muda nada
        let second = approve_contact_request(&db, request_id).await.expect("reapprove");
        assert_eq!((second.matched, second.modified), (1, 0));

        // id inexistente: zero afetados, sem erro
        let missing = approve_contact_request(&db, ObjectId::new()).await.expect("missing");
        assert_eq!(missing.matched, 0);
    }
}
