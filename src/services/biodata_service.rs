// ==================== BIODATAS ====================
// Criação com id sequencial atômico, listagem paginada com filtros,
// lookups (interno, por dono, checkout) e transições de status premium.

use crate::database::MongoDB;
use crate::models::{
    Biodata, BiodataListQuery, BiodataListResponse, BiodataStatus, BiodataType,
    CreateBiodataRequest, CreateBiodataResponse, UpdateBiodataStatusRequest,
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use serde::Serialize;

const DEFAULT_PAGE_LIMIT: i64 = 4;
const MAX_PAGE_LIMIT: i64 = 100;
const SIMILAR_LIMIT: i64 = 3;

#[derive(Debug, Serialize)]
pub struct BiodatasResponse {
    pub success: bool,
    pub biodatas: Vec<Biodata>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub matched: u64,
    pub modified: u64,
}

/// Normaliza page/limit da query: page >= 1, limit em 1..=100 (default 4).
/// Retorna (page, limit, skip).
pub fn page_window(page: Option<i64>, limit: Option<i64>) -> (i64, i64, u64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
    let skip = ((page - 1) * limit) as u64;
    (page, limit, skip)
}

/// Filtro da listagem a partir dos parâmetros opcionais da query
pub fn build_list_filter(query: &BiodataListQuery) -> Document {
    let mut filter = doc! {};

    if let Some(biodata_type) = query.biodata_type {
        if let Ok(bson) = to_bson(&biodata_type) {
            filter.insert("biodata_type", bson);
        }
    }

    if let Some(division) = &query.permanent_division {
        if !division.is_empty() {
            filter.insert("permanent_division", division);
        }
    }

    let mut age = doc! {};
    if let Some(min_age) = query.min_age {
        age.insert("$gte", min_age);
    }
    if let Some(max_age) = query.max_age {
        age.insert("$lte", max_age);
    }
    if !age.is_empty() {
        filter.insert("age", age);
    }

    filter
}

/// POST /biodata - o id sequencial vem do contador atômico, o dono do token
pub async fn create_biodata(
    db: &MongoDB,
    owner_email: &str,
    request: CreateBiodataRequest,
) -> Result<CreateBiodataResponse, String> {
    let biodata_id = db.next_biodata_id().await?;

    let biodata = Biodata {
        id: None,
        biodata_id,
        biodata_type: request.biodata_type,
        biodata_status: BiodataStatus::Normal,
        contact_email: owner_email.to_string(),
        name: request.name,
        profile_image: request.profile_image,
        date_of_birth: request.date_of_birth,
        height: request.height,
        weight: request.weight,
        age: request.age,
        occupation: request.occupation,
        race: request.race,
        fathers_name: request.fathers_name,
        mothers_name: request.mothers_name,
        permanent_division: request.permanent_division,
        present_division: request.present_division,
        expected_partner_age: request.expected_partner_age,
        expected_partner_height: request.expected_partner_height,
        expected_partner_weight: request.expected_partner_weight,
        mobile_number: request.mobile_number,
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    db.collection::<Biodata>("biodatas")
        .insert_one(&biodata)
        .await
        .map_err(|e| format!("Failed to insert biodata: {}", e))?;

    log::info!("✅ Biodata #{} created for {}", biodata_id, owner_email);

    Ok(CreateBiodataResponse {
        success: true,
        biodata_id,
    })
}

/// GET /biodatas - página + total para o caller calcular o número de páginas
pub async fn list_biodatas(
    db: &MongoDB,
    query: BiodataListQuery,
) -> Result<BiodataListResponse, String> {
    let collection = db.collection::<Biodata>("biodatas");

    let filter = build_list_filter(&query);
    let (page, limit, skip) = page_window(query.page, query.limit);

    let total = collection
        .count_documents(filter.clone())
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut cursor = collection
        .find(filter)
        .sort(doc! { "biodata_id": 1 })
        .skip(skip)
        .limit(limit)
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut biodatas = Vec::new();
    while let Some(biodata) = cursor.next().await {
        match biodata {
            Ok(biodata) => biodatas.push(biodata),
            Err(e) => log::warn!("⚠️ Skipping undecodable biodata document: {}", e),
        }
    }

    Ok(BiodataListResponse {
        success: true,
        biodatas,
        total,
        page,
        limit,
    })
}

/// GET /biodata/{id} - lookup pelo _id interno; id não parseável conta como ausente
pub async fn get_biodata(db: &MongoDB, id: &str) -> Result<Option<Biodata>, String> {
    let object_id = match ObjectId::parse_str(id) {
        Ok(oid) => oid,
        Err(e) => {
            log::debug!("Unparseable biodata id '{}': {}", id, e);
            return Ok(None);
        }
    };

    db.collection::<Biodata>("biodatas")
        .find_one(doc! { "_id": object_id })
        .await
        .map_err(|e| format!("Database error: {}", e))
}

/// GET /viewBiodata/{email} - todos os biodatas do dono
pub async fn get_biodatas_by_owner(db: &MongoDB, email: &str) -> Result<BiodatasResponse, String> {
    collect_biodatas(db, doc! { "contact_email": email }, None).await
}

/// GET /similarBiodatas - até 3 do mesmo tipo, sugestão de perfis relacionados
pub async fn similar_biodatas(
    db: &MongoDB,
    biodata_type: BiodataType,
) -> Result<BiodatasResponse, String> {
    let type_bson = to_bson(&biodata_type).map_err(|e| format!("Serialize error: {}", e))?;
    collect_biodatas(db, doc! { "biodata_type": type_bson }, Some(SIMILAR_LIMIT)).await
}

/// GET /checkout/{biodataId} - lookup pelo id sequencial, caminho pré-pagamento
pub async fn checkout_lookup(db: &MongoDB, biodata_id: i64) -> Result<Option<Biodata>, String> {
    db.collection::<Biodata>("biodatas")
        .find_one(doc! { "biodata_id": biodata_id })
        .await
        .map_err(|e| format!("Database error: {}", e))
}

/// GET /allPremiumReq - pedidos de premium pendentes (admin)
pub async fn premium_requests(db: &MongoDB) -> Result<BiodatasResponse, String> {
    let status = to_bson(&BiodataStatus::Requested).map_err(|e| format!("Serialize error: {}", e))?;
    collect_biodatas(db, doc! { "biodata_status": status }, None).await
}

/// GET /allPremiumMember - membros premium (público)
pub async fn premium_members(db: &MongoDB) -> Result<BiodatasResponse, String> {
    let status = to_bson(&BiodataStatus::Premium).map_err(|e| format!("Serialize error: {}", e))?;
    collect_biodatas(db, doc! { "biodata_status": status }, None).await
}

/// PATCH /biodata/requestPremium/{id} - só o dono; perfis já Premium não regridem
pub async fn request_premium(
    db: &MongoDB,
    object_id: ObjectId,
    owner_email: &str,
) -> Result<StatusUpdateResponse, String> {
    let requested = to_bson(&BiodataStatus::Requested).map_err(|e| format!("Serialize error: {}", e))?;
    let premium = to_bson(&BiodataStatus::Premium).map_err(|e| format!("Serialize error: {}", e))?;

    let result = db
        .collection::<Biodata>("biodatas")
        .update_one(
            doc! {
                "_id": object_id,
                "contact_email": owner_email,
                "biodata_status": { "$ne": premium },
            },
            doc! { "$set": { "biodata_status": requested } },
        )
        .await
        .map_err(|e| format!("Failed to request premium: {}", e))?;

    log::info!(
        "📋 Premium requested for biodata {} by {} (matched: {})",
        object_id,
        owner_email,
        result.matched_count
    );

    Ok(StatusUpdateResponse {
        success: true,
        matched: result.matched_count,
        modified: result.modified_count,
    })
}

/// PATCH /makePremium/{id} - admin força Premium, incondicional
pub async fn make_premium(db: &MongoDB, object_id: ObjectId) -> Result<StatusUpdateResponse, String> {
    set_status(
        db,
        object_id,
        UpdateBiodataStatusRequest {
            status: BiodataStatus::Premium,
        },
    )
    .await
}

/// PATCH /biodata/{id} - admin seta um status validado pelo enum
pub async fn set_status(
    db: &MongoDB,
    object_id: ObjectId,
    request: UpdateBiodataStatusRequest,
) -> Result<StatusUpdateResponse, String> {
    let status_bson = to_bson(&request.status).map_err(|e| format!("Serialize error: {}", e))?;

    let result = db
        .collection::<Biodata>("biodatas")
        .update_one(
            doc! { "_id": object_id },
            doc! { "$set": { "biodata_status": status_bson } },
        )
        .await
        .map_err(|e| format!("Failed to update biodata status: {}", e))?;

    log::info!(
        "🔧 Biodata {} status set to {:?} (matched: {})",
        object_id,
        request.status,
        result.matched_count
    );

    Ok(StatusUpdateResponse {
        success: true,
        matched: result.matched_count,
        modified: result.modified_count,
    })
}

async fn collect_biodatas(
    db: &MongoDB,
    filter: Document,
    limit: Option<i64>,
) -> Result<BiodatasResponse, String> {
    let collection = db.collection::<Biodata>("biodatas");

    let find = collection.find(filter);
    let find = match limit {
        Some(n) => find.limit(n),
        None => find,
    };

    let mut cursor = find.await.map_err(|e| format!("Database error: {}", e))?;

    let mut biodatas = Vec::new();
    while let Some(biodata) = cursor.next().await {
        match biodata {
            Ok(biodata) => biodatas.push(biodata),
            Err(e) => log::warn!("⚠️ Skipping undecodable biodata document: {}", e),
        }
    }

    let count = biodatas.len();

    Ok(BiodatasResponse {
        success: true,
        biodatas,
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_defaults() {
        let (page, limit, skip) = page_window(None, None);
        assert_eq!((page, limit, skip), (1, 4, 0));
    }

    #[test]
    fn test_page_window_second_page() {
        // page=2, limit=4 sobre 10 registros -> pula os 4 primeiros
        let (page, limit, skip) = page_window(Some(2), Some(4));
        assert_eq!((page, limit, skip), (2, 4, 4));
    }

    #[test]
    fn test_page_window_clamps_bad_input() {
        let (page, _, skip) = page_window(Some(0), None);
        assert_eq!((page, skip), (1, 0));

        let (page, _, skip) = page_window(Some(-3), Some(-1));
        assert_eq!((page, skip), (1, 0));

        let (_, limit, _) = page_window(None, Some(10_000));
        assert_eq!(limit, 100);
    }

    #[test]
    fn test_list_filter_empty_by_default() {
        let query = BiodataListQuery {
            page: None,
            limit: None,
            biodata_type: None,
            permanent_division: None,
            min_age: None,
            max_age: None,
        };
        assert!(build_list_filter(&query).is_empty());
    }

    #[test]
    fn test_list_filter_combines_criteria() {
        let query = BiodataListQuery {
            page: None,
            limit: None,
            biodata_type: Some(BiodataType::Female),
            permanent_division: Some("Dhaka".to_string()),
            min_age: Some(20),
            max_age: Some(30),
        };
        let filter = build_list_filter(&query);
        assert_eq!(filter.get_str("permanent_division").unwrap(), "Dhaka");
        let age = filter.get_document("age").unwrap();
        assert_eq!(age.get_i32("$gte").unwrap(), 20);
        assert_eq!(age.get_i32("$lte").unwrap(), 30);
        assert!(filter.contains_key("biodata_type"));
    }

    #[test]
    fn test_status_json_rejects_unknown_value() {
        // o enum é a validação: "Vip" não é um status
        let err = serde_json::from_str::<UpdateBiodataStatusRequest>(r#"{"status":"Vip"}"#);
        assert!(err.is_err());

        let ok = serde_json::from_str::<UpdateBiodataStatusRequest>(r#"{"status":"Premium"}"#);
        assert_eq!(ok.unwrap().status, BiodataStatus::Premium);
    }
}
