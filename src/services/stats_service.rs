// ==================== ADMIN STATS ====================
// Contagens independentes a cada chamada, sem cache. A "receita" é derivada
// (pedidos de contato x taxa fixa), não um ledger real de pagamentos.

use crate::database::MongoDB;
use crate::models::{BiodataStatus, BiodataType};
use mongodb::bson::{doc, to_bson, Document};
use serde::Serialize;

const DEFAULT_CONTACT_FEE_USD: i64 = 5;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminStatsResponse {
    pub success: bool,
    pub total_biodata: u64,
    pub male_biodata: u64,
    pub female_biodata: u64,
    pub premium_biodata: u64,
    /// contact requests x taxa por pedido (CONTACT_FEE_USD)
    pub total_revenue: i64,
    /// total de success stories
    pub total_marriages: u64,
}

fn contact_fee() -> i64 {
    std::env::var("CONTACT_FEE_USD")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_CONTACT_FEE_USD)
}

pub fn revenue(contact_requests: u64, fee: i64) -> i64 {
    contact_requests as i64 * fee
}

/// GET /admin-stat
pub async fn admin_stats(db: &MongoDB) -> Result<AdminStatsResponse, String> {
    let biodatas = db.collection::<Document>("biodatas");

    let male = to_bson(&BiodataType::Male).map_err(|e| format!("Serialize error: {}", e))?;
    let female = to_bson(&BiodataType::Female).map_err(|e| format!("Serialize error: {}", e))?;
    let premium = to_bson(&BiodataStatus::Premium).map_err(|e| format!("Serialize error: {}", e))?;

    let total_biodata = biodatas
        .count_documents(doc! {})
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let male_biodata = biodatas
        .count_documents(doc! { "biodata_type": male })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let female_biodata = biodatas
        .count_documents(doc! { "biodata_type": female })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let premium_biodata = biodatas
        .count_documents(doc! { "biodata_status": premium })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let contact_requests = db
        .collection::<Document>("contact_requests")
        .count_documents(doc! {})
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let total_marriages = db
        .collection::<Document>("success_stories")
        .count_documents(doc! {})
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    Ok(AdminStatsResponse {
        success: true,
        total_biodata,
        male_biodata,
        female_biodata,
        premium_biodata,
        total_revenue: revenue(contact_requests, contact_fee()),
        total_marriages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_math() {
        assert_eq!(revenue(0, 5), 0);
        assert_eq!(revenue(7, 5), 35);
        assert_eq!(revenue(3, 10), 30);
    }
}
