// ==================== FAVORITES ====================
// Favoritos sempre escopados ao dono (email do token): adicionar, listar e
// remover. Duplicatas são rejeitadas; o índice único cobre a corrida restante.

use crate::database::MongoDB;
use crate::models::{AddFavoriteRequest, Favorite};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AddFavoriteResponse {
    pub success: bool,
    pub favorite_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListFavoritesResponse {
    pub success: bool,
    pub favorites: Vec<Favorite>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteFavoriteResponse {
    pub success: bool,
    pub deleted: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /favBiodata
pub async fn add_favorite(
    db: &MongoDB,
    owner_email: &str,
    request: AddFavoriteRequest,
) -> Result<AddFavoriteResponse, String> {
    let collection = db.collection::<Favorite>("fav_biodatas");

    let duplicate = collection
        .find_one(doc! { "added_by": owner_email, "biodata_id": request.biodata_id })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    if duplicate.is_some() {
        return Ok(AddFavoriteResponse {
            success: false,
            favorite_id: String::new(),
            error: Some("Biodata already in favourites".to_string()),
        });
    }

    let favorite = Favorite {
        id: None,
        added_by: owner_email.to_string(),
        biodata_id: request.biodata_id,
        name: request.name,
        permanent_division: request.permanent_division,
        occupation: request.occupation,
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    let result = collection
        .insert_one(&favorite)
        .await
        .map_err(|e| format!("Failed to insert favourite: {}", e))?;

    log::info!(
        "✅ Biodata #{} added to favourites by {}",
        favorite.biodata_id,
        owner_email
    );

    Ok(AddFavoriteResponse {
        success: true,
        favorite_id: result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .unwrap_or_default(),
        error: None,
    })
}

/// GET /favBiodatas - só os favoritos do dono
pub async fn list_favorites(
    db: &MongoDB,
    owner_email: &str,
) -> Result<ListFavoritesResponse, String> {
    let collection = db.collection::<Favorite>("fav_biodatas");

    let mut cursor = collection
        .find(doc! { "added_by": owner_email })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut favorites = Vec::new();
    while let Some(favorite) = cursor.next().await {
        match favorite {
            Ok(favorite) => favorites.push(favorite),
            Err(e) => log::warn!("⚠️ Skipping undecodable favourite document: {}", e),
        }
    }

    let count = favorites.len();

    Ok(ListFavoritesResponse {
        success: true,
        favorites,
        count,
    })
}

/// DELETE /favBiodata/{id} - o filtro inclui o dono; zero deletados é sucesso
pub async fn delete_favorite(
    db: &MongoDB,
    owner_email: &str,
    object_id: ObjectId,
) -> Result<DeleteFavoriteResponse, String> {
    let result = db
        .collection::<Favorite>("fav_biodatas")
        .delete_one(doc! { "_id": object_id, "added_by": owner_email })
        .await
        .map_err(|e| format!("Failed to delete favourite: {}", e))?;

    log::info!(
        "🗑️  Favourite {} delete by {} (deleted: {})",
        object_id,
        owner_email,
        result.deleted_count
    );

    Ok(DeleteFavoriteResponse {
        success: true,
        deleted: result.deleted_count,
        error: None,
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

    fn sample_request(biodata_id: i64) -> AddFavoriteRequest {
        AddFavoriteRequest {
            biodata_id,
            name: "Test Profile".to_string(),
            permanent_division: "Dhaka".to_string(),
            occupation: "Engineer".to_string(),
        }
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_duplicate_favorite_is_rejected() {
        let db = test_db().await;
        let owner = format!("dup-{}@test.com", mongodb::bson::oid::ObjectId::new().to_hex());

        let first = add_favorite(&db, &owner, sample_request(1)).await.expect("first add");
        assert!(first.success);

        let second = add_favorite(&db, &owner, sample_request(1)).await.expect("second add");
        assert!(!second.success);
        assert!(second.error.is_some());

        // o mesmo biodata por outro dono não é duplicata
        let other_owner = format!("other-{}", owner);
        let third = add_favorite(&db, &other_owner, sample_request(1)).await.expect("other add");
        assert!(third.success);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_delete_only_touches_own_favorites() {
        let db = test_db().await;
        let owner = format!("del-{}@test.com", mongodb::bson::oid::ObjectId::new().to_hex());

        let added = add_favorite(&db, &owner, sample_request(2)).await.expect("add");
        let favorite_id = ObjectId::parse_str(&added.favorite_id).expect("hex id");

        // outro email não consegue remover o favorito alheio
        let intruder = delete_favorite(&db, "intruder@test.com", favorite_id)
            .await
            .expect("delete attempt");
        assert_eq!(intruder.deleted, 0);

        let own = delete_favorite(&db, &owner, favorite_id).await.expect("own delete");
        assert_eq!(own.deleted, 1);
    }
}
