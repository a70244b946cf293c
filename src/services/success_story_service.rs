// ==================== SUCCESS STORIES ====================
// Append-only: inserir e listar (mais recentes primeiro). Sem update/delete.

use crate::database::MongoDB;
use crate::models::{CreateSuccessStoryRequest, SuccessStory};
use futures::stream::StreamExt;
use mongodb::bson::doc;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CreateStoryResponse {
    pub success: bool,
    pub story_id: String,
}

#[derive(Debug, Serialize)]
pub struct ListStoriesResponse {
    pub success: bool,
    pub stories: Vec<SuccessStory>,
    pub count: usize,
}

/// POST /success-stories
pub async fn create_success_story(
    db: &MongoDB,
    request: CreateSuccessStoryRequest,
) -> Result<CreateStoryResponse, String> {
    let story = SuccessStory {
        id: None,
        self_biodata_id: request.self_biodata_id,
        partner_biodata_id: request.partner_biodata_id,
        couple_image: request.couple_image,
        review: request.review,
        marriage_date: request.marriage_date,
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    let result = db
        .collection::<SuccessStory>("success_stories")
        .insert_one(&story)
        .await
        .map_err(|e| format!("Failed to insert success story: {}", e))?;

    log::info!(
        "💍 Success story saved: biodata #{} + #{}",
        story.self_biodata_id,
        story.partner_biodata_id
    );

    Ok(CreateStoryResponse {
        success: true,
        story_id: result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .unwrap_or_default(),
    })
}

/// GET /success-stories - mais recentes primeiro
pub async fn list_success_stories(db: &MongoDB) -> Result<ListStoriesResponse, String> {
    let mut cursor = db
        .collection::<SuccessStory>("success_stories")
        .find(doc! {})
        .sort(doc! { "created_at": -1 })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut stories = Vec::new();
    while let Some(story) = cursor.next().await {
        match story {
            Ok(story) => stories.push(story),
            Err(e) => log::warn!("⚠️ Skipping undecodable success story: {}", e),
        }
    }

    let count = stories.len();

    Ok(ListStoriesResponse {
        success: true,
        stories,
        count,
    })
}
