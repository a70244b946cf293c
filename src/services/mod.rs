pub mod auth_service;
pub mod user_service;
pub mod biodata_service;
pub mod favorite_service;
pub mod contact_request_service;
pub mod success_story_service;
pub mod payment_service;
pub mod stats_service;
