use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HeartsUnite API - Core System",
        version = "1.0.0",
        description = "Matrimonial biodata matching backend. \n\n**Authentication:** protected endpoints read a JWT from the HTTP-only `token` cookie issued by POST /jwt.\n\n**Features:**\n- Login upsert with role-elevation requests\n- Biodata profiles with sequential customer-facing ids\n- Premium request/approval workflow\n- Favourites and contact-reveal requests\n- Payment intents for contact checkout\n- Success stories and admin dashboard stats",
        contact(
            name = "HeartsUnite Team",
            email = "support@heartsunite.app"
        )
    ),
    paths(
        // Auth
        crate::api::auth::issue_token,
        crate::api::auth::logout,

        // Health
        crate::api::health::health_check,

        // Biodatas
        crate::api::biodatas::list_biodatas,
        crate::api::biodatas::create_biodata,

        // Payments
        crate::api::payments::create_payment_intent,

        // Admin
        crate::api::stats::admin_stats,
    ),
    components(
        schemas(
            // Auth
            crate::services::auth_service::TokenRequest,

            // Health
            crate::api::health::HealthResponse,

            // Users
            crate::models::UpsertUserRequest,
            crate::models::UpdateUserStatusRequest,
            crate::models::UserResponse,
            crate::models::UserStatus,

            // Biodatas
            crate::models::CreateBiodataRequest,
            crate::models::CreateBiodataResponse,
            crate::models::UpdateBiodataStatusRequest,
            crate::models::BiodataType,
            crate::models::BiodataStatus,

            // Favourites & contact requests
            crate::models::AddFavoriteRequest,
            crate::models::CreateContactRequest,
            crate::models::RequestStatus,

            // Success stories
            crate::models::CreateSuccessStoryRequest,

            // Payments & stats
            crate::services::payment_service::PaymentIntentRequest,
            crate::services::payment_service::PaymentIntentResponse,
            crate::services::stats_service::AdminStatsResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Session credential endpoints: issue the cookie on login, clear it on logout."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
        (name = "Biodatas", description = "Matrimonial profile endpoints: paginated browsing, creation, premium workflow."),
        (name = "Payments", description = "Payment-intent creation for the contact-reveal checkout."),
        (name = "Admin", description = "Admin-only dashboard statistics."),
    )
)]
pub struct ApiDoc;
