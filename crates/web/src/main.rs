use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod notify;
mod state;

use config::Config;
use notify::Notifier;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::participants::handlers::register_participant,
        features::participants::handlers::get_participant,
        features::participants::handlers::update_participant,
        features::participants::handlers::delete_participant,
        features::participants::handlers::update_scores,
        features::applications::handlers::approve_application,
        features::applications::handlers::reject_application,
        features::applications::handlers::bulk_approve,
        features::applications::handlers::update_notes,
        features::applications::handlers::add_communication,
        features::applications::handlers::list_pageants,
        features::applications::handlers::get_stats,
        features::applications::handlers::list_pageant_applications,
        features::scoring::handlers::get_pageant_results,
    ),
    components(
        schemas(
            storage::dto::participant::RegisterParticipantRequest,
            storage::dto::participant::UpdateParticipantRequest,
            storage::dto::participant::ScoreUpdateRequest,
            storage::dto::participant::CategoryScoreUpdate,
            storage::dto::participant::ParticipantResponse,
            storage::dto::participant::ParticipantDetailResponse,
            storage::dto::application::ApproveApplicationRequest,
            storage::dto::application::RejectApplicationRequest,
            storage::dto::application::RejectApplicationResponse,
            storage::dto::application::RefundReceipt,
            storage::dto::application::BulkApproveRequest,
            storage::dto::application::BulkApproveResponse,
            storage::dto::application::BulkApproveError,
            storage::dto::application::UpdateNotesRequest,
            storage::dto::application::AddCommunicationRequest,
            storage::dto::application::ApplicationResponse,
            storage::dto::application::PageantApplicationSummary,
            storage::dto::application::ApplicationStats,
            storage::dto::common::PaymentSummary,
            storage::dto::common::CategoryEntry,
            storage::dto::scoring::PageantResultsResponse,
            storage::dto::scoring::AgeGroupResults,
            storage::dto::scoring::RankingEntry,
            storage::models::Participant,
            storage::models::Payment,
            storage::models::CommunicationNote,
            storage::models::Pageant,
            storage::models::Organization,
            storage::models::User,
        )
    ),
    tags(
        (name = "participants", description = "Contestant registration and self-service endpoints"),
        (name = "applications", description = "Organizer application-review endpoints"),
        (name = "scoring", description = "Score capture and computed rankings"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Pageant API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let state = AppState {
        db,
        notifier: Notifier::new(&config.mail_from),
    };

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/participants", features::participants::routes::routes(state.clone()))
        .nest("/api/applications", features::applications::routes::routes(state.clone()))
        .nest("/api/scoring", features::scoring::routes::routes(state.clone()))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
