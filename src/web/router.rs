//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{auth, contact, folder, info, message, reception, AppState};
use super::middleware::{create_cors_layer, inject_state};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/profile", get(auth::get_profile).put(auth::update_profile))
        .route("/change-password", put(auth::change_password))
        .route("/verify-token", get(auth::verify_token));

    let message_routes = Router::new()
        .route("/", post(message::create_message).get(message::list_messages))
        .route("/stats", get(message::message_stats))
        .route(
            "/:id",
            get(message::get_message)
                .put(message::update_message)
                .delete(message::delete_message),
        )
        .route("/:id/permanent", delete(message::delete_message_permanent))
        .route("/:id/send", post(message::send_draft));

    let reception_routes = Router::new()
        .route("/", get(reception::list_receptions))
        .route("/stats", get(reception::reception_stats))
        .route("/mark-all-read", post(reception::mark_all_read))
        .route(
            "/:id",
            get(reception::get_reception).delete(reception::delete_reception),
        )
        .route(
            "/:id/permanent",
            delete(reception::delete_reception_permanent),
        )
        .route("/:id/read", put(reception::mark_read))
        .route("/:id/state", put(reception::update_state))
        .route("/:id/move", put(reception::move_reception));

    let contact_routes = Router::new()
        .route("/", get(contact::list_contacts).post(contact::add_contact))
        .route("/stats", get(contact::contact_stats))
        .route("/search", get(contact::search_contacts))
        .route("/search-users", get(contact::search_users))
        .route("/check/:user_id", get(contact::check_contact))
        .route(
            "/:id",
            get(contact::get_contact).delete(contact::delete_contact),
        );

    let folder_routes = Router::new()
        .route("/", get(folder::list_folders).post(folder::create_folder))
        .route("/stats", get(folder::folder_stats))
        .route(
            "/:id",
            get(folder::get_folder)
                .put(folder::update_folder)
                .delete(folder::delete_folder),
        )
        .route("/:id/messages", get(folder::folder_messages))
        .route("/:id/move-messages", post(folder::move_messages));

    let api_routes = Router::new()
        .route("/", get(info::root))
        .route("/info", get(info::info))
        .nest("/auth", auth_routes)
        .nest("/messages", message_routes)
        .nest("/receptions", reception_routes)
        .nest("/contacts", contact_routes)
        .nest("/dossiers", folder_routes);

    // Clone app_state for the middleware closure
    let state_for_middleware = app_state.clone();

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = state_for_middleware.clone();
                    inject_state(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
