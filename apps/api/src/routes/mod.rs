pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::auth::handlers as auth;
use crate::resume::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Credential Store
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        // Resume API
        .route("/api/v1/resumes/parse", post(resumes::handle_parse))
        .route("/api/v1/resumes/parse-text", post(resumes::handle_parse_text))
        .route("/api/v1/resumes/rewrite", post(resumes::handle_rewrite))
        .route("/api/v1/resumes/audit", post(resumes::handle_audit))
        .route("/api/v1/resumes/audit-pdf", post(resumes::handle_audit_pdf))
        .route(
            "/api/v1/resumes/cover-letter",
            post(resumes::handle_cover_letter),
        )
        .route("/api/v1/resumes/render", post(resumes::handle_render))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
