pub mod health;
pub mod pagination;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::accounts::handlers as accounts;
use crate::chat::handlers as chat;
use crate::jobs::handlers as jobs;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        // Skills
        .route(
            "/skills/",
            post(skills::handle_create_skill).get(skills::handle_list_skills),
        )
        // Accounts
        .route("/signup/", post(accounts::handle_signup))
        .route("/token", post(accounts::handle_token))
        .route("/users/me/", get(accounts::handle_me))
        .route("/users/me/skills", put(accounts::handle_update_skills))
        // Jobs
        .route(
            "/jobs/",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route("/jobs/mine", get(jobs::handle_my_postings))
        .route("/jobs/search", get(jobs::handle_search_jobs))
        // Chat
        .route("/chat/", post(chat::handle_chat))
        .with_state(state)
}
