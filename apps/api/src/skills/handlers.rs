//! Skill catalogue. Skills are created once and shared by seeker profiles and job postings.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::skill::{NewSkill, Skill};
use crate::routes::pagination::Pagination;
use crate::state::AppState;
use crate::store::JobBoardStore;

pub async fn create_skill(store: &dyn JobBoardStore, request: NewSkill) -> Result<Skill, AppError> {
    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Skill name cannot be empty".to_string()));
    }
    if store.find_skill_by_name(&name).await?.is_some() {
        return Err(AppError::Conflict("Skill already registered".to_string()));
    }

    let skill = store
        .create_skill(&NewSkill {
            name,
            category: request.category.trim().to_string(),
        })
        .await?;
    info!(skill_id = %skill.id, name = %skill.name, "Skill created");
    Ok(skill)
}

/// POST /skills/
pub async fn handle_create_skill(
    State(state): State<AppState>,
    Json(request): Json<NewSkill>,
) -> Result<(StatusCode, Json<Skill>), AppError> {
    let skill = create_skill(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(skill)))
}

/// GET /skills/
pub async fn handle_list_skills(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Skill>>, AppError> {
    let (skip, limit) = page.clamped();
    Ok(Json(state.store.list_skills(skip, limit).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn new_skill(name: &str) -> NewSkill {
        NewSkill {
            name: name.to_string(),
            category: "Tech".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let store = MemoryStore::new();
        let skill = create_skill(&store, new_skill("  Welding  ")).await.unwrap();
        assert_eq!(skill.name, "Welding");
    }

    #[tokio::test]
    async fn test_duplicate_name_is_case_insensitive() {
        let store = MemoryStore::new();
        create_skill(&store, new_skill("Python")).await.unwrap();
        let err = create_skill(&store, new_skill("python")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let store = MemoryStore::new();
        let err = create_skill(&store, new_skill("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
