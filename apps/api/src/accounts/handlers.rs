//! Axum route handlers for signup, token issuance and the caller's own profile.

use axum::{extract::State, http::StatusCode, Form, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::accounts::extract::CurrentUser;
use crate::accounts::password::{hash_password, verify_password};
use crate::accounts::tokens::TokenService;
use crate::errors::AppError;
use crate::models::user::{NewUser, Role, UserProfile, UserRow};
use crate::state::AppState;
use crate::store::JobBoardStore;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub phone_number: String,
    pub name: String,
    pub location_area: String,
    pub password: String,
    pub role: Role,
}

/// OAuth2 password-flow form. `username` carries the phone number.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillsUpdateRequest {
    pub skill_ids: Vec<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

pub async fn register(
    store: &dyn JobBoardStore,
    request: SignupRequest,
) -> Result<UserProfile, AppError> {
    let phone_number = request.phone_number.trim().to_string();
    if phone_number.is_empty() {
        return Err(AppError::Validation("phone_number cannot be empty".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::Validation("password cannot be empty".to_string()));
    }
    if store.find_user_by_phone(&phone_number).await?.is_some() {
        return Err(AppError::Conflict("Phone number already registered".to_string()));
    }

    let user = store
        .create_user(&NewUser {
            phone_number,
            hashed_password: hash_password(&request.password)?,
            name: request.name.trim().to_string(),
            role: request.role,
            location_area: request.location_area.trim().to_string(),
        })
        .await?;

    info!(user_id = %user.id, role = user.role.as_str(), "User registered");
    Ok(UserProfile::from_row(&user, Vec::new()))
}

pub async fn login(
    store: &dyn JobBoardStore,
    tokens: &TokenService,
    form: &TokenForm,
) -> Result<TokenResponse, AppError> {
    let user = store.find_user_by_phone(form.username.trim()).await?;

    let user = match user {
        Some(user) if verify_password(&form.password, &user.hashed_password) => user,
        _ => {
            return Err(AppError::Unauthorized(
                "Incorrect phone number or password".to_string(),
            ))
        }
    };

    Ok(TokenResponse {
        access_token: tokens.issue(&user.phone_number)?,
        token_type: "bearer".to_string(),
    })
}

/// Replaces a seeker's skill profile. Employers cannot hold skills.
pub async fn update_skills(
    store: &dyn JobBoardStore,
    user: &UserRow,
    skill_ids: &[Uuid],
) -> Result<UserProfile, AppError> {
    if user.role != Role::Seeker {
        return Err(AppError::PermissionDenied(
            "Only job seekers can update their skills".to_string(),
        ));
    }

    let skills = store.replace_user_skills(user.id, skill_ids).await?;
    Ok(UserProfile::from_row(user, skills))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /signup/
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let profile = register(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// POST /token
pub async fn handle_token(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<Json<TokenResponse>, AppError> {
    Ok(Json(login(state.store.as_ref(), &state.tokens, &form).await?))
}

/// GET /users/me/
pub async fn handle_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserProfile>, AppError> {
    let skills = state.store.skills_for_user(user.id).await?;
    Ok(Json(UserProfile::from_row(&user, skills)))
}

/// PUT /users/me/skills
pub async fn handle_update_skills(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<SkillsUpdateRequest>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(
        update_skills(state.store.as_ref(), &user, &request.skill_ids).await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn signup(phone: &str, role: Role) -> SignupRequest {
        SignupRequest {
            phone_number: phone.to_string(),
            name: "Asha Patel".to_string(),
            location_area: "Adajan".to_string(),
            password: "hunter22".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let tokens = TokenService::new("secret", 30);

        let profile = register(&store, signup("9000000001", Role::Seeker)).await.unwrap();
        assert_eq!(profile.role, Role::Seeker);
        assert!(profile.skills.is_empty());

        let response = login(
            &store,
            &tokens,
            &TokenForm {
                username: "9000000001".to_string(),
                password: "hunter22".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(response.token_type, "bearer");
        assert_eq!(tokens.verify(&response.access_token).unwrap(), "9000000001");
    }

    #[tokio::test]
    async fn test_duplicate_phone_conflicts() {
        let store = MemoryStore::new();
        register(&store, signup("9000000001", Role::Seeker)).await.unwrap();
        let err = register(&store, signup("9000000001", Role::Employer))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let store = MemoryStore::new();
        let tokens = TokenService::new("secret", 30);
        register(&store, signup("9000000001", Role::Seeker)).await.unwrap();

        let err = login(
            &store,
            &tokens,
            &TokenForm {
                username: "9000000001".to_string(),
                password: "nope".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_profile_never_serializes_password() {
        let store = MemoryStore::new();
        let profile = register(&store, signup("9000000001", Role::Seeker)).await.unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("hashed_password").is_none());
        assert!(json.get("password").is_none());
    }

    #[tokio::test]
    async fn test_employer_cannot_update_skills() {
        let store = MemoryStore::new();
        let employer = store.insert_user("9100000001", "Mehta Textiles", Role::Employer);
        let skill = store.insert_skill("Stitching");

        let err = update_skills(&store, &employer, &[skill.id]).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
        assert!(store.skills_for_user(employer.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seeker_skill_update_replaces_set() {
        let store = MemoryStore::new();
        let seeker = store.insert_user("9000000001", "Asha", Role::Seeker);
        let a = store.insert_skill("Stitching");
        let b = store.insert_skill("Embroidery");

        update_skills(&store, &seeker, &[a.id]).await.unwrap();
        let profile = update_skills(&store, &seeker, &[b.id, b.id]).await.unwrap();
        assert_eq!(profile.skills, vec![b]);
    }

    #[tokio::test]
    async fn test_unknown_skill_leaves_profile_untouched() {
        let store = MemoryStore::new();
        let seeker = store.insert_user("9000000001", "Asha", Role::Seeker);
        let a = store.insert_skill("Stitching");
        update_skills(&store, &seeker, &[a.id]).await.unwrap();

        let err = update_skills(&store, &seeker, &[Uuid::new_v4()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.skills_for_user(seeker.id).await.unwrap(), vec![a]);
    }
}
