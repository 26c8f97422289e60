use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::accounts::tokens::TokenService;
use crate::errors::AppError;
use crate::models::user::{Actor, UserRow};
use crate::state::AppState;
use crate::store::JobBoardStore;

/// The authenticated, active caller. Rejects with 401 on a missing or bad bearer token and
/// 400 for a deactivated account.
pub struct CurrentUser(pub UserRow);

impl CurrentUser {
    pub fn actor(&self) -> Actor {
        Actor::from(&self.0)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let user = authenticate(state.store.as_ref(), &state.tokens, header).await?;
        Ok(CurrentUser(user))
    }
}

pub async fn authenticate(
    store: &dyn JobBoardStore,
    tokens: &TokenService,
    authorization: Option<&str>,
) -> Result<UserRow, AppError> {
    let token = authorization
        .and_then(|h| h.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty())
        .ok_or_else(credentials_error)?;

    let phone_number = tokens.verify(token)?;
    let user = store
        .find_user_by_phone(&phone_number)
        .await?
        .ok_or_else(credentials_error)?;

    if !user.is_active {
        return Err(AppError::InactiveUser);
    }
    Ok(user)
}

fn credentials_error() -> AppError {
    AppError::Unauthorized("Could not validate credentials".to_string())
}
