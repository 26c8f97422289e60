use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::skill::Skill;

/// Mutually exclusive account role. Fixed at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Seeker,
    Employer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seeker => "seeker",
            Role::Employer => "employer",
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub phone_number: String,
    pub hashed_password: String,
    pub name: String,
    pub role: Role,
    pub location_area: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Already-authenticated caller identity, as consumed by the core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl From<&UserRow> for Actor {
    fn from(user: &UserRow) -> Self {
        Actor {
            id: user.id,
            role: user.role,
        }
    }
}

/// Insert payload. `hashed_password` is produced by `accounts::password` before it gets here.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub phone_number: String,
    pub hashed_password: String,
    pub name: String,
    pub role: Role,
    pub location_area: String,
}

/// Public view of a user: never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub phone_number: String,
    pub name: String,
    pub role: Role,
    pub location_area: String,
    pub is_active: bool,
    pub skills: Vec<Skill>,
}

impl UserProfile {
    pub fn from_row(user: &UserRow, skills: Vec<Skill>) -> Self {
        UserProfile {
            id: user.id,
            phone_number: user.phone_number.clone(),
            name: user.name.clone(),
            role: user.role,
            location_area: user.location_area.clone(),
            is_active: user.is_active,
            skills,
        }
    }
}

/// A seeker together with the identifiers of every skill on their profile.
/// Input to the skill overlap matcher.
#[derive(Debug, Clone, FromRow)]
pub struct SeekerProfile {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub role: Role,
    pub skill_ids: Vec<Uuid>,
}
