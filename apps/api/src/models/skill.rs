use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSkill {
    pub name: String,
    pub category: String,
}
