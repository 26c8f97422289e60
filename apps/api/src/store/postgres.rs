use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, JobRow, NewJob};
use crate::models::skill::{NewSkill, Skill};
use crate::models::user::{NewUser, SeekerProfile, UserRow};
use crate::store::{distinct_ids, JobBoardStore};

/// PostgreSQL-backed store. Each call checks a connection out of the pool for its own
/// duration only; multi-statement writes run inside a transaction that rolls back on drop.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Loads skills for a batch of jobs, keyed by job id.
    async fn skills_by_job(&self, job_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Skill>>, AppError> {
        let rows: Vec<(Uuid, Uuid, String, String)> = sqlx::query_as(
            r#"
            SELECT js.job_id, s.id, s.name, s.category
            FROM job_skills js
            JOIN skills s ON s.id = js.skill_id
            WHERE js.job_id = ANY($1)
            ORDER BY s.name
            "#,
        )
        .bind(job_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_job: HashMap<Uuid, Vec<Skill>> = HashMap::new();
        for (job_id, id, name, category) in rows {
            by_job
                .entry(job_id)
                .or_default()
                .push(Skill { id, name, category });
        }
        Ok(by_job)
    }

    async fn attach_skills(&self, rows: Vec<JobRow>) -> Result<Vec<Job>, AppError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut skills = self.skills_by_job(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let required = skills.remove(&row.id).unwrap_or_default();
                Job::from_row(row, required)
            })
            .collect())
    }
}

/// Fails with `NotFound` unless every id refers to an existing skill.
async fn ensure_skills_exist(
    tx: &mut Transaction<'_, Postgres>,
    skill_ids: &[Uuid],
) -> Result<(), AppError> {
    if skill_ids.is_empty() {
        return Ok(());
    }

    let found: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM skills WHERE id = ANY($1)")
        .bind(skill_ids)
        .fetch_all(&mut **tx)
        .await?;

    let missing: Vec<String> = skill_ids
        .iter()
        .filter(|id| !found.contains(id))
        .map(|id| id.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "Skill(s) not found: {}",
            missing.join(", ")
        )))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl JobBoardStore for PgStore {
    async fn create_skill(&self, skill: &NewSkill) -> Result<Skill, AppError> {
        sqlx::query_as::<_, Skill>(
            "INSERT INTO skills (name, category) VALUES ($1, $2) RETURNING id, name, category",
        )
        .bind(&skill.name)
        .bind(&skill.category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Skill already registered".to_string())
            } else {
                AppError::Database(e)
            }
        })
    }

    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, AppError> {
        Ok(sqlx::query_as::<_, Skill>(
            "SELECT id, name, category FROM skills WHERE lower(name) = lower($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list_skills(&self, skip: i64, limit: i64) -> Result<Vec<Skill>, AppError> {
        Ok(sqlx::query_as::<_, Skill>(
            "SELECT id, name, category FROM skills ORDER BY name OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRow, AppError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (phone_number, hashed_password, name, role, location_area)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&user.phone_number)
        .bind(&user.hashed_password)
        .bind(&user.name)
        .bind(user.role)
        .bind(&user.location_area)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Phone number already registered".to_string())
            } else {
                AppError::Database(e)
            }
        })
    }

    async fn find_user_by_phone(&self, phone_number: &str) -> Result<Option<UserRow>, AppError> {
        Ok(
            sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE phone_number = $1")
                .bind(phone_number)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn skills_for_user(&self, user_id: Uuid) -> Result<Vec<Skill>, AppError> {
        Ok(sqlx::query_as::<_, Skill>(
            r#"
            SELECT s.id, s.name, s.category
            FROM user_skills us
            JOIN skills s ON s.id = us.skill_id
            WHERE us.user_id = $1
            ORDER BY s.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn replace_user_skills(
        &self,
        user_id: Uuid,
        skill_ids: &[Uuid],
    ) -> Result<Vec<Skill>, AppError> {
        let skill_ids = distinct_ids(skill_ids);
        let mut tx = self.pool.begin().await?;

        ensure_skills_exist(&mut tx, &skill_ids).await?;

        sqlx::query("DELETE FROM user_skills WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO user_skills (user_id, skill_id) SELECT $1, UNNEST($2::uuid[])")
            .bind(user_id)
            .bind(&skill_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("Replaced skill set for user {user_id} ({} skills)", skill_ids.len());

        self.skills_for_user(user_id).await
    }

    async fn create_job(&self, job: &NewJob, owner_id: Uuid) -> Result<Job, AppError> {
        let skill_ids = distinct_ids(&job.required_skill_ids);
        let mut tx = self.pool.begin().await?;

        ensure_skills_exist(&mut tx, &skill_ids).await?;

        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (title, description, location_area, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location_area)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO job_skills (job_id, skill_id) SELECT $1, UNNEST($2::uuid[])")
            .bind(row.id)
            .bind(&skill_ids)
            .execute(&mut *tx)
            .await?;

        let required = sqlx::query_as::<_, Skill>(
            "SELECT id, name, category FROM skills WHERE id = ANY($1) ORDER BY name",
        )
        .bind(&skill_ids)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Job::from_row(row, required))
    }

    async fn required_skills_for_job(&self, job_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        Ok(
            sqlx::query_scalar("SELECT skill_id FROM job_skills WHERE job_id = $1")
                .bind(job_id)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn list_jobs(&self, skip: i64, limit: Option<i64>) -> Result<Vec<Job>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT * FROM jobs ORDER BY created_at DESC, id OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        self.attach_skills(rows).await
    }

    async fn jobs_owned_by(&self, owner_id: Uuid) -> Result<Vec<Job>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT * FROM jobs WHERE owner_id = $1 ORDER BY created_at DESC, id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_skills(rows).await
    }

    async fn seeker_profiles(&self) -> Result<Vec<SeekerProfile>, AppError> {
        Ok(sqlx::query_as::<_, SeekerProfile>(
            r#"
            SELECT u.id, u.name, u.phone_number, u.role,
                   COALESCE(
                       array_agg(us.skill_id) FILTER (WHERE us.skill_id IS NOT NULL),
                       '{}'::uuid[]
                   ) AS skill_ids
            FROM users u
            LEFT JOIN user_skills us ON us.user_id = u.id
            WHERE u.role = 'seeker' AND u.is_active
            GROUP BY u.id
            ORDER BY u.phone_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }
}
