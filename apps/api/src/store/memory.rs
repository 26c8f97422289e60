//! In-memory `JobBoardStore` for tests. Mirrors `PgStore` semantics closely enough to
//! exercise handlers and the job-posting pipeline without a database.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, JobRow, NewJob};
use crate::models::skill::{NewSkill, Skill};
use crate::models::user::{NewUser, Role, SeekerProfile, UserRow};
use crate::store::{distinct_ids, JobBoardStore};

#[derive(Default)]
struct Tables {
    users: Vec<UserRow>,
    skills: Vec<Skill>,
    jobs: Vec<JobRow>,
    user_skills: Vec<(Uuid, Uuid)>,
    job_skills: Vec<(Uuid, Uuid)>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    job_writes: AtomicUsize,
    fail_seeker_query: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `create_job` calls.
    pub fn job_writes(&self) -> usize {
        self.job_writes.load(Ordering::SeqCst)
    }

    /// Makes `seeker_profiles` fail, simulating a store outage during fan-out.
    pub fn fail_seeker_queries(&self) {
        self.fail_seeker_query.store(true, Ordering::SeqCst);
    }

    pub fn insert_user(&self, phone_number: &str, name: &str, role: Role) -> UserRow {
        let row = UserRow {
            id: Uuid::new_v4(),
            phone_number: phone_number.to_string(),
            hashed_password: String::new(),
            name: name.to_string(),
            role,
            location_area: "Surat".to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().users.push(row.clone());
        row
    }

    pub fn deactivate(&self, user_id: Uuid) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) {
            user.is_active = false;
        }
    }

    pub fn insert_skill(&self, name: &str) -> Skill {
        let skill = Skill {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: "general".to_string(),
        };
        self.tables.lock().unwrap().skills.push(skill.clone());
        skill
    }

    /// Attaches skills without role checks, for seeding fixtures.
    pub fn give_skills(&self, user_id: Uuid, skills: &[&Skill]) {
        let mut tables = self.tables.lock().unwrap();
        for skill in skills {
            if !tables.user_skills.contains(&(user_id, skill.id)) {
                tables.user_skills.push((user_id, skill.id));
            }
        }
    }

    fn job_with_skills(tables: &Tables, row: &JobRow) -> Job {
        let mut required: Vec<Skill> = tables
            .job_skills
            .iter()
            .filter(|(job_id, _)| *job_id == row.id)
            .filter_map(|(_, skill_id)| tables.skills.iter().find(|s| s.id == *skill_id).cloned())
            .collect();
        required.sort_by(|a, b| a.name.cmp(&b.name));
        Job::from_row(row.clone(), required)
    }

    fn check_skills(tables: &Tables, skill_ids: &[Uuid]) -> Result<(), AppError> {
        let missing: Vec<String> = skill_ids
            .iter()
            .filter(|id| !tables.skills.iter().any(|s| s.id == **id))
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
}

#[async_trait]
impl JobBoardStore for MemoryStore {
    async fn create_skill(&self, skill: &NewSkill) -> Result<Skill, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .skills
            .iter()
            .any(|s| s.name.to_lowercase() == skill.name.to_lowercase())
        {
            return Err(AppError::Conflict("Skill already registered".to_string()));
        }
        let created = Skill {
            id: Uuid::new_v4(),
            name: skill.name.clone(),
            category: skill.category.clone(),
        };
        tables.skills.push(created.clone());
        Ok(created)
    }

    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .skills
            .iter()
            .find(|s| s.name.to_lowercase() == name.to_lowercase())
            .cloned())
    }

    async fn list_skills(&self, skip: i64, limit: i64) -> Result<Vec<Skill>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut skills = tables.skills.clone();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRow, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.phone_number == user.phone_number) {
            return Err(AppError::Conflict("Phone number already registered".to_string()));
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            phone_number: user.phone_number.clone(),
            hashed_password: user.hashed_password.clone(),
            name: user.name.clone(),
            role: user.role,
            location_area: user.location_area.clone(),
            is_active: true,
            created_at: Utc::now(),
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn find_user_by_phone(&self, phone_number: &str) -> Result<Option<UserRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn skills_for_user(&self, user_id: Uuid) -> Result<Vec<Skill>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut skills: Vec<Skill> = tables
            .user_skills
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, sid)| tables.skills.iter().find(|s| s.id == *sid).cloned())
            .collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills)
    }

    async fn replace_user_skills(
        &self,
        user_id: Uuid,
        skill_ids: &[Uuid],
    ) -> Result<Vec<Skill>, AppError> {
        let skill_ids = distinct_ids(skill_ids);
        {
            let mut tables = self.tables.lock().unwrap();
            Self::check_skills(&tables, &skill_ids)?;
            tables.user_skills.retain(|(uid, _)| *uid != user_id);
            for skill_id in &skill_ids {
                tables.user_skills.push((user_id, *skill_id));
            }
        }
        self.skills_for_user(user_id).await
    }

    async fn create_job(&self, job: &NewJob, owner_id: Uuid) -> Result<Job, AppError> {
        let skill_ids = distinct_ids(&job.required_skill_ids);
        let mut tables = self.tables.lock().unwrap();
        Self::check_skills(&tables, &skill_ids)?;

        let row = JobRow {
            id: Uuid::new_v4(),
            title: job.title.clone(),
            description: job.description.clone(),
            location_area: job.location_area.clone(),
            owner_id,
            created_at: Utc::now(),
        };
        tables.jobs.push(row.clone());
        for skill_id in skill_ids {
            tables.job_skills.push((row.id, skill_id));
        }
        self.job_writes.fetch_add(1, Ordering::SeqCst);
        Ok(Self::job_with_skills(&tables, &row))
    }

    async fn required_skills_for_job(&self, job_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .job_skills
            .iter()
            .filter(|(jid, _)| *jid == job_id)
            .map(|(_, sid)| *sid)
            .collect())
    }

    async fn list_jobs(&self, skip: i64, limit: Option<i64>) -> Result<Vec<Job>, AppError> {
        let tables = self.tables.lock().unwrap();
        let limit = limit.map(|l| l.max(0) as usize).unwrap_or(usize::MAX);
        Ok(tables
            .jobs
            .iter()
            .rev()
            .skip(skip.max(0) as usize)
            .take(limit)
            .map(|row| Self::job_with_skills(&tables, row))
            .collect())
    }

    async fn jobs_owned_by(&self, owner_id: Uuid) -> Result<Vec<Job>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .jobs
            .iter()
            .rev()
            .filter(|row| row.owner_id == owner_id)
            .map(|row| Self::job_with_skills(&tables, row))
            .collect())
    }

    async fn seeker_profiles(&self) -> Result<Vec<SeekerProfile>, AppError> {
        if self.fail_seeker_query.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!("store unreachable")));
        }
        let tables = self.tables.lock().unwrap();
        let mut seekers: Vec<SeekerProfile> = tables
            .users
            .iter()
            .filter(|u| u.role == Role::Seeker && u.is_active)
            .map(|u| SeekerProfile {
                id: u.id,
                name: u.name.clone(),
                phone_number: u.phone_number.clone(),
                role: u.role,
                skill_ids: tables
                    .user_skills
                    .iter()
                    .filter(|(uid, _)| *uid == u.id)
                    .map(|(_, sid)| *sid)
                    .collect(),
            })
            .collect();
        seekers.sort_by(|a, b| a.phone_number.cmp(&b.phone_number));
        Ok(seekers)
    }
}
