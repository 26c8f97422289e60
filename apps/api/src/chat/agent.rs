//! Chat agents — pluggable interpreters from a free-text question to a `JobQuery`.
//!
//! `AppState` holds an `Option<Arc<dyn ChatAgent>>`; `None` disables the chat endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::chat::prompts::{ASK_FOR_CRITERIA, QUERY_EXTRACTION_SYSTEM, QUERY_EXTRACTION_TEMPLATE};
use crate::errors::AppError;
use crate::jobs::search::find_jobs;
use crate::llm_client::LlmClient;
use crate::store::JobBoardStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobQuery {
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub location: String,
}

#[async_trait]
pub trait ChatAgent: Send + Sync {
    async fn interpret(&self, message: &str) -> Result<JobQuery, AppError>;
}

/// Uses Claude to extract `{skill, location}` from the message.
pub struct LlmChatAgent(pub LlmClient);

#[async_trait]
impl ChatAgent for LlmChatAgent {
    async fn interpret(&self, message: &str) -> Result<JobQuery, AppError> {
        let prompt = QUERY_EXTRACTION_TEMPLATE.replace("{message}", message);
        self.0
            .complete_json::<JobQuery>(&prompt, QUERY_EXTRACTION_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Query extraction failed: {e}")))
    }
}

/// Interprets the message, runs the job search, and renders a reply.
/// A query with no criteria yields a follow-up question rather than an error.
pub async fn answer(
    agent: &dyn ChatAgent,
    store: &dyn JobBoardStore,
    message: &str,
) -> Result<String, AppError> {
    let query = agent.interpret(message).await?;
    debug!(skill = %query.skill, location = %query.location, "Chat query extracted");

    let jobs = store.list_jobs(0, None).await?;
    match find_jobs(&jobs, Some(query.skill.as_str()), Some(query.location.as_str())) {
        Ok(outcome) => Ok(outcome.render()),
        Err(AppError::InvalidQuery(_)) => Ok(ASK_FOR_CRITERIA.to_string()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::search::NO_JOBS_FOUND;
    use crate::models::job::NewJob;
    use crate::models::user::Role;
    use crate::store::memory::MemoryStore;

    struct FixedAgent(JobQuery);

    #[async_trait]
    impl ChatAgent for FixedAgent {
        async fn interpret(&self, _message: &str) -> Result<JobQuery, AppError> {
            Ok(self.0.clone())
        }
    }

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        let employer = store.insert_user("9100000001", "Mehta Textiles", Role::Employer);
        let backend = store.insert_skill("Backend Development");
        let design = store.insert_skill("Graphic Design");
        for (title, skill) in [("API Developer", backend.id), ("Poster Artist", design.id)] {
            store
                .create_job(
                    &NewJob {
                        title: title.to_string(),
                        description: None,
                        location_area: "Vesu, Surat".to_string(),
                        required_skill_ids: vec![skill],
                    },
                    employer.id,
                )
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_answer_lists_matching_jobs() {
        let store = seeded_store().await;
        let agent = FixedAgent(JobQuery {
            skill: "python backend".to_string(),
            location: String::new(),
        });

        let reply = answer(&agent, &store, "any backend work?").await.unwrap();
        assert_eq!(reply, "I found the following jobs:\n- 'API Developer' in Vesu, Surat");
    }

    #[tokio::test]
    async fn test_answer_reports_no_jobs() {
        let store = seeded_store().await;
        let agent = FixedAgent(JobQuery {
            skill: String::new(),
            location: "Ahmedabad".to_string(),
        });

        let reply = answer(&agent, &store, "jobs in Ahmedabad?").await.unwrap();
        assert_eq!(reply, NO_JOBS_FOUND);
    }

    #[tokio::test]
    async fn test_empty_query_asks_for_criteria() {
        let store = seeded_store().await;
        let agent = FixedAgent(JobQuery::default());

        let reply = answer(&agent, &store, "hello").await.unwrap();
        assert_eq!(reply, ASK_FOR_CRITERIA);
    }

    #[test]
    fn test_job_query_tolerates_missing_fields() {
        let query: JobQuery = serde_json::from_str(r#"{"location": "Surat"}"#).unwrap();
        assert_eq!(query.skill, "");
        assert_eq!(query.location, "Surat");
    }
}
