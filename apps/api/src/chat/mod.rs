// Conversational job search. The language model only interprets the question;
// answers always come from `jobs::search::find_jobs`.

pub mod agent;
pub mod handlers;
pub mod prompts;
