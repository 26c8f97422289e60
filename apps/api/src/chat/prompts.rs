/// System prompt for query extraction — enforces JSON-only output.
pub const QUERY_EXTRACTION_SYSTEM: &str =
    "You are a helpful assistant for the SkillSetu job board, a platform for jobs in Surat, India. \
    Your only task is to turn a job seeker's question into a search query. \
    Do not make up skills or locations the user did not mention. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Extraction prompt template. Replace `{message}` before sending.
pub const QUERY_EXTRACTION_TEMPLATE: &str = r#"Extract the job search criteria from the message below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skill": "words describing the skill, or an empty string",
  "location": "area or city, or an empty string"
}

Message:
{message}"#;

/// Reply when neither a skill nor a location could be found in the message.
pub const ASK_FOR_CRITERIA: &str =
    "I can search for jobs by skill, by location, or both. Which skill or area should I look for?";
