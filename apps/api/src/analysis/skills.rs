//! Skill extraction: text + content type in, `SkillSet` out.
//!
//! Malformed model output degrades to an empty set; only transport failures
//! from the model are returned as errors.

use tracing::{debug, warn};

use crate::analysis::models::{ContentType, SkillSet};
use crate::analysis::prompts::{fill_prompt, SKILL_EXTRACTION_PROMPT};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json_object, LanguageModel, LlmError};

pub async fn extract_skills(
    text: &str,
    content_type: ContentType,
    llm: &dyn LanguageModel,
) -> Result<SkillSet, LlmError> {
    let prompt = fill_prompt(
        SKILL_EXTRACTION_PROMPT,
        &[("content_type", content_type.label()), ("text", text)],
    );

    let raw = llm.complete(&prompt, JSON_ONLY_SYSTEM).await?;
    let skills = parse_skills(&raw);

    debug!(
        content_type = content_type.label(),
        count = skills.len(),
        "Extracted skills"
    );
    Ok(skills)
}

/// Reads `{"skills": [...]}` from raw model output, fences allowed.
pub fn parse_skills(raw: &str) -> SkillSet {
    let Some(object) = parse_json_object(raw) else {
        return SkillSet::new();
    };

    match object.get("skills").and_then(SkillSet::from_json_array) {
        Some(skills) => skills,
        None => {
            warn!("Model response has no usable 'skills' array; using an empty skill set");
            SkillSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    #[tokio::test]
    async fn test_fenced_response_is_unwrapped() {
        let model = ScriptedModel::new(["```json\n{\"skills\": [\"Go\"]}\n```"]);
        let skills = extract_skills("We need Go", ContentType::JobDescription, &model)
            .await
            .unwrap();
        assert_eq!(skills.as_slice(), ["Go"]);
    }

    #[tokio::test]
    async fn test_prompt_is_scoped_to_content_type() {
        let model = ScriptedModel::new([r#"{"skills": []}"#]);
        extract_skills("Built ETL jobs in Spark", ContentType::Resume, &model)
            .await
            .unwrap();

        let prompt = &model.prompts()[0];
        assert!(prompt.contains("following resume"));
        assert!(prompt.contains("Built ETL jobs in Spark"));
        assert!(prompt.contains(r#"{"skills": ["#));
    }

    #[tokio::test]
    async fn test_non_json_response_yields_empty_set() {
        let model = ScriptedModel::new(["I found these skills: Go, Rust."]);
        let skills = extract_skills("text", ContentType::Resume, &model).await.unwrap();
        assert!(skills.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let model = ScriptedModel::failing(LlmError::RateLimited { retries: 3 });
        let result = extract_skills("text", ContentType::Resume, &model).await;
        assert!(matches!(result, Err(LlmError::RateLimited { .. })));
    }

    #[test]
    fn test_prose_around_fenced_response_is_tolerated() {
        let trailing = parse_skills("```json\n{\"skills\": [\"Go\"]}\n```\nLet me know if you need more.");
        let leading = parse_skills("Here are the skills:\n```json\n{\"skills\": [\"Go\"]}\n```");
        assert_eq!(trailing.as_slice(), ["Go"]);
        assert_eq!(leading.as_slice(), ["Go"]);
    }

    #[test]
    fn test_missing_skills_key_yields_empty_set() {
        assert!(parse_skills(r#"{"competencies": ["Go"]}"#).is_empty());
    }

    #[test]
    fn test_skills_not_an_array_yields_empty_set() {
        assert!(parse_skills(r#"{"skills": "Go, Rust"}"#).is_empty());
    }

    #[test]
    fn test_duplicates_collapse_but_case_variants_stay() {
        let skills = parse_skills(r#"{"skills": ["AWS", "aws", "AWS", "Docker"]}"#);
        assert_eq!(skills.as_slice(), ["AWS", "aws", "Docker"]);
    }

    #[test]
    fn test_empty_response_yields_empty_set() {
        assert!(parse_skills("").is_empty());
    }
}
