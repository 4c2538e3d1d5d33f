//! Project suggestions: missing skills in, one suggestion per line out.
//!
//! No structural validation beyond the line split: malformed model output
//! surfaces as malformed lines. Blank lines are kept unless the policy drops
//! them.

use tracing::debug;

use crate::analysis::models::SkillSet;
use crate::analysis::prompts::{fill_prompt, PROJECT_SUGGESTION_PROMPT};
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::{LanguageModel, LlmError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionPolicy {
    pub drop_blank_lines: bool,
}

pub async fn suggest_projects(
    missing_skills: &SkillSet,
    llm: &dyn LanguageModel,
    policy: SuggestionPolicy,
) -> Result<Vec<String>, LlmError> {
    let missing_json = missing_skills.to_json_array();
    let prompt = fill_prompt(PROJECT_SUGGESTION_PROMPT, &[("missing_skills", missing_json.as_str())]);

    let raw = llm.complete(&prompt, PLAIN_TEXT_SYSTEM).await?;
    let suggestions = split_suggestions(&raw, policy);

    debug!(lines = suggestions.len(), "Received project suggestions");
    Ok(suggestions)
}

pub fn split_suggestions(raw: &str, policy: SuggestionPolicy) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !(policy.drop_blank_lines && line.is_empty()))
        .collect()
}
