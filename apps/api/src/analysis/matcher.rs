//! Skill matching: job and resume skill sets in, `MatchResult` out.
//!
//! The comparison itself (synonyms, acronyms) is delegated to the model. This
//! module builds the request and validates the shape of the answer. Any
//! structural problem yields `MatchResult::default()`.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::analysis::models::{MatchResult, SkillSet};
use crate::analysis::prompts::{fill_prompt, SKILL_MATCH_PROMPT};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json_object, LanguageModel, LlmError};

pub async fn match_skills(
    job_skills: &SkillSet,
    resume_skills: &SkillSet,
    llm: &dyn LanguageModel,
) -> Result<MatchResult, LlmError> {
    let job_json = job_skills.to_json_array();
    let resume_json = resume_skills.to_json_array();
    let prompt = fill_prompt(
        SKILL_MATCH_PROMPT,
        &[("job_skills", job_json.as_str()), ("resume_skills", resume_json.as_str())],
    );

    let raw = llm.complete(&prompt, JSON_ONLY_SYSTEM).await?;
    let result = parse_match_result(&raw);

    debug!(
        matching = result.matching_skills.len(),
        missing = result.missing_skills.len(),
        percentage = result.match_percentage,
        "Matched skills"
    );
    Ok(result)
}

/// Reads the match object from raw model output. All three fields must be
/// present and well-formed, otherwise the zeroed result is returned.
pub fn parse_match_result(raw: &str) -> MatchResult {
    parse_json_object(raw)
        .and_then(|object| match_result_from_object(&object))
        .unwrap_or_else(|| {
            warn!("Model match response is malformed; using a zeroed match result");
            MatchResult::default()
        })
}

fn match_result_from_object(object: &Map<String, Value>) -> Option<MatchResult> {
    Some(MatchResult {
        matching_skills: SkillSet::from_json_array(object.get("matching_skills")?)?,
        missing_skills: SkillSet::from_json_array(object.get("missing_skills")?)?,
        match_percentage: percentage(object.get("match_percentage")?)?,
    })
}

/// Integer 0–100. A fractional value in range is rounded; anything else is
/// rejected rather than clamped.
fn percentage(value: &Value) -> Option<u8> {
    if let Some(n) = value.as_u64() {
        return u8::try_from(n).ok().filter(|p| *p <= 100);
    }
    value
        .as_f64()
        .filter(|f| (0.0..=100.0).contains(f))
        .map(|f| f.round() as u8)
}
