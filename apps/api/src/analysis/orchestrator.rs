//! Gap analysis: orchestrates the full pipeline for one request.
//!
//! Flow: validate input → extract job skills → extract resume skills →
//!       match skills → suggest projects → response.
//!
//! Stages run strictly in sequence; each stage's output is the next one's
//! input. Nothing is retried here. A transport failure in any stage aborts the
//! whole analysis, so callers never see a partially filled result.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::info;

use crate::analysis::matcher::match_skills;
use crate::analysis::models::{ContentType, GapAnalysis};
use crate::analysis::projects::{suggest_projects, SuggestionPolicy};
use crate::analysis::skills::extract_skills;
use crate::errors::AppError;
use crate::llm_client::{LanguageModel, LlmError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ExtractJobSkills,
    ExtractResumeSkills,
    MatchSkills,
    SuggestProjects,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ExtractJobSkills => "extract job skills",
            Stage::ExtractResumeSkills => "extract resume skills",
            Stage::MatchSkills => "match skills",
            Stage::SuggestProjects => "suggest projects",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AnalysisSettings {
    /// Bound on a single stage, i.e. one model round trip.
    pub stage_timeout: Duration,
    pub suggestions: SuggestionPolicy,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            stage_timeout: Duration::from_secs(180),
            suggestions: SuggestionPolicy::default(),
        }
    }
}

/// Runs the end-to-end analysis.
///
/// Both texts must contain something other than whitespace; otherwise this
/// fails with `MissingInput` before the model is contacted.
pub async fn analyze_gap(
    job_text: &str,
    resume_text: &str,
    llm: &dyn LanguageModel,
    settings: &AnalysisSettings,
) -> Result<GapAnalysis, AppError> {
    if job_text.trim().is_empty() {
        return Err(AppError::MissingInput(
            "job_description cannot be empty".to_string(),
        ));
    }
    if resume_text.trim().is_empty() {
        return Err(AppError::MissingInput(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let limit = settings.stage_timeout;

    let job_skills = run_stage(
        Stage::ExtractJobSkills,
        limit,
        extract_skills(job_text, ContentType::JobDescription, llm),
    )
    .await?;

    let resume_skills = run_stage(
        Stage::ExtractResumeSkills,
        limit,
        extract_skills(resume_text, ContentType::Resume, llm),
    )
    .await?;

    info!(
        job_skills = job_skills.len(),
        resume_skills = resume_skills.len(),
        "Skills extracted"
    );

    let match_result = run_stage(
        Stage::MatchSkills,
        limit,
        match_skills(&job_skills, &resume_skills, llm),
    )
    .await?;

    let suggestions = run_stage(
        Stage::SuggestProjects,
        limit,
        suggest_projects(&match_result.missing_skills, llm, settings.suggestions),
    )
    .await?;

    info!(
        match_percentage = match_result.match_percentage,
        missing = match_result.missing_skills.len(),
        suggestions = suggestions.len(),
        "Gap analysis complete"
    );

    Ok(GapAnalysis::new(match_result, suggestions))
}

/// Bounds one stage by `limit` and translates model failures into the
/// caller-facing taxonomy: `Timeout` or `UpstreamService`.
pub async fn run_stage<T, F>(stage: Stage, limit: Duration, stage_future: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, LlmError>>,
{
    match tokio::time::timeout(limit, stage_future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(LlmError::Timeout(after))) => Err(AppError::Timeout(format!(
            "{stage}: model call exceeded {after:?}"
        ))),
        Ok(Err(e)) => Err(AppError::UpstreamService(format!("{stage}: {e}"))),
        Err(_) => Err(AppError::Timeout(format!("{stage}: exceeded {limit:?}"))),
    }
}
