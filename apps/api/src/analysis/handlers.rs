//! Axum route handlers for the analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::matcher::match_skills;
use crate::analysis::models::{ContentType, GapAnalysis, MatchResult, SkillSet};
use crate::analysis::orchestrator::{analyze_gap, run_stage, Stage};
use crate::analysis::projects::suggest_projects;
use crate::analysis::skills::extract_skills;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Missing fields deserialize as empty so they are reported as `MissingInput`
/// rather than a JSON rejection.
#[derive(Debug, Deserialize)]
pub struct GapAnalysisRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    #[serde(default)]
    pub text: String,
    pub content_type: ContentType,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: SkillSet,
}

#[derive(Debug, Deserialize)]
pub struct MatchSkillsRequest {
    pub job_skills: SkillSet,
    pub resume_skills: SkillSet,
}

#[derive(Debug, Deserialize)]
pub struct SuggestProjectsRequest {
    pub missing_skills: SkillSet,
}

#[derive(Debug, Serialize)]
pub struct SuggestProjectsResponse {
    pub project_suggestions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /resume-gap-analysis
pub async fn handle_gap_analysis(
    State(state): State<AppState>,
    Json(request): Json<GapAnalysisRequest>,
) -> Result<Json<GapAnalysis>, AppError> {
    let analysis = analyze_gap(
        &request.job_description,
        &request.resume_text,
        state.llm.as_ref(),
        &state.analysis,
    )
    .await?;

    Ok(Json(analysis))
}

/// POST /api/v1/skills/extract
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractSkillsRequest>,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::MissingInput("text cannot be empty".to_string()));
    }

    let stage = match request.content_type {
        ContentType::JobDescription => Stage::ExtractJobSkills,
        ContentType::Resume => Stage::ExtractResumeSkills,
    };
    let skills = run_stage(
        stage,
        state.analysis.stage_timeout,
        extract_skills(&request.text, request.content_type, state.llm.as_ref()),
    )
    .await?;

    Ok(Json(ExtractSkillsResponse { skills }))
}

/// POST /api/v1/skills/match
pub async fn handle_match_skills(
    State(state): State<AppState>,
    Json(request): Json<MatchSkillsRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let result = run_stage(
        Stage::MatchSkills,
        state.analysis.stage_timeout,
        match_skills(&request.job_skills, &request.resume_skills, state.llm.as_ref()),
    )
    .await?;

    Ok(Json(result))
}

/// POST /api/v1/projects/suggest
pub async fn handle_suggest_projects(
    State(state): State<AppState>,
    Json(request): Json<SuggestProjectsRequest>,
) -> Result<Json<SuggestProjectsResponse>, AppError> {
    let project_suggestions = run_stage(
        Stage::SuggestProjects,
        state.analysis.stage_timeout,
        suggest_projects(
            &request.missing_skills,
            state.llm.as_ref(),
            state.analysis.suggestions,
        ),
    )
    .await?;

    Ok(Json(SuggestProjectsResponse {
        project_suggestions,
    }))
}
