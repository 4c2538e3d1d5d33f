// Skill gap analysis: skill extraction, matching and project suggestions on
// top of the language model, plus the orchestrator that chains them.
// All model calls go through llm_client::LanguageModel.

pub mod handlers;
pub mod matcher;
pub mod models;
pub mod orchestrator;
pub mod projects;
pub mod prompts;
pub mod skills;
