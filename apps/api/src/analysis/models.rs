use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered skill names, unique by exact string.
///
/// No normalization: "AWS" and "aws" are two entries. Semantic matching is the
/// model's job, not this type's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `skill` unless an identical string is already present.
    /// Returns whether it was inserted.
    pub fn insert(&mut self, skill: impl Into<String>) -> bool {
        let skill = skill.into();
        if self.0.contains(&skill) {
            return false;
        }
        self.0.push(skill);
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// JSON array literal, for embedding in prompts.
    pub fn to_json_array(&self) -> String {
        Value::from(self.0.clone()).to_string()
    }

    /// Reads a JSON array of strings. Non-string and blank entries are
    /// skipped; anything other than an array yields `None`.
    pub fn from_json_array(value: &Value) -> Option<Self> {
        value.as_array().map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .collect()
        })
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(skills: Vec<String>) -> Self {
        skills.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.0
    }
}

/// The kind of document a text blob came from. Scopes the extraction prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "job description", alias = "job_description")]
    JobDescription,
    #[serde(rename = "resume")]
    Resume,
}

impl ContentType {
    pub fn label(self) -> &'static str {
        match self {
            ContentType::JobDescription => "job description",
            ContentType::Resume => "resume",
        }
    }
}

/// Model-reported comparison of two skill sets.
///
/// `match_percentage` is taken as reported; it is not reconciled with the set
/// sizes. `Default` is the degraded result used when the model's answer is
/// unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matching_skills: SkillSet,
    pub missing_skills: SkillSet,
    pub match_percentage: u8,
}

/// End-to-end gap analysis output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapAnalysis {
    pub match_percentage: u8,
    pub matching_skills: SkillSet,
    pub missing_skills: SkillSet,
    pub project_suggestions: Vec<String>,
}

impl GapAnalysis {
    pub fn new(result: MatchResult, project_suggestions: Vec<String>) -> Self {
        Self {
            match_percentage: result.match_percentage,
            matching_skills: result.matching_skills,
            missing_skills: result.missing_skills,
            project_suggestions,
        }
    }
}
