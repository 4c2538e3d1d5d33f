// Prompt templates for the analysis pipeline. Placeholders in braces are
// substituted with `fill_prompt` before sending.

/// Substitutes `{name}` placeholders in a single left-to-right pass, so text
/// inserted for one placeholder is never scanned for another. Braces that do
/// not name a known placeholder are copied through.
pub fn fill_prompt(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let hit = values.iter().find_map(|(name, value)| {
            tail.strip_prefix('{')
                .and_then(|t| t.strip_prefix(*name))
                .and_then(|t| t.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Skill extraction. Replace `{content_type}` and `{text}`.
pub const SKILL_EXTRACTION_PROMPT: &str = r#"Extract the professional skills from the following {content_type}.

Include technical skills (languages, frameworks, tools, platforms, methodologies)
and clearly stated domain skills. Use the wording that appears in the text.
Do NOT invent skills that are not supported by the text.

{content_type} TEXT:
{text}

Return ONLY a JSON object with this exact shape and nothing else:
{"skills": ["skill one", "skill two"]}"#;

/// Skill matching. Replace `{job_skills}` and `{resume_skills}` with JSON arrays.
pub const SKILL_MATCH_PROMPT: &str = r#"Compare the skills required by a job description with the skills found in a resume.

JOB DESCRIPTION SKILLS:
{job_skills}

RESUME SKILLS:
{resume_skills}

RULES:
1. Treat synonyms, abbreviations and acronyms as the same skill
   (for example "JS" and "JavaScript", "AWS" and "Amazon Web Services", "k8s" and "Kubernetes").
2. Ignore differences in casing, punctuation and version suffixes.
3. "matching_skills" lists job description skills that the resume covers, using the job description wording.
4. "missing_skills" lists job description skills that the resume does not cover, using the job description wording.
5. "match_percentage" is an integer from 0 to 100 expressing overall alignment.

Return ONLY strict JSON with this exact shape and nothing else:
{"matching_skills": ["..."], "missing_skills": ["..."], "match_percentage": 0}"#;

/// Project suggestions. Replace `{missing_skills}` with a JSON array.
pub const PROJECT_SUGGESTION_PROMPT: &str = r#"A candidate is missing the following skills for a job:
{missing_skills}

Suggest practical projects the candidate can complete in 2 to 3 days to learn and demonstrate these skills.

FORMAT RULES:
- One project per line.
- Start every line with "- " and use no other bullet marker.
- No headings, numbering, bold, italics or any other markup.
- No introduction or closing remarks."#;
