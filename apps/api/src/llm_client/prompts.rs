// Shared prompt fragments. Each module that needs model calls keeps its own
// prompts.rs alongside it; only cross-cutting pieces live here.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text answers that must stay free of markup.
pub const PLAIN_TEXT_SYSTEM: &str = "You are a concise career coach. \
    Answer with plain text only. \
    Do NOT use markdown headings, bold, italics, numbering or code fences.";
