// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction that enforces JSON-only output. Completion-style backends have
/// no separate system channel, so this is embedded at the top of the prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "You are a precise, structured assistant. \
You MUST respond with valid JSON only. \
Do NOT include any text outside the JSON object. \
Do NOT use markdown code fences. \
Do NOT include explanations or apologies.";
