// Email generation: tone selection, advanced (analysis-driven) and basic prompts.
// All LLM calls go through llm_client — no direct API calls here.

pub mod generator;
pub mod prompts;
pub mod tone;
