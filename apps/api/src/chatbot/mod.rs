//! HR assistant: intent detection, context enrichment, and LLM replies.

pub mod handlers;
pub mod intent;
pub mod prompts;
