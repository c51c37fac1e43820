//! Recruitment domain: job postings, candidates, applications, and
//! LLM-backed screening.

pub mod handlers;
pub mod prompts;
pub mod screening;
