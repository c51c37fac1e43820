//! Analytics — aggregation queries, the turnover risk estimator, and
//! LLM-narrated insight over the aggregated numbers.

pub mod handlers;
pub mod insights;
pub mod prompts;
pub mod queries;
pub mod risk;
