//! Employee domain: CRUD, performance evaluations, and per-employee
//! turnover-risk assessment.

pub mod handlers;
pub mod insights;
pub mod prompts;
