//! Résumé screener: classifies an uploaded résumé into a job-role category,
//! scores it against the role's keyword profile and attaches LLM feedback.

pub mod config;
pub mod errors;
pub mod extract;
pub mod feedback;
pub mod llm_client;
pub mod model;
pub mod models;
pub mod routes;
pub mod screening;
pub mod state;
pub mod storage;
pub mod text;
