//! Types shared by the exam dashboard: session and profile model, backend
//! wire types, entity definitions and configuration loading.

pub mod config;
pub mod types;
