// src/core/mod.rs

/// Header keys, the inspection report and the fetch error taxonomy.
pub mod models;

/// Fetching response headers and classifying them into a report.
pub mod scanner;

/// The gate every user-supplied URL passes before any network access.
pub mod validator;
