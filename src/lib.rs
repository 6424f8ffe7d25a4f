//! Core library for the job-application wizard: step sequencing, candidate
//! details collection and validation, screening assessments, preview
//! aggregation, and draft persistence. Hosted persistence, authentication,
//! and storage stay behind the collaborator traits in
//! [`workflows::application`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
