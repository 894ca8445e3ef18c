// Scoring and gap analysis. Everything except `handlers` is pure and synchronous.
pub mod catalog;
pub mod coverage;
pub mod engine;
pub mod extractor;
pub mod handlers;
pub mod readiness;
pub mod roadmap;
pub mod similarity;
pub mod suggestions;
