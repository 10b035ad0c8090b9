/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// League queries and player mutations.
pub mod league_service;
