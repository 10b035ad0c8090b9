//! Library crate for player-league, exposing modules for binaries and integration tests.

pub mod config;
/// Player persistence: models, stores and the document writer.
pub mod dao;
mod dto;
mod error;
pub mod game;
/// HTTP route trees.
pub mod routes;
/// Async service layer between routes and stores.
pub mod services;
/// Shared application state.
pub mod state;
