/// Player and league definitions.
pub mod models;
/// Player store contract and its backends.
pub mod player_store;
/// Storage error taxonomy.
pub mod storage;
/// Whole-document overwrite writer.
pub mod tape;
